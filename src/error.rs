use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Element not found: {0}")]
    ElementNotFound(u64),

    #[error("Invalid selector: {0}")]
    Selector(String),
}

pub type Result<T> = std::result::Result<T, Error>;
