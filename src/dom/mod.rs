//! Minimal retained document tree the tooltip engine runs against.

mod document;
mod element;

pub use document::{AnchorGeometry, Document};
pub use element::{Content, Display, Element, Style, Visibility};
