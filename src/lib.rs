//! Tipsy - tooltip widget engine for a headless document tree.
//!
//! Attaches hover/focus-triggered popup annotations to elements of a
//! retained element tree, computes their placement relative to an anchor
//! element, and drives show/hide transitions off a host-pumped timer queue.

pub mod binder;
pub mod dom;
pub mod error;
pub mod event;
pub mod state;
pub mod tooltip;

pub use binder::{attach, detach, dispatch};
pub use error::{Error, Result};
pub use event::EventKind;
pub use state::{State, TimerAction};
