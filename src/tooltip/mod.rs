//! Tooltip core: gravity codes, placement math, options and the popup
//! controller.

pub mod controller;
mod display;
mod gravity;
mod options;
mod placement;

pub use controller::{FADE_TICK_INTERVAL, FadeState, HoverIntent, TITLE_STASH_ATTR, TipState};
pub use display::DisplaySlot;
pub use gravity::{Direction, Gravity};
pub use options::{Dynamic, Options, TitleSource, Trigger};
pub use placement::{ARROW_HALF_WIDTH, Position, arrow_class, compute_position, orientation_class};
