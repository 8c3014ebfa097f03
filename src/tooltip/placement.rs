//! Placement math: popup coordinates relative to an anchor box.

use crate::dom::AnchorGeometry;

use super::{Direction, Gravity};

/// Half the arrow indicator's width; alignment constant for two-character
/// gravity codes.
pub const ARROW_HALF_WIDTH: f32 = 15.0;

/// Computed popup position: top-left corner in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub top: f32,
    pub left: f32,
}

/// Compute the popup's top-left corner for a measured popup box placed
/// against `anchor` with the given gravity and edge offset.
pub fn compute_position(
    anchor: AnchorGeometry,
    tip_width: f32,
    tip_height: f32,
    gravity: Gravity,
    offset: f32,
) -> Position {
    let centered_left = anchor.left + anchor.width / 2.0 - tip_width / 2.0;
    let centered_top = anchor.top + anchor.height / 2.0 - tip_height / 2.0;

    let mut pos = match gravity.primary {
        // Popup below the anchor, arrow pointing up at it.
        Direction::North => Position {
            top: anchor.top + anchor.height + offset,
            left: centered_left,
        },
        Direction::South => Position {
            top: anchor.top - tip_height - offset,
            left: centered_left,
        },
        Direction::East => Position {
            top: centered_top,
            left: anchor.left - tip_width - offset,
        },
        Direction::West => Position {
            top: centered_top,
            left: anchor.left + anchor.width + offset,
        },
    };

    // The secondary direction biases alignment along the anchor edge so the
    // arrow stays centered over the anchor.
    match gravity.secondary {
        Some(Direction::West) => {
            pos.left = anchor.left + anchor.width / 2.0 - ARROW_HALF_WIDTH;
        }
        Some(_) => {
            pos.left = anchor.left + anchor.width / 2.0 - tip_width + ARROW_HALF_WIDTH;
        }
        None => {}
    }

    pos
}

/// Orientation class for the popup container (full gravity code).
pub fn orientation_class(gravity: Gravity) -> String {
    format!("tipsy-{gravity}")
}

/// Class for the arrow indicator (primary direction only).
pub fn arrow_class(gravity: Gravity) -> String {
    format!("tipsy-arrow-{}", gravity.primary.as_char())
}
