//! Gravity direction codes for tooltip placement.

use std::fmt;

/// One cardinal direction of a gravity code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'n' => Some(Self::North),
            's' => Some(Self::South),
            'e' => Some(Self::East),
            'w' => Some(Self::West),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Self::North => 'n',
            Self::South => 's',
            Self::East => 'e',
            Self::West => 'w',
        }
    }
}

/// A gravity code: the anchor edge the popup is placed against, plus an
/// optional alignment bias along that edge (e.g. `n`, `ne`, `sw`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gravity {
    pub primary: Direction,
    pub secondary: Option<Direction>,
}

impl Gravity {
    pub const fn new(primary: Direction) -> Self {
        Self { primary, secondary: None }
    }

    pub const fn aligned(primary: Direction, secondary: Direction) -> Self {
        Self { primary, secondary: Some(secondary) }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let primary = Direction::from_char(chars.next()?)?;
        let secondary = match chars.next() {
            Some(c) => Some(Direction::from_char(c)?),
            None => None,
        };
        if chars.next().is_some() {
            return None;
        }
        Some(Self { primary, secondary })
    }

    /// Parse a code, falling back to plain `n` for unrecognized input.
    pub fn parse_or_default(s: &str) -> Self {
        Self::from_str(s).unwrap_or_else(|| {
            tracing::warn!("unrecognized gravity code {s:?}, falling back to \"n\"");
            Self::default()
        })
    }
}

impl Default for Gravity {
    fn default() -> Self {
        Self::new(Direction::North)
    }
}

impl fmt::Display for Gravity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.primary.as_char())?;
        if let Some(secondary) = self.secondary {
            write!(f, "{}", secondary.as_char())?;
        }
        Ok(())
    }
}
