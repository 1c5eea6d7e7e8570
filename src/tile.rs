use std::fmt;

use serde::{Deserialize, Serialize};

/// Content of a single grid cell.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
pub enum Tile {
    #[default]
    Empty,
    Wall,
    SnakeHead,
    SnakeTail,
    Apple,
}

impl Tile {
    /// Glyph used by plain text frame output.
    #[must_use]
    pub fn glyph(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Wall => '#',
            Self::SnakeHead => 'O',
            Self::SnakeTail => 'o',
            Self::Apple => 'X',
        }
    }

    /// Returns true when the snake survives moving onto this tile.
    #[must_use]
    pub fn is_traversable(self) -> bool {
        matches!(self, Self::Empty | Self::Apple)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}
