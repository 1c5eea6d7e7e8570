use std::fmt;

use crate::config::GridSize;
use crate::snake::Position;
use crate::tile::Tile;

/// Fixed-size tile map the snake moves on.
///
/// Every cell outside the bounds reads as [`Tile::Wall`] and ignores writes,
/// so callers can treat the border and wall tiles the same way.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Grid {
    size: GridSize,
    tiles: Vec<Tile>,
    apple: Position,
}

impl Grid {
    /// Creates an all-empty grid.
    #[must_use]
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            tiles: vec![Tile::Empty; size.total_cells()],
            apple: Position { x: 0, y: 0 },
        }
    }

    #[must_use]
    pub fn size(&self) -> GridSize {
        self.size
    }

    #[must_use]
    pub fn width(&self) -> i32 {
        i32::from(self.size.width)
    }

    #[must_use]
    pub fn height(&self) -> i32 {
        i32::from(self.size.height)
    }

    /// Returns the tile at `(x, y)`, or `Wall` when out of bounds.
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Tile {
        self.index(x, y).map_or(Tile::Wall, |index| self.tiles[index])
    }

    /// Returns the tile at `position`, or `Wall` when out of bounds.
    #[must_use]
    pub fn tile_at(&self, position: Position) -> Tile {
        self.get(position.x, position.y)
    }

    /// Overwrites the tile at `(x, y)`. Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: i32, y: i32, tile: Tile) {
        if let Some(index) = self.index(x, y) {
            self.tiles[index] = tile;
        }
    }

    /// Places the apple at `(x, y)` and remembers its position.
    pub fn set_apple(&mut self, x: i32, y: i32) {
        self.apple = Position { x, y };
        self.set(x, y, Tile::Apple);
    }

    /// Position of the most recently placed apple.
    #[must_use]
    pub fn apple(&self) -> Position {
        self.apple
    }

    /// Number of in-bounds cells holding `tile`.
    #[must_use]
    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|candidate| **candidate == tile).count()
    }

    /// Number of orthogonal neighbours of `(x, y)` that are empty.
    #[must_use]
    pub fn free_neighbours(&self, x: i32, y: i32) -> usize {
        [(x - 1, y), (x + 1, y), (x, y - 1), (x, y + 1)]
            .into_iter()
            .filter(|&(nx, ny)| self.get(nx, ny) == Tile::Empty)
            .count()
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let position = Position { x, y };
        if !position.is_within_bounds(self.size) {
            return None;
        }

        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        Some(x + y * usize::from(self.size.width))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.tiles.chunks(usize::from(self.size.width).max(1)) {
            for tile in row {
                write!(f, "{tile}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
