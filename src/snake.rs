use serde::{Deserialize, Serialize};

use crate::config::GridSize;
use crate::direction::Direction;
use crate::grid::Grid;
use crate::tile::Tile;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns the position shifted by `(dx, dy)`.
    #[must_use]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Snake body stored in a fixed-capacity ring of positions.
///
/// The live body is the ring segment walking forward from `tail_index` to
/// `head_index` (both inclusive), oldest segment first. That segment always
/// spans `length + 1` slots: `length` counts body segments behind the head,
/// the head itself is the extra slot. The capacity is the cell count of the
/// grid, so the ring never has to grow.
#[derive(Debug, Clone)]
pub struct Snake {
    body: Vec<Position>,
    length: usize,
    head_index: usize,
    tail_index: usize,
    alive: bool,
}

impl Snake {
    /// Creates a snake with every segment stacked on `start`.
    ///
    /// `capacity` must be larger than `initial_length`.
    #[must_use]
    pub fn new(start: Position, capacity: usize, initial_length: usize) -> Self {
        debug_assert!(capacity > initial_length);

        Self {
            body: vec![start; capacity],
            length: initial_length,
            head_index: initial_length,
            tail_index: 0,
            alive: true,
        }
    }

    /// Paints all `length + 1` segments onto the grid, head first.
    pub fn render(&self, grid: &mut Grid) {
        for i in 0..=self.length {
            let tile = if i == 0 { Tile::SnakeHead } else { Tile::SnakeTail };
            let segment = self.segment(i);
            grid.set(segment.x, segment.y, tile);
        }
    }

    /// Moves the head by `(dx, dy)` and returns whether an apple was eaten.
    ///
    /// Without an apple the tail cell is cleared and the tail cursor advances.
    /// With one, the tail stays put and the snake grows by one segment.
    /// Liveness is decided by the destination tile after the tail was vacated,
    /// so following the tail into its old cell is safe.
    pub fn move_by(&mut self, dx: i32, dy: i32, grid: &mut Grid) -> bool {
        let old_head = self.body[self.head_index];
        let new_head = old_head.offset(dx, dy);

        let eaten = grid.tile_at(new_head) == Tile::Apple;

        if eaten {
            self.length += 1;
        } else {
            let tail = self.body[self.tail_index];
            grid.set(tail.x, tail.y, Tile::Empty);
            self.tail_index = self.wrap(self.tail_index + 1);
        }

        if self.length > 0 {
            grid.set(old_head.x, old_head.y, Tile::SnakeTail);
        }

        self.head_index = self.wrap(self.head_index + 1);
        self.body[self.head_index] = new_head;

        self.alive = grid.tile_at(new_head).is_traversable();

        grid.set(new_head.x, new_head.y, Tile::SnakeHead);

        eaten
    }

    /// Moves one cell in `direction`. See [`Snake::move_by`].
    pub fn advance(&mut self, direction: Direction, grid: &mut Grid) -> bool {
        let (dx, dy) = direction.delta();
        self.move_by(dx, dy, grid)
    }

    /// Returns the segment `index` places behind the head (0 is the head).
    ///
    /// Callers keep `index` within `0..=length`; larger values wrap around
    /// the ring instead of failing.
    #[must_use]
    pub fn segment(&self, index: usize) -> Position {
        let capacity = self.body.len();
        self.body[(self.head_index + capacity - index % capacity) % capacity]
    }

    #[must_use]
    pub fn x(&self, index: usize) -> i32 {
        self.segment(index).x
    }

    #[must_use]
    pub fn y(&self, index: usize) -> i32 {
        self.segment(index).y
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        self.segment(0)
    }

    /// Body segments behind the head. The snake covers `length + 1` slots.
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Ring capacity, equal to the number of grid cells.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.body.len()
    }

    /// Result of the most recent move.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Iterates over the `length + 1` segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = Position> + '_ {
        (0..=self.length).map(|index| self.segment(index))
    }

    fn wrap(&self, index: usize) -> usize {
        if index >= self.body.len() { 0 } else { index }
    }
}
