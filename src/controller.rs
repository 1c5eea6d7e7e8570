use std::collections::VecDeque;

use rand::Rng;
use rand::rngs::StdRng;

use crate::direction::Direction;
use crate::grid::Grid;
use crate::snake::Snake;

/// Decision provider queried once per tick.
///
/// Implementations may keep any private state but only get read access to
/// the game. The engine applies whatever direction comes back, including
/// fatal ones.
pub trait Controller: Send {
    /// Picks the direction for the next tick.
    fn next_move(&mut self, snake: &Snake, grid: &Grid) -> Direction;

    /// Short label for logs and summaries.
    fn name(&self) -> &'static str;
}

/// Uniformly random direction every tick, blind to the grid.
#[derive(Debug, Clone)]
pub struct RandomController {
    rng: StdRng,
}

impl RandomController {
    #[must_use]
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }
}

impl Controller for RandomController {
    fn next_move(&mut self, _snake: &Snake, _grid: &Grid) -> Direction {
        Direction::ALL[self.rng.gen_range(0..Direction::ALL.len())]
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

/// Random walk that only picks currently safe cells and tends to keep going
/// straight.
#[derive(Debug, Clone)]
pub struct LookaheadController {
    rng: StdRng,
    last_move: Direction,
    sticky_percent: u32,
}

impl LookaheadController {
    /// Creates a controller that repeats its last move 80% of the time.
    #[must_use]
    pub fn new(rng: StdRng) -> Self {
        Self::with_stickiness(rng, crate::config::STICKY_PERCENT)
    }

    #[must_use]
    pub fn with_stickiness(mut rng: StdRng, sticky_percent: u32) -> Self {
        let last_move = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
        Self {
            rng,
            last_move,
            sticky_percent,
        }
    }
}

impl Controller for LookaheadController {
    fn next_move(&mut self, snake: &Snake, grid: &Grid) -> Direction {
        let head = snake.head();
        let valid: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|direction| {
                let (dx, dy) = direction.delta();
                grid.tile_at(head.offset(dx, dy)).is_traversable()
            })
            .collect();

        if valid.is_empty() {
            return Direction::Up;
        }

        if valid.contains(&self.last_move) && self.rng.gen_range(0..100) < self.sticky_percent {
            return self.last_move;
        }

        self.last_move = valid[self.rng.gen_range(0..valid.len())];
        self.last_move
    }

    fn name(&self) -> &'static str {
        "lookahead"
    }
}

/// Fixed boustrophedon tour.
///
/// Row 0 runs right, the inner rows alternate direction between columns 1
/// and `width - 1`, the bottom row runs left into column 0, and column 0
/// climbs back to the origin. With an even height this is a Hamiltonian
/// cycle of an open grid, so the snake can fill the whole board. With an odd
/// height the last inner row drops into the bottom row at column 1, and
/// bottom-row cells from column 2 onward are never visited.
#[derive(Debug, Clone, Copy, Default)]
pub struct SweepController;

impl Controller for SweepController {
    fn next_move(&mut self, snake: &Snake, grid: &Grid) -> Direction {
        let head = snake.head();

        if head.x == 0 {
            return if head.y == 0 {
                Direction::Right
            } else {
                Direction::Up
            };
        }

        if head.y == grid.height() - 1 {
            return Direction::Left;
        }

        if head.y % 2 == 0 {
            if head.x == grid.width() - 1 {
                Direction::Down
            } else {
                Direction::Right
            }
        } else if head.x == 1 {
            Direction::Down
        } else {
            Direction::Left
        }
    }

    fn name(&self) -> &'static str {
        "sweep"
    }
}

/// Replays a fixed list of directions, then keeps repeating the last one.
#[derive(Debug, Clone)]
pub struct ScriptedController {
    script: VecDeque<Direction>,
    last_move: Direction,
}

impl ScriptedController {
    #[must_use]
    pub fn new(script: impl IntoIterator<Item = Direction>) -> Self {
        Self {
            script: script.into_iter().collect(),
            last_move: Direction::Up,
        }
    }

    /// Directions not yet handed out.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Controller for ScriptedController {
    fn next_move(&mut self, _snake: &Snake, _grid: &Grid) -> Direction {
        if let Some(next) = self.script.pop_front() {
            self.last_move = next;
        }
        self.last_move
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}
