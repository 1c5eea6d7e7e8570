use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::config::{ApplePolicy, GameConfig, GridSize};
use crate::controller::Controller;
use crate::direction::Direction;
use crate::error::ConfigError;
use crate::grid::Grid;
use crate::snake::{Position, Snake};
use crate::tile::Tile;
use crate::wall::WallBuilder;

/// Current high-level game state.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameStatus {
    Running,
    Dead,
    Won,
}

impl GameStatus {
    #[must_use]
    pub fn is_over(self) -> bool {
        self != Self::Running
    }
}

/// Explicit starting position for reproducible games.
#[derive(Debug, Clone)]
pub struct Layout {
    /// Grid with any walls already painted.
    pub grid: Grid,
    pub wall_count: usize,
    pub start: Position,
    pub initial_length: usize,
    pub apple: Position,
    pub apples: ApplePolicy,
}

impl Layout {
    /// Open grid, one segment behind the head, uniform apple placement.
    #[must_use]
    pub fn open(size: GridSize, start: Position, apple: Position) -> Self {
        Self {
            grid: Grid::new(size),
            wall_count: 0,
            start,
            initial_length: 1,
            apple,
            apples: ApplePolicy::Uniform,
        }
    }
}

/// One snake game: grid, snake, controller and the engine's own generator.
pub struct Game {
    grid: Grid,
    snake: Snake,
    controller: Box<dyn Controller>,
    wall_count: usize,
    apples: ApplePolicy,
    last_move: Option<Direction>,
    has_eaten: bool,
    status: GameStatus,
    tick_count: u64,
    hunger: u64,
    score: u32,
    rng: StdRng,
}

impl Game {
    /// Validates `config`, builds its walls and places snake and apple.
    pub fn from_config(
        config: &GameConfig,
        controller: Box<dyn Controller>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let walls = config.walls.builder();
        Self::with_wall_builder(config, walls.as_ref(), controller)
    }

    /// Like [`Game::from_config`] but with a caller-supplied wall strategy;
    /// `config.walls` is ignored.
    pub fn with_wall_builder(
        config: &GameConfig,
        wall_builder: &dyn WallBuilder,
        controller: Box<dyn Controller>,
    ) -> Result<Self, ConfigError> {
        config.validate_board()?;

        let mut rng = config
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);

        let mut grid = Grid::new(config.size);
        let wall_count = wall_builder.create_wall(&mut grid, &mut rng);

        let free = grid.count(Tile::Empty);
        if free < 2 {
            return Err(ConfigError::NoRoom { free });
        }

        let start = random_empty_cell(&grid, &mut rng);
        let mut game = Self::assemble(
            grid,
            wall_count,
            start,
            config.initial_length,
            config.apples,
            controller,
            rng,
        );
        game.place_apple();

        debug!(
            walls = %wall_builder,
            wall_count,
            ?start,
            apple = ?game.grid.apple(),
            controller = game.controller.name(),
            "game created"
        );

        Ok(game)
    }

    /// Builds a game from an explicit layout without any validation.
    ///
    /// The layout must describe a playable board: `start` and `apple` inside
    /// the grid on empty cells, and `initial_length` below the cell count.
    #[must_use]
    pub fn from_layout(layout: Layout, controller: Box<dyn Controller>, rng: StdRng) -> Self {
        let Layout {
            grid,
            wall_count,
            start,
            initial_length,
            apple,
            apples,
        } = layout;

        let mut game = Self::assemble(
            grid,
            wall_count,
            start,
            initial_length,
            apples,
            controller,
            rng,
        );
        game.grid.set_apple(apple.x, apple.y);
        game
    }

    fn assemble(
        mut grid: Grid,
        wall_count: usize,
        start: Position,
        initial_length: usize,
        apples: ApplePolicy,
        controller: Box<dyn Controller>,
        rng: StdRng,
    ) -> Self {
        let snake = Snake::new(start, grid.size().total_cells(), initial_length);
        snake.render(&mut grid);

        Self {
            grid,
            snake,
            controller,
            wall_count,
            apples,
            last_move: None,
            has_eaten: false,
            status: GameStatus::Running,
            tick_count: 0,
            hunger: 0,
            score: 0,
            rng,
        }
    }

    /// Advances the simulation by one tick.
    ///
    /// Returns false once the game is over, either because the snake died or
    /// because it filled every free cell. Calls after that are ignored.
    pub fn step(&mut self) -> bool {
        if self.status.is_over() {
            return false;
        }

        let direction = self.controller.next_move(&self.snake, &self.grid);
        self.last_move = Some(direction);
        self.tick_count += 1;

        self.has_eaten = self.snake.advance(direction, &mut self.grid);
        if self.has_eaten {
            self.score += 1;
            self.hunger = 0;
        } else {
            self.hunger += 1;
        }

        trace!(
            tick = self.tick_count,
            ?direction,
            head = ?self.snake.head(),
            eaten = self.has_eaten,
            "tick"
        );

        if self.snake.length() >= self.win_length() {
            self.finish(GameStatus::Won);
            return false;
        }

        if self.has_eaten {
            self.place_apple();
        }

        if !self.snake.is_alive() {
            self.finish(GameStatus::Dead);
        }

        self.snake.is_alive()
    }

    /// Body length at which the snake occupies every cell not taken by walls.
    #[must_use]
    pub fn win_length(&self) -> usize {
        self.grid
            .size()
            .total_cells()
            .saturating_sub(self.wall_count + 1)
    }

    fn finish(&mut self, status: GameStatus) {
        self.status = status;
        info!(
            ?status,
            length = self.snake.length(),
            ticks = self.tick_count,
            score = self.score,
            "game over"
        );
    }

    fn place_apple(&mut self) {
        let apple = match self.apples {
            ApplePolicy::Uniform => random_empty_cell(&self.grid, &mut self.rng),
            ApplePolicy::PreferOpen => open_cell(&self.grid, &mut self.rng),
        };
        self.grid.set_apple(apple.x, apple.y);
        debug!(?apple, tick = self.tick_count, "apple placed");
    }

    /// Tile at `(x, y)`; `Wall` outside the grid.
    #[must_use]
    pub fn tile(&self, x: i32, y: i32) -> Tile {
        self.grid.get(x, y)
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[must_use]
    pub fn size(&self) -> GridSize {
        self.grid.size()
    }

    #[must_use]
    pub fn length(&self) -> usize {
        self.snake.length()
    }

    #[must_use]
    pub fn apple(&self) -> Position {
        self.grid.apple()
    }

    #[must_use]
    pub fn wall_count(&self) -> usize {
        self.wall_count
    }

    /// Direction applied on the last tick, `None` before the first one.
    #[must_use]
    pub fn last_move(&self) -> Option<Direction> {
        self.last_move
    }

    /// Whether the last tick ate an apple.
    #[must_use]
    pub fn has_eaten(&self) -> bool {
        self.has_eaten
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.snake.is_alive()
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Ticks since the last apple.
    #[must_use]
    pub fn hunger(&self) -> u64 {
        self.hunger
    }

    /// Apples eaten so far.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn controller_name(&self) -> &'static str {
        self.controller.name()
    }

    /// Hands the controller back so it can drive another game.
    #[must_use]
    pub fn into_controller(self) -> Box<dyn Controller> {
        self.controller
    }
}

/// Rejection-samples an empty cell. Loops forever on a full grid.
fn random_empty_cell<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Position {
    loop {
        let x = rng.gen_range(0..grid.width());
        let y = rng.gen_range(0..grid.height());
        if grid.get(x, y) == Tile::Empty {
            return Position { x, y };
        }
    }
}

/// Draws until the cell is empty or has fewer than two free neighbours.
fn open_cell<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Position {
    loop {
        let x = rng.gen_range(0..grid.width());
        let y = rng.gen_range(0..grid.height());
        if grid.get(x, y) == Tile::Empty || grid.free_neighbours(x, y) < 2 {
            return Position { x, y };
        }
    }
}
