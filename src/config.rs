use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::controller::{Controller, LookaheadController, RandomController, SweepController};
use crate::error::ConfigError;
use crate::wall::{Crosshair, Dots, NoWall, RandomComposite, WallBuilder};

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// Default grid width.
pub const DEFAULT_GRID_WIDTH: u16 = 10;

/// Default grid height.
pub const DEFAULT_GRID_HEIGHT: u16 = 10;

/// Default number of body segments behind the head at spawn.
pub const DEFAULT_INITIAL_LENGTH: usize = 1;

/// Chance in percent that the lookahead controller keeps its last move.
pub const STICKY_PERCENT: u32 = 80;

/// Ticks sampled by a controller evaluation.
pub const DEFAULT_EVAL_TICKS: u64 = 1000;

/// Grid used for controller evaluation games.
pub const EVAL_GRID: GridSize = GridSize {
    width: 20,
    height: 20,
};

/// Obstacle layout selector.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "kind")]
pub enum WallKind {
    #[default]
    None,
    Dots {
        percent: u8,
    },
    Crosshair,
    Random,
}

impl WallKind {
    /// Builds the wall strategy for this selector.
    #[must_use]
    pub fn builder(self) -> Box<dyn WallBuilder> {
        match self {
            Self::None => Box::new(NoWall),
            Self::Dots { percent } => Box::new(Dots::new(percent)),
            Self::Crosshair => Box::new(Crosshair),
            Self::Random => Box::new(RandomComposite::default()),
        }
    }
}

/// Reference controller selector.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ControllerKind {
    Random,
    #[default]
    Lookahead,
    Sweep,
}

impl ControllerKind {
    /// Builds a controller. Random variants take ownership of `rng`.
    #[must_use]
    pub fn build(self, rng: StdRng) -> Box<dyn Controller> {
        match self {
            Self::Random => Box::new(RandomController::new(rng)),
            Self::Lookahead => Box::new(LookaheadController::new(rng)),
            Self::Sweep => Box::new(SweepController),
        }
    }
}

/// Where new apples may land.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ApplePolicy {
    /// Any empty cell, uniformly.
    #[default]
    Uniform,
    /// Re-roll occupied cells that still have two or more free neighbours.
    ///
    /// Meant to keep apples out of dead ends, but the retry condition also
    /// accepts an occupied cell with fewer than two free neighbours.
    PreferOpen,
}

/// Everything needed to set up one game besides the controller.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: GridSize,
    pub walls: WallKind,
    pub initial_length: usize,
    pub apples: ApplePolicy,
    /// Seed for the engine's generator; `None` draws from system entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: GridSize {
                width: DEFAULT_GRID_WIDTH,
                height: DEFAULT_GRID_HEIGHT,
            },
            walls: WallKind::None,
            initial_length: DEFAULT_INITIAL_LENGTH,
            apples: ApplePolicy::Uniform,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Creates a default configuration with a custom grid size.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            size: GridSize { width, height },
            ..Default::default()
        }
    }

    /// Checks the preconditions the engine itself does not guard.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_board()?;

        match self.walls {
            WallKind::Dots { percent } if percent > 100 => {
                Err(ConfigError::DotsPercentOutOfRange(percent))
            }
            _ => Ok(()),
        }
    }

    /// Like [`GameConfig::validate`] but leaves `walls` unchecked, for callers
    /// that bring their own wall strategy.
    pub fn validate_board(&self) -> Result<(), ConfigError> {
        let GridSize { width, height } = self.size;
        if width == 0 || height == 0 {
            return Err(ConfigError::ZeroDimension { width, height });
        }

        if i32::try_from(self.size.total_cells()).is_err() {
            return Err(ConfigError::GridTooLarge { width, height });
        }

        let cells = self.size.total_cells();
        if self.initial_length >= cells {
            return Err(ConfigError::InitialLengthTooLong {
                initial_length: self.initial_length,
                cells,
            });
        }

        Ok(())
    }
}
