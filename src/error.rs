use thiserror::Error;

/// Reasons a game configuration cannot be turned into a playable game.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    ZeroDimension { width: u16, height: u16 },

    #[error("grid {width}x{height} has more cells than coordinates can address")]
    GridTooLarge { width: u16, height: u16 },

    #[error("initial length {initial_length} does not fit a grid of {cells} cells")]
    InitialLengthTooLong { initial_length: usize, cells: usize },

    #[error("dots wall percentage must be at most 100, got {0}")]
    DotsPercentOutOfRange(u8),

    #[error("walls left {free} free cells, need at least 2 for the snake and an apple")]
    NoRoom { free: usize },
}
