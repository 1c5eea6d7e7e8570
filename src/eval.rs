use rand::RngCore;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{DEFAULT_INITIAL_LENGTH, EVAL_GRID, GameConfig};
use crate::controller::Controller;
use crate::error::ConfigError;
use crate::game::{Game, GameStatus};
use crate::wall::WallBuilder;

/// Outcome of one game played to the end or to a tick cap.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct RunSummary {
    pub controller: &'static str,
    pub status: GameStatus,
    pub length: usize,
    pub ticks: u64,
    pub score: u32,
    pub wall_count: usize,
}

/// Plays `game` until it ends or `max_ticks` ticks have run.
///
/// `on_tick` sees the game after every tick, including the final one.
pub fn run_to_end(
    game: &mut Game,
    max_ticks: Option<u64>,
    mut on_tick: impl FnMut(&Game),
) -> RunSummary {
    while max_ticks.is_none_or(|limit| game.tick_count() < limit) {
        let running = game.step();
        on_tick(game);
        if !running {
            break;
        }
    }

    RunSummary {
        controller: game.controller_name(),
        status: game.status(),
        length: game.length(),
        ticks: game.tick_count(),
        score: game.score(),
        wall_count: game.wall_count(),
    }
}

/// Per-tick rates measured by [`evaluate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    /// Fraction of ticks that killed the snake.
    pub dead: f64,
    /// Fraction of ticks that ate an apple.
    pub eaten: f64,
    /// Fraction of ticks that won the game.
    pub won: f64,
}

/// Samples `ticks` ticks of `controller` on fresh 20x20 games, starting a new
/// game whenever the previous one ends.
///
/// The controller is carried over between games, so stateful controllers
/// keep their state.
pub fn evaluate(
    mut controller: Box<dyn Controller>,
    wall_builder: &dyn WallBuilder,
    ticks: u64,
    rng: &mut StdRng,
) -> Result<Statistics, ConfigError> {
    let mut counts = [0u64; 3];
    let mut remaining = ticks;

    while remaining > 0 {
        let config = GameConfig {
            size: EVAL_GRID,
            initial_length: DEFAULT_INITIAL_LENGTH,
            seed: Some(rng.next_u64()),
            ..GameConfig::default()
        };
        let mut game = Game::with_wall_builder(&config, wall_builder, controller)?;

        while remaining > 0 {
            remaining -= 1;
            game.step();

            match game.status() {
                GameStatus::Running if game.has_eaten() => counts[1] += 1,
                GameStatus::Running => continue,
                GameStatus::Dead => counts[0] += 1,
                GameStatus::Won => counts[2] += 1,
            }

            if game.status().is_over() {
                break;
            }
        }

        controller = game.into_controller();
    }

    let total = ticks.max(1) as f64;
    let stats = Statistics {
        dead: counts[0] as f64 / total,
        eaten: counts[1] as f64 / total,
        won: counts[2] as f64 / total,
    };
    debug!(?stats, ticks, walls = %wall_builder, "evaluation finished");
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::config::GridSize;
    use crate::controller::{ScriptedController, SweepController};
    use crate::direction::Direction;
    use crate::game::{Game, GameStatus, Layout};
    use crate::snake::Position;
    use crate::wall::NoWall;

    use super::{evaluate, run_to_end};

    fn sweep_game(width: u16, height: u16) -> Game {
        let layout = Layout::open(
            GridSize { width, height },
            Position { x: 0, y: 0 },
            Position {
                x: i32::from(width) - 1,
                y: i32::from(height) - 1,
            },
        );
        Game::from_layout(layout, Box::new(SweepController), StdRng::seed_from_u64(21))
    }

    #[test]
    fn run_to_end_reports_a_win() {
        let mut game = sweep_game(6, 4);
        let mut observed = 0;

        let summary = run_to_end(&mut game, Some(10_000), |_| observed += 1);

        assert_eq!(summary.status, GameStatus::Won);
        assert_eq!(summary.length, 23);
        assert_eq!(summary.score, 22);
        assert_eq!(summary.controller, "sweep");
        assert_eq!(observed, summary.ticks);
    }

    #[test]
    fn run_to_end_stops_at_tick_cap() {
        let mut game = sweep_game(10, 10);

        let summary = run_to_end(&mut game, Some(3), |_| {});

        assert_eq!(summary.ticks, 3);
        assert_eq!(summary.status, GameStatus::Running);
    }

    #[test]
    fn summary_serializes_status_in_kebab_case() {
        let mut game = sweep_game(4, 4);
        let summary = run_to_end(&mut game, Some(10_000), |_| {});

        let json = serde_json::to_value(summary).expect("summary should serialize");

        assert_eq!(json["status"], "won");
        assert_eq!(json["length"], 15);
    }

    #[test]
    fn sweep_never_dies_on_open_grids() {
        let mut rng = StdRng::seed_from_u64(8);

        let stats = evaluate(Box::new(SweepController), &NoWall, 500, &mut rng)
            .expect("evaluation grid is valid");

        assert_eq!(stats.dead, 0.0);
        assert_eq!(stats.won, 0.0);
        assert!(stats.eaten > 0.0);
    }

    #[test]
    fn straight_line_controller_keeps_dying() {
        let mut rng = StdRng::seed_from_u64(9);
        let controller = ScriptedController::new([Direction::Left]);

        let stats = evaluate(Box::new(controller), &NoWall, 200, &mut rng)
            .expect("evaluation grid is valid");

        // Each game dies after at most 20 ticks.
        assert!(stats.dead >= 0.04, "dead rate {}", stats.dead);
        assert!(stats.dead + stats.eaten + stats.won <= 1.0);
    }
}
