use std::io::{self, Write};

use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use snake_sim::config::{
    ApplePolicy, ControllerKind, DEFAULT_EVAL_TICKS, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH,
    DEFAULT_INITIAL_LENGTH, GameConfig, GridSize, WallKind,
};
use snake_sim::eval::{RunSummary, evaluate, run_to_end};
use snake_sim::game::{Game, GameStatus};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum WallArg {
    None,
    Dots,
    Crosshair,
    Random,
}

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Grid width in cells.
    #[arg(long, default_value_t = DEFAULT_GRID_WIDTH)]
    width: u16,

    /// Grid height in cells.
    #[arg(long, default_value_t = DEFAULT_GRID_HEIGHT)]
    height: u16,

    /// Obstacle layout.
    #[arg(long, value_enum, default_value_t = WallArg::None)]
    walls: WallArg,

    /// Share of cells targeted by `--walls dots`, in percent.
    #[arg(long, default_value_t = 5)]
    dots_percent: u8,

    /// Body segments behind the head at spawn.
    #[arg(long, default_value_t = DEFAULT_INITIAL_LENGTH)]
    initial_length: usize,

    /// Decision provider driving the snake.
    #[arg(long, value_enum, default_value_t = ControllerKind::Lookahead)]
    controller: ControllerKind,

    /// Apple placement policy.
    #[arg(long, value_enum, default_value_t = ApplePolicy::Uniform)]
    apples: ApplePolicy,

    /// Seed for every generator; omit for a random run.
    #[arg(long)]
    seed: Option<u64>,

    /// Number of games to play.
    #[arg(long, default_value_t = 1)]
    games: u32,

    /// Stop a game after this many ticks.
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Print the grid after every tick.
    #[arg(long)]
    print: bool,

    /// Print summaries as JSON lines.
    #[arg(long)]
    json: bool,

    /// Measure death and eating rates on 20x20 grids instead of playing.
    #[arg(long)]
    evaluate: bool,

    /// Ticks sampled by `--evaluate`.
    #[arg(long, default_value_t = DEFAULT_EVAL_TICKS)]
    eval_ticks: u64,
}

impl Cli {
    fn wall_kind(&self) -> WallKind {
        match self.walls {
            WallArg::None => WallKind::None,
            WallArg::Dots => WallKind::Dots {
                percent: self.dots_percent,
            },
            WallArg::Crosshair => WallKind::Crosshair,
            WallArg::Random => WallKind::Random,
        }
    }
}

fn main() -> io::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    run(&cli)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> io::Result<()> {
    let mut seeds = cli
        .seed
        .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
    let walls = cli.wall_kind();

    if cli.evaluate {
        return run_evaluation(cli, walls, &mut seeds);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut summaries = Vec::new();

    for index in 0..cli.games {
        let config = GameConfig {
            size: GridSize {
                width: cli.width,
                height: cli.height,
            },
            walls,
            initial_length: cli.initial_length,
            apples: cli.apples,
            seed: Some(seeds.next_u64()),
        };
        let controller = cli
            .controller
            .build(StdRng::seed_from_u64(seeds.next_u64()));
        let mut game = Game::from_config(&config, controller).map_err(invalid_input)?;

        if cli.print {
            writeln!(out, "{}", game.grid())?;
        }

        let mut frame_error = None;
        let summary = run_to_end(&mut game, cli.max_ticks, |game| {
            if cli.print && frame_error.is_none() {
                frame_error = writeln!(out, "{}", game.grid()).err();
            }
        });
        if let Some(error) = frame_error {
            return Err(error);
        }

        write_summary(&mut out, index, &summary, cli.json)?;
        summaries.push(summary);
    }

    if cli.games > 1 && !cli.json {
        write_totals(&mut out, &summaries)?;
    }

    Ok(())
}

fn run_evaluation(cli: &Cli, walls: WallKind, seeds: &mut StdRng) -> io::Result<()> {
    let controller = cli
        .controller
        .build(StdRng::seed_from_u64(seeds.next_u64()));
    let builder = walls.builder();

    let stats =
        evaluate(controller, builder.as_ref(), cli.eval_ticks, seeds).map_err(invalid_input)?;
    info!(?stats, controller = ?cli.controller, walls = %builder, "evaluation done");

    let mut out = io::stdout().lock();
    if cli.json {
        let json = serde_json::to_string(&stats).map_err(invalid_data)?;
        writeln!(out, "{json}")
    } else {
        writeln!(
            out,
            "{:?} on {}: dead {:.2}%  eaten {:.2}%  won {:.2}%",
            cli.controller,
            builder,
            stats.dead * 100.0,
            stats.eaten * 100.0,
            stats.won * 100.0,
        )
    }
}

fn write_summary(
    out: &mut impl Write,
    index: u32,
    summary: &RunSummary,
    json: bool,
) -> io::Result<()> {
    if json {
        let line = serde_json::to_string(summary).map_err(invalid_data)?;
        return writeln!(out, "{line}");
    }

    writeln!(
        out,
        "game {}: {:?} after {} ticks, length {}, score {}, walls {}",
        index + 1,
        summary.status,
        summary.ticks,
        summary.length,
        summary.score,
        summary.wall_count,
    )
}

fn write_totals(out: &mut impl Write, summaries: &[RunSummary]) -> io::Result<()> {
    let count = |status| summaries.iter().filter(|s| s.status == status).count();
    let mean_length =
        summaries.iter().map(|s| s.length).sum::<usize>() as f64 / summaries.len().max(1) as f64;

    writeln!(
        out,
        "{} games: {} won, {} dead, {} capped, mean length {:.1}",
        summaries.len(),
        count(GameStatus::Won),
        count(GameStatus::Dead),
        count(GameStatus::Running),
        mean_length,
    )
}

fn invalid_input(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, error)
}

fn invalid_data(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, error)
}
