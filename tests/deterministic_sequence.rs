use rand::SeedableRng;
use rand::rngs::StdRng;
use snake_sim::config::{ControllerKind, GameConfig, GridSize, WallKind};
use snake_sim::controller::{Controller, ScriptedController, SweepController};
use snake_sim::direction::Direction;
use snake_sim::game::{Game, GameStatus, Layout};
use snake_sim::grid::Grid;
use snake_sim::snake::{Position, Snake};
use snake_sim::tile::Tile;

const TICK_CAP: u64 = 5_000;

fn open_layout(width: u16, height: u16, start: Position, apple: Position) -> Layout {
    Layout::open(GridSize { width, height }, start, apple)
}

/// 5x5 cycle through every cell except (4, 4).
const CORNER_CYCLE: [(i32, i32); 24] = [
    (0, 0),
    (1, 0),
    (2, 0),
    (3, 0),
    (4, 0),
    (4, 1),
    (4, 2),
    (4, 3),
    (3, 3),
    (3, 4),
    (2, 4),
    (1, 4),
    (0, 4),
    (0, 3),
    (1, 3),
    (2, 3),
    (2, 2),
    (3, 2),
    (3, 1),
    (2, 1),
    (1, 1),
    (1, 2),
    (0, 2),
    (0, 1),
];

/// Follows `CORNER_CYCLE`, but takes (4, 3) -> (4, 4) -> (3, 4) instead of
/// the detour through (3, 3) on laps where the apple sits on (4, 4). Every lap
/// still takes 24 ticks, so the head never catches up with its own tail.
struct CornerSwapWalker;

impl Controller for CornerSwapWalker {
    fn next_move(&mut self, snake: &Snake, grid: &Grid) -> Direction {
        let head = snake.head();
        let corner = Position { x: 4, y: 4 };

        let next = if head == (Position { x: 4, y: 3 }) && grid.apple() == corner {
            (4, 4)
        } else if head == corner {
            (3, 4)
        } else {
            let index = CORNER_CYCLE
                .iter()
                .position(|&cell| cell == (head.x, head.y))
                .expect("head stays on the cycle");
            CORNER_CYCLE[(index + 1) % CORNER_CYCLE.len()]
        };

        Direction::ALL
            .into_iter()
            .find(|direction| {
                let (dx, dy) = direction.delta();
                head.offset(dx, dy) == Position { x: next.0, y: next.1 }
            })
            .expect("cycle cells are adjacent")
    }

    fn name(&self) -> &'static str {
        "corner-swap"
    }
}

#[test]
fn scripted_walk_eats_apple_and_respawns_it() {
    let script = [
        Direction::Right,
        Direction::Right,
        Direction::Right,
        Direction::Right,
        Direction::Down,
        Direction::Down,
        Direction::Down,
        Direction::Down,
    ];
    let mut game = Game::from_layout(
        open_layout(10, 10, Position { x: 3, y: 3 }, Position { x: 7, y: 7 }),
        Box::new(ScriptedController::new(script)),
        StdRng::seed_from_u64(42),
    );
    assert_eq!(game.apple(), Position { x: 7, y: 7 });

    for _ in 0..7 {
        assert!(game.step());
        assert!(!game.has_eaten());
        assert_eq!(game.apple(), Position { x: 7, y: 7 });
    }

    assert!(game.step());
    assert!(game.has_eaten());
    assert_eq!(game.snake().head(), Position { x: 7, y: 7 });
    assert_eq!(game.tile(7, 7), Tile::SnakeHead);
    assert_eq!(game.length(), 2);

    let apple = game.apple();
    assert_ne!(apple, Position { x: 7, y: 7 });
    assert_eq!(game.tile(apple.x, apple.y), Tile::Apple);
    assert!(game.snake().segments().all(|segment| segment != apple));
}

#[test]
fn five_by_five_is_won_exactly_at_length_24() {
    let mut game = Game::from_layout(
        open_layout(5, 5, Position { x: 0, y: 0 }, Position { x: 2, y: 0 }),
        Box::new(CornerSwapWalker),
        StdRng::seed_from_u64(7),
    );
    assert_eq!(game.win_length(), 24);

    while game.step() {
        assert!(game.length() < 24);
        assert!(game.is_alive());
        assert!(game.tick_count() < TICK_CAP, "board never filled");
    }

    assert_eq!(game.status(), GameStatus::Won);
    assert_eq!(game.length(), 24);
    assert_eq!(game.score(), 23);
    assert_eq!(game.grid().count(Tile::Empty), 0);
    assert_eq!(game.grid().count(Tile::Apple), 0);
}

#[test]
fn sweep_fills_boards_with_even_height() {
    for (width, height) in [(4, 4), (5, 4), (6, 6)] {
        let mut game = Game::from_layout(
            open_layout(width, height, Position { x: 0, y: 0 }, Position { x: 2, y: 0 }),
            Box::new(SweepController),
            StdRng::seed_from_u64(u64::from(width)),
        );

        while game.step() {
            assert!(game.tick_count() < TICK_CAP, "{width}x{height} never filled");
        }

        assert_eq!(game.status(), GameStatus::Won, "{width}x{height}");
        assert_eq!(game.length(), game.win_length());
        assert_eq!(game.grid().count(Tile::Empty), 0);
    }
}

#[test]
fn head_and_tail_tiles_track_length_every_tick() {
    let mut game = Game::from_layout(
        open_layout(6, 4, Position { x: 0, y: 0 }, Position { x: 5, y: 3 }),
        Box::new(SweepController),
        StdRng::seed_from_u64(3),
    );

    loop {
        let running = game.step();

        assert_eq!(game.grid().count(Tile::SnakeHead), 1);
        assert_eq!(game.grid().count(Tile::SnakeTail), game.length());

        if !running {
            break;
        }
        assert!(game.tick_count() < TICK_CAP, "sweep never finished");
    }
    assert_eq!(game.status(), GameStatus::Won);
}

#[test]
fn wall_count_matches_wall_tiles_for_exact_builders() {
    for (walls, expected) in [(WallKind::None, 0), (WallKind::Crosshair, 11)] {
        for seed in 0..8 {
            let config = GameConfig {
                walls,
                seed: Some(seed),
                ..GameConfig::new(10, 10)
            };
            let controller = ControllerKind::Random.build(StdRng::seed_from_u64(seed));

            let game = Game::from_config(&config, controller).expect("10x10 is valid");

            assert_eq!(game.wall_count(), expected);
            assert_eq!(game.grid().count(Tile::Wall), game.wall_count());
        }
    }
}

#[test]
fn dots_wall_count_is_an_upper_bound() {
    for seed in 0..8 {
        let config = GameConfig {
            walls: WallKind::Dots { percent: 10 },
            seed: Some(seed),
            ..GameConfig::new(20, 20)
        };
        let controller = ControllerKind::Lookahead.build(StdRng::seed_from_u64(seed));

        let game = Game::from_config(&config, controller).expect("20x20 is valid");

        assert_eq!(game.wall_count(), 40);
        assert!(game.grid().count(Tile::Wall) <= 40);
    }
}

#[test]
fn border_reads_as_wall_through_the_engine() {
    let game = Game::from_config(
        &GameConfig {
            seed: Some(1),
            ..GameConfig::new(8, 6)
        },
        ControllerKind::Sweep.build(StdRng::seed_from_u64(1)),
    )
    .expect("8x6 is valid");

    assert_eq!(game.tile(-1, 0), Tile::Wall);
    assert_eq!(game.tile(8, 0), Tile::Wall);
    assert_eq!(game.tile(0, 6), Tile::Wall);
}

#[test]
fn stepwise_wall_collision_ends_the_game() {
    let mut game = Game::from_layout(
        open_layout(6, 4, Position { x: 1, y: 1 }, Position { x: 2, y: 1 }),
        Box::new(ScriptedController::new([
            Direction::Right,
            Direction::Up,
            Direction::Up,
        ])),
        StdRng::seed_from_u64(42),
    );

    assert!(game.step());
    assert_eq!(game.status(), GameStatus::Running);
    assert_eq!(game.score(), 1);
    assert_eq!(game.snake().head(), Position { x: 2, y: 1 });

    assert!(game.step());
    assert_eq!(game.snake().head(), Position { x: 2, y: 0 });

    assert!(!game.step());
    assert_eq!(game.status(), GameStatus::Dead);
    assert_eq!(game.last_move(), Some(Direction::Up));

    let frozen = game.grid().clone();
    assert!(!game.step());
    assert_eq!(game.grid(), &frozen);
    assert_eq!(game.tick_count(), 3);
}
