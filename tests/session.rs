//! End-to-end session behaviour through the public API

use std::f32::consts::PI;

use brickfall::sim::{Ball, BrickGrid, CellCoord, Collider, Game, GameStopper, TickInput};
use brickfall::{GameConfig, LevelFormatError, LevelSet, PlayField};
use glam::Vec2;

/// Follow the lowest descending ball
fn follow(game: &Game) -> i32 {
    let paddle = game.paddle();
    game.balls()
        .filter(|b| b.is_descending())
        .map(|b| b.pos.x)
        .next()
        .map(|x| ((x - paddle.x as f32) as i32).clamp(-paddle.speed, paddle.speed))
        .unwrap_or(0)
}

fn run(seed: u64, ticks: usize) -> (Game, Vec<GameStopper>) {
    let mut game = Game::new(GameConfig::default(), LevelSet::builtin(), seed).unwrap();
    let mut stops = Vec::new();
    for _ in 0..ticks {
        let input = TickInput {
            paddle_shift: follow(&game),
            release: game.is_serving(),
        };
        let report = game.step(&input);
        if report.is_stopped() {
            stops.push(report.game_stopper);
        }
    }
    (game, stops)
}

#[test]
fn test_same_seed_same_session() {
    let (a, stops_a) = run(2024, 5_000);
    let (b, stops_b) = run(2024, 5_000);
    assert_eq!(a.snapshot(), b.snapshot());
    assert_eq!(stops_a, stops_b);
}

#[test]
fn test_long_run_keeps_invariants() {
    let mut game = Game::new(GameConfig::default(), LevelSet::builtin(), 77).unwrap();
    let max_lives = game.config().max_lives;
    for _ in 0..20_000 {
        let input = TickInput {
            paddle_shift: follow(&game),
            release: game.is_serving(),
        };
        game.step(&input);

        assert!(game.ball_count() >= 1);
        assert!(game.ball_count() <= game.ball_slots().len());
        assert!(game.lives() >= 1 && game.lives() <= max_lives);
        assert!(game.level() >= 1 && game.level() as usize <= game.level_count());
        assert_eq!(game.bricks_alive(), game.grid().alive_count());
        for ball in game.balls() {
            assert!(ball.angle() > -PI && ball.angle() <= PI);
        }
        let paddle = game.paddle();
        assert!(paddle.left() >= 0 && paddle.right() <= 800);
    }
}

#[test]
fn test_scan_order_follows_quadrant() {
    let levels = LevelSet::parse(&["1;;1\n"]).unwrap();
    let layout = levels.get(1).unwrap();
    let field = PlayField::new(0.0, 0.0, 30.0, 600.0);
    let grid = BrickGrid::from_layout(layout, &field, 20, 0);
    let collider = Collider::new(field);

    let down_right = Ball::new(Vec2::new(15.0, 10.0), 9.0, 3.0, -PI / 4.0);
    assert_eq!(
        collider.ball_hits_brick(&down_right, &grid),
        Some(CellCoord::new(0, 0))
    );
    let down_left = Ball::new(Vec2::new(15.0, 10.0), 9.0, 3.0, -3.0 * PI / 4.0);
    assert_eq!(
        collider.ball_hits_brick(&down_left, &grid),
        Some(CellCoord::new(0, 2))
    );
}

#[test]
fn test_bad_level_file_does_not_touch_session() {
    let (mut game, _) = run(5, 2_000);
    let before = game.snapshot();
    let err = game
        .reload_levels(&["1;1;1\n1;1;1\n", "1;1\n1;1;1\n"])
        .unwrap_err();
    assert!(matches!(err, LevelFormatError::RaggedRow { line: 2, .. }));
    assert_eq!(game.snapshot(), before);
}

#[test]
fn test_level_set_from_directory() {
    let dir = std::env::temp_dir().join(format!("brickfall-levels-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("level1.csv"), "1;1\n").unwrap();
    std::fs::write(dir.join("level2.csv"), "2;\n;2\n").unwrap();
    std::fs::write(dir.join("level4.csv"), "1\n").unwrap();

    let levels = LevelSet::from_dir(&dir).unwrap();
    assert_eq!(levels.len(), 2);
    assert_eq!(levels.get(2).unwrap().brick_count(), 2);

    std::fs::write(dir.join("level3.csv"), "1;x\n").unwrap();
    assert!(matches!(
        LevelSet::from_dir(&dir).unwrap_err(),
        LevelFormatError::InvalidCell { .. }
    ));
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_extreme_paddle_input_stays_in_field() {
    let mut game = Game::new(GameConfig::default(), LevelSet::builtin(), 9).unwrap();
    for shift in [i32::MAX, i32::MIN, i32::MAX] {
        game.step(&TickInput {
            paddle_shift: shift,
            release: false,
        });
        let paddle = game.paddle();
        assert!(paddle.left() >= 0 && paddle.right() <= 800);
        let ball = game.balls().next().unwrap();
        assert_eq!(ball.pos.x, paddle.x as f32);
    }
}
