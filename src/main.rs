//! Brickfall headless driver
//!
//! Runs the simulation with an autopilot paddle and logs every stop event.
//!
//! Usage: `brickfall [LEVEL_DIR] [CONFIG_JSON]`

use std::path::Path;
use std::process::ExitCode;

use brickfall::sim::{Game, GameStopper, TickInput};
use brickfall::{GameConfig, LevelSet};

/// Ticks to simulate before giving up
const MAX_TICKS: u64 = 200_000;
/// Ticks to wait after a stop event before serving again
const SERVE_DELAY_TICKS: u32 = 60;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Brickfall (headless) starting...");

    let mut args = std::env::args().skip(1);
    let levels = match args.next() {
        Some(dir) => match LevelSet::from_dir(Path::new(&dir)) {
            Ok(levels) => levels,
            Err(e) => {
                log::error!("Cannot load levels: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => LevelSet::builtin(),
    };
    let config = match args.next() {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| GameConfig::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(config) => config,
            Err(e) => {
                log::error!("Cannot load config {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => GameConfig::default(),
    };

    let seed = 0x5eed_b41c;
    let mut game = match Game::new(config, levels, seed) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Cannot start game: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut serve_delay = SERVE_DELAY_TICKS;
    for tick in 0..MAX_TICKS {
        let mut input = TickInput {
            paddle_shift: autopilot(&game),
            release: false,
        };
        if game.is_serving() {
            serve_delay = serve_delay.saturating_sub(1);
            input.release = serve_delay == 0;
        }

        let report = game.step(&input);
        if !report.is_stopped() {
            continue;
        }
        log::info!(
            "tick {}: {:?} (level {}, score {}, lives {})",
            tick,
            report.game_stopper,
            game.level(),
            game.score(),
            game.lives()
        );
        match report.game_stopper {
            GameStopper::Win | GameStopper::GameOver => {
                println!(
                    "{:?} after {} ticks, level scores: {:?}",
                    report.game_stopper,
                    tick,
                    game.level_scores()
                );
                return ExitCode::SUCCESS;
            }
            _ => serve_delay = SERVE_DELAY_TICKS,
        }
    }

    println!("Stopped after {} ticks with score {}", MAX_TICKS, game.score());
    ExitCode::SUCCESS
}

/// Track the lowest descending ball, or the falling power-up when no ball is coming down
fn autopilot(game: &Game) -> i32 {
    let paddle = game.paddle();
    let threat = game
        .balls()
        .filter(|b| b.is_descending())
        .max_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|b| b.pos.x);
    let target = threat.or_else(|| game.powerup().filter(|p| p.falling).map(|p| p.pos.x));

    match target {
        Some(x) => {
            // Aim slightly off center to vary the bounce angle
            let offset = paddle.width as f32 * 0.1;
            let dx = (x - offset - paddle.x as f32).round() as i32;
            dx.clamp(-paddle.speed, paddle.speed)
        }
        None => 0,
    }
}
