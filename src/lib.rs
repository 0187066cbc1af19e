//! Brickfall - a brick-breaking arcade game engine
//!
//! Core modules:
//! - `sim`: Tick-driven simulation (ball kinematics, collisions, game state machine)
//! - `level`: Level layout parsing and validation
//! - `config`: Data-driven game tuning

pub mod config;
pub mod level;
pub mod sim;

pub use config::{GameConfig, PlayField};
pub use level::{LevelFormatError, LevelLayout, LevelSet};
pub use sim::{EventReport, Game, GameStopper, PowerUpState, TickInput};

/// Game configuration constants
pub mod consts {
    /// Play field dimensions (pixels)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Session defaults
    pub const MAX_LIVES: u32 = 3;
    pub const MAX_BALLS: usize = 3;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 9.0;
    /// Pixels per tick
    pub const BALL_SPEED: f32 = 3.0;
    /// Slow-ball never goes below this
    pub const BALL_MIN_SPEED: f32 = 1.0;
    /// Serve angle range in degrees
    pub const SERVE_ANGLE_MIN_DEG: f32 = 45.0;
    pub const SERVE_ANGLE_MAX_DEG: f32 = 135.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: i32 = 100;
    pub const PADDLE_HEIGHT: i32 = 20;
    pub const PADDLE_SPEED: i32 = 10;
    /// Distance from the field floor to the paddle center
    pub const PADDLE_FLOOR_GAP: i32 = 20;
    /// Curvature circle radius as a multiple of the initial paddle width
    pub const PADDLE_CURVATURE_FACTOR: i32 = 3;
    /// Minimum bounce angle off the paddle (5 degrees)
    pub const MIN_BOUNCE_ANGLE: f32 = 5.0 * std::f32::consts::PI / 180.0;

    /// Brick defaults
    pub const BRICK_HEIGHT: i32 = 20;
    pub const BRICK_TOP_OFFSET: i32 = 0;
    pub const POINTS_PER_HIT: u64 = 10;

    /// Power-up defaults
    pub const POWERUP_RADIUS: f32 = 15.0;
    pub const POWERUP_FALL_SPEED: f32 = 1.0;
    pub const POWERUP_SLEEP_TICKS: u32 = 500;
    pub const POWERUP_EFFECT_TICKS: u32 = 500;
    pub const POWERUP_APPEAR_MIN_TICKS: u32 = 500;
    pub const POWERUP_APPEAR_MAX_TICKS: u32 = 1000;
    pub const POWERUP_SPEED_DELTA: f32 = 2.0;
    pub const POWERUP_RADIUS_BONUS: f32 = 8.0;
}

/// Normalize angle to (-π, π]
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    while angle > PI {
        angle -= TAU;
    }
    while angle <= -PI {
        angle += TAU;
    }
    angle
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle_range() {
        assert!((normalize_angle(2.5 * PI) - PI / 2.0).abs() < 1e-5);
        assert!((normalize_angle(-PI) - PI).abs() < 1e-6);
        assert!((normalize_angle(-3.0 * PI / 2.0) - PI / 2.0).abs() < 1e-5);
        assert_eq!(normalize_angle(0.5), 0.5);
    }
}
