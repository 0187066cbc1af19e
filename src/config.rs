//! Game tuning and play-field geometry
//!
//! Every tunable lives here so a session can be reconfigured from JSON
//! without touching the simulation code.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Rectangle the game is played in (screen coordinates, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayField {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for PlayField {
    fn default() -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
        }
    }
}

impl PlayField {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Horizontal center, rounded down to a whole pixel
    #[inline]
    pub fn center_x(&self) -> i32 {
        (self.left + self.width / 2.0).floor() as i32
    }
}

/// Session tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub field: PlayField,

    // === Session ===
    pub max_lives: u32,
    /// Number of ball slots (multi-ball cap)
    pub max_balls: usize,

    // === Ball ===
    pub ball_radius: f32,
    pub ball_speed: f32,
    pub ball_min_speed: f32,
    pub serve_angle_min_deg: f32,
    pub serve_angle_max_deg: f32,

    // === Paddle ===
    pub paddle_width: i32,
    pub paddle_height: i32,
    pub paddle_speed: i32,
    pub paddle_floor_gap: i32,

    // === Bricks ===
    pub brick_height: i32,
    /// Vertical indentation of the first brick row below the field top
    pub brick_top_offset: i32,

    // === Power-ups ===
    pub powerup_radius: f32,
    pub powerup_fall_speed: f32,
    pub powerup_sleep_ticks: u32,
    pub powerup_effect_ticks: u32,
    pub powerup_appear_min_ticks: u32,
    pub powerup_appear_max_ticks: u32,
    pub powerup_speed_delta: f32,
    pub powerup_radius_bonus: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field: PlayField::default(),

            max_lives: MAX_LIVES,
            max_balls: MAX_BALLS,

            ball_radius: BALL_RADIUS,
            ball_speed: BALL_SPEED,
            ball_min_speed: BALL_MIN_SPEED,
            serve_angle_min_deg: SERVE_ANGLE_MIN_DEG,
            serve_angle_max_deg: SERVE_ANGLE_MAX_DEG,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_speed: PADDLE_SPEED,
            paddle_floor_gap: PADDLE_FLOOR_GAP,

            brick_height: BRICK_HEIGHT,
            brick_top_offset: BRICK_TOP_OFFSET,

            powerup_radius: POWERUP_RADIUS,
            powerup_fall_speed: POWERUP_FALL_SPEED,
            powerup_sleep_ticks: POWERUP_SLEEP_TICKS,
            powerup_effect_ticks: POWERUP_EFFECT_TICKS,
            powerup_appear_min_ticks: POWERUP_APPEAR_MIN_TICKS,
            powerup_appear_max_ticks: POWERUP_APPEAR_MAX_TICKS,
            powerup_speed_delta: POWERUP_SPEED_DELTA,
            powerup_radius_bonus: POWERUP_RADIUS_BONUS,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON document; missing keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Paddle center y for this field
    pub fn paddle_y(&self) -> i32 {
        (self.field.bottom() as i32) - self.paddle_floor_gap
    }

    /// Serve angle range in radians
    pub fn serve_angle_range(&self) -> (f32, f32) {
        let lo = self.serve_angle_min_deg.to_radians();
        let hi = self.serve_angle_max_deg.to_radians();
        if lo <= hi { (lo, hi) } else { (hi, lo) }
    }
}
