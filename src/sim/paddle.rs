//! The player's paddle

use serde::{Deserialize, Serialize};

use crate::config::PlayField;
use crate::consts::PADDLE_CURVATURE_FACTOR;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Center x
    pub x: i32,
    /// Center y
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub original_width: i32,
    /// Pixels per input step
    pub speed: i32,
    /// Radius of the circle the bounce geometry is computed on.
    /// Fixed at construction; resizing the paddle does not change it.
    pub curvature_radius: i32,
    /// Ball is pinned to the paddle waiting for release
    pub holds_ball: bool,
}

impl Paddle {
    pub fn new(x: i32, y: i32, width: i32, height: i32, speed: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            original_width: width,
            speed,
            curvature_radius: PADDLE_CURVATURE_FACTOR * width,
            holds_ball: false,
        }
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.y - self.height / 2
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.x - self.width / 2
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.width / 2
    }

    pub fn resize(&mut self, width: i32) {
        self.width = width;
    }

    pub fn reset_attributes(&mut self) {
        self.width = self.original_width;
    }

    /// Shift horizontally, keeping both edges inside the field.
    /// Returns the distance actually moved.
    pub fn shift(&mut self, dx: i32, field: &PlayField) -> i32 {
        let half = self.width / 2;
        let min_x = field.left.ceil() as i32 + half;
        let max_x = (field.right().floor() as i32 - half).max(min_x);
        let old_x = self.x;
        self.x = self.x.saturating_add(dx).clamp(min_x, max_x);
        self.x.saturating_sub(old_x)
    }
}
