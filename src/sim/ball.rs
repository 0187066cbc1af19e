//! Ball kinematics
//!
//! A ball moves by a fixed displacement each tick. Its direction is stored as
//! an angle and the velocity components are cached so `step` is two adds.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;

use super::paddle::Paddle;
use crate::normalize_angle;

/// Direction quadrant of a ball's angle, counted counterclockwise from 0 rad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quadrant {
    /// Up and to the right: (0, π/2]
    First,
    /// Up and to the left: (π/2, π]
    Second,
    /// Down and to the left: [-π, -π/2)
    Third,
    /// Down and to the right: [-π/2, 0]
    Fourth,
}

impl Quadrant {
    pub fn of(angle: f32) -> Self {
        if angle > 0.0 {
            if angle <= FRAC_PI_2 {
                Quadrant::First
            } else {
                Quadrant::Second
            }
        } else if angle >= -FRAC_PI_2 {
            Quadrant::Fourth
        } else {
            Quadrant::Third
        }
    }

    /// 1-based quadrant number
    pub fn number(self) -> u8 {
        match self {
            Quadrant::First => 1,
            Quadrant::Second => 2,
            Quadrant::Third => 3,
            Quadrant::Fourth => 4,
        }
    }
}

/// A ball entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Center, screen coordinates (y grows downward)
    pub pos: Vec2,
    pub radius: f32,
    /// Radius to restore when a power-up wears off
    pub original_radius: f32,
    /// Speed to restore when a power-up wears off
    pub original_speed: f32,
    speed: f32,
    /// Radians in (-π, π], positive is upward on screen
    angle: f32,
    speed_x: f32,
    speed_y: f32,
}

impl Ball {
    pub fn new(pos: Vec2, radius: f32, speed: f32, angle: f32) -> Self {
        let mut ball = Self {
            pos,
            radius,
            original_radius: radius,
            original_speed: speed,
            speed,
            angle: 0.0,
            speed_x: 0.0,
            speed_y: 0.0,
        };
        ball.set_angle(angle);
        ball
    }

    /// Ball resting on top of the paddle's center
    pub fn on_paddle(paddle: &Paddle, radius: f32, speed: f32, angle: f32) -> Self {
        let mut ball = Self::new(Vec2::ZERO, radius, speed, angle);
        ball.rest_on(paddle);
        ball
    }

    /// Copy of this ball heading in a new direction
    ///
    /// Every field is listed so a new field has to be considered here.
    pub fn split(&self, angle: f32) -> Self {
        let mut ball = Self {
            pos: self.pos,
            radius: self.radius,
            original_radius: self.original_radius,
            original_speed: self.original_speed,
            speed: self.speed,
            angle: self.angle,
            speed_x: self.speed_x,
            speed_y: self.speed_y,
        };
        ball.set_angle(angle);
        ball
    }

    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Per-tick displacement (x right, y up)
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        Vec2::new(self.speed_x, self.speed_y)
    }

    pub fn quadrant(&self) -> Quadrant {
        Quadrant::of(self.angle)
    }

    /// True while the ball heads toward the floor (angle <= 0)
    #[inline]
    pub fn is_descending(&self) -> bool {
        self.angle <= 0.0
    }

    pub fn set_angle(&mut self, angle: f32) {
        self.angle = normalize_angle(angle);
        self.update_velocity();
    }

    pub fn change_speed(&mut self, speed: f32) {
        self.speed = speed;
        self.update_velocity();
    }

    /// Advance one tick
    pub fn step(&mut self) {
        self.pos.x += self.speed_x;
        self.pos.y -= self.speed_y;
    }

    /// Restore radius and speed after a power-up
    pub fn reset_attributes(&mut self) {
        self.radius = self.original_radius;
        self.change_speed(self.original_speed);
    }

    /// Place the ball on top of the paddle's center
    pub fn rest_on(&mut self, paddle: &Paddle) {
        self.pos = Vec2::new(paddle.x as f32, paddle.top() as f32 - self.radius);
    }

    fn update_velocity(&mut self) {
        self.speed_x = self.angle.cos() * self.speed;
        self.speed_y = self.angle.sin() * self.speed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_angle_is_normalized() {
        let mut ball = Ball::new(Vec2::ZERO, 9.0, 3.0, 0.0);
        ball.set_angle(3.0 * PI / 2.0);
        assert!((ball.angle() + PI / 2.0).abs() < 1e-5);
        ball.set_angle(-PI);
        assert!((ball.angle() - PI).abs() < 1e-6);
    }

    #[test]
    fn test_step_moves_up_for_positive_angle() {
        let mut ball = Ball::new(Vec2::new(100.0, 100.0), 9.0, 3.0, PI / 2.0);
        ball.step();
        assert!((ball.pos.x - 100.0).abs() < 1e-4);
        assert!((ball.pos.y - 97.0).abs() < 1e-4);
    }

    #[test]
    fn test_change_speed_keeps_direction() {
        let mut ball = Ball::new(Vec2::ZERO, 9.0, 3.0, PI / 4.0);
        ball.change_speed(5.0);
        let v = ball.velocity();
        assert!((v.length() - 5.0).abs() < 1e-4);
        assert!((v.x - v.y).abs() < 1e-4);
    }

    #[test]
    fn test_quadrant_boundaries() {
        assert_eq!(Quadrant::of(0.0), Quadrant::Fourth);
        assert_eq!(Quadrant::of(FRAC_PI_2), Quadrant::First);
        assert_eq!(Quadrant::of(PI), Quadrant::Second);
        assert_eq!(Quadrant::of(-FRAC_PI_2), Quadrant::Fourth);
        assert_eq!(Quadrant::of(-PI), Quadrant::Third);
        assert_eq!(Quadrant::of(-2.0).number(), 3);
    }

    #[test]
    fn test_reset_attributes() {
        let mut ball = Ball::new(Vec2::ZERO, 9.0, 3.0, 1.0);
        ball.radius += 8.0;
        ball.change_speed(5.0);
        ball.reset_attributes();
        assert_eq!(ball.radius, 9.0);
        assert_eq!(ball.speed(), 3.0);
        assert!((ball.velocity().length() - 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_split_copies_state() {
        let mut ball = Ball::new(Vec2::new(5.0, 6.0), 9.0, 3.0, 1.0);
        ball.radius = 17.0;
        let copy = ball.split(2.0);
        assert_eq!(copy.pos, ball.pos);
        assert_eq!(copy.radius, 17.0);
        assert_eq!(copy.original_radius, 9.0);
        assert!((copy.angle() - 2.0).abs() < 1e-6);
        assert!((ball.angle() - 1.0).abs() < 1e-6);
    }
}
