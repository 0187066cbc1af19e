//! Property tests for ball kinematics and bounce geometry

use std::f32::consts::PI;

use brickfall::consts::MIN_BOUNCE_ANGLE;
use brickfall::sim::{Ball, Brick, Collider, Paddle};
use brickfall::PlayField;
use glam::Vec2;
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_angle_stays_normalized(angle in -100.0f32..100.0, speed in 0.5f32..20.0) {
        let mut ball = Ball::new(Vec2::new(100.0, 100.0), 9.0, speed, 0.3);
        ball.set_angle(angle);
        prop_assert!(ball.angle() > -PI && ball.angle() <= PI);

        let v = ball.velocity();
        let err = (v.length_squared() - speed * speed).abs();
        prop_assert!(err <= 1e-3 * speed * speed);
    }

    #[test]
    fn test_speed_change_preserves_invariant(angle in -PI..PI, speed in 0.5f32..20.0) {
        let mut ball = Ball::new(Vec2::ZERO, 9.0, 3.0, angle);
        ball.change_speed(speed);
        let v = ball.velocity();
        prop_assert!((v.length() - speed).abs() <= 1e-3 * speed);
    }

    #[test]
    fn test_paddle_bounce_never_grazes(
        angle in -PI..=0.0f32,
        offset in -59.0f32..59.0,
        width in 40i32..200,
    ) {
        let collider = Collider::new(PlayField::default());
        let paddle = Paddle::new(400, 580, width, 20, 10);
        let mut ball = Ball::new(Vec2::new(400.0 + offset, 561.0), 9.0, 3.0, angle);
        collider.bounce_on_paddle(&mut ball, &paddle);

        let magnitude = ball.angle().abs();
        prop_assert!(magnitude >= MIN_BOUNCE_ANGLE - 1e-5);
        prop_assert!(magnitude <= PI - MIN_BOUNCE_ANGLE + 1e-5);
    }

    #[test]
    fn test_brick_alive_tracks_hits(thickness in 1u32..6, hits in 0u32..6) {
        let mut brick = Brick::new(thickness);
        let mut flips = 0;
        let mut was_alive = brick.is_alive();
        for _ in 0..hits.min(thickness) {
            brick.hit();
            prop_assert_eq!(brick.is_alive(), brick.hits() < thickness);
            if was_alive != brick.is_alive() {
                flips += 1;
            }
            was_alive = brick.is_alive();
        }
        prop_assert!(flips <= 1);
        prop_assert_eq!(flips == 1, hits >= thickness);
    }
}
