//! Fixed-step simulation tick
//!
//! One call advances every live ball by one displacement and runs the
//! power-up timers once. Randomness comes only from the session RNG, so two
//! sessions with the same seed and inputs stay identical.

use glam::Vec2;
use rand::Rng;
use std::f32::consts::PI;

use super::events::{EventReport, GameStopper, PowerUpState};
use super::powerup::{PowerUp, PowerUpKind};
use super::state::Game;
use crate::consts::POINTS_PER_HIT;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Horizontal paddle displacement in pixels
    pub paddle_shift: i32,
    /// Launch the held ball
    pub release: bool,
}

impl Game {
    /// Apply input, then advance one tick
    pub fn step(&mut self, input: &TickInput) -> EventReport {
        if input.paddle_shift != 0 {
            self.move_paddle(input.paddle_shift);
        }
        if input.release {
            self.release_ball();
        }
        self.tick()
    }

    /// Advance the simulation by one tick
    ///
    /// Does nothing while the paddle holds the ball. Returns as soon as a game
    /// stopper is reported; the caller should halt ticking until it re-arms.
    pub fn tick(&mut self) -> EventReport {
        let mut report = EventReport::default();
        if self.paddle.holds_ball {
            return report;
        }
        self.recently_hit.iter_mut().for_each(|cell| *cell = None);

        let collider = self.collider;
        for slot in 0..self.balls.len() {
            let living = self.balls.iter().flatten().count();
            let Some(ball) = self.balls[slot].as_mut() else {
                continue;
            };

            if ball.is_descending() {
                if collider.ball_falls_down(ball) {
                    if living > 1 {
                        log::debug!("Ball in slot {} lost, {} left", slot, living - 1);
                        self.balls[slot] = None;
                        continue;
                    }
                    report.game_stopper = self.lose_life();
                    return report;
                }
                if collider.ball_hits_paddle(ball, &self.paddle) {
                    collider.bounce_on_paddle(ball, &self.paddle);
                }
            } else if collider.ball_hits_upper_bound(ball) {
                collider.bounce_vertically(ball);
            }

            if collider.ball_hits_wall(ball) {
                collider.bounce_horizontally(ball);
            }

            if let Some(cell) = collider.ball_hits_brick(ball, &self.grid) {
                // Every brick contact is treated as a horizontal face
                collider.bounce_vertically(ball);
                report.brick_hit = true;
                self.recently_hit[slot] = Some(cell);

                let mut destroyed = false;
                if let Some(brick) = self.grid.get_mut(cell) {
                    brick.hit();
                    self.score += POINTS_PER_HIT;
                    destroyed = !brick.is_alive();
                }
                log::debug!(
                    "Ball {} hit brick ({}, {}), destroyed: {}",
                    slot,
                    cell.row,
                    cell.column,
                    destroyed
                );

                if destroyed {
                    self.bricks_alive = self.bricks_alive.saturating_sub(1);
                    if self.bricks_alive == 0 {
                        report.game_stopper = self.level_up();
                        return report;
                    }
                }
            }

            ball.step();
        }

        self.tick_powerup(&mut report);
        report
    }

    /// Spawn, advance, catch or drop the power-up and run the effect timer
    fn tick_powerup(&mut self, report: &mut EventReport) {
        if self.powerup.is_none() {
            self.powerup_countdown = self.powerup_countdown.saturating_sub(1);
            if self.powerup_countdown == 0 {
                self.spawn_powerup();
            }
        }

        if let Some(powerup) = self.powerup.as_mut() {
            powerup.tick();
            report.powerup_state = if powerup.falling {
                PowerUpState::Falling
            } else {
                PowerUpState::Exists
            };

            if self.collider.paddle_hits_powerup(&self.paddle, powerup) {
                let kind = powerup.kind;
                self.remove_powerup();
                self.activate_powerup(kind);
                report.powerup_state = PowerUpState::Taken;
            } else if powerup.pos.y + powerup.radius >= self.config.field.bottom() {
                log::debug!("{:?} power-up missed", powerup.kind);
                self.remove_powerup();
                report.powerup_state = PowerUpState::None;
            }
        }

        if self.effect_ticks > 0 {
            self.effect_ticks -= 1;
            if self.effect_ticks == 0 {
                log::info!("Power-up effect expired");
                self.deactivate_powerup();
            }
        }
    }

    /// Place a random power-up between the bricks and the paddle
    fn spawn_powerup(&mut self) {
        let field = self.config.field;
        let radius = self.config.powerup_radius;
        let ball_radius = self
            .balls()
            .next()
            .map(|b| b.radius)
            .unwrap_or(self.config.ball_radius);

        let x_lo = field.left + radius;
        let x_hi = field.right() - radius;
        let y_lo = self.grid.bottom() + radius;
        let y_hi = (self.paddle.y - self.paddle.height) as f32 - 3.0 * ball_radius - radius;

        let pos = Vec2::new(
            random_between(&mut self.rng, x_lo, x_hi),
            random_between(&mut self.rng, y_lo, y_hi),
        );
        let kind = self.roll_powerup_kind();
        log::debug!("{:?} power-up appeared at ({:.0}, {:.0})", kind, pos.x, pos.y);
        self.powerup = Some(PowerUp::new(
            kind,
            pos,
            radius,
            self.config.powerup_fall_speed,
            self.config.powerup_sleep_ticks,
        ));
    }

    /// Apply a caught power-up's effect and (re)start the effect timer
    pub(crate) fn activate_powerup(&mut self, kind: PowerUpKind) {
        log::info!("{:?} power-up taken", kind);
        let delta = self.config.powerup_speed_delta;
        match kind {
            PowerUpKind::FastBall => {
                for ball in self.balls.iter_mut().flatten() {
                    ball.change_speed(ball.speed() + delta);
                }
            }
            PowerUpKind::SlowBall => {
                let floor = self.config.ball_min_speed;
                for ball in self.balls.iter_mut().flatten() {
                    ball.change_speed((ball.speed() - delta).max(floor));
                }
            }
            PowerUpKind::SuperBall => {
                let bonus = self.config.powerup_radius_bonus;
                for ball in self.balls.iter_mut().flatten() {
                    ball.radius += bonus;
                }
            }
            PowerUpKind::TripleBall => self.split_balls(),
        }
        self.effect_ticks = self.config.powerup_effect_ticks.max(1);
    }

    /// Fill empty slots among the first three with copies of the first ball
    fn split_balls(&mut self) {
        let Some(source) = self.balls.iter().flatten().next().cloned() else {
            return;
        };
        let limit = self.balls.len().min(3);
        for slot in 0..limit {
            if self.balls[slot].is_none() {
                let angle = self.rng.random_range(f32::EPSILON..PI);
                self.balls[slot] = Some(source.split(angle));
            }
        }
    }
}

/// Uniform in [lo, hi), or `lo` when the range is empty
fn random_between<R: Rng>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.random_range(lo..hi) } else { lo }
}
