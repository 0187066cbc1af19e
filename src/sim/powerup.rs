//! Falling power-ups

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Bigger balls
    SuperBall,
    /// Split the ball into three
    TripleBall,
    FastBall,
    SlowBall,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::SuperBall,
        PowerUpKind::TripleBall,
        PowerUpKind::FastBall,
        PowerUpKind::SlowBall,
    ];

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// A power-up hanging in the field, then falling toward the paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub radius: f32,
    /// Pixels per tick once falling
    pub speed: f32,
    /// Ticks left before it starts falling
    pub sleep_ticks: u32,
    pub falling: bool,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, pos: Vec2, radius: f32, speed: f32, sleep_ticks: u32) -> Self {
        Self {
            kind,
            pos,
            radius,
            speed,
            sleep_ticks,
            falling: sleep_ticks == 0,
        }
    }

    /// Count down while sleeping, then fall
    pub fn tick(&mut self) {
        if self.sleep_ticks > 0 {
            self.sleep_ticks -= 1;
            if self.sleep_ticks == 0 {
                self.falling = true;
            }
        } else {
            self.pos.y += self.speed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_sleeps_then_falls() {
        let mut powerup = PowerUp::new(PowerUpKind::FastBall, Vec2::new(10.0, 10.0), 15.0, 1.0, 2);
        powerup.tick();
        assert!(!powerup.falling);
        powerup.tick();
        assert!(powerup.falling);
        assert_eq!(powerup.pos.y, 10.0);
        powerup.tick();
        assert_eq!(powerup.pos.y, 11.0);
    }

    #[test]
    fn test_random_kind_covers_all() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut seen = [false; 4];
        for _ in 0..200 {
            let kind = PowerUpKind::random(&mut rng);
            let index = PowerUpKind::ALL.iter().position(|k| *k == kind).unwrap();
            seen[index] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
