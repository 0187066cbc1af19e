//! Session state
//!
//! The [`Game`] owns everything that changes during play: score, lives, the
//! brick grid, the ball slots and the power-up. It is mutated only through
//! the paddle/release commands here and `tick` in the tick module.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::brick::{BrickGrid, CellCoord};
use super::collision::Collider;
use super::events::GameStopper;
use super::paddle::Paddle;
use super::powerup::{PowerUp, PowerUpKind};
use crate::config::GameConfig;
use crate::level::{LevelFormatError, LevelSet};

/// Read-only view of the session for a UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub score: u64,
    pub level: u32,
    pub lives: u32,
    pub paddle: Paddle,
    /// Ball slots; slot index is stable across a tick
    pub balls: Vec<Option<Ball>>,
    pub grid: BrickGrid,
    pub powerup: Option<PowerUp>,
    /// Cell each ball slot hit during the last tick
    pub recently_hit: Vec<Option<CellCoord>>,
}

/// A single-player session
#[derive(Debug, Clone)]
pub struct Game {
    pub(crate) config: GameConfig,
    pub(crate) levels: LevelSet,
    pub(crate) collider: Collider,
    pub(crate) rng: Pcg32,
    pub(crate) score: u64,
    /// 1-based
    pub(crate) level: u32,
    pub(crate) lives: u32,
    /// Score at the end of each level, index 0 = before level 1
    pub(crate) level_scores: Vec<u64>,
    pub(crate) paddle: Paddle,
    pub(crate) balls: Vec<Option<Ball>>,
    pub(crate) grid: BrickGrid,
    pub(crate) bricks_alive: usize,
    pub(crate) powerup: Option<PowerUp>,
    /// Ticks until the next power-up appears (counts only while none is visible)
    pub(crate) powerup_countdown: u32,
    /// Ticks left on the active power-up effect, 0 = none
    pub(crate) effect_ticks: u32,
    pub(crate) recently_hit: Vec<Option<CellCoord>>,
}

impl Game {
    /// Start a session on level 1 with a seeded RNG
    pub fn new(config: GameConfig, levels: LevelSet, seed: u64) -> Result<Self, LevelFormatError> {
        Self::with_rng(config, levels, Pcg32::seed_from_u64(seed))
    }

    /// Start a session with an explicit RNG
    pub fn with_rng(
        config: GameConfig,
        levels: LevelSet,
        rng: Pcg32,
    ) -> Result<Self, LevelFormatError> {
        let Some(first) = levels.get(1) else {
            return Err(LevelFormatError::EmptySet);
        };
        let grid = BrickGrid::from_layout(
            first,
            &config.field,
            config.brick_height,
            config.brick_top_offset,
        );
        let paddle = Paddle::new(
            config.field.center_x(),
            config.paddle_y(),
            config.paddle_width,
            config.paddle_height,
            config.paddle_speed,
        );
        let slots = config.max_balls.max(1);

        let mut game = Self {
            collider: Collider::new(config.field),
            rng,
            score: 0,
            level: 1,
            lives: config.max_lives,
            level_scores: vec![0; levels.len() + 1],
            bricks_alive: grid.alive_count(),
            grid,
            paddle,
            balls: vec![None; slots],
            powerup: None,
            powerup_countdown: 0,
            effect_ticks: 0,
            recently_hit: vec![None; slots],
            levels,
            config,
        };
        game.powerup_countdown = game.roll_powerup_delay();
        game.reset_serve();
        log::info!(
            "New session: {} levels, {} lives, {} bricks on level 1",
            game.levels.len(),
            game.lives,
            game.bricks_alive
        );
        Ok(game)
    }

    // === Caller commands ===

    /// Move the paddle sideways; a held ball moves with it
    pub fn move_paddle(&mut self, dx: i32) {
        let moved = self.paddle.shift(dx, &self.config.field);
        if moved != 0 && self.paddle.holds_ball {
            let paddle = &self.paddle;
            if let Some(ball) = self.balls.iter_mut().flatten().next() {
                ball.rest_on(paddle);
            }
        }
    }

    /// Launch the held ball
    ///
    /// Ignored once the grid is cleared, so a won session stays put until
    /// the levels are reloaded.
    pub fn release_ball(&mut self) {
        if self.paddle.holds_ball && self.bricks_alive > 0 {
            self.paddle.holds_ball = false;
            log::debug!("Ball released on level {}", self.level);
        }
    }

    /// Replace the level set and restart the session.
    ///
    /// Every source is validated first; on error nothing changes.
    pub fn reload_levels<S: AsRef<str>>(&mut self, sources: &[S]) -> Result<(), LevelFormatError> {
        let levels = LevelSet::parse(sources)?;
        self.levels = levels;
        self.reset_game();
        Ok(())
    }

    // === Accessors ===

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    /// Score snapshot at the end of each cleared level (index = level number)
    pub fn level_scores(&self) -> &[u64] {
        &self.level_scores
    }

    pub fn paddle(&self) -> &Paddle {
        &self.paddle
    }

    /// All ball slots, empty slots included
    pub fn ball_slots(&self) -> &[Option<Ball>] {
        &self.balls
    }

    pub fn balls(&self) -> impl Iterator<Item = &Ball> {
        self.balls.iter().flatten()
    }

    pub fn ball_count(&self) -> usize {
        self.balls().count()
    }

    pub fn grid(&self) -> &BrickGrid {
        &self.grid
    }

    pub fn bricks_alive(&self) -> usize {
        self.bricks_alive
    }

    pub fn powerup(&self) -> Option<&PowerUp> {
        self.powerup.as_ref()
    }

    /// Ticks left on the active power-up effect, 0 if none
    pub fn effect_ticks(&self) -> u32 {
        self.effect_ticks
    }

    pub fn recently_hit(&self) -> &[Option<CellCoord>] {
        &self.recently_hit
    }

    pub fn is_serving(&self) -> bool {
        self.paddle.holds_ball
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            score: self.score,
            level: self.level,
            lives: self.lives,
            paddle: self.paddle.clone(),
            balls: self.balls.clone(),
            grid: self.grid.clone(),
            powerup: self.powerup.clone(),
            recently_hit: self.recently_hit.clone(),
        }
    }

    // === Transitions ===

    /// Drop extra balls and pin the survivor to the centered paddle
    ///
    /// The survivor moves to slot 0 and keeps its hit marker; markers of
    /// dropped slots are cleared.
    pub(crate) fn reset_serve(&mut self) {
        let kept = self.balls.iter().position(Option::is_some);
        let survivor = kept.and_then(|slot| self.balls[slot].take());
        let marker = kept.and_then(|slot| self.recently_hit.get(slot).copied().flatten());
        self.balls.iter_mut().for_each(|slot| *slot = None);
        self.recently_hit.iter_mut().for_each(|cell| *cell = None);
        if let Some(first) = self.recently_hit.first_mut() {
            *first = marker;
        }

        self.paddle.reset_attributes();
        self.paddle.x = self.config.field.center_x();
        self.paddle.holds_ball = true;

        let angle = self.roll_serve_angle();
        let mut ball = match survivor {
            Some(mut ball) => {
                ball.reset_attributes();
                ball.set_angle(angle);
                ball
            }
            None => Ball::new(
                Vec2::ZERO,
                self.config.ball_radius,
                self.config.ball_speed,
                angle,
            ),
        };
        ball.rest_on(&self.paddle);
        self.balls[0] = Some(ball);
    }

    /// Remove the visible power-up and cancel any active effect
    pub(crate) fn clear_powerup(&mut self) {
        self.deactivate_powerup();
        self.remove_powerup();
    }

    pub(crate) fn remove_powerup(&mut self) {
        self.powerup = None;
        self.powerup_countdown = self.roll_powerup_delay();
    }

    pub(crate) fn deactivate_powerup(&mut self) {
        for ball in self.balls.iter_mut().flatten() {
            ball.reset_attributes();
        }
        self.paddle.reset_attributes();
        self.effect_ticks = 0;
    }

    /// Load `level` and serve; the score rolls back to the previous level's snapshot
    pub(crate) fn restart_level(&mut self, level: u32) {
        if let Some(layout) = self.levels.get(level) {
            self.grid = BrickGrid::from_layout(
                layout,
                &self.config.field,
                self.config.brick_height,
                self.config.brick_top_offset,
            );
            self.level = level;
        }
        self.bricks_alive = self.grid.alive_count();
        self.reset_serve();
        // Markers refer to the previous grid
        self.recently_hit.iter_mut().for_each(|cell| *cell = None);
        self.clear_powerup();
        let previous = (self.level as usize).saturating_sub(1);
        self.score = self.level_scores.get(previous).copied().unwrap_or(0);
    }

    /// Back to level 1 with a full set of lives and no score
    pub(crate) fn reset_game(&mut self) {
        self.level_scores = vec![0; self.levels.len() + 1];
        self.lives = self.config.max_lives;
        self.restart_level(1);
        self.score = 0;
    }

    /// Current level cleared
    pub(crate) fn level_up(&mut self) -> GameStopper {
        if let Some(slot) = self.level_scores.get_mut(self.level as usize) {
            *slot = self.score;
        }
        if self.level as usize >= self.levels.len() {
            log::info!("Final level {} cleared with score {}", self.level, self.score);
            self.reset_serve();
            self.clear_powerup();
            return GameStopper::Win;
        }
        let next = self.level + 1;
        log::info!("Level {} cleared with score {}, starting level {}", self.level, self.score, next);
        self.restart_level(next);
        GameStopper::LevelUp
    }

    /// Last ball fell through the floor
    pub(crate) fn lose_life(&mut self) -> GameStopper {
        self.lives = self.lives.saturating_sub(1);
        if self.lives > 0 {
            log::info!("Ball lost, {} lives left", self.lives);
            self.reset_serve();
            self.clear_powerup();
            GameStopper::LifeDown
        } else {
            log::info!("Game over on level {} with score {}", self.level, self.score);
            self.reset_game();
            GameStopper::GameOver
        }
    }

    // === Randomness ===

    pub(crate) fn roll_serve_angle(&mut self) -> f32 {
        let (lo, hi) = self.config.serve_angle_range();
        self.rng.random_range(lo..=hi)
    }

    pub(crate) fn roll_powerup_delay(&mut self) -> u32 {
        let lo = self.config.powerup_appear_min_ticks.max(1);
        let hi = self.config.powerup_appear_max_ticks.max(lo);
        self.rng.random_range(lo..=hi)
    }

    /// Random power-up kind
    pub(crate) fn roll_powerup_kind(&mut self) -> PowerUpKind {
        PowerUpKind::random(&mut self.rng)
    }
}
