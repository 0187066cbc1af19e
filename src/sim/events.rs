//! Per-tick outcome report handed back to the caller

use serde::{Deserialize, Serialize};

/// Why the caller should stop ticking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStopper {
    #[default]
    None,
    /// Level cleared, next level loaded
    LevelUp,
    /// Last ball lost, a life was spent
    LifeDown,
    /// Last ball lost with no lives left; the session was reset
    GameOver,
    /// Final level cleared
    Win,
}

/// Power-up lifecycle as seen this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PowerUpState {
    #[default]
    None,
    /// Visible and hanging
    Exists,
    Falling,
    /// Caught by the paddle this tick
    Taken,
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EventReport {
    pub game_stopper: GameStopper,
    pub brick_hit: bool,
    pub powerup_state: PowerUpState,
}

impl EventReport {
    /// True if the caller should halt ticking
    pub fn is_stopped(&self) -> bool {
        self.game_stopper != GameStopper::None
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
