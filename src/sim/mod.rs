//! Brick breaker simulation
//!
//! Everything that moves lives here: balls, paddle, bricks and the falling
//! power-up. A [`Game`] advances in whole ticks and draws randomness only
//! from its seeded generator. Balls are processed in slot order.

pub mod ball;
pub mod brick;
pub mod collision;
pub mod events;
pub mod paddle;
pub mod powerup;
pub mod state;
pub mod tick;

pub use ball::{Ball, Quadrant};
pub use brick::{Brick, BrickGrid, CellCoord};
pub use collision::{Collider, clamp_bounce_angle};
pub use events::{EventReport, GameStopper, PowerUpState};
pub use paddle::Paddle;
pub use powerup::{PowerUp, PowerUpKind};
pub use state::{Game, Snapshot};
pub use tick::TickInput;
