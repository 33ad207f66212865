//! Core game rules for Snake
//!
//! Everything here is free of I/O and rendering: the engine advances a
//! [`GameState`] one tick at a time and the [`GameSession`] wraps it with
//! the start/game-over lifecycle and the high score record.

pub mod config;
pub mod direction;
pub mod engine;
pub mod error;
pub mod mode;
pub mod session;
pub mod spawner;
pub mod state;

// Re-export commonly used types
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::{GameEngine, StepEvent, StepResult};
pub use error::GameError;
pub use mode::{GameMode, ModeSettings};
pub use session::{GameOverSummary, GameSession};
pub use spawner::Spawner;
pub use state::{
    ActivePowerUp, CollisionType, Food, FoodKind, GamePhase, GameState, Obstacle, Position,
    PowerUp, PowerUpKind, Snake,
};
