use thiserror::Error;

/// Errors raised by the rules engine
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// No free cell is left to place an entity on
    #[error("no free cell left on the grid to place {entity}")]
    GenerationExhausted { entity: &'static str },

    #[error("unknown game mode: {0:?} (expected classic, speed or maze)")]
    UnknownMode(String),
}
