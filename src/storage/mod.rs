//! High score persistence
//!
//! The game only ever keeps a single record: the best score and the name of
//! whoever set it. Stores are collaborators of the session; their failures
//! are logged by the caller and never interrupt play.

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name recorded when the player leaves the prompt blank
pub const ANONYMOUS: &str = "Anonymous";

/// The best score so far and who holds it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    pub score: u32,
    #[serde(default)]
    pub name: String,
}

impl HighScore {
    pub fn new(score: u32, name: impl Into<String>) -> Self {
        let name = name.into();
        let trimmed = name.trim();
        Self {
            score,
            name: if trimmed.is_empty() {
                ANONYMOUS.to_string()
            } else {
                trimmed.to_string()
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("high score file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("high score record is malformed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("high score store unavailable: {0}")]
    Unavailable(String),
}

/// Where the high score record lives
pub trait HighScoreStore {
    /// `Ok(None)` when nothing has been recorded yet
    fn load(&self) -> Result<Option<HighScore>, StoreError>;

    fn save(&mut self, record: &HighScore) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_name_is_anonymous() {
        assert_eq!(HighScore::new(5, "   ").name, ANONYMOUS);
        assert_eq!(HighScore::new(5, "").name, ANONYMOUS);
        assert_eq!(HighScore::new(5, "  ada ").name, "ada");
    }

    #[test]
    fn test_record_without_name_parses() {
        let record: HighScore = serde_json::from_str(r#"{"score": 12}"#).unwrap();
        assert_eq!(record.score, 12);
        assert_eq!(record.name, "");
    }
}
