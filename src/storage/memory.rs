use super::{HighScore, HighScoreStore, StoreError};

/// In-process store; nothing survives the program
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    record: Option<HighScore>,
    saves: usize,
    offline: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: HighScore) -> Self {
        Self {
            record: Some(record),
            ..Self::default()
        }
    }

    /// A store whose every load and save fails
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    pub fn record(&self) -> Option<&HighScore> {
        self.record.as_ref()
    }

    /// Number of successful saves
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<Option<HighScore>, StoreError> {
        if self.offline {
            return Err(StoreError::Unavailable("store is offline".to_string()));
        }
        Ok(self.record.clone())
    }

    fn save(&mut self, record: &HighScore) -> Result<(), StoreError> {
        if self.offline {
            return Err(StoreError::Unavailable("store is offline".to_string()));
        }
        self.record = Some(record.clone());
        self.saves += 1;
        Ok(())
    }
}
