use std::path::{Path, PathBuf};

use super::{HighScore, HighScoreStore, StoreError};

/// Keeps the record as a small JSON document on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&self) -> Result<Option<HighScore>, StoreError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        if raw.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn save(&mut self, record: &HighScore) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(record)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("high_score.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_creates_parent_dirs_and_loads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("scores").join("high_score.json");
        let mut store = JsonFileStore::new(&path);

        store.save(&HighScore::new(42, "ada")).unwrap();

        assert!(path.exists());
        let loaded = JsonFileStore::new(&path).load().unwrap();
        assert_eq!(loaded, Some(HighScore::new(42, "ada")));
    }

    #[test]
    fn test_save_overwrites_previous_record() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("hs.json"));

        store.save(&HighScore::new(3, "first")).unwrap();
        store.save(&HighScore::new(9, "second")).unwrap();

        assert_eq!(store.load().unwrap(), Some(HighScore::new(9, "second")));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hs.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonFileStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::Json(_)));
    }
}
