use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Cell the snake head starts on after a reset
    pub start_x: i32,
    pub start_y: i32,

    /// How long power-ups and the orange speed-up last
    pub effect_duration_ms: u64,
    /// Chance that a power-up appears whenever food is regenerated
    pub power_up_chance: f64,
    /// Tick interval reduction applied by an orange
    pub orange_speedup_ms: u64,
    /// Tick interval never drops below this
    pub min_tick_interval_ms: u64,
    /// Random placement tries before falling back to a free-cell scan
    pub max_placement_attempts: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 40,
            grid_height: 30,
            start_x: 10,
            start_y: 10,
            effect_duration_ms: 5_000,
            power_up_chance: 0.1,
            orange_speedup_ms: 10,
            min_tick_interval_ms: 50,
            max_placement_attempts: 10_000,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    #[cfg(test)]
    pub(crate) fn small() -> Self {
        Self {
            start_x: 2,
            start_y: 2,
            ..Self::new(10, 10)
        }
    }

    /// Load a configuration from a JSON file; missing fields keep their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.grid_width == 0 || self.grid_height == 0 {
            anyhow::bail!("grid must be at least 1x1");
        }
        if self.start_x < 0
            || self.start_y < 0
            || self.start_x >= self.grid_width as i32
            || self.start_y >= self.grid_height as i32
        {
            anyhow::bail!(
                "start cell ({}, {}) is outside the {}x{} grid",
                self.start_x,
                self.start_y,
                self.grid_width,
                self.grid_height
            );
        }
        if !(0.0..=1.0).contains(&self.power_up_chance) {
            anyhow::bail!("power_up_chance must be within [0, 1]");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 40);
        assert_eq!(config.grid_height, 30);
        assert_eq!((config.start_x, config.start_y), (10, 10));
        assert_eq!(config.effect_duration_ms, 5_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 15);
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 15);
    }

    #[test]
    fn test_start_outside_grid_rejected() {
        let config = GameConfig::new(8, 8);
        assert!(config.validate().is_err());
        assert!(GameConfig::small().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "grid_width": 30, "power_up_chance": 0.5 }}"#).unwrap();

        let config = GameConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.grid_width, 30);
        assert_eq!(config.grid_height, 30);
        assert_eq!(config.power_up_chance, 0.5);
        assert_eq!(config.min_tick_interval_ms, 50);
    }
}
