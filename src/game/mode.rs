use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::GameError;

/// Tick interval and obstacle density fixed for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeSettings {
    pub tick_interval_ms: u64,
    pub obstacle_count: usize,
}

/// Named game mode, chosen before a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    #[default]
    Classic,
    Speed,
    Maze,
}

impl GameMode {
    pub const ALL: [GameMode; 3] = [GameMode::Classic, GameMode::Speed, GameMode::Maze];

    pub fn settings(&self) -> ModeSettings {
        match self {
            GameMode::Classic => ModeSettings {
                tick_interval_ms: 100,
                obstacle_count: 0,
            },
            GameMode::Speed => ModeSettings {
                tick_interval_ms: 50,
                obstacle_count: 0,
            },
            GameMode::Maze => ModeSettings {
                tick_interval_ms: 100,
                obstacle_count: 10,
            },
        }
    }

    pub fn base_tick_interval_ms(&self) -> u64 {
        self.settings().tick_interval_ms
    }

    pub fn obstacle_count(&self) -> usize {
        self.settings().obstacle_count
    }

    pub fn name(&self) -> &'static str {
        match self {
            GameMode::Classic => "classic",
            GameMode::Speed => "speed",
            GameMode::Maze => "maze",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GameMode {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameMode::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GameError::UnknownMode(s.to_string()))
    }
}
