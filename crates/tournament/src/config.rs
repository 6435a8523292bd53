//! Scenario files: a named, ordered list of operations to replay against a
//! fresh chess system.
//!
//! ```toml
//! name = "London open"
//!
//! [[steps]]
//! action = "add_tournament"
//! id = 1
//! max_games_per_player = 4
//! location = "London"
//!
//! [[steps]]
//! action = "add_game"
//! tournament = 1
//! first = 1
//! second = 2
//! winner = "first_player"
//! play_time = 2000
//!
//! [[steps]]
//! action = "end_tournament"
//! id = 1
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::{PlayerId, TournamentId, Winner};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse scenario: {0}")]
    Parse(#[from] toml::de::Error),
}

/// One operation of a scenario. Ids and counts are kept signed so invalid
/// values reach the system and are rejected there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    AddTournament {
        id: TournamentId,
        max_games_per_player: i32,
        location: String,
    },
    AddGame {
        tournament: TournamentId,
        first: PlayerId,
        second: PlayerId,
        winner: Winner,
        play_time: i32,
    },
    RemoveTournament {
        id: TournamentId,
    },
    RemovePlayer {
        id: PlayerId,
    },
    EndTournament {
        id: TournamentId,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub name: String,
    pub steps: Vec<Step>,
}

impl ScenarioConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
