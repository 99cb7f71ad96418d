//! Table configuration models.

use serde::{Deserialize, Serialize};

use crate::game::{
    TableRules,
    constants::{MAX_PLAYERS, MIN_PLAYERS},
    entities::PlayerId,
};

/// Table configuration.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Table name, used for logging only.
    pub name: String,

    /// Identity allowed to reset a finished game.
    pub owner: PlayerId,

    /// Seat bound, at most the engine-wide maximum.
    pub max_players: usize,

    /// Seats needed before a hand starts.
    pub min_players: usize,
}

impl TableConfig {
    pub fn new(name: impl Into<String>, owner: PlayerId) -> Self {
        Self {
            name: name.into(),
            owner,
            max_players: MAX_PLAYERS,
            min_players: MIN_PLAYERS,
        }
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.owner.as_str().is_empty() {
            return Err("Table owner must be a non-empty identity".to_string());
        }

        if self.min_players < 2 {
            return Err("A hand needs at least 2 players".to_string());
        }

        if self.max_players < self.min_players || self.max_players > MAX_PLAYERS {
            return Err(format!(
                "Max players must be between {} and {}",
                self.min_players, MAX_PLAYERS
            ));
        }

        Ok(())
    }

    /// The engine-facing slice of this configuration.
    #[must_use]
    pub fn rules(&self) -> TableRules {
        TableRules {
            owner: self.owner.clone(),
            max_players: self.max_players,
            min_players: self.min_players,
        }
    }
}
