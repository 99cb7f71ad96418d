//! Server configuration management.
//!
//! Consolidates all environment variable reads and provides validated
//! configuration.

use sealed_poker::{constants, entities::PlayerId};
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

/// Complete server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind address.
    pub bind: SocketAddr,
    /// Table settings.
    pub table: TableSettings,
    /// Durable snapshot file; `None` keeps the table in memory only.
    pub state_file: Option<PathBuf>,
    /// Prometheus scrape address; `None` disables the exporter.
    pub metrics_bind: Option<SocketAddr>,
}

/// Settings for the single table this server fronts.
#[derive(Debug, Clone)]
pub struct TableSettings {
    /// Table name used in logs.
    pub name: String,
    /// Identity allowed to reset a finished game (required).
    pub owner: PlayerId,
    /// Seat bound.
    pub max_players: usize,
    /// Seats needed before a hand starts.
    pub min_players: usize,
}

/// Configuration errors surfaced at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required configuration {var} ({hint})")]
    MissingRequired { var: &'static str, hint: &'static str },
    #[error("invalid value for {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

impl ServerConfig {
    /// Load configuration from environment variables, with CLI overrides
    /// taking precedence.
    ///
    /// # Errors
    ///
    /// Returns an error if the table owner is missing or any variable
    /// fails to parse.
    pub fn from_env(
        bind_override: Option<SocketAddr>,
        owner_override: Option<String>,
        state_file_override: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let bind = match bind_override {
            Some(bind) => bind,
            None => parse_env_or("SERVER_BIND", "127.0.0.1:7070".parse().expect("valid default"))?,
        };

        // The owner identity gates resets; there is no usable default.
        let owner = owner_override
            .or_else(|| std::env::var("TABLE_OWNER").ok())
            .map(|s| PlayerId::new(&s))
            .filter(|id| !id.as_str().is_empty())
            .ok_or(ConfigError::MissingRequired {
                var: "TABLE_OWNER",
                hint: "set it to the identity allowed to reset the table",
            })?;

        let table = TableSettings {
            name: std::env::var("TABLE_NAME").unwrap_or_else(|_| "main".to_string()),
            owner,
            max_players: parse_env_or("TABLE_MAX_PLAYERS", constants::MAX_PLAYERS)?,
            min_players: parse_env_or("TABLE_MIN_PLAYERS", constants::MIN_PLAYERS)?,
        };

        let state_file = state_file_override
            .or_else(|| std::env::var("STATE_FILE").ok().map(PathBuf::from));

        let metrics_bind = match std::env::var("METRICS_BIND") {
            Ok(value) => Some(value.parse().map_err(|_| ConfigError::Invalid {
                var: "METRICS_BIND",
                value,
            })?),
            Err(_) => None,
        };

        Ok(Self {
            bind,
            table,
            state_file,
            metrics_bind,
        })
    }
}

fn parse_env_or<T>(var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    match std::env::var(var) {
        Ok(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
        Err(_) => Ok(default),
    }
}
