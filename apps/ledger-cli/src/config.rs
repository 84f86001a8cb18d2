//! Console app configuration.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable               | Default      |
//! |------------------------|--------------|
//! | `LEDGER_DB_PATH`       | `ventas.db`  |
//! | `LEDGER_EXPORT_PATH`   | `ventas.csv` |
//! | `LEDGER_MAX_SYNTHETIC` | `10000`      |
//!
//! Logging is configured separately through `RUST_LOG`.

use ledger_core::DEFAULT_MAX_SYNTHETIC_BATCH;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_DB_PATH: &str = "ventas.db";
pub const DEFAULT_EXPORT_PATH: &str = "ventas.csv";

/// Console app configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// SQLite database file
    pub db_path: PathBuf,

    /// Target of the CSV export (overwritten on every export)
    pub export_path: PathBuf,

    /// Largest accepted bulk-generation count
    pub max_synthetic: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            export_path: PathBuf::from(DEFAULT_EXPORT_PATH),
            max_synthetic: DEFAULT_MAX_SYNTHETIC_BATCH,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AppConfig::default();

        let path = |key: &str, default: PathBuf| -> Result<PathBuf, ConfigError> {
            match lookup(key) {
                Some(value) if value.trim().is_empty() => {
                    Err(ConfigError::InvalidValue(key.to_string()))
                }
                Some(value) => Ok(PathBuf::from(value)),
                None => Ok(default),
            }
        };

        let max_synthetic = match lookup("LEDGER_MAX_SYNTHETIC") {
            Some(value) => value
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| ConfigError::InvalidValue("LEDGER_MAX_SYNTHETIC".to_string()))?,
            None => defaults.max_synthetic,
        };

        Ok(AppConfig {
            db_path: path("LEDGER_DB_PATH", defaults.db_path)?,
            export_path: path("LEDGER_EXPORT_PATH", defaults.export_path)?,
            max_synthetic,
        })
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
