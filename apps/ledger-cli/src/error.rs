//! # Application Error Type
//!
//! Unified error type for the console app.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Ledger                             │
//! │                                                                         │
//! │  Recovered where they happen (never reach AppError):                    │
//! │    • ValidationError     → re-prompt the same field                     │
//! │    • DuplicateUsername   → re-prompt for another username               │
//! │    • Credential mismatch → back to the pre-auth menu                    │
//! │                                                                         │
//! │  Propagated with `?` up to main():                                      │
//! │    • DbError       (disk full, permissions, corrupt file)               │
//! │    • io::Error     (console gone, export path unwritable)               │
//! │    • csv::Error    (export serialization)                               │
//! │    • ConfigError   (bad environment at startup)                         │
//! │         │                                                               │
//! │         ▼                                                               │
//! │    main prints the error, exits non-zero                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use ledger_core::CoreError;
use ledger_db::DbError;
use thiserror::Error;

use crate::config::ConfigError;

/// Unrecoverable application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Db(#[from] DbError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Export failed: {0}")]
    Export(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Core(#[from] CoreError),
}

/// Result type for application operations.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        let err: AppError = DbError::PoolExhausted.into();
        assert_eq!(err.to_string(), "Database error: Connection pool exhausted");

        let err: AppError = ConfigError::InvalidValue("LEDGER_DB_PATH".to_string()).into();
        assert!(matches!(err, AppError::Config(_)));

        let err: AppError = std::io::Error::new(std::io::ErrorKind::Other, "gone").into();
        assert_eq!(err.to_string(), "I/O error: gone");
    }
}
