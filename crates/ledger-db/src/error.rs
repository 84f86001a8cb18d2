//! # Store Errors
//!
//! What can go wrong talking to the ledger's SQLite file.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Where Store Errors Go                                │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError ← classified by From<sqlx::Error>                             │
//! │       │                                                                 │
//! │       ├── DuplicateUsername ─► Auth Gate re-prompts (recoverable)       │
//! │       │                                                                 │
//! │       └── everything else ───► AppError ─► process exits non-zero       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Failures from the store layer.
#[derive(Debug, Error)]
pub enum DbError {
    /// Lookup by id came back empty.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Registration with a username that is already taken.
    #[error("Username '{username}' already exists")]
    DuplicateUsername { username: String },

    /// Any other UNIQUE index violation.
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// The store file could not be opened or created
    /// (permissions, missing directory, disk full).
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Schema creation failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed (includes CHECK constraint failures).
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Begin or commit of a batch failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// The single connection could not be acquired in time.
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Anything sqlx reports that fits nowhere else.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// True for any unique-constraint failure.
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            DbError::UniqueViolation { .. } | DbError::DuplicateUsername { .. }
        )
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound    → DbError::NotFound
/// sqlx::Error::Database       → Analyze message for constraint type
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::not_found("Record", "unknown"),

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // "UNIQUE constraint failed: <table>.<column>"
                if let Some(field) = msg.strip_prefix("UNIQUE constraint failed: ") {
                    DbError::UniqueViolation {
                        field: field.to_string(),
                        value: "unknown".to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = DbError::DuplicateUsername {
            username: "ana".to_string(),
        };
        assert_eq!(err.to_string(), "Username 'ana' already exists");
        assert!(err.is_unique_violation());

        let err = DbError::not_found("Sale", "9");
        assert_eq!(err.to_string(), "Sale not found: 9");
        assert!(!err.is_unique_violation());
    }

    #[test]
    fn test_pool_errors_map() {
        assert!(matches!(
            DbError::from(sqlx::Error::PoolTimedOut),
            DbError::PoolExhausted
        ));
        assert!(matches!(
            DbError::from(sqlx::Error::RowNotFound),
            DbError::NotFound { .. }
        ));
    }
}
