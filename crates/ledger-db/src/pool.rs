//! # Database Connection Management
//!
//! Opening, configuring and closing the ledger's SQLite store.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Database Connection                                │
//! │                                                                         │
//! │  Process start                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbConfig::new(path) ← Configure settings                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config).await ← Open + create schema if absent          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌───────────────────────┐                                             │
//! │  │  SqlitePool (size 1)  │  one connection for the process lifetime    │
//! │  └───────────────────────┘                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::close().await ← on exit                                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## WAL Mode
//! File databases use WAL journaling with `synchronous = NORMAL`:
//! each committed write survives a process crash.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::sale::SaleRepository;
use crate::repository::user::UserRepository;

/// Path marker for an in-memory database.
const IN_MEMORY_PATH: &str = ":memory:";

// =============================================================================
// Configuration
// =============================================================================

/// How to open the store.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("ventas.db")
///     .connect_timeout(Duration::from_secs(5));
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// SQLite file, or `:memory:`.
    pub database_path: PathBuf,

    /// Pool size. Default: 1 (the ledger is single-threaded)
    pub max_connections: u32,

    /// How long to wait for the connection. Default: 30s
    pub connect_timeout: Duration,

    /// Whether to create the schema on connect.
    /// Default: true
    pub run_migrations: bool,
}

impl DbConfig {
    /// File-backed store at `path`, created on first open.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 1,
            connect_timeout: Duration::from_secs(30),
            run_migrations: true,
        }
    }

    /// Overrides the pool size.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Overrides the acquire timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Skips schema creation when `false`.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Throwaway store for tests. Each call yields an isolated database.
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(IN_MEMORY_PATH),
            max_connections: 1,
            connect_timeout: Duration::from_secs(5),
            run_migrations: true,
        }
    }

    /// True when this config points at an in-memory database.
    pub fn is_in_memory(&self) -> bool {
        self.database_path == Path::new(IN_MEMORY_PATH)
    }

    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        if self.is_in_memory() {
            return SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string()));
        }

        Ok(SqliteConnectOptions::new()
            .filename(&self.database_path)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .create_if_missing(true))
    }
}

// =============================================================================
// Database
// =============================================================================

/// The owned store handle.
///
/// Created once in the console app and handed to each operation through
/// its repositories; there is no global connection.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the database.
    ///
    /// Creates the file when missing, pins one connection, then creates
    /// the schema unless `run_migrations` is off.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Opening ledger store"
        );

        let connect_options = config.connect_options()?;
        // Pinning the connection keeps an in-memory database alive.
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(1)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Database connection opened"
        );

        let db = Database { pool };

        if config.run_migrations {
            db.create_schema_if_absent().await?;
        }

        Ok(db)
    }

    /// Creates the `users` and `sales` tables if they do not exist.
    ///
    /// Idempotent: safe to call on every startup.
    pub async fn create_schema_if_absent(&self) -> DbResult<()> {
        info!("Creating schema if absent");
        migrations::run_migrations(&self.pool).await?;

        let (total, applied) = migrations::migration_status(&self.pool).await?;
        info!(total, applied, "Schema ready");
        Ok(())
    }

    /// Raw pool, for ad-hoc queries in tests and tools.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Users table access.
    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.pool.clone())
    }

    /// Sales table access.
    pub fn sales(&self) -> SaleRepository {
        SaleRepository::new(self.pool.clone())
    }

    /// Closes the connection. Repository calls fail afterwards.
    pub async fn close(&self) {
        info!("Closing database connection");
        self.pool.close().await;
    }

    /// `SELECT 1` against the store.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ledger_core::{Money, NewSale};

    #[tokio::test]
    async fn test_open_in_memory() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.health_check().await);
    }

    #[tokio::test]
    async fn test_builder_overrides() {
        let config = DbConfig::new("/tmp/ledger.db")
            .max_connections(2)
            .connect_timeout(Duration::from_secs(1))
            .run_migrations(false);

        assert_eq!(config.max_connections, 2);
        assert_eq!(config.connect_timeout, Duration::from_secs(1));
        assert!(!config.run_migrations);
        assert!(!config.is_in_memory());
        assert!(DbConfig::in_memory().is_in_memory());
    }

    #[tokio::test]
    async fn test_schema_creation_is_idempotent() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.users().insert("ana", "x1").await.unwrap();

        db.create_schema_if_absent().await.unwrap();
        db.create_schema_if_absent().await.unwrap();

        assert!(db.users().find_by_username("ana").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_file_database_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ventas.db");
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        db.users().insert("ana", "x1").await.unwrap();
        let sale = NewSale::new(date, "Licuadora", "Hogar", Money::from_units(49_000), 2).unwrap();
        db.sales().insert(&sale).await.unwrap();
        db.close().await;

        let reopened = Database::new(DbConfig::new(&path)).await.unwrap();
        assert!(reopened
            .users()
            .find_by_credentials("ana", "x1")
            .await
            .unwrap()
            .is_some());
        let sales = reopened.sales().fetch_all().await.unwrap();
        assert_eq!(sales.len(), 1);
        assert_eq!(sales[0].total(), Money::from_units(98_000));
        reopened.close().await;
    }

    #[tokio::test]
    async fn test_closed_database_fails() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.close().await;
        assert!(!db.health_check().await);
    }
}
