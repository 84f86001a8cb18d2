//! # Ledger Console
//!
//! The interactive sales ledger program.
//!
//! ## Module Organization
//! ```text
//! ledger_cli/
//! ├── lib.rs      ◄─── You are here (startup & run)
//! ├── config.rs   ◄─── Environment configuration
//! ├── console.rs  ◄─── Prompt/response channel
//! ├── auth.rs     ◄─── Registration & login
//! ├── ledger.rs   ◄─── Insert, bulk-generate, export
//! ├── export.rs   ◄─── CSV writer
//! ├── menu.rs     ◄─── Pre-auth & post-auth loops
//! └── error.rs    ◄─── AppError
//! ```

pub mod auth;
pub mod config;
pub mod console;
pub mod error;
pub mod export;
pub mod ledger;
pub mod menu;

use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ledger_db::{Database, DbConfig};

use crate::config::AppConfig;
use crate::console::TerminalConsole;
use crate::error::AppResult;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn,sqlx=warn";

/// Runs the program against the real terminal.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Initialize Logging     stderr, RUST_LOG or "warn,sqlx=warn"         │
/// │  2. Load Configuration     LEDGER_* environment variables               │
/// │  3. Open Database          create file & schema if absent               │
/// │  4. Menu Session           until the operator exits                     │
/// │  5. Close Database                                                      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> AppResult<()> {
    init_tracing();

    let config = AppConfig::load()?;
    info!(
        db_path = %config.db_path.display(),
        export_path = %config.export_path.display(),
        max_synthetic = config.max_synthetic,
        "Configuration loaded"
    );

    ensure_parent_dir(&config.db_path)?;
    let db = Database::new(DbConfig::new(config.db_path.clone())).await?;
    info!("Database opened");

    let mut console = TerminalConsole::new();
    let mut rng = rand::thread_rng();
    let outcome = menu::run_session(&mut console, &db, &config, &mut rng).await;

    db.close().await;
    outcome
}

/// Initializes the tracing subscriber.
///
/// Output goes to stderr so it stays out of the prompts.
///
/// ## Log Levels
/// - `RUST_LOG=info` - Show store writes and logins
/// - `RUST_LOG=ledger_db=debug` - Show repository detail
/// - Default: WARN
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // A subscriber may already be installed when embedded
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Creates the directory that will hold `path`, if any.
pub(crate) fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => std::fs::create_dir_all(dir),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b/ventas.db");

        ensure_parent_dir(&nested).unwrap();
        assert!(dir.path().join("a/b").is_dir());

        ensure_parent_dir(Path::new("ventas.db")).unwrap();
    }
}
