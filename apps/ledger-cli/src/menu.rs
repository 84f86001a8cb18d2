//! # Menu Loop
//!
//! Two nested command loops. The first runs until the operator logs in or
//! exits; the second runs until exit and has no way back.
//!
//! ```text
//!   Pre-auth                      Post-auth
//!   ─────────                     ─────────
//!   1. Register                   1. Insert sale
//!   2. Login      ── success ──►  2. Generate synthetic sales
//!   3. Exit                       3. Export to CSV
//!                                 4. Exit
//! ```
//!
//! Closed input is treated as the exit option of whichever loop is running.

use ledger_db::Database;
use rand::Rng;
use std::path::Path;
use tracing::debug;

use crate::auth::{AuthGate, Session};
use crate::config::AppConfig;
use crate::console::Console;
use crate::error::AppResult;
use crate::ledger::{today, Ledger};

const SELECT_PROMPT: &str = "Select an option: ";
const INVALID_SELECTION: &str = "Invalid option. Please try again.";

// =============================================================================
// Choices
// =============================================================================

/// Options shown before login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreAuthChoice {
    Register,
    Login,
    Exit,
}

impl PreAuthChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(PreAuthChoice::Register),
            "2" => Some(PreAuthChoice::Login),
            "3" => Some(PreAuthChoice::Exit),
            _ => None,
        }
    }
}

/// Options shown after login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainChoice {
    InsertSale,
    Generate,
    Export,
    Exit,
}

impl MainChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MainChoice::InsertSale),
            "2" => Some(MainChoice::Generate),
            "3" => Some(MainChoice::Export),
            "4" => Some(MainChoice::Exit),
            _ => None,
        }
    }
}

// =============================================================================
// Loops
// =============================================================================

/// Runs the pre-auth menu. Returns the session it ended with.
pub async fn run_pre_auth(console: &mut dyn Console, gate: &AuthGate) -> AppResult<Session> {
    loop {
        console.say("")?;
        console.say("=== Sales Ledger ===")?;
        console.say("1. Register")?;
        console.say("2. Login")?;
        console.say("3. Exit")?;

        let Some(input) = console.read_line(SELECT_PROMPT)? else {
            return Ok(Session::Unauthenticated);
        };

        match PreAuthChoice::parse(&input) {
            Some(PreAuthChoice::Register) => {
                gate.register(console).await?;
            }
            Some(PreAuthChoice::Login) => {
                let session = gate.login(console).await?;
                if session.is_authenticated() {
                    return Ok(session);
                }
            }
            Some(PreAuthChoice::Exit) => return Ok(Session::Unauthenticated),
            None => {
                debug!(input = %input, "Invalid pre-auth selection");
                console.say(INVALID_SELECTION)?;
            }
        }
    }
}

/// Runs the post-auth menu until exit.
pub async fn run_main<R: Rng + ?Sized>(
    console: &mut dyn Console,
    ledger: &Ledger,
    export_path: &Path,
    rng: &mut R,
) -> AppResult<()> {
    loop {
        console.say("")?;
        console.say("=== Main Menu ===")?;
        console.say("1. Insert sale")?;
        console.say("2. Generate synthetic sales")?;
        console.say("3. Export to CSV")?;
        console.say("4. Exit")?;

        let Some(input) = console.read_line(SELECT_PROMPT)? else {
            return Ok(());
        };

        match MainChoice::parse(&input) {
            Some(MainChoice::InsertSale) => {
                ledger.insert_sale_interactive(console, today()).await?;
            }
            Some(MainChoice::Generate) => {
                ledger.generate_interactive(console, rng, today()).await?;
            }
            Some(MainChoice::Export) => {
                ledger.export(console, export_path).await?;
            }
            Some(MainChoice::Exit) => return Ok(()),
            None => {
                debug!(input = %input, "Invalid main selection");
                console.say(INVALID_SELECTION)?;
            }
        }
    }
}

/// One full interactive session: authenticate, then work the ledger.
pub async fn run_session<R: Rng + ?Sized>(
    console: &mut dyn Console,
    db: &Database,
    config: &AppConfig,
    rng: &mut R,
) -> AppResult<()> {
    let gate = AuthGate::new(db.users());

    if let Session::Authenticated(user) = run_pre_auth(console, &gate).await? {
        console.say(&format!("Welcome, {}.", user.username))?;
        let ledger = Ledger::new(db.sales(), config.max_synthetic);
        run_main(console, &ledger, &config.export_path, rng).await?;
    }

    console.say("Program finished.")?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::ScriptedConsole;
    use ledger_db::DbConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_parse_choices() {
        assert_eq!(PreAuthChoice::parse(" 1 "), Some(PreAuthChoice::Register));
        assert_eq!(PreAuthChoice::parse("2"), Some(PreAuthChoice::Login));
        assert_eq!(PreAuthChoice::parse("3\t"), Some(PreAuthChoice::Exit));
        for bad in ["", "4", "0", "x", "1 2", "01"] {
            assert_eq!(PreAuthChoice::parse(bad), None, "{bad:?}");
        }

        assert_eq!(MainChoice::parse("1"), Some(MainChoice::InsertSale));
        assert_eq!(MainChoice::parse("2"), Some(MainChoice::Generate));
        assert_eq!(MainChoice::parse("3"), Some(MainChoice::Export));
        assert_eq!(MainChoice::parse(" 4"), Some(MainChoice::Exit));
        for bad in ["", "5", "exit", "-1"] {
            assert_eq!(MainChoice::parse(bad), None, "{bad:?}");
        }
    }

    async fn setup(dir: &tempfile::TempDir) -> (Database, AppConfig) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let config = AppConfig {
            export_path: dir.path().join("ventas.csv"),
            max_synthetic: 100,
            ..AppConfig::default()
        };
        (db, config)
    }

    #[tokio::test]
    async fn test_full_session() {
        let dir = tempfile::tempdir().unwrap();
        let (db, config) = setup(&dir).await;
        let mut rng = StdRng::seed_from_u64(3);

        let mut console = ScriptedConsole::new(&[
            "9",                                     // invalid
            "1", "ana", "x1",                        // register
            "2", "ana", "bad",                       // failed login
            "2", "ana", "x1",                        // login
            "7",                                     // invalid
            "1", "Laptop", "Electronics", "1999.50", "3",
            "2", "20",                               // generate
            "3",                                     // export
            "4",
        ]);

        run_session(&mut console, &db, &config, &mut rng)
            .await
            .unwrap();

        let transcript = console.transcript();
        assert_eq!(transcript.matches(INVALID_SELECTION).count(), 2);
        assert!(transcript.contains("User registered successfully."));
        assert!(transcript.contains("Incorrect username or password."));
        assert!(transcript.contains("Welcome, ana."));
        assert!(transcript.contains("20 synthetic sales generated."));
        assert!(transcript.contains("Exported 21 sales"));
        assert!(transcript.ends_with("Program finished."));
        assert_eq!(console.remaining(), 0);

        assert_eq!(db.sales().count().await.unwrap(), 21);
        let csv = std::fs::read_to_string(&config.export_path).unwrap();
        assert_eq!(csv.lines().count(), 22);
    }

    #[tokio::test]
    async fn test_exit_before_login() {
        let dir = tempfile::tempdir().unwrap();
        let (db, config) = setup(&dir).await;
        let mut rng = StdRng::seed_from_u64(0);

        let mut console = ScriptedConsole::new(&["3", "never read"]);
        run_session(&mut console, &db, &config, &mut rng)
            .await
            .unwrap();

        assert_eq!(console.remaining(), 1);
        assert!(!console.transcript().contains("Main Menu"));
        assert!(console.transcript().ends_with("Program finished."));
    }

    #[tokio::test]
    async fn test_closed_input_ends_both_loops() {
        let dir = tempfile::tempdir().unwrap();
        let (db, config) = setup(&dir).await;
        let mut rng = StdRng::seed_from_u64(0);

        let mut console = ScriptedConsole::new(&[]);
        run_session(&mut console, &db, &config, &mut rng)
            .await
            .unwrap();
        assert!(console.transcript().ends_with("Program finished."));

        db.users().insert("ana", "x1").await.unwrap();
        let mut console = ScriptedConsole::new(&["2", "ana", "x1"]);
        run_session(&mut console, &db, &config, &mut rng)
            .await
            .unwrap();
        assert!(console.transcript().contains("Main Menu"));
        assert!(console.transcript().ends_with("Program finished."));
    }
}
