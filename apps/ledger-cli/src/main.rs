//! # Ventas
//!
//! Console entry point for the sales ledger.
//!
//! ```text
//! $ ventas
//! === Sales Ledger ===
//! 1. Register
//! 2. Login
//! 3. Exit
//! Select an option:
//! ```

use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match ledger_cli::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
