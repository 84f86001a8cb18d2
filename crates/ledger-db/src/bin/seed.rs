//! # Seed Data Generator
//!
//! Populates a ledger database with synthetic sales for development.
//!
//! ## Usage
//! ```bash
//! # Generate 100 sales (default) into ./ventas.db
//! cargo run -p ledger-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p ledger-db --bin seed -- --count 5000
//!
//! # Specify database path
//! cargo run -p ledger-db --bin seed -- --db ./data/ventas.db
//! ```
//!
//! Sales are drawn from the fixed catalog with the same rules as the
//! interactive bulk command: quantity 1-10, dated within the last 12 days.

use chrono::Local;
use ledger_core::{generate_synthetic_sales, Money};
use ledger_db::{Database, DbConfig};
use std::env;

const DEFAULT_COUNT: usize = 100;
const DEFAULT_DB_PATH: &str = "ventas.db";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut count = DEFAULT_COUNT;
    let mut db_path = String::from(DEFAULT_DB_PATH);

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                let value = args.get(i + 1).ok_or("--count needs a value")?;
                count = value
                    .parse()
                    .map_err(|_| format!("invalid --count value: {value}"))?;
                i += 1;
            }
            "--db" | "-d" => {
                db_path = args.get(i + 1).ok_or("--db needs a value")?.clone();
                i += 1;
            }
            "--help" | "-h" => {
                println!("Usage: seed [--count N] [--db PATH]");
                println!("  --count, -c  Number of sales to generate (default: {DEFAULT_COUNT})");
                println!("  --db, -d     Database path (default: {DEFAULT_DB_PATH})");
                return Ok(());
            }
            other => return Err(format!("unknown argument: {other}").into()),
        }
        i += 1;
    }

    println!("🌱 Seeding {count} sales into {db_path}");

    let db = Database::new(DbConfig::new(&db_path)).await?;

    let today = Local::now().date_naive();
    let sales = generate_synthetic_sales(&mut rand::thread_rng(), today, count)?;
    let revenue: Money = sales.iter().map(|s| s.total()).sum();

    let ids = db.sales().insert_many(&sales).await?;
    let total_rows = db.sales().count().await?;

    println!("✅ Inserted {} sales ({} revenue)", ids.len(), revenue);
    println!("📊 Ledger now holds {total_rows} sales");

    db.close().await;
    Ok(())
}
