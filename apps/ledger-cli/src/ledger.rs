//! # Ledger Operations
//!
//! Everything an authenticated operator can do with the sales ledger.
//!
//! ```text
//! insert_sale_interactive ──► prompt_valid(parse_price)    ──┐
//!                             prompt_valid(parse_quantity) ──┤
//!                                                             ▼
//!                                            NewSale::new ──► SaleRepository::insert
//!
//! generate_interactive ──► parse_bulk_count ──► generate_synthetic_sales
//!                                                  (ledger-core, pure)
//!                                                         │
//!                                                         ▼
//!                                       SaleRepository::insert_many (one tx)
//!
//! export ──► export::export_ledger ──► CSV file
//! ```

use chrono::{Local, NaiveDate};
use ledger_core::validation::{parse_bulk_count, parse_price, parse_quantity, ValidationResult};
use ledger_core::{CoreError, NewSale};
use ledger_db::SaleRepository;
use rand::Rng;
use std::path::Path;
use tracing::{debug, info};

use crate::console::Console;
use crate::error::AppResult;
use crate::export::export_ledger;

/// Local calendar date used to stamp new sales.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Sale-level operations over the store.
#[derive(Debug, Clone)]
pub struct Ledger {
    sales: SaleRepository,
    max_synthetic: u32,
}

impl Ledger {
    pub fn new(sales: SaleRepository, max_synthetic: u32) -> Self {
        Ledger {
            sales,
            max_synthetic,
        }
    }

    /// Persists one sale and returns its id.
    pub async fn record_sale(&self, sale: &NewSale) -> AppResult<i64> {
        let id = self.sales.insert(sale).await?;
        info!(
            sale_id = id,
            product = %sale.product_name(),
            total_cents = sale.total().cents(),
            "Sale recorded"
        );
        Ok(id)
    }

    /// Prompts for one sale, dated `today`, and stores it.
    ///
    /// Price and quantity are re-prompted until valid. Closed input cancels
    /// the entry and returns `None`.
    pub async fn insert_sale_interactive(
        &self,
        console: &mut dyn Console,
        today: NaiveDate,
    ) -> AppResult<Option<i64>> {
        let Some(sale) = read_new_sale(console, today)? else {
            console.say("Sale entry cancelled.")?;
            return Ok(None);
        };

        let id = self.record_sale(&sale).await?;
        console.say(&format!(
            "Sale #{id} recorded. Total: {}",
            sale.total()
        ))?;
        Ok(Some(id))
    }

    /// Generates `count` catalog sales over the window ending `today` and
    /// stores them atomically. Returns the new ids.
    pub async fn generate_synthetic_sales<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        today: NaiveDate,
        count: u32,
    ) -> AppResult<Vec<i64>> {
        let batch = ledger_core::generate_synthetic_sales(rng, today, count as usize)?;
        let ids = self.sales.insert_many(&batch).await?;
        info!(count = ids.len(), "Synthetic sales generated");
        Ok(ids)
    }

    /// Reads a bulk count and generates that many sales.
    ///
    /// An invalid count is reported and nothing is written.
    pub async fn generate_interactive<R: Rng + ?Sized>(
        &self,
        console: &mut dyn Console,
        rng: &mut R,
        today: NaiveDate,
    ) -> AppResult<usize> {
        let prompt = format!("How many sales to generate (1-{})? ", self.max_synthetic);
        let Some(input) = console.read_line(&prompt)? else {
            return Ok(0);
        };

        let count = match parse_bulk_count(&input, self.max_synthetic) {
            Ok(count) => count,
            Err(e) => {
                debug!(input = %input, error = %e, "Rejected bulk count");
                console.say(&format!("Invalid input: {e}"))?;
                return Ok(0);
            }
        };

        let ids = self.generate_synthetic_sales(rng, today, count).await?;
        console.say(&format!("{} synthetic sales generated.", ids.len()))?;
        Ok(ids.len())
    }

    /// Writes the whole ledger to `path`. Returns the number of rows.
    pub async fn export(&self, console: &mut dyn Console, path: &Path) -> AppResult<usize> {
        let rows = export_ledger(&self.sales, path).await?;
        console.say(&format!(
            "Exported {rows} sales to {}.",
            path.display()
        ))?;
        Ok(rows)
    }
}

// =============================================================================
// Prompting
// =============================================================================

/// Reads the four sale fields. `None` when input closes midway.
fn read_new_sale(console: &mut dyn Console, today: NaiveDate) -> AppResult<Option<NewSale>> {
    let Some(product) = console.read_line("Product name: ")? else {
        return Ok(None);
    };
    let Some(category) = console.read_line("Category: ")? else {
        return Ok(None);
    };
    let Some(price) = prompt_valid(console, "Unit price: ", parse_price)? else {
        return Ok(None);
    };

    loop {
        let Some(quantity) = prompt_valid(console, "Quantity: ", parse_quantity)? else {
            return Ok(None);
        };

        match NewSale::new(today, product.trim(), category.trim(), price, quantity) {
            Ok(sale) => return Ok(Some(sale)),
            Err(CoreError::TotalOverflow { .. }) => {
                console.say(&format!(
                    "Invalid input: total for {quantity} × {price} is too large"
                ))?;
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// Re-prompts until `parse` accepts the answer.
fn prompt_valid<T>(
    console: &mut dyn Console,
    prompt: &str,
    parse: impl Fn(&str) -> ValidationResult<T>,
) -> AppResult<Option<T>> {
    loop {
        let Some(input) = console.read_line(prompt)? else {
            return Ok(None);
        };
        match parse(&input) {
            Ok(value) => return Ok(Some(value)),
            Err(e) => console.say(&format!("Invalid input: {e}"))?,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::ScriptedConsole;
    use chrono::Duration;
    use ledger_core::catalog::CatalogItem;
    use ledger_db::{Database, DbConfig};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    async fn setup(max: u32) -> (Database, Ledger) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let ledger = Ledger::new(db.sales(), max);
        (db, ledger)
    }

    #[tokio::test]
    async fn test_insert_reprompts_negative_price() {
        let (db, ledger) = setup(100).await;
        let mut console =
            ScriptedConsole::new(&["Laptop", "Electronics", "-5", "1999.50", "3"]);

        let id = ledger
            .insert_sale_interactive(&mut console, day())
            .await
            .unwrap()
            .unwrap();

        let transcript = console.transcript();
        assert!(transcript.contains("price cannot be negative"));
        assert!(transcript.contains(&format!("Sale #{id} recorded")));
        assert!(transcript.contains("$5998.50"));

        let stored = db.sales().fetch_all().await.unwrap();
        assert_eq!(stored.len(), 1);
        let sale = &stored[0];
        assert_eq!(sale.id, id);
        assert_eq!(sale.date, day());
        assert_eq!(sale.product_name, "Laptop");
        assert_eq!(sale.category, "Electronics");
        assert_eq!(sale.unit_price_cents, 199_950);
        assert_eq!(sale.quantity, 3);
        assert_eq!(sale.total_cents, 599_850);
    }

    #[tokio::test]
    async fn test_insert_reprompts_non_numeric_price() {
        let (db, ledger) = setup(100).await;
        let mut console = ScriptedConsole::new(&["Camiseta", "Ropa", "abc", "10", "4"]);

        let id = ledger
            .insert_sale_interactive(&mut console, day())
            .await
            .unwrap()
            .unwrap();

        let transcript = console.transcript();
        assert!(transcript.contains("Invalid input: price must be a valid number, got 'abc'"));
        assert_eq!(transcript.matches("Unit price: ").count(), 2);

        let stored = db.sales().fetch_all().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, id);
        assert_eq!(stored[0].unit_price_cents, 1_000);
        assert_eq!(stored[0].total_cents, 4_000);
    }

    #[tokio::test]
    async fn test_insert_reprompts_bad_quantity() {
        let (db, ledger) = setup(100).await;
        let mut console =
            ScriptedConsole::new(&["Licuadora", "Hogar", "490", "abc", "-1", "2"]);

        ledger
            .insert_sale_interactive(&mut console, day())
            .await
            .unwrap();

        let transcript = console.transcript();
        assert!(transcript.contains("quantity must be a valid number"));
        assert!(transcript.contains("quantity cannot be negative"));

        let stored = db.sales().fetch_all().await.unwrap();
        assert_eq!(stored[0].quantity, 2);
        assert_eq!(stored[0].total_cents, 98_000);
    }

    #[tokio::test]
    async fn test_insert_reprompts_overflowing_total() {
        let (db, ledger) = setup(100).await;
        let huge = format!("{}", i64::MAX / 100 + 1);
        let mut console = ScriptedConsole::new(&["X", "Y", "1.00", &huge, "7"]);

        ledger
            .insert_sale_interactive(&mut console, day())
            .await
            .unwrap();

        assert!(console.transcript().contains("too large"));
        assert_eq!(db.sales().fetch_all().await.unwrap()[0].total_cents, 700);
    }

    #[tokio::test]
    async fn test_insert_cancelled_on_closed_input() {
        let (db, ledger) = setup(100).await;
        let mut console = ScriptedConsole::new(&["Laptop", "Electronics", "-5"]);

        let id = ledger
            .insert_sale_interactive(&mut console, day())
            .await
            .unwrap();

        assert_eq!(id, None);
        assert!(console.transcript().contains("Sale entry cancelled."));
        assert_eq!(db.sales().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_generate_synthetic_sales() {
        let (db, ledger) = setup(100).await;
        let mut rng = StdRng::seed_from_u64(42);

        let ids = ledger
            .generate_synthetic_sales(&mut rng, day(), 40)
            .await
            .unwrap();
        assert_eq!(ids.len(), 40);

        let stored = db.sales().fetch_all().await.unwrap();
        assert_eq!(stored.len(), 40);
        for sale in &stored {
            assert!(sale.date <= day());
            assert!(sale.date >= day() - Duration::days(11));
            assert!((1..=10).contains(&sale.quantity));
            assert_eq!(sale.total_cents, sale.unit_price_cents * sale.quantity);
            assert!(CatalogItem::contains(
                &sale.product_name,
                &sale.category,
                sale.unit_price()
            ));
        }
    }

    #[tokio::test]
    async fn test_generate_interactive_rejects_bad_counts() {
        let (db, ledger) = setup(50).await;
        let mut rng = StdRng::seed_from_u64(1);

        for input in ["0", "-4", "many", "51", ""] {
            let mut console = ScriptedConsole::new(&[input]);
            let written = ledger
                .generate_interactive(&mut console, &mut rng, day())
                .await
                .unwrap();
            assert_eq!(written, 0, "input {input:?} should be rejected");
            assert!(console.transcript().contains("Invalid input"));
        }
        assert_eq!(db.sales().count().await.unwrap(), 0);

        let mut console = ScriptedConsole::new(&[" 50 "]);
        let written = ledger
            .generate_interactive(&mut console, &mut rng, day())
            .await
            .unwrap();
        assert_eq!(written, 50);
        assert!(console.transcript().contains("50 synthetic sales generated."));
        assert_eq!(db.sales().count().await.unwrap(), 50);
    }

    #[tokio::test]
    async fn test_export_reports_rows() {
        let (_db, ledger) = setup(10).await;
        let mut rng = StdRng::seed_from_u64(9);
        ledger
            .generate_synthetic_sales(&mut rng, day(), 3)
            .await
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let mut console = ScriptedConsole::new(&[]);

        assert_eq!(ledger.export(&mut console, &path).await.unwrap(), 3);
        assert!(console.transcript().contains("Exported 3 sales"));
        assert!(path.exists());
    }
}
