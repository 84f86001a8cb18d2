//! # Ledger Export
//!
//! Writes the whole ledger to a comma-separated UTF-8 file.
//!
//! ```text
//! id,date,product,category,price,quantity,total
//! 1,2024-03-15,Laptop,Electronics,1999.50,3,5998.50
//! 2,2024-03-12,"Televisor LED 42""",Electrónica,299000.00,2,598000.00
//! ```
//!
//! Columns follow the stored column order. Rows follow `fetch_all`
//! (insertion order). The target file is replaced on every export.

use chrono::NaiveDate;
use csv::{Terminator, WriterBuilder};
use ledger_core::Sale;
use ledger_db::SaleRepository;
use serde::Serialize;
use std::io;
use std::path::Path;
use tracing::info;

use crate::ensure_parent_dir;
use crate::error::AppResult;

/// Header row, in stored column order.
pub const EXPORT_HEADER: [&str; 7] = [
    "id", "date", "product", "category", "price", "quantity", "total",
];

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    id: i64,
    date: NaiveDate,
    product: &'a str,
    category: &'a str,
    price: String,
    quantity: i64,
    total: String,
}

impl<'a> From<&'a Sale> for ExportRow<'a> {
    fn from(sale: &'a Sale) -> Self {
        ExportRow {
            id: sale.id,
            date: sale.date,
            product: &sale.product_name,
            category: &sale.category,
            price: sale.unit_price().to_decimal_string(),
            quantity: sale.quantity,
            total: sale.total().to_decimal_string(),
        }
    }
}

/// Writes the header plus one row per sale to `writer`.
pub fn write_ledger<W: io::Write>(sales: &[Sale], writer: W) -> AppResult<()> {
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    wtr.write_record(EXPORT_HEADER)?;
    for sale in sales {
        wtr.serialize(ExportRow::from(sale))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Exports every stored sale to `path`, replacing any existing file.
///
/// Missing parent directories are created. Returns the number of data
/// rows written.
pub async fn export_ledger(sales: &SaleRepository, path: &Path) -> AppResult<usize> {
    let ledger = sales.fetch_all().await?;

    ensure_parent_dir(path)?;
    let file = std::fs::File::create(path)?;
    write_ledger(&ledger, io::BufWriter::new(file))?;

    info!(path = %path.display(), rows = ledger.len(), "Ledger exported");
    Ok(ledger.len())
}

// =============================================================================
// Unit Tests
// =============================================================================
