//! # Sale Repository
//!
//! Database operations for the ledger.
//!
//! ## Sale Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sale Lifecycle                                    │
//! │                                                                         │
//! │  1. VALIDATE (ledger-core)                                             │
//! │     └── NewSale::new() → total = unit_price × quantity                 │
//! │                                                                         │
//! │  2. PERSIST                                                            │
//! │     └── insert()       → one row, one commit                           │
//! │     └── insert_many()  → N rows, one transaction, one commit           │
//! │                                                                         │
//! │  3. READ                                                               │
//! │     └── fetch_all()    → every row, ordered by id (insertion order)    │
//! │                                                                         │
//! │  There is no step 4: sales are never updated or deleted.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use ledger_core::{NewSale, Sale};

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Inserts one sale and returns its id.
    pub async fn insert(&self, sale: &NewSale) -> DbResult<i64> {
        debug!(
            product = %sale.product_name(),
            total_cents = sale.total().cents(),
            "Inserting sale"
        );

        let result = insert_query(sale).execute(&self.pool).await?;

        Ok(result.last_insert_rowid())
    }

    /// Inserts a batch of sales in a single transaction.
    ///
    /// Either every row is committed or none is. Returns the new ids in the
    /// order of `sales`.
    pub async fn insert_many(&self, sales: &[NewSale]) -> DbResult<Vec<i64>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let mut ids = Vec::with_capacity(sales.len());
        for sale in sales {
            let result = insert_query(sale).execute(&mut *tx).await?;
            ids.push(result.last_insert_rowid());
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(count = ids.len(), "Sales batch inserted");
        Ok(ids)
    }

    /// Returns every sale in insertion order.
    pub async fn fetch_all(&self) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(
            r#"
            SELECT
                id,
                date,
                product_name,
                category,
                unit_price_cents,
                quantity,
                total_cents
            FROM sales
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Number of sales in the ledger.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

fn insert_query(sale: &NewSale) -> Query<'_, Sqlite, SqliteArguments<'_>> {
    sqlx::query(
        r#"
        INSERT INTO sales (
            date, product_name, category,
            unit_price_cents, quantity, total_cents
        ) VALUES (
            ?1, ?2, ?3,
            ?4, ?5, ?6
        )
        "#,
    )
    .bind(sale.date())
    .bind(sale.product_name())
    .bind(sale.category())
    .bind(sale.unit_price().cents())
    .bind(sale.quantity())
    .bind(sale.total().cents())
}

// =============================================================================
// Unit Tests
// =============================================================================
