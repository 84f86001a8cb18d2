//! # Domain Types
//!
//! Core domain types used throughout the ledger.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │     NewSale     │   │      Sale       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  date           │──►│  id (i64)       │       │
//! │  │  username       │   │  product_name   │   │  date           │       │
//! │  │  password       │   │  category       │   │  product_name   │       │
//! │  └─────────────────┘   │  unit_price     │   │  category       │       │
//! │                        │  quantity       │   │  unit_price_cents│      │
//! │                        │  total (derived)│   │  quantity       │       │
//! │                        └─────────────────┘   │  total_cents    │       │
//! │                          not yet persisted   └─────────────────┘       │
//! │                                                row read from store      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Records are immutable once written: there is no update or delete path,
//! so `total_cents` always equals `unit_price_cents × quantity` as computed
//! at insertion time.

use chrono::NaiveDate;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;

// =============================================================================
// User
// =============================================================================

/// A registered operator.
///
/// ## Security Note
/// `password` is stored and compared verbatim. There is no hashing.
/// This is a known weakness of the ledger, kept as documented behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    /// Auto-assigned identifier.
    pub id: i64,

    /// Unique login name (case-sensitive).
    pub username: String,

    /// Plaintext password.
    pub password: String,
}

// =============================================================================
// Sale
// =============================================================================

/// A persisted sale row.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    /// Auto-assigned identifier; ascending ids are insertion order.
    pub id: i64,

    /// Day the sale happened (ISO 8601, day precision).
    pub date: NaiveDate,

    /// Product name (free text).
    pub product_name: String,

    /// Product category (free text).
    pub category: String,

    /// Unit price in cents.
    pub unit_price_cents: i64,

    /// Units sold.
    pub quantity: i64,

    /// Stored total in cents, computed at insertion.
    pub total_cents: i64,
}

impl Sale {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the stored total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// New Sale
// =============================================================================

/// A validated sale that has not been persisted yet.
///
/// The only way to build one is [`NewSale::new`], which computes the total.
/// Fields are private so the total can never disagree with price × quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSale {
    date: NaiveDate,
    product_name: String,
    category: String,
    unit_price: Money,
    quantity: i64,
    total: Money,
}

impl NewSale {
    /// Builds a sale, computing `total = unit_price × quantity`.
    ///
    /// ## Errors
    /// - `Validation(Negative)` if price or quantity is below zero
    /// - `TotalOverflow` if the total does not fit in i64 cents
    pub fn new(
        date: NaiveDate,
        product_name: impl Into<String>,
        category: impl Into<String>,
        unit_price: Money,
        quantity: i64,
    ) -> CoreResult<Self> {
        if unit_price.is_negative() {
            return Err(ValidationError::Negative {
                field: "price".to_string(),
            }
            .into());
        }
        if quantity < 0 {
            return Err(ValidationError::Negative {
                field: "quantity".to_string(),
            }
            .into());
        }

        let total = unit_price
            .checked_multiply_quantity(quantity)
            .ok_or(CoreError::TotalOverflow {
                price_cents: unit_price.cents(),
                quantity,
            })?;

        Ok(NewSale {
            date,
            product_name: product_name.into(),
            category: category.into(),
            unit_price,
            quantity,
            total,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn total(&self) -> Money {
        self.total
    }

    /// Converts into the persisted shape once the store has assigned an id.
    pub fn into_sale(self, id: i64) -> Sale {
        Sale {
            id,
            date: self.date,
            product_name: self.product_name,
            category: self.category,
            unit_price_cents: self.unit_price.cents(),
            quantity: self.quantity,
            total_cents: self.total.cents(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
