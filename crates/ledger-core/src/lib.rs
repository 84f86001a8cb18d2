//! # ledger-core: Pure Business Logic for the Sales Ledger
//!
//! This crate holds every rule of the ledger that can be expressed without
//! touching a disk, a console or a clock.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sales Ledger Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  ledger-cli (console app)                       │   │
//! │  │   Menu Loop ──► Auth Gate ──► Ledger Operations ──► CSV export  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ ledger-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ catalog   │  │ validation│  │   │
//! │  │   │   User    │  │   Money   │  │ synthetic │  │  parse_*  │  │   │
//! │  │   │   Sale    │  │           │  │  sales    │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CLOCK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  ledger-db (Database Layer)                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Example
//! ```rust
//! use ledger_core::validation::{parse_price, parse_quantity};
//! use ledger_core::NewSale;
//! use chrono::NaiveDate;
//!
//! let price = parse_price("1999.50").unwrap();
//! let qty = parse_quantity("3").unwrap();
//! let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
//!
//! let sale = NewSale::new(date, "Laptop", "Electronics", price, qty).unwrap();
//! assert_eq!(sale.total().to_decimal_string(), "5998.50");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{generate_synthetic_sales, CatalogItem, CATALOG};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Number of days (today included) a synthetic sale date may fall in.
pub const SYNTHETIC_WINDOW_DAYS: i64 = 12;

/// Inclusive quantity range for synthetic sales.
pub const SYNTHETIC_QUANTITY_MIN: i64 = 1;
pub const SYNTHETIC_QUANTITY_MAX: i64 = 10;

/// Default upper bound for a single bulk-generation request.
///
/// The console app can override this via configuration.
pub const DEFAULT_MAX_SYNTHETIC_BATCH: u32 = 10_000;
