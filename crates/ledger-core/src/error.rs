//! # Error Types
//!
//! Domain-specific error types for ledger-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CoreError                                                              │
//! │   ├── UnknownCatalogIndex      (catalog lookups)                        │
//! │   ├── TotalOverflow            (price × quantity does not fit)          │
//! │   └── Validation(ValidationError)                                       │
//! │                    ├── Required                                         │
//! │                    ├── NotANumber        "abc" for a number field       │
//! │                    ├── Negative          "-5" for price / quantity      │
//! │                    ├── TooManyDecimals   "1.999" for a price            │
//! │                    ├── MustBePositive    "0" for a bulk count           │
//! │                    └── OutOfRange        bulk count above the limit     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every validation error is recoverable: the console re-prompts and shows
//! the message verbatim, so messages are written for the operator.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Catalog index outside the fixed catalog.
    #[error("Catalog has no entry at index {0}")]
    UnknownCatalogIndex(usize),

    /// `unit_price × quantity` overflowed the cents representation.
    #[error("Total overflows for price {price_cents} cents × quantity {quantity}")]
    TotalOverflow { price_cents: i64, quantity: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Produced by the pure `parse_*` functions in [`crate::validation`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// The input is not a number at all.
    #[error("{field} must be a valid number, got '{input}'")]
    NotANumber { field: String, input: String },

    /// The input parsed but is below zero.
    #[error("{field} cannot be negative")]
    Negative { field: String },

    /// A decimal with more fractional digits than cents allow.
    #[error("{field} allows at most {max} decimal places")]
    TooManyDecimals { field: String, max: usize },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_messages() {
        let err = ValidationError::Negative {
            field: "price".to_string(),
        };
        assert_eq!(err.to_string(), "price cannot be negative");

        let err = ValidationError::Negative {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity cannot be negative");
    }

    #[test]
    fn test_not_a_number_message() {
        let err = ValidationError::NotANumber {
            field: "price".to_string(),
            input: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "price must be a valid number, got 'abc'");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "product".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
