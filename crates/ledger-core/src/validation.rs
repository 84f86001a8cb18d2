//! # Validation Module
//!
//! Pure parsers for everything the operator types as a number.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Console line ──► parse_*(&str) ──► Ok(value)  ──► continue             │
//! │                        │                                                │
//! │                        └──────────► Err(ValidationError)                │
//! │                                        │                                │
//! │                                        ▼                                │
//! │                              console prints message,                    │
//! │                              re-prompts the SAME field                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these functions perform I/O, so the retry loop in the console app
//! stays trivial and every rule is unit-tested here.
//!
//! ## Usage
//! ```rust
//! use ledger_core::validation::{parse_price, parse_quantity};
//!
//! assert_eq!(parse_price("1999.50").unwrap().cents(), 199_950);
//! assert_eq!(parse_quantity("3").unwrap(), 3);
//! assert!(parse_price("-5").is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Fractional digits a price may carry.
pub const PRICE_DECIMALS: usize = 2;

// =============================================================================
// Price
// =============================================================================

/// Parses a unit price typed as a decimal (`"1999.50"`, `"12"`, `".5"`).
///
/// ## Rules
/// - Surrounding whitespace is ignored
/// - At most two fractional digits
/// - Zero is allowed, negative values are not
/// - No exponents, thousands separators or currency signs
///
/// ## Example
/// ```rust
/// use ledger_core::validation::parse_price;
///
/// assert_eq!(parse_price("0").unwrap().cents(), 0);
/// assert_eq!(parse_price(" 12.3 ").unwrap().cents(), 1230);
/// assert!(parse_price("12.345").is_err());
/// assert!(parse_price("abc").is_err());
/// ```
pub fn parse_price(input: &str) -> ValidationResult<Money> {
    let field = "price";
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    let not_a_number = || ValidationError::NotANumber {
        field: field.to_string(),
        input: trimmed.to_string(),
    };

    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let (whole, fraction) = match body.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (body, ""),
    };

    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction)
    {
        return Err(not_a_number());
    }

    if fraction.len() > PRICE_DECIMALS {
        return Err(ValidationError::TooManyDecimals {
            field: field.to_string(),
            max: PRICE_DECIMALS,
        });
    }

    let out_of_range = || ValidationError::OutOfRange {
        field: field.to_string(),
        min: 0,
        max: i64::MAX / Money::CENTS_PER_UNIT,
    };

    let whole_units: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| out_of_range())?
    };

    // "5" → 50 cents, "05" → 5 cents
    let fraction_cents: i64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i64>().map_err(|_| not_a_number())? * 10,
        _ => fraction.parse::<i64>().map_err(|_| not_a_number())?,
    };

    let cents = whole_units
        .checked_mul(Money::CENTS_PER_UNIT)
        .and_then(|c| c.checked_add(fraction_cents))
        .ok_or_else(out_of_range)?;

    if negative && cents != 0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    Ok(Money::from_cents(cents))
}

// =============================================================================
// Quantity
// =============================================================================

/// Parses a sold quantity (a whole number, zero allowed).
///
/// ## Example
/// ```rust
/// use ledger_core::validation::parse_quantity;
///
/// assert_eq!(parse_quantity("0").unwrap(), 0);
/// assert!(parse_quantity("-1").is_err());
/// assert!(parse_quantity("2.5").is_err());
/// ```
pub fn parse_quantity(input: &str) -> ValidationResult<i64> {
    let field = "quantity";
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    let qty = match parse_whole(field, trimmed)? {
        Whole::Value(qty) => qty,
        Whole::TooLarge => {
            return Err(ValidationError::OutOfRange {
                field: field.to_string(),
                min: 0,
                max: i64::MAX,
            })
        }
        Whole::TooSmall => {
            return Err(ValidationError::Negative {
                field: field.to_string(),
            })
        }
    };

    if qty < 0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    Ok(qty)
}

// =============================================================================
// Bulk Count
// =============================================================================

/// Parses how many synthetic sales to generate.
///
/// ## Rules
/// - Must be a whole number
/// - Must be at least 1
/// - Must not exceed `max`
pub fn parse_bulk_count(input: &str, max: u32) -> ValidationResult<u32> {
    let field = "count";
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    let count = match parse_whole(field, trimmed)? {
        Whole::Value(count) => count,
        Whole::TooLarge => i64::MAX,
        Whole::TooSmall => i64::MIN,
    };

    if count <= 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    if count > i64::from(max) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 1,
            max: i64::from(max),
        });
    }

    // count is within 1..=max, so it fits in u32
    Ok(count as u32)
}

// =============================================================================
// Whole Numbers
// =============================================================================

/// Outcome of reading a signed integer literal.
enum Whole {
    Value(i64),
    /// Digits only, but above `i64::MAX`
    TooLarge,
    /// Digits only, but below `i64::MIN`
    TooSmall,
}

/// Parses an optionally signed run of ASCII digits.
///
/// Anything else is `NotANumber`. Well-formed literals that overflow `i64`
/// are reported as `TooLarge`/`TooSmall` rather than as garbage.
fn parse_whole(field: &str, trimmed: &str) -> ValidationResult<Whole> {
    if let Ok(value) = trimmed.parse::<i64>() {
        return Ok(Whole::Value(value));
    }

    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::NotANumber {
            field: field.to_string(),
            input: trimmed.to_string(),
        });
    }

    Ok(if negative {
        Whole::TooSmall
    } else {
        Whole::TooLarge
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
