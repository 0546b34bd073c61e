//! # Validation Module
//!
//! Input validation rules for goods and transaction lines.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP extractor (tally-api)                                   │
//! │  └── JSON shape, date format, money parse                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Use case                                                     │
//! │  └── THIS MODULE: Business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  └── UNIQUE (goods.name)                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::validation::{validate_good_name, validate_line_quantity};
//!
//! validate_good_name("Widget").unwrap();
//! assert!(validate_line_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Goods
// =============================================================================

/// Validates a good name.
///
/// ## Rules
/// - Must not be empty or whitespace-only
///
/// The name is stored exactly as given; uniqueness is case-sensitive.
pub fn validate_good_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    Ok(())
}

/// Validates a stock quantity. Zero is allowed (out of stock).
pub fn validate_stock_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a catalog price. Zero is allowed (free items).
///
/// ## Example
/// ```rust
/// use tally_core::money::Money;
/// use tally_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_cents(250)).is_ok());
/// assert!(validate_price(Money::zero()).is_ok());
/// assert!(validate_price(Money::from_cents(-1)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Transaction lines
// =============================================================================

/// Validates a detail line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_line_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates the unit price a detail line is sold at.
///
/// ## Rules
/// - Must be positive (> 0); a line cannot be sold for nothing
pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "unit_price".to_string(),
        });
    }

    Ok(())
}

/// Validates that a transaction carries at least one detail line.
pub fn validate_detail_count(count: usize) -> ValidationResult<()> {
    if count == 0 {
        return Err(ValidationError::Empty {
            field: "detail".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_good_name() {
        assert!(validate_good_name("Widget").is_ok());
        assert!(validate_good_name(" padded ").is_ok());

        assert!(validate_good_name("").is_err());
        assert!(validate_good_name("   ").is_err());
        assert!(validate_good_name("\t\n").is_err());
    }

    #[test]
    fn test_validate_stock_quantity() {
        assert!(validate_stock_quantity(0).is_ok());
        assert!(validate_stock_quantity(10).is_ok());
        assert!(validate_stock_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_line_quantity() {
        assert!(validate_line_quantity(1).is_ok());
        assert!(validate_line_quantity(1000).is_ok());

        assert!(validate_line_quantity(0).is_err());
        assert!(validate_line_quantity(-3).is_err());
    }

    #[test]
    fn test_validate_unit_price() {
        assert!(validate_unit_price(Money::from_cents(1)).is_ok());
        assert_eq!(
            validate_unit_price(Money::zero()),
            Err(ValidationError::MustBePositive {
                field: "unit_price".to_string()
            })
        );
    }

    #[test]
    fn test_validate_detail_count() {
        assert!(validate_detail_count(1).is_ok());
        assert!(validate_detail_count(0).is_err());
    }
}
