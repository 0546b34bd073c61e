//! # Line Pricing
//!
//! Turns client detail lines into priced drafts.
//!
//! ## Pricing Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  DetailInput { good_id, quantity, unit_price? }                         │
//! │       │                                                                 │
//! │       ├── quantity <= 0?          → ValidationError                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Good (looked up by the use case)                                      │
//! │       │                                                                 │
//! │       ├── unit_price := good.price  (client unit_price is ignored)     │
//! │       ├── unit_price <= 0?        → ValidationError                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  subtotal := unit_price × quantity  (overflow → ValidationError)       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  total := Σ subtotal                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{DetailDraft, DetailInput, Good, TransactionDraft};
use crate::validation::{validate_line_quantity, validate_unit_price, ValidationResult};

/// Prices one detail line against the good it references.
///
/// ## Example
/// ```rust
/// use tally_core::pricing::price_line;
/// use tally_core::{DetailInput, Good, Money};
///
/// let widget = Good {
///     id: "g-1".into(),
///     name: "Widget".into(),
///     quantity: 10,
///     price: Money::from_cents(250),
/// };
/// let input = DetailInput { good_id: "g-1".into(), quantity: 3, unit_price: None };
///
/// let line = price_line(&input, &widget).unwrap();
/// assert_eq!(line.subtotal.cents(), 750);
/// ```
pub fn price_line(input: &DetailInput, good: &Good) -> ValidationResult<DetailDraft> {
    validate_line_quantity(input.quantity)?;

    let unit_price = good.price;
    validate_unit_price(unit_price)?;

    let subtotal = unit_price
        .checked_multiply_quantity(input.quantity)
        .ok_or_else(|| ValidationError::Overflow {
            field: "subtotal".to_string(),
        })?;

    Ok(DetailDraft {
        good_id: good.id.clone(),
        quantity: input.quantity,
        unit_price,
        subtotal,
    })
}

/// Sums subtotals into a header total.
pub fn total_of(lines: &[DetailDraft]) -> ValidationResult<Money> {
    Money::checked_sum(lines.iter().map(|line| line.subtotal)).ok_or_else(|| {
        ValidationError::Overflow {
            field: "total".to_string(),
        }
    })
}

/// Builds a draft from already-priced lines.
pub fn build_draft(date: NaiveDate, lines: Vec<DetailDraft>) -> ValidationResult<TransactionDraft> {
    let total = total_of(&lines)?;
    Ok(TransactionDraft {
        date,
        total,
        details: lines,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
