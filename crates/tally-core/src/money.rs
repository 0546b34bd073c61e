//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With floats:                                                           │
//! │    2.10 × 3 = 6.300000000000001  ❌                                      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    210 cents × 3 = 630 cents      ✅                                     │
//! │                                                                         │
//! │  Floats only exist at the JSON edge (see [`decimal`]), where they are  │
//! │  rounded to the nearest cent exactly once.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::money::Money;
//!
//! let price = Money::from_cents(250); // 2.50
//! let subtotal = price.checked_multiply_quantity(3).unwrap();
//! assert_eq!(subtotal.cents(), 750);
//! assert_eq!(subtotal.to_string(), "7.50");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of cents in one major unit.
const CENTS_PER_UNIT: i64 = 100;

/// Largest magnitude, in cents, that parsing and checked arithmetic produce.
///
/// Up to ten trillion major units the `f64` decimal form still resolves single
/// cents, so every amount within this bound survives a JSON round trip.
pub const MAX_CENTS: i64 = 1_000_000_000_000_000;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Where Money is Used
/// ```text
/// Good.price ──► TransactionDetail.unit_price ──► TransactionDetail.subtotal
///                                                        │
///                                                        ▼ (sum)
///                                             TransactionHeader.total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a decimal amount in major units (as received over JSON) into
    /// cents, rounding half away from zero.
    ///
    /// Returns `None` for NaN, infinities and amounts beyond [`MAX_CENTS`].
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(2.5).unwrap().cents(), 250);
    /// assert_eq!(Money::from_decimal(0.1 + 0.2).unwrap().cents(), 30);
    /// assert!(Money::from_decimal(f64::NAN).is_none());
    /// ```
    pub fn from_decimal(amount: f64) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }

        let cents = (amount * CENTS_PER_UNIT as f64).round();
        if cents.abs() > MAX_CENTS as f64 {
            return None;
        }

        Some(Money(cents as i64))
    }

    /// Returns the value in major units, for the JSON edge only.
    #[inline]
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / CENTS_PER_UNIT as f64
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity, returning `None` past [`MAX_CENTS`].
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.checked_multiply_quantity(3).unwrap().cents(), 897);
    /// assert!(Money::from_cents(i64::MAX).checked_multiply_quantity(2).is_none());
    /// ```
    #[inline]
    pub fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        self.0.checked_mul(qty).and_then(Money::bounded)
    }

    /// Adds two values, returning `None` past [`MAX_CENTS`].
    #[inline]
    pub fn checked_add(&self, other: Money) -> Option<Self> {
        self.0.checked_add(other.0).and_then(Money::bounded)
    }

    /// Sums values, returning `None` as soon as the running total leaves the
    /// [`MAX_CENTS`] range.
    ///
    /// ```rust
    /// use tally_core::money::{Money, MAX_CENTS};
    ///
    /// let lines = [Money::from_cents(750), Money::from_cents(398)];
    /// assert_eq!(Money::checked_sum(lines).unwrap().cents(), 1148);
    /// assert!(Money::checked_sum([Money::from_cents(MAX_CENTS), Money::from_cents(1)]).is_none());
    /// ```
    pub fn checked_sum(values: impl IntoIterator<Item = Money>) -> Option<Self> {
        values
            .into_iter()
            .try_fold(Money::zero(), |acc, value| acc.checked_add(value))
    }

    fn bounded(cents: i64) -> Option<Self> {
        (cents.unsigned_abs() <= MAX_CENTS as u64).then_some(Money(cents))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain two-decimal rendering, no currency symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(
            f,
            "{}{}.{:02}",
            sign,
            abs / CENTS_PER_UNIT as u64,
            abs % CENTS_PER_UNIT as u64
        )
    }
}


// =============================================================================
// JSON Representation
// =============================================================================

/// Serde adapter that exposes [`Money`] as a decimal number in major units.
///
/// The number is an `f64`, exact only up to [`MAX_CENTS`](super::MAX_CENTS).
/// Parsing rejects anything larger and pricing never computes past it, so
/// amounts that reach the wire round-trip exactly.
///
/// ## Usage
/// ```rust
/// use serde::{Deserialize, Serialize};
/// use tally_core::money::{self, Money};
///
/// #[derive(Serialize, Deserialize)]
/// struct Line {
///     #[serde(with = "money::decimal")]
///     price: Money,
/// }
///
/// let line: Line = serde_json::from_str(r#"{"price": 2.5}"#).unwrap();
/// assert_eq!(line.price.cents(), 250);
/// assert_eq!(serde_json::to_string(&line).unwrap(), r#"{"price":2.5}"#);
/// ```
pub mod decimal {
    use super::Money;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(money.to_decimal())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Money::from_decimal(amount)
            .ok_or_else(|| D::Error::custom(format!("invalid money amount: {}", amount)))
    }

    /// Same as [`decimal`](self) for optional fields.
    pub mod option {
        use super::Money;
        use serde::de::Error as _;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            money: &Option<Money>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match money {
                Some(m) => serializer.serialize_some(&m.to_decimal()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Money>, D::Error> {
            match Option::<f64>::deserialize(deserializer)? {
                Some(amount) => Money::from_decimal(amount)
                    .map(Some)
                    .ok_or_else(|| D::Error::custom(format!("invalid money amount: {}", amount))),
                None => Ok(None),
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_decimal_rounds_to_nearest_cent() {
        assert_eq!(Money::from_decimal(2.5).unwrap().cents(), 250);
        assert_eq!(Money::from_decimal(19.999).unwrap().cents(), 2000);
        assert_eq!(Money::from_decimal(0.004).unwrap().cents(), 0);
        assert_eq!(Money::from_decimal(-1.25).unwrap().cents(), -125);
    }

    #[test]
    fn test_from_decimal_rejects_non_finite() {
        assert!(Money::from_decimal(f64::NAN).is_none());
        assert!(Money::from_decimal(f64::INFINITY).is_none());
        assert!(Money::from_decimal(1e30).is_none());
    }

    #[test]
    fn test_from_decimal_rejects_amounts_past_exact_range() {
        // 2^63 cents does not fit in i64
        assert!(Money::from_decimal(9_223_372_036_854_775_808.0 / 100.0).is_none());
        assert!(Money::from_decimal(1e14).is_none());
        assert!(Money::from_decimal(-1e14).is_none());

        let largest = Money::from_decimal(MAX_CENTS as f64 / 100.0).unwrap();
        assert_eq!(largest.cents(), MAX_CENTS);
    }

    #[test]
    fn test_largest_amount_round_trips_through_json() {
        #[derive(Serialize, Deserialize)]
        struct Priced {
            #[serde(with = "decimal")]
            price: Money,
        }

        for cents in [MAX_CENTS, MAX_CENTS - 1, -MAX_CENTS + 7, 123_456_789_012_345] {
            let json = serde_json::to_string(&Priced {
                price: Money::from_cents(cents),
            })
            .unwrap();
            let back: Priced = serde_json::from_str(&json).unwrap();
            assert_eq!(back.price.cents(), cents, "{}", json);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(750).to_string(), "7.50");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_checked_sum() {
        let total = Money::checked_sum([250, 750, 1].map(Money::from_cents)).unwrap();
        assert_eq!(total.cents(), 1001);
        assert_eq!(Money::checked_sum(Vec::new()), Some(Money::zero()));
        assert!(Money::checked_sum([MAX_CENTS, 1].map(Money::from_cents)).is_none());
        assert!(Money::checked_sum([-MAX_CENTS, -1].map(Money::from_cents)).is_none());
    }

    #[test]
    fn test_checked_arithmetic() {
        assert_eq!(
            Money::from_cents(299).checked_multiply_quantity(3),
            Some(Money::from_cents(897))
        );
        assert!(Money::from_cents(i64::MAX).checked_multiply_quantity(2).is_none());
        assert!(Money::from_cents(i64::MAX)
            .checked_add(Money::from_cents(1))
            .is_none());
        assert!(Money::from_cents(MAX_CENTS / 2 + 1)
            .checked_multiply_quantity(2)
            .is_none());
        assert_eq!(
            Money::from_cents(MAX_CENTS / 2).checked_multiply_quantity(2),
            Some(Money::from_cents(MAX_CENTS))
        );
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        assert!(Money::from_cents(100).is_positive());
        assert!(Money::from_cents(-100).is_negative());
    }

    #[test]
    fn test_decimal_serde_round_trip_through_json() {
        #[derive(Serialize, Deserialize)]
        struct Priced {
            #[serde(with = "decimal")]
            price: Money,
            #[serde(with = "decimal::option", default)]
            discount: Option<Money>,
        }

        let parsed: Priced = serde_json::from_str(r#"{"price": 7.5}"#).unwrap();
        assert_eq!(parsed.price.cents(), 750);
        assert!(parsed.discount.is_none());

        let json = serde_json::to_value(&parsed).unwrap();
        assert_eq!(json["price"], serde_json::json!(7.5));
        assert!(json["discount"].is_null());
    }
}
