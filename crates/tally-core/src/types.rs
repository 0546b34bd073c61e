//! # Domain Types
//!
//! Core domain types used throughout Tally POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌───────────────────┐   ┌───────────────────┐   │
//! │  │      Good       │   │ TransactionHeader │   │ TransactionDetail │   │
//! │  │  ─────────────  │   │  ───────────────  │   │  ───────────────  │   │
//! │  │  id (UUID)      │   │  id (UUID)        │◄──│  header_id (FK)   │   │
//! │  │  name (unique)  │   │  date             │   │  good_id ─────────┼─┐ │
//! │  │  quantity       │   │  total            │   │  quantity         │ │ │
//! │  │  price          │◄┐ └───────────────────┘   │  unit_price       │ │ │
//! │  └─────────────────┘ │                         │  subtotal         │ │ │
//! │                      │                         └───────────────────┘ │ │
//! │                      └───────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Inputs vs. Records
//! Records (`Good`, `TransactionHeader`, `TransactionDetail`) are what storage
//! returns. Inputs (`NewGood`, `GoodUpdate`, `DetailInput`) are what callers
//! send; they never carry server-owned fields such as ids, totals or
//! subtotals. Drafts (`TransactionDraft`, `DetailDraft`) are priced inputs on
//! their way into a repository.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::money::{self, Money};

// =============================================================================
// Good
// =============================================================================

/// A master inventory item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Good {
    /// Unique identifier (UUID v4), assigned on insert.
    pub id: String,

    /// Display name, unique across all goods (case-sensitive).
    pub name: String,

    /// Units in stock.
    pub quantity: i64,

    /// Current catalog price.
    #[serde(with = "money::decimal")]
    pub price: Money,
}

/// Fields for creating a good.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGood {
    pub name: String,
    #[serde(default)]
    pub quantity: i64,
    #[serde(with = "money::decimal")]
    pub price: Money,
}

/// Partial update of a good.
///
/// ## Omitted vs. Zero
/// `None` keeps the stored value; `Some(0)` sets the value to zero.
/// ```text
/// {"quantity": 5}            → quantity = 5, name/price unchanged
/// {"quantity": 0}            → quantity = 0
/// {}                         → nothing changes
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoodUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default, with = "money::decimal::option")]
    pub price: Option<Money>,
}

impl GoodUpdate {
    /// Applies the supplied fields on top of an existing good.
    pub fn apply_to(self, existing: Good) -> Good {
        Good {
            id: existing.id,
            name: self.name.unwrap_or(existing.name),
            quantity: self.quantity.unwrap_or(existing.quantity),
            price: self.price.unwrap_or(existing.price),
        }
    }
}

// =============================================================================
// Transaction Header
// =============================================================================

/// A sale record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionHeader {
    pub id: String,
    pub date: NaiveDate,
    /// Sum of the details' subtotals, always computed server-side.
    #[serde(with = "money::decimal")]
    pub total: Money,
}

// =============================================================================
// Transaction Detail
// =============================================================================

/// One line item of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDetail {
    pub id: String,
    pub header_id: String,
    pub good_id: String,
    /// 1-based position within the transaction.
    pub line_no: i64,
    pub quantity: i64,
    /// Unit price frozen at the time of the write.
    #[serde(with = "money::decimal")]
    pub unit_price: Money,
    /// `unit_price × quantity`.
    #[serde(with = "money::decimal")]
    pub subtotal: Money,
}

/// A header with its full, ordered set of details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionWithDetails {
    pub header: TransactionHeader,
    #[serde(rename = "detail")]
    pub details: Vec<TransactionDetail>,
}

/// A detail line as sent by a client.
///
/// `unit_price` is accepted so that existing clients can keep sending it, but
/// pricing always uses the good's catalog price. Unknown fields such as
/// `subtotal` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailInput {
    pub good_id: String,
    pub quantity: i64,
    #[serde(default, with = "money::decimal::option")]
    pub unit_price: Option<Money>,
}

// =============================================================================
// Drafts (priced, validated, not yet stored)
// =============================================================================

/// A priced detail line ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailDraft {
    pub good_id: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub subtotal: Money,
}

/// A priced transaction ready to be written.
///
/// There is no id field: the repository always assigns one on create, and
/// takes it as a separate argument on update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDraft {
    pub date: NaiveDate,
    pub total: Money,
    pub details: Vec<DetailDraft>,
}

// =============================================================================
// Unit Tests
// =============================================================================
