//! # tally-core: Business Rules for Tally POS
//!
//! Domain types, integer money, validation, line pricing, the repository
//! traits and the goods/transaction use cases. This crate performs no I/O of
//! its own: storage is reached only through the traits in [`repository`].
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tally POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    tally-api (axum)                             │   │
//! │  │    /api/v1/goods ── /api/v1/transactions ── /health             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  pricing  │  │  usecase  │  │   │
//! │  │   │   Good    │  │   Money   │  │ subtotal  │  │   Goods   │  │   │
//! │  │   │ Header    │  │  decimal  │  │   total   │  │   Txn     │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └─────┬─────┘  │   │
//! │  │                                                      │         │   │
//! │  │                                  repository traits ◄─┘         │   │
//! │  └─────────────────────────────────────────┬───────────────────────┘   │
//! │                                            │ implemented by            │
//! │  ┌─────────────────────────────────────────▼───────────────────────┐   │
//! │  │                    tally-db (Database Layer)                    │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Good, TransactionHeader, TransactionDetail, inputs, drafts)
//! - [`money`] - Money type with integer arithmetic and the decimal JSON adapter
//! - [`error`] - Validation, store and use-case error types
//! - [`validation`] - Field rules
//! - [`pricing`] - Subtotal and total computation
//! - [`repository`] - Persistence traits
//! - [`usecase`] - Goods and transaction business logic
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_core::Money;
//!
//! let price = Money::from_cents(250);
//! let subtotal = price.checked_multiply_quantity(3).unwrap();
//!
//! assert_eq!(subtotal.to_string(), "7.50");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod pricing;
pub mod repository;
pub mod types;
pub mod usecase;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, StoreError, StoreResult, ValidationError};
pub use money::Money;
pub use repository::{GoodRepository, TransactionRepository};
pub use types::*;
pub use usecase::{GoodsUseCase, TransactionUseCase};
