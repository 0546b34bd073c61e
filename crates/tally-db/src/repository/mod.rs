//! # Repository Module
//!
//! SQLite implementations of the `tally-core` repository traits.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Layout                                    │
//! │                                                                         │
//! │  GoodsUseCase / TransactionUseCase  (tally-core)                       │
//! │       │                                                                 │
//! │       │  generic over GoodRepository / TransactionRepository            │
//! │       ▼                                                                 │
//! │  SqliteGoodRepository               SqliteTransactionRepository        │
//! │  ├── inherent methods → DbResult    ├── inherent methods → DbResult    │
//! │  └── trait impl       → StoreResult └── trait impl       → StoreResult │
//! │       │                                   │                            │
//! │       │  single statements                │  BEGIN ... COMMIT          │
//! │       ▼                                   ▼                            │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`SqliteGoodRepository`] - Goods CRUD
//! - [`SqliteTransactionRepository`] - Header + detail writes and reads

pub mod goods;
pub mod transactions;

pub use goods::SqliteGoodRepository;
pub use transactions::SqliteTransactionRepository;

use uuid::Uuid;

/// Generates a new row id.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}
