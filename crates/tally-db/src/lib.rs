//! # tally-db
//!
//! SQLite storage for Tally POS. Implements the `GoodRepository` and
//! `TransactionRepository` traits from `tally-core` on top of one sqlx pool.
//!
//! ```text
//! use case (tally-core)
//!     │ trait call, StoreResult
//!     ▼
//! SqliteGoodRepository / SqliteTransactionRepository   (repository)
//!     │ sqlx, DbResult
//!     ▼
//! Database { SqlitePool }                              (pool, migrations)
//!     │
//!     ▼
//! DATABASE_PATH (default ./data/tally.db) or :memory:
//! ```
//!
//! Repositories expose inherent methods returning [`DbResult`] for callers
//! inside this crate (the seed binary, tests) and narrow to `StoreError` at
//! the trait boundary.
//!
//! ```rust,ignore
//! use tally_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./data/tally.db")).await?;
//! let widget = db.goods().find_by_name("Widget").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult, TxStage};
pub use migrations::MigrationStatus;
pub use pool::{Database, DbConfig, Location};
pub use repository::{SqliteGoodRepository, SqliteTransactionRepository};
