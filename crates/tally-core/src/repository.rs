//! # Repository Traits
//!
//! Persistence capabilities the use cases depend on, one trait per entity
//! family. `tally-db` provides the SQLite implementations; tests use the
//! `mockall` mocks generated here.
//!
//! ## Contract
//! - "No matching row" on a read is `Ok(None)`, never an error.
//! - Update/delete statements that touch zero rows return
//!   [`StoreError::NotFound`](crate::StoreError::NotFound).
//! - Multi-row writes on [`TransactionRepository`] are atomic: either every
//!   statement commits or none does.
//! - Ids are generated by the repository on insert.

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::types::{Good, NewGood, TransactionDraft, TransactionHeader, TransactionWithDetails};

/// Goods persistence. Every method is a single statement.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GoodRepository: Send + Sync {
    /// Inserts a good and returns it with its generated id.
    async fn create(&self, good: NewGood) -> StoreResult<Good>;

    /// Lists all goods ordered by name.
    async fn list(&self) -> StoreResult<Vec<Good>>;

    async fn get_by_id(&self, id: &str) -> StoreResult<Option<Good>>;

    /// Exact, case-sensitive name match.
    async fn get_by_name(&self, name: &str) -> StoreResult<Option<Good>>;

    /// Overwrites name, quantity and price of `good.id`.
    async fn update(&self, good: &Good) -> StoreResult<Good>;

    async fn delete(&self, id: &str) -> StoreResult<()>;
}

/// Transaction header + detail persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Inserts the header and then every detail in one database transaction.
    /// Returns the generated header id.
    async fn create_with_details(&self, draft: TransactionDraft) -> StoreResult<String>;

    /// Lists headers only, without details.
    async fn list(&self) -> StoreResult<Vec<TransactionHeader>>;

    /// Header plus details ordered by line number.
    async fn get_by_id(&self, id: &str) -> StoreResult<Option<TransactionWithDetails>>;

    /// Updates the header and replaces the full detail set (delete, then
    /// reinsert) in one database transaction.
    async fn update_with_details(
        &self,
        id: &str,
        draft: TransactionDraft,
    ) -> StoreResult<TransactionWithDetails>;

    /// Deletes all details and then the header in one database transaction.
    async fn delete(&self, id: &str) -> StoreResult<()>;
}
