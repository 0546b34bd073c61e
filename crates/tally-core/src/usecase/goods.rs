//! # Goods Use Case
//!
//! Presence and uniqueness rules around goods CRUD.
//!
//! ## Update Flow
//! ```text
//! update(id, GoodUpdate)
//!      │
//!      ▼
//! get_by_id(id) ── None ──► NotFound
//!      │
//!      ▼
//! validate supplied fields ── bad ──► Validation
//!      │
//!      ▼
//! name supplied and changed?
//!      │ yes
//!      ▼
//! get_by_name(name) ── other id ──► Conflict
//!      │
//!      ▼
//! merge (omitted fields keep stored values) ──► repository.update
//! ```

use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::error::{CoreError, CoreResult, StoreError};
use crate::repository::GoodRepository;
use crate::types::{Good, GoodUpdate, NewGood};
use crate::validation::{validate_good_name, validate_price, validate_stock_quantity};

/// Goods business logic over an injected repository.
pub struct GoodsUseCase<R: GoodRepository> {
    repository: Arc<R>,
}

impl<R: GoodRepository> GoodsUseCase<R> {
    pub fn new(repository: Arc<R>) -> Self {
        GoodsUseCase { repository }
    }

    /// Creates a good after checking the name is present and unused.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: NewGood) -> CoreResult<Good> {
        validate_good_name(&input.name)?;
        validate_stock_quantity(input.quantity)?;
        validate_price(input.price)?;

        if self.repository.get_by_name(&input.name).await?.is_some() {
            return Err(CoreError::duplicate_good_name(input.name));
        }

        let name = input.name.clone();
        let good = self
            .repository
            .create(input)
            .await
            .map_err(|e| name_conflict_or(e, &name))?;

        debug!(id = %good.id, "Good created");
        Ok(good)
    }

    /// Lists all goods. An empty catalog is not an error.
    #[instrument(skip(self))]
    pub async fn list(&self) -> CoreResult<Vec<Good>> {
        Ok(self.repository.list().await?)
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: &str) -> CoreResult<Good> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| CoreError::good_not_found(id))
    }

    #[instrument(skip(self))]
    pub async fn get_by_name(&self, name: &str) -> CoreResult<Good> {
        self.repository
            .get_by_name(name)
            .await?
            .ok_or_else(|| CoreError::good_not_found(name))
    }

    /// Applies a partial update. Fields left as `None` keep their stored value.
    #[instrument(skip(self, update))]
    pub async fn update(&self, id: &str, update: GoodUpdate) -> CoreResult<Good> {
        let existing = self.get_by_id(id).await?;

        if let Some(name) = &update.name {
            validate_good_name(name)?;

            if *name != existing.name {
                if let Some(other) = self.repository.get_by_name(name).await? {
                    if other.id != existing.id {
                        return Err(CoreError::duplicate_good_name(name.clone()));
                    }
                }
            }
        }
        if let Some(quantity) = update.quantity {
            validate_stock_quantity(quantity)?;
        }
        if let Some(price) = update.price {
            validate_price(price)?;
        }

        let merged = update.apply_to(existing);
        let stored = self
            .repository
            .update(&merged)
            .await
            .map_err(|e| match e {
                StoreError::NotFound { .. } => CoreError::good_not_found(id),
                other => name_conflict_or(other, &merged.name),
            })?;

        Ok(stored)
    }

    /// Deletes a good. Transaction details that reference it are left alone.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> CoreResult<()> {
        self.get_by_id(id).await?;

        self.repository.delete(id).await.map_err(|e| match e {
            StoreError::NotFound { .. } => CoreError::good_not_found(id),
            other => CoreError::Persistence(other),
        })
    }
}

impl<R: GoodRepository> Clone for GoodsUseCase<R> {
    fn clone(&self) -> Self {
        GoodsUseCase {
            repository: Arc::clone(&self.repository),
        }
    }
}

/// A unique violation raised by storage means another writer took the name
/// between our check and our write.
fn name_conflict_or(err: StoreError, name: &str) -> CoreError {
    match err {
        StoreError::UniqueViolation { field } => {
            warn!(%field, name, "Unique violation on write");
            CoreError::duplicate_good_name(name)
        }
        other => CoreError::Persistence(other),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
