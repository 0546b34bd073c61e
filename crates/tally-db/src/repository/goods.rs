//! # Goods Repository
//!
//! Database operations for goods. Every operation is a single statement.
//!
//! Names are matched exactly (`=`, SQLite's default BINARY collation), so
//! "Widget" and "widget" are different goods.

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;

use super::generate_id;
use crate::error::{DbError, DbResult};
use tally_core::{Good, GoodRepository, Money, NewGood, StoreResult};

/// Row shape of the `goods` table.
#[derive(Debug, sqlx::FromRow)]
struct GoodRow {
    id: String,
    name: String,
    quantity: i64,
    price_cents: i64,
}

impl From<GoodRow> for Good {
    fn from(row: GoodRow) -> Self {
        Good {
            id: row.id,
            name: row.name,
            quantity: row.quantity,
            price: Money::from_cents(row.price_cents),
        }
    }
}

/// Repository for goods database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = SqliteGoodRepository::new(pool);
///
/// let good = repo.insert(NewGood { name: "Widget".into(), quantity: 10, price }).await?;
/// let same = repo.find_by_name("Widget").await?;
/// ```
#[derive(Debug, Clone)]
pub struct SqliteGoodRepository {
    pool: SqlitePool,
}

impl SqliteGoodRepository {
    /// Creates a new SqliteGoodRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SqliteGoodRepository { pool }
    }

    /// Inserts a good with a freshly generated id.
    pub async fn insert(&self, good: NewGood) -> DbResult<Good> {
        let id = generate_id();

        debug!(id = %id, name = %good.name, "Inserting good");

        sqlx::query(
            r#"
            INSERT INTO goods (id, name, quantity, price_cents)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&id)
        .bind(&good.name)
        .bind(good.quantity)
        .bind(good.price.cents())
        .execute(&self.pool)
        .await?;

        Ok(Good {
            id,
            name: good.name,
            quantity: good.quantity,
            price: good.price,
        })
    }

    /// Lists all goods ordered by name.
    pub async fn list_all(&self) -> DbResult<Vec<Good>> {
        let rows: Vec<GoodRow> = sqlx::query_as(
            r#"
            SELECT id, name, quantity, price_cents
            FROM goods
            ORDER BY name, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Good::from).collect())
    }

    /// Gets a good by ID.
    pub async fn find_by_id(&self, id: &str) -> DbResult<Option<Good>> {
        let row: Option<GoodRow> = sqlx::query_as(
            r#"
            SELECT id, name, quantity, price_cents
            FROM goods
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Good::from))
    }

    /// Gets a good by exact name.
    pub async fn find_by_name(&self, name: &str) -> DbResult<Option<Good>> {
        let row: Option<GoodRow> = sqlx::query_as(
            r#"
            SELECT id, name, quantity, price_cents
            FROM goods
            WHERE name = ?1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Good::from))
    }

    /// Overwrites name, quantity and price.
    pub async fn update_good(&self, good: &Good) -> DbResult<Good> {
        debug!(id = %good.id, "Updating good");

        let result = sqlx::query(
            r#"
            UPDATE goods SET
                name = ?2,
                quantity = ?3,
                price_cents = ?4
            WHERE id = ?1
            "#,
        )
        .bind(&good.id)
        .bind(&good.name)
        .bind(good.quantity)
        .bind(good.price.cents())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Good", &good.id));
        }

        Ok(good.clone())
    }

    /// Hard-deletes a good. Transaction details referencing it are untouched.
    pub async fn delete_good(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting good");

        let result = sqlx::query("DELETE FROM goods WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Good", id));
        }

        Ok(())
    }

    /// Counts goods.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM goods")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl GoodRepository for SqliteGoodRepository {
    async fn create(&self, good: NewGood) -> StoreResult<Good> {
        Ok(self.insert(good).await?)
    }

    async fn list(&self) -> StoreResult<Vec<Good>> {
        Ok(self.list_all().await?)
    }

    async fn get_by_id(&self, id: &str) -> StoreResult<Option<Good>> {
        Ok(self.find_by_id(id).await?)
    }

    async fn get_by_name(&self, name: &str) -> StoreResult<Option<Good>> {
        Ok(self.find_by_name(name).await?)
    }

    async fn update(&self, good: &Good) -> StoreResult<Good> {
        Ok(self.update_good(good).await?)
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        Ok(self.delete_good(id).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use tally_core::StoreError;

    async fn repo() -> SqliteGoodRepository {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.goods()
    }

    fn new_good(name: &str, quantity: i64, cents: i64) -> NewGood {
        NewGood {
            name: name.to_string(),
            quantity,
            price: Money::from_cents(cents),
        }
    }

    #[tokio::test]
    async fn test_insert_generates_distinct_ids() {
        let repo = repo().await;

        let a = repo.insert(new_good("Widget", 10, 250)).await.unwrap();
        let b = repo.insert(new_good("Gadget", 1, 100)).await.unwrap();

        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
        assert_eq!(repo.find_by_id(&a.id).await.unwrap(), Some(a));
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_name() {
        let repo = repo().await;
        repo.insert(new_good("Zeta", 1, 100)).await.unwrap();
        repo.insert(new_good("Alpha", 1, 100)).await.unwrap();

        let names: Vec<String> = repo
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|g| g.name)
            .collect();
        assert_eq!(names, vec!["Alpha", "Zeta"]);
    }

    #[tokio::test]
    async fn test_duplicate_name_is_unique_violation() {
        let repo = repo().await;
        repo.insert(new_good("Widget", 1, 100)).await.unwrap();

        let err = repo.create(new_good("Widget", 2, 200)).await.unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation { .. }));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_name_lookup_is_case_sensitive() {
        let repo = repo().await;
        repo.insert(new_good("Widget", 1, 100)).await.unwrap();

        assert!(repo.find_by_name("Widget").await.unwrap().is_some());
        assert!(repo.find_by_name("widget").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_rows_are_not_found() {
        let repo = repo().await;
        let ghost = Good {
            id: "missing".to_string(),
            name: "Ghost".to_string(),
            quantity: 0,
            price: Money::zero(),
        };

        assert!(matches!(
            repo.update(&ghost).await,
            Err(StoreError::NotFound { .. })
        ));
        assert!(matches!(
            repo.delete("missing").await,
            Err(StoreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_overwrites_fields() {
        let repo = repo().await;
        let mut good = repo.insert(new_good("Widget", 10, 250)).await.unwrap();

        good.quantity = 0;
        good.price = Money::from_cents(300);
        repo.update_good(&good).await.unwrap();

        let stored = repo.find_by_id(&good.id).await.unwrap().unwrap();
        assert_eq!(stored.quantity, 0);
        assert_eq!(stored.price.cents(), 300);
    }

    #[tokio::test]
    async fn test_negative_quantity_is_rejected_by_schema() {
        let repo = repo().await;

        let err = repo.create(new_good("Broken", -1, 100)).await.unwrap_err();
        assert!(matches!(err, StoreError::Failed(_)));
    }
}
