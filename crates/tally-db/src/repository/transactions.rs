//! # Transaction Repository
//!
//! Database operations for transaction headers and their details.
//!
//! ## Write Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Multi-row Writes                                  │
//! │                                                                         │
//! │  create                update                  delete                  │
//! │  ──────                ──────                  ──────                  │
//! │  BEGIN                 BEGIN                   BEGIN                   │
//! │  INSERT header         UPDATE header (0 rows → NotFound)               │
//! │  INSERT detail 1..n    DELETE details          DELETE details          │
//! │  COMMIT                INSERT detail 1..n      DELETE header (0 → NF)  │
//! │                        SELECT header+details   COMMIT                  │
//! │                        COMMIT                                          │
//! │                                                                         │
//! │  Any failing statement → ROLLBACK, nothing is visible.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Statements inside a transaction run on the transaction's own connection
//! (`&mut *tx`), never on the pool.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};
use tracing::{debug, warn};

use super::generate_id;
use crate::error::{DbError, DbResult};
use tally_core::{
    DetailDraft, Money, StoreResult, TransactionDetail, TransactionDraft, TransactionHeader,
    TransactionRepository, TransactionWithDetails,
};

// =============================================================================
// Rows
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct HeaderRow {
    id: String,
    date: NaiveDate,
    total_cents: i64,
}

impl From<HeaderRow> for TransactionHeader {
    fn from(row: HeaderRow) -> Self {
        TransactionHeader {
            id: row.id,
            date: row.date,
            total: Money::from_cents(row.total_cents),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct DetailRow {
    id: String,
    header_id: String,
    good_id: String,
    line_no: i64,
    quantity: i64,
    unit_price_cents: i64,
    subtotal_cents: i64,
}

impl From<DetailRow> for TransactionDetail {
    fn from(row: DetailRow) -> Self {
        TransactionDetail {
            id: row.id,
            header_id: row.header_id,
            good_id: row.good_id,
            line_no: row.line_no,
            quantity: row.quantity,
            unit_price: Money::from_cents(row.unit_price_cents),
            subtotal: Money::from_cents(row.subtotal_cents),
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for transaction database operations.
#[derive(Debug, Clone)]
pub struct SqliteTransactionRepository {
    pool: SqlitePool,
}

impl SqliteTransactionRepository {
    /// Creates a new SqliteTransactionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SqliteTransactionRepository { pool }
    }

    /// Inserts the header and all details atomically. Returns the header id.
    pub async fn insert_transaction(&self, draft: &TransactionDraft) -> DbResult<String> {
        let id = generate_id();

        debug!(id = %id, lines = draft.details.len(), "Inserting transaction");

        let mut tx = self.pool.begin().await.map_err(DbError::begin)?;

        let written: DbResult<()> = async {
            insert_header(&mut tx, &id, draft.date, draft.total).await?;
            insert_details(&mut tx, &id, &draft.details).await
        }
        .await;

        finish(tx, written).await?;
        Ok(id)
    }

    /// Lists headers ordered by date, then id.
    pub async fn list_headers(&self) -> DbResult<Vec<TransactionHeader>> {
        let rows: Vec<HeaderRow> = sqlx::query_as(
            r#"
            SELECT id, date, total_cents
            FROM transaction_headers
            ORDER BY date, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(TransactionHeader::from).collect())
    }

    /// Gets a header with its details ordered by line number.
    pub async fn find_by_id(&self, id: &str) -> DbResult<Option<TransactionWithDetails>> {
        let mut conn = self.pool.acquire().await?;
        fetch_with_details(&mut conn, id).await
    }

    /// Rewrites the header and replaces the detail set atomically.
    pub async fn replace_transaction(
        &self,
        id: &str,
        draft: &TransactionDraft,
    ) -> DbResult<TransactionWithDetails> {
        debug!(id = %id, lines = draft.details.len(), "Replacing transaction");

        let mut tx = self.pool.begin().await.map_err(DbError::begin)?;

        let written: DbResult<TransactionWithDetails> = async {
            update_header(&mut tx, id, draft.date, draft.total).await?;
            delete_details(&mut tx, id).await?;
            insert_details(&mut tx, id, &draft.details).await?;
            fetch_with_details(&mut tx, id)
                .await?
                .ok_or_else(|| DbError::not_found("Transaction", id))
        }
        .await;

        finish(tx, written).await
    }

    /// Deletes all details, then the header, atomically.
    pub async fn delete_transaction(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting transaction");

        let mut tx = self.pool.begin().await.map_err(DbError::begin)?;

        let written: DbResult<()> = async {
            delete_details(&mut tx, id).await?;

            let result = sqlx::query("DELETE FROM transaction_headers WHERE id = ?1")
                .bind(id)
                .execute(&mut *tx)
                .await?;

            if result.rows_affected() == 0 {
                return Err(DbError::not_found("Transaction", id));
            }
            Ok(())
        }
        .await;

        finish(tx, written).await
    }
}

#[async_trait]
impl TransactionRepository for SqliteTransactionRepository {
    async fn create_with_details(&self, draft: TransactionDraft) -> StoreResult<String> {
        Ok(self.insert_transaction(&draft).await?)
    }

    async fn list(&self) -> StoreResult<Vec<TransactionHeader>> {
        Ok(self.list_headers().await?)
    }

    async fn get_by_id(&self, id: &str) -> StoreResult<Option<TransactionWithDetails>> {
        Ok(self.find_by_id(id).await?)
    }

    async fn update_with_details(
        &self,
        id: &str,
        draft: TransactionDraft,
    ) -> StoreResult<TransactionWithDetails> {
        Ok(self.replace_transaction(id, &draft).await?)
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        Ok(self.delete_transaction(id).await?)
    }
}

// =============================================================================
// Statement helpers
// =============================================================================

/// Commits when every statement succeeded, otherwise rolls back and returns
/// the original error.
async fn finish<T>(tx: Transaction<'_, Sqlite>, written: DbResult<T>) -> DbResult<T> {
    match written {
        Ok(value) => {
            tx.commit().await.map_err(DbError::commit)?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                warn!(error = %rollback_err, "Rollback failed");
            }
            Err(err)
        }
    }
}

async fn insert_header(
    conn: &mut SqliteConnection,
    id: &str,
    date: NaiveDate,
    total: Money,
) -> DbResult<()> {
    sqlx::query(
        r#"
        INSERT INTO transaction_headers (id, date, total_cents)
        VALUES (?1, ?2, ?3)
        "#,
    )
    .bind(id)
    .bind(date)
    .bind(total.cents())
    .execute(&mut *conn)
    .await?;

    Ok(())
}

async fn update_header(
    conn: &mut SqliteConnection,
    id: &str,
    date: NaiveDate,
    total: Money,
) -> DbResult<()> {
    let result = sqlx::query(
        r#"
        UPDATE transaction_headers SET
            date = ?2,
            total_cents = ?3
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .bind(date)
    .bind(total.cents())
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("Transaction", id));
    }

    Ok(())
}

/// Inserts a detail set for `header_id`, numbering lines from 1 in order.
async fn insert_details(
    conn: &mut SqliteConnection,
    header_id: &str,
    details: &[DetailDraft],
) -> DbResult<()> {
    for (index, detail) in details.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO transaction_details (
                id, header_id, good_id, line_no,
                quantity, unit_price_cents, subtotal_cents
            ) VALUES (
                ?1, ?2, ?3, ?4,
                ?5, ?6, ?7
            )
            "#,
        )
        .bind(generate_id())
        .bind(header_id)
        .bind(&detail.good_id)
        .bind(index as i64 + 1)
        .bind(detail.quantity)
        .bind(detail.unit_price.cents())
        .bind(detail.subtotal.cents())
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

async fn delete_details(conn: &mut SqliteConnection, header_id: &str) -> DbResult<u64> {
    let result = sqlx::query("DELETE FROM transaction_details WHERE header_id = ?1")
        .bind(header_id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected())
}

async fn fetch_with_details(
    conn: &mut SqliteConnection,
    id: &str,
) -> DbResult<Option<TransactionWithDetails>> {
    let header: Option<HeaderRow> = sqlx::query_as(
        r#"
        SELECT id, date, total_cents
        FROM transaction_headers
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    let Some(header) = header else {
        return Ok(None);
    };

    let details: Vec<DetailRow> = sqlx::query_as(
        r#"
        SELECT id, header_id, good_id, line_no, quantity, unit_price_cents, subtotal_cents
        FROM transaction_details
        WHERE header_id = ?1
        ORDER BY line_no
        "#,
    )
    .bind(id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(Some(TransactionWithDetails {
        header: header.into(),
        details: details.into_iter().map(TransactionDetail::from).collect(),
    }))
}

// =============================================================================
// Unit Tests
// =============================================================================
