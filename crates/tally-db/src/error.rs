//! # Storage Errors
//!
//! What can go wrong between a repository method and SQLite, and how it is
//! narrowed before crossing into tally-core.
//!
//! ```text
//! sqlx::Error / MigrateError
//!        │  From (classified by DatabaseError::kind)
//!        ▼
//!    DbError ──► logs, tests, the seed binary
//!        │  From
//!        ▼
//!   StoreError (tally-core) ──► CoreError ──► ApiError
//! ```

use std::fmt;

use sqlx::error::ErrorKind;
use tally_core::StoreError;
use thiserror::Error;

/// Which step of an SQL transaction failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxStage {
    Begin,
    Commit,
}

impl fmt::Display for TxStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxStage::Begin => f.write_str("begin"),
            TxStage::Commit => f.write_str("commit"),
        }
    }
}

#[derive(Debug, Error)]
pub enum DbError {
    /// A keyed `UPDATE`/`DELETE` touched no row.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// `UNIQUE constraint failed: <table>.<column>`; `column` keeps the
    /// `table.column` text SQLite reports.
    #[error("Duplicate value for {column}")]
    Duplicate { column: String },

    /// CHECK, NOT NULL or FOREIGN KEY rejected the write.
    #[error("Constraint rejected write: {0}")]
    Constraint(String),

    /// The file could not be opened, or the pool is closed or saturated.
    #[error("Database unavailable: {0}")]
    Unavailable(String),

    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Transaction {stage} failed: {source}")]
    Transaction {
        stage: TxStage,
        #[source]
        source: sqlx::Error,
    },

    /// Anything else sqlx reports: malformed SQL, row decoding, driver I/O.
    #[error("Query failed: {0}")]
    Query(#[source] sqlx::Error),
}

impl DbError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn begin(source: sqlx::Error) -> Self {
        DbError::Transaction {
            stage: TxStage::Begin,
            source,
        }
    }

    pub fn commit(source: sqlx::Error) -> Self {
        DbError::Transaction {
            stage: TxStage::Commit,
            source,
        }
    }

    pub fn unavailable(reason: impl fmt::Display) -> Self {
        DbError::Unavailable(reason.to_string())
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => match db_err.kind() {
                ErrorKind::UniqueViolation => {
                    let message = db_err.message();
                    let column = message
                        .strip_prefix("UNIQUE constraint failed: ")
                        .unwrap_or(message);
                    DbError::Duplicate {
                        column: column.to_string(),
                    }
                }
                ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation => DbError::Constraint(db_err.message().to_string()),
                _ => DbError::Query(sqlx::Error::Database(db_err)),
            },
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => DbError::unavailable(err),
            other => DbError::Query(other),
        }
    }
}

/// ```text
/// NotFound     → StoreError::NotFound
/// Duplicate    → StoreError::UniqueViolation
/// Unavailable  → StoreError::Unavailable
/// the rest     → StoreError::Failed
/// ```
impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => StoreError::NotFound {
                entity: entity.to_string(),
                id,
            },
            DbError::Duplicate { column } => StoreError::UniqueViolation { field: column },
            DbError::Unavailable(reason) => StoreError::Unavailable(reason),
            other => StoreError::Failed(other.to_string()),
        }
    }
}

pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_keeps_entity_and_id() {
        let store: StoreError = DbError::not_found("Good", "g-1").into();
        match store {
            StoreError::NotFound { entity, id } => {
                assert_eq!(entity, "Good");
                assert_eq!(id, "g-1");
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_closed_or_saturated_pool_is_unavailable() {
        assert!(matches!(
            StoreError::from(DbError::from(sqlx::Error::PoolTimedOut)),
            StoreError::Unavailable(_)
        ));
        assert!(matches!(
            StoreError::from(DbError::from(sqlx::Error::PoolClosed)),
            StoreError::Unavailable(_)
        ));
    }

    #[test]
    fn test_commit_failure_is_failed_and_names_stage() {
        let err = DbError::commit(sqlx::Error::PoolClosed);
        assert!(err.to_string().starts_with("Transaction commit failed"));
        assert!(matches!(StoreError::from(err), StoreError::Failed(_)));
    }
}
