//! # Schema Migrations
//!
//! The files under `migrations/sqlite/` are compiled into the binary and
//! applied in filename order, each inside its own transaction; sqlx records
//! what ran in `_sqlx_migrations`.
//!
//! ```text
//! migrations/sqlite/
//! └── 001_initial_schema.sql   goods, transaction_headers, transaction_details
//! ```
//!
//! Schema changes go into a new `NNN_description.sql`. An applied file is
//! checksummed, so editing it breaks every existing database.

use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::error::DbResult;

/// Embedded migrations from the workspace `migrations/sqlite` directory.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Embedded vs. applied migration counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationStatus {
    pub total: usize,
    pub applied: usize,
}

impl MigrationStatus {
    /// True when every embedded migration has been applied.
    pub fn is_current(&self) -> bool {
        self.applied >= self.total
    }
}

/// Runs all pending database migrations.
///
/// Idempotent; each migration runs in its own transaction, in filename order.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    info!("Checking for pending migrations");

    MIGRATOR.run(pool).await?;

    info!("All migrations applied successfully");
    Ok(())
}

/// Returns migration counts for diagnostics and health checks.
///
/// A database that was never migrated has no `_sqlx_migrations` table; that
/// reports zero applied rather than an error.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<MigrationStatus> {
    let total = MIGRATOR.migrations.len();

    let applied: i64 = match sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await
    {
        Ok(count) => count,
        Err(e) => {
            warn!(error = %e, "Could not read migration table");
            0
        }
    };

    Ok(MigrationStatus {
        total,
        applied: applied as usize,
    })
}
