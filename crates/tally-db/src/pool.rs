//! # Connection Pool
//!
//! Opens SQLite, applies migrations and hands out repositories that share
//! one `SqlitePool`.
//!
//! ```text
//! DbConfig ──► Database::new ──► SqlitePool ──┬──► SqliteGoodRepository
//!   (file | :memory:)   │                     └──► SqliteTransactionRepository
//!                       └──► migrations::run_migrations
//! ```
//!
//! File databases run in WAL mode with `synchronous = NORMAL`. Every
//! connection has foreign keys switched on (SQLite defaults to off).
//!
//! An in-memory database exists only as long as the connection that created
//! it, so it always gets a pool of exactly one connection that never idles
//! out or expires, whatever the config says.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations::{self, MigrationStatus};
use crate::repository::{SqliteGoodRepository, SqliteTransactionRepository};

/// Path value that selects a private in-memory database.
const MEMORY_PATH: &str = ":memory:";

/// Connections are recycled after this long.
const MAX_CONNECTION_LIFETIME: Duration = Duration::from_secs(30 * 60);

/// Where the database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    File(PathBuf),
    Memory,
}

impl From<PathBuf> for Location {
    fn from(path: PathBuf) -> Self {
        if path.as_os_str() == MEMORY_PATH {
            Location::Memory
        } else {
            Location::File(path)
        }
    }
}

// =============================================================================
// DbConfig
// =============================================================================

/// Pool settings.
///
/// ```rust,ignore
/// let config = DbConfig::new("./data/tally.db")
///     .max_connections(8)
///     .connect_timeout(Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub location: Location,
    pub max_connections: u32,
    pub min_connections: u32,
    /// How long `acquire` waits for a free connection.
    pub connect_timeout: Duration,
    pub idle_timeout: Option<Duration>,
    pub run_migrations: bool,
}

impl DbConfig {
    /// File-backed config; `":memory:"` selects [`Location::Memory`].
    ///
    /// The file and its parent directory are created on first connect.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            location: Location::from(path.into()),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Some(Duration::from_secs(600)),
            run_migrations: true,
        }
    }

    /// Private, migrated in-memory database. Used by tests.
    pub fn in_memory() -> Self {
        DbConfig::new(MEMORY_PATH).connect_timeout(Duration::from_secs(5))
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    pub fn is_in_memory(&self) -> bool {
        self.location == Location::Memory
    }

    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        let path = match &self.location {
            Location::Memory => {
                return Ok(SqliteConnectOptions::from_str("sqlite::memory:")
                    .map_err(DbError::unavailable)?
                    .foreign_keys(true));
            }
            Location::File(path) => path,
        };

        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .map_err(|e| DbError::unavailable(format!("{}: {}", dir.display(), e)))?;
        }

        Ok(SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true))
    }

    fn pool_options(&self) -> SqlitePoolOptions {
        let options = SqlitePoolOptions::new().acquire_timeout(self.connect_timeout);

        match self.location {
            Location::Memory => options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>),
            Location::File(_) => options
                .max_connections(self.max_connections)
                .min_connections(self.min_connections)
                .idle_timeout(self.idle_timeout)
                .max_lifetime(MAX_CONNECTION_LIFETIME),
        }
    }
}

// =============================================================================
// Database
// =============================================================================

/// Shared handle to the pool. Clones share the same connections.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the pool and, unless disabled, brings the schema up to date.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(location = ?config.location, "Opening database");

        let pool = config
            .pool_options()
            .connect_with(config.connect_options()?)
            .await
            .map_err(DbError::unavailable)?;

        debug!(size = pool.size(), "Pool ready");

        let db = Database { pool };
        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Idempotent.
    pub async fn run_migrations(&self) -> DbResult<()> {
        migrations::run_migrations(&self.pool).await
    }

    pub async fn migration_status(&self) -> DbResult<MigrationStatus> {
        migrations::migration_status(&self.pool).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn goods(&self) -> SqliteGoodRepository {
        SqliteGoodRepository::new(self.pool.clone())
    }

    pub fn transactions(&self) -> SqliteTransactionRepository {
        SqliteTransactionRepository::new(self.pool.clone())
    }

    /// Waits for checked-out connections to return, then closes them.
    /// Every later query fails.
    pub async fn close(&self) {
        info!("Closing database pool");
        self.pool.close().await;
    }

    /// True when a trivial query round-trips.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}
