//! API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. A `.env` file, when present, is loaded into the environment by
//! `main` before this runs.
//!
//! | Variable                  | Default            |
//! |---------------------------|--------------------|
//! | `API_HOST`                | `0.0.0.0`          |
//! | `API_PORT`                | `8080`             |
//! | `DATABASE_PATH`           | `./data/tally.db`  |
//! | `DB_MAX_CONNECTIONS`      | `5`                |
//! | `DB_MIN_CONNECTIONS`      | `1`                |
//! | `DB_CONNECT_TIMEOUT_SECS` | `30`               |
//! | `RUN_MIGRATIONS`          | `true`             |

use serde::{Deserialize, Serialize};
use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tally_db::DbConfig;

/// API server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Interface to bind
    pub host: IpAddr,

    /// HTTP port
    pub port: u16,

    /// SQLite database file (or `:memory:`)
    pub database_path: PathBuf,

    /// Pool upper bound
    pub db_max_connections: u32,

    /// Connections kept open
    pub db_min_connections: u32,

    /// Pool acquire timeout in seconds
    pub db_connect_timeout_secs: u64,

    /// Apply pending migrations on startup
    pub run_migrations: bool,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = ApiConfig {
            host: parse_or(&lookup, "API_HOST", "0.0.0.0")?,
            port: parse_or(&lookup, "API_PORT", "8080")?,
            database_path: PathBuf::from(
                lookup("DATABASE_PATH").unwrap_or_else(|| "./data/tally.db".to_string()),
            ),
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", "5")?,
            db_min_connections: parse_or(&lookup, "DB_MIN_CONNECTIONS", "1")?,
            db_connect_timeout_secs: parse_or(&lookup, "DB_CONNECT_TIMEOUT_SECS", "30")?,
            run_migrations: parse_or(&lookup, "RUN_MIGRATIONS", "true")?,
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()));
        }
        if config.db_min_connections > config.db_max_connections {
            return Err(ConfigError::InvalidValue("DB_MIN_CONNECTIONS".to_string()));
        }

        Ok(config)
    }

    /// Socket address the server listens on.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Database configuration derived from this config.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(self.database_path.clone())
            .max_connections(self.db_max_connections)
            .min_connections(self.db_min_connections)
            .connect_timeout(Duration::from_secs(self.db_connect_timeout_secs))
            .run_migrations(self.run_migrations)
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .unwrap_or_else(|| default.to_string())
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(key.to_string()))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = from_pairs(&[]).unwrap();

        assert_eq!(config.bind_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.database_path, PathBuf::from("./data/tally.db"));
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.db_min_connections, 1);
        assert_eq!(config.db_connect_timeout_secs, 30);
        assert!(config.run_migrations);
    }

    #[test]
    fn test_overrides() {
        let config = from_pairs(&[
            ("API_HOST", "127.0.0.1"),
            ("API_PORT", "9000"),
            ("DATABASE_PATH", ":memory:"),
            ("RUN_MIGRATIONS", "false"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr().to_string(), "127.0.0.1:9000");
        assert!(!config.run_migrations);

        let db = config.db_config();
        assert!(db.is_in_memory());
        assert!(!db.run_migrations);
    }

    #[test]
    fn test_invalid_port() {
        let err = from_pairs(&[("API_PORT", "eighty")]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for API_PORT");
    }

    #[test]
    fn test_min_above_max_is_rejected() {
        let err = from_pairs(&[("DB_MAX_CONNECTIONS", "2"), ("DB_MIN_CONNECTIONS", "3")])
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(key) if key == "DB_MIN_CONNECTIONS"));
    }
}
