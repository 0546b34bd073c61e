//! # Tally POS API Server
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  .env (optional) ──► ApiConfig::load ──► Database::new (migrations)    │
//! │                                              │                          │
//! │                                              ▼                          │
//! │                      AppState ──► router ──► axum::serve               │
//! │                                              │                          │
//! │                       Ctrl+C / SIGTERM ──────┘──► close pool           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::Context;
use tally_api::{router, ApiConfig, AppState};
use tally_db::Database;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "info,tally_api=debug,tally_core=debug,tally_db=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Missing .env is fine; real environment variables win
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_target(true)
        .init();

    info!("Starting Tally POS API server...");

    let config = ApiConfig::load().context("loading configuration")?;
    info!(
        addr = %config.bind_addr(),
        db_path = %config.database_path.display(),
        "Configuration loaded"
    );

    let db = Database::new(config.db_config())
        .await
        .context("opening database")?;

    let app = router(AppState::new(db.clone()));

    let addr = config.bind_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
