//! Health check endpoint.
//!
//! ```json
//! {"status": "ok", "database": true, "migrations": {"total": 1, "applied": 1}}
//! ```
//!
//! 200 when the database answers and every embedded migration is applied,
//! 503 otherwise.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::warn;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: bool,
    pub migrations: Option<MigrationCounts>,
}

#[derive(Debug, Serialize)]
pub struct MigrationCounts {
    pub total: usize,
    pub applied: usize,
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = state.db.health_check().await;

    let migrations = match state.db.migration_status().await {
        Ok(status) => Some(status),
        Err(e) => {
            warn!(error = %e, "Migration status unavailable");
            None
        }
    };

    let healthy = database && migrations.is_some_and(|m| m.is_current());
    let (code, status) = if healthy {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
    };

    let body = HealthResponse {
        status,
        database,
        migrations: migrations.map(|m| MigrationCounts {
            total: m.total,
            applied: m.applied,
        }),
    };

    (code, Json(body))
}
