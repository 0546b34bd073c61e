//! Transaction endpoints.
//!
//! ## Request Bodies
//! ```json
//! // POST /transactions
//! {"header": {"date": "2024-01-01"},
//!  "detail": [{"good_id": "...", "quantity": 3}]}
//!
//! // PUT /transactions/{id}  (header.date optional)
//! {"detail": [{"good_id": "...", "quantity": 1}]}
//! ```
//!
//! Responses carry the server-computed `total` and `subtotal`s; any such
//! values in a request are ignored.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use tally_core::{CoreError, DetailInput, TransactionHeader, TransactionWithDetails};
use tracing::error;

use super::ApiJson;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    pub header: CreateHeader,
    #[serde(default)]
    pub detail: Vec<DetailInput>,
}

#[derive(Debug, Deserialize)]
pub struct CreateHeader {
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTransactionRequest {
    #[serde(default)]
    pub header: UpdateHeader,
    #[serde(default)]
    pub detail: Vec<DetailInput>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateHeader {
    pub date: Option<NaiveDate>,
}

/// POST /transactions
pub async fn create_transaction(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateTransactionRequest>,
) -> ApiResult<impl IntoResponse> {
    let id = state
        .transactions
        .create_with_details(request.header.date, request.detail)
        .await?;

    let record = state
        .transactions
        .get_by_id(&id)
        .await
        .map_err(|e| match e {
            CoreError::NotFound { .. } => {
                error!(%id, "Created transaction could not be read back");
                ApiError::internal("Created transaction could not be read back")
            }
            other => other.into(),
        })?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /transactions
pub async fn list_transactions(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<TransactionHeader>>> {
    Ok(Json(state.transactions.list().await?))
}

/// GET /transactions/{id}
pub async fn get_transaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<TransactionWithDetails>> {
    Ok(Json(state.transactions.get_by_id(&id).await?))
}

/// PUT /transactions/{id}
pub async fn update_transaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<UpdateTransactionRequest>,
) -> ApiResult<Json<TransactionWithDetails>> {
    let updated = state
        .transactions
        .update_with_details(&id, request.header.date, request.detail)
        .await?;

    Ok(Json(updated))
}

/// DELETE /transactions/{id}
pub async fn delete_transaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.transactions.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
