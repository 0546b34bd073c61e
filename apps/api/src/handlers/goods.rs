//! Goods endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use tally_core::{Good, GoodUpdate, NewGood};

use super::ApiJson;
use crate::error::ApiResult;
use crate::AppState;

/// POST /goods
pub async fn create_good(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewGood>,
) -> ApiResult<impl IntoResponse> {
    let good = state.goods.create(input).await?;
    Ok((StatusCode::CREATED, Json(good)))
}

/// GET /goods
pub async fn list_goods(State(state): State<AppState>) -> ApiResult<Json<Vec<Good>>> {
    Ok(Json(state.goods.list().await?))
}

/// GET /goods/{id}
pub async fn get_good(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Good>> {
    Ok(Json(state.goods.get_by_id(&id).await?))
}

/// GET /goods/by-name/{name}
pub async fn get_good_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<Good>> {
    Ok(Json(state.goods.get_by_name(&name).await?))
}

/// PUT /goods/{id}
///
/// Omitted fields keep their stored values.
pub async fn update_good(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(update): ApiJson<GoodUpdate>,
) -> ApiResult<Json<Good>> {
    Ok(Json(state.goods.update(&id, update).await?))
}

/// DELETE /goods/{id}
pub async fn delete_good(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.goods.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
