//! # HTTP Handlers
//!
//! Request/response mapping onto the use cases. Handlers hold no business
//! rules: they extract, delegate and pick a status code.
//!
//! - [`goods`] - `/api/v1/goods`
//! - [`transactions`] - `/api/v1/transactions`
//! - [`health`] - `/health`

pub mod goods;
pub mod health;
pub mod transactions;

use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// `Json<T>` whose rejection is an [`ApiError`] body instead of plain text.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(ApiJson(value))
    }
}
