//! # HTTP Errors
//!
//! Every failing handler answers with the same JSON body and a status
//! picked from its code.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Tally POS                              │
//! │                                                                         │
//! │  Handler → Result<T, ApiError>                                         │
//! │                                                                         │
//! │  JsonRejection ───────────────────────► VALIDATION_ERROR  400          │
//! │  CoreError::Validation ───────────────► VALIDATION_ERROR  400          │
//! │  CoreError::NotFound ─────────────────► NOT_FOUND         404          │
//! │  CoreError::Conflict ─────────────────► CONFLICT          409          │
//! │  CoreError::Persistence ── logged ────► DATABASE_ERROR    500          │
//! │  anything unexpected ──── logged ────► INTERNAL          500          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Response Body
//! ```json
//! {
//!   "code": "NOT_FOUND",
//!   "message": "Good not found: 5f0c..."
//! }
//! ```

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tally_core::CoreError;

/// Error body returned by every handler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,

    /// Safe to show to an operator; never carries SQL or driver text.
    pub message: String,
}

/// Serialized as `VALIDATION_ERROR`, `NOT_FOUND`, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// 400
    ValidationError,

    /// 404
    NotFound,

    /// 409, a good name already in use
    Conflict,

    /// 500, storage failed
    DatabaseError,

    /// 500, a broken invariant inside the server
    Internal,
}

impl ErrorCode {
    /// HTTP status for this code.
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::DatabaseError | ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
            e @ CoreError::NotFound { .. } => ApiError::new(ErrorCode::NotFound, e.to_string()),
            e @ CoreError::Conflict { .. } => ApiError::new(ErrorCode::Conflict, e.to_string()),
            CoreError::Persistence(e) => {
                tracing::error!(error = %e, "Persistence failure");
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Malformed JSON, wrong content type, unparseable dates or money.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::{StoreError, ValidationError};

    #[test]
    fn test_core_errors_map_to_status_codes() {
        let cases = [
            (
                CoreError::Validation(ValidationError::Required {
                    field: "name".to_string(),
                }),
                StatusCode::BAD_REQUEST,
            ),
            (CoreError::good_not_found("g-1"), StatusCode::NOT_FOUND),
            (CoreError::duplicate_good_name("Widget"), StatusCode::CONFLICT),
            (
                CoreError::Persistence(StoreError::Failed("disk full".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (core, status) in cases {
            assert_eq!(ApiError::from(core).code.status(), status);
        }
    }

    #[test]
    fn test_persistence_details_are_not_exposed() {
        let err = ApiError::from(CoreError::Persistence(StoreError::Failed(
            "UNIQUE constraint failed: secret_table.col".to_string(),
        )));

        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(!err.message.contains("secret_table"));
    }

    #[test]
    fn test_error_code_wire_format() {
        let json = serde_json::to_value(ApiError::validation("name is required")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"code": "VALIDATION_ERROR", "message": "name is required"})
        );
    }
}
