use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use carenav_checklists::ChecklistError;
use carenav_core::error::CoreError;
use carenav_storage::error::StorageError;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    PreconditionFailed(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::PreconditionFailed(msg) => (StatusCode::PRECONDITION_FAILED, msg),
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<ChecklistError> for ApiError {
    fn from(e: ChecklistError) -> Self {
        match &e {
            ChecklistError::UnknownChecklist(_) | ChecklistError::UnknownField { .. } => {
                ApiError::NotFound(e.to_string())
            }
            ChecklistError::ValueMismatch { .. } | ChecklistError::NotInteractive { .. } => {
                ApiError::BadRequest(e.to_string())
            }
            _ => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        match e {
            err @ StorageError::PreconditionFailed { .. } => {
                ApiError::PreconditionFailed(err.to_string())
            }
            StorageError::Core(CoreError::InvalidChecklistId(id)) => {
                ApiError::BadRequest(format!("invalid checklist id: {id}"))
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}
