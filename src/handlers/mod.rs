pub mod redirect;
pub mod url;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::storage::StorageError;

/// Error returned from HTTP handlers.
///
/// Storage sentinels map onto protocol statuses here so handlers never look
/// at engine details.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(&'static str),
    Storage(StorageError),
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        Self::Storage(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.to_owned()),
            ApiError::Storage(StorageError::AliasAlreadyExists { alias, .. }) => (
                StatusCode::CONFLICT,
                format!("alias '{alias}' is already taken"),
            ),
            ApiError::Storage(StorageError::AliasNotFound { alias, .. }) => {
                (StatusCode::NOT_FOUND, format!("alias '{alias}' not found"))
            }
            ApiError::Storage(e) => {
                tracing::error!(op = e.op(), "Storage failure: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_owned())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
