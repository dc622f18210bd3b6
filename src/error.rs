use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::store::StoreError;

/// Everything a route handler can fail with, mapped onto the wire contract:
/// NotFound -> 404 `{"message"}`, validation -> 400, anything else -> a
/// generic 500 with the detail kept in the log.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("category not found")]
    CategoryNotFound,
    #[error("task not found")]
    TaskNotFound,
    #[error("{0}")]
    Validation(String),
    #[error("internal server error")]
    Internal(#[from] StoreError),
}

impl ApiError {
    pub fn category(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ApiError::CategoryNotFound,
            StoreError::Validation(message) => ApiError::Validation(message),
            other => ApiError::Internal(other),
        }
    }

    pub fn task(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ApiError::TaskNotFound,
            StoreError::Validation(message) => ApiError::Validation(message),
            other => ApiError::Internal(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::CategoryNotFound | ApiError::TaskNotFound => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(err) => {
                error!("store failure: {err}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}

/// Failures of the serve loop itself (state construction, socket bind).
#[derive(Error, Debug)]
pub enum ServeError {
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
