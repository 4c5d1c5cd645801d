//! Error types and their HTTP rendering.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Key has no current endpoint.
    #[error("No entry: {0}")]
    NotFound(String),

    /// Log query matched nothing for the key.
    #[error("No entry (or logs): {0}")]
    EmptyResult(String),

    /// SQLite failure.
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// Request body could not be read.
    #[error("failed to read request body: {0}")]
    TransportRead(String),

    /// Metadata (de)serialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// JSON error body, `{"message": ...}`
#[derive(Debug, Clone, Serialize)]
pub struct ErrorMessage {
    pub message: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NotFound(_) | Self::EmptyResult(_) => StatusCode::NOT_FOUND,
            Self::TransportRead(_) => StatusCode::BAD_REQUEST,
            Self::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Serialization(err) => {
                tracing::error!(error = %err, "serialization error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // internal detail stays in the log
        let message = if status.is_server_error() {
            "An internal error occurred".to_string()
        } else {
            self.to_string()
        };

        (status, Json(ErrorMessage { message })).into_response()
    }
}
