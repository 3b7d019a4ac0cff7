//! API error types with HTTP response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Failures while loading the metrics document from disk.
#[derive(Debug, Error)]
pub enum MetricsFileError {
    /// Nothing exists at the configured path.
    #[error("metrics file not found")]
    NotFound,

    /// The file exists but could not be read.
    #[error("{0}")]
    Read(#[from] std::io::Error),

    /// The file was read but is not valid JSON.
    #[error("{0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for metrics file operations.
pub type Result<T> = std::result::Result<T, MetricsFileError>;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Internal server error, optionally carrying the underlying cause.
    Internal {
        message: String,
        details: Option<String>,
    },
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::NotFound(error) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    error,
                    details: None,
                },
            ),
            ApiError::Internal { message, details } => {
                tracing::error!(error = %message, details = ?details, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        error: message,
                        details,
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<MetricsFileError> for ApiError {
    fn from(err: MetricsFileError) -> Self {
        match err {
            MetricsFileError::NotFound => ApiError::NotFound("Metrics file not found".to_string()),
            MetricsFileError::Read(_) | MetricsFileError::Parse(_) => ApiError::Internal {
                message: "Error reading metrics".to_string(),
                details: Some(err.to_string()),
            },
        }
    }
}
