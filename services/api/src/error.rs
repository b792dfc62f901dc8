//! Custom error types for the API service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::error::BackendError;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Custom error type for the API service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing, forged or expired session
    #[error("Unauthorized")]
    Unauthorized,

    /// Bad request with message
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Backend error
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Backend(e) if matches!(e.status(), Some(401 | 403)) => {
                warn!("Backend rejected the session token: {}", e);
                (StatusCode::UNAUTHORIZED, "Unauthorized".to_string())
            }
            ApiError::Backend(e) => {
                error!("Backend request failed: {}", e);
                (StatusCode::BAD_GATEWAY, "Backend error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
