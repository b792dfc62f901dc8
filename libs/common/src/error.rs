//! Custom error types for the common library
//!
//! This module defines the errors raised while talking to the managed
//! backend (PostgREST tables and the GoTrue admin API).

use thiserror::Error;

/// Custom error type for backend operations
#[derive(Error, Debug)]
pub enum BackendError {
    /// The HTTP request could not be sent or its body could not be read
    #[error("Backend request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend answered with a non-success status
    #[error("Backend responded with status {status}: {message}")]
    Status { status: u16, message: String },

    /// The backend answered with a body we could not decode
    #[error("Backend response decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Configuration error
    #[error("Backend configuration error: {0}")]
    Configuration(String),
}

impl BackendError {
    /// HTTP status returned by the backend, if the error came from one
    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Type alias for Result with BackendError
pub type BackendResult<T> = Result<T, BackendError>;
