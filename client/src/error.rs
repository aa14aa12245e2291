//! Error type shared by every backend and AI-service call.

use common::format_validation_errors;
use validator::ValidationErrors;

/// Everything a remote call can fail with.
///
/// Callers are expected to surface these as notices and fall back to the
/// state they had before the call; none of them is fatal.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, connect, timeout).
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// No token, or the server rejected it.
    #[error("not authenticated")]
    Unauthorized,

    /// The body did not have the shape we expected.
    #[error("unexpected response: {0}")]
    Malformed(String),

    /// Input rejected locally; nothing was sent.
    #[error("{0}")]
    Validation(String),

    /// The owning view went away before the call finished.
    #[error("request cancelled")]
    Cancelled,

    #[error("session storage: {0}")]
    Storage(#[from] std::io::Error),
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(format_validation_errors(&errors))
    }
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Unauthorized => Some(401),
            _ => None,
        }
    }
}
