//! API Error Types
//!
//! Everything that can go wrong between the console and the REST backend.
//! Authorization failures have their own variant because the client has
//! already acted on them (token cleared, navigation forced) by the time the
//! caller sees one.

use thiserror::Error;

use crate::storage::StorageError;
use crate::validation::ValidationErrors;

/// Message shown when the server gives no usable explanation
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Message shown for a 401 without a body
pub const SESSION_ENDED: &str = "Your session has ended. Please log in again.";

/// Errors surfaced by the HTTP client, auth service and resource controllers
#[derive(Error, Debug)]
pub enum ApiError {
    /// Field checks failed; nothing was sent
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// The server answered 401. The session has already been cleared.
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Non-success response other than 401
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body did not match the expected record shape
    #[error("Unexpected response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Transport timeout
    #[error("Request timeout")]
    Timeout,

    /// Connection or transport failure
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Local persistence failed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configured base URL or a built path is not a valid URL
    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Local file for an upload could not be read
    #[error("Failed to read {path}: {source}")]
    Upload {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ApiError {
    /// Text suitable for a toast or terminal line
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Validation(errors) => errors.to_string(),
            ApiError::Unauthorized { message } if !message.trim().is_empty() => message.clone(),
            ApiError::Unauthorized { .. } => SESSION_ENDED.to_string(),
            ApiError::Status { message, .. } if !message.trim().is_empty() => message.clone(),
            ApiError::Upload { .. } | ApiError::InvalidUrl { .. } => self.to_string(),
            _ => GENERIC_FAILURE.to_string(),
        }
    }

    /// HTTP status, when the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Unauthorized { .. } => Some(401),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    /// Map a transport failure the way the client reports it
    pub(crate) fn from_transport(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Network(e)
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors)
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
