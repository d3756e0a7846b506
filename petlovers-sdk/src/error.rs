//! SDK error types and handling
//!
//! This module maps transport failures and non-success responses into
//! [`SdkError`], and folds those into the listing loop's [`FetchError`].

use petlovers_core::error::FetchError;
use thiserror::Error;

/// The main error type for the SDK
#[derive(Error, Debug)]
pub enum SdkError {
    /// API returned an error response
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Network or connection error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// Request timed out
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Rate limit exceeded
    #[error("Rate limit exceeded. Retry after {retry_after} seconds")]
    RateLimited { retry_after: u64 },

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    /// Authorization failed
    #[error("Access denied: {0}")]
    AuthorizationError(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// Server error
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },
}

/// Result type alias for SDK operations
pub type SdkResult<T> = Result<T, SdkError>;

/// Error body the backend sends alongside non-success statuses
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorResponse {
    pub message: String,
    #[serde(default)]
    pub error: Option<String>,
}

impl SdkError {
    /// Create an error from a non-success status and its body
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ApiErrorResponse>(body)
            .map(|response| response.message)
            .unwrap_or_else(|_| body.trim().to_string());

        match status {
            401 => SdkError::AuthenticationError(message),
            403 => SdkError::AuthorizationError(message),
            404 => SdkError::NotFound(message),
            429 => SdkError::RateLimited { retry_after: 60 },
            500..=599 => SdkError::ServerError { status, message },
            _ => SdkError::ApiError { status, message },
        }
    }

    /// Check if the error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SdkError::NetworkError(_)
                | SdkError::Timeout(_)
                | SdkError::RateLimited { .. }
                | SdkError::ServerError { .. }
        )
    }

    /// Get the HTTP status code if available
    pub fn status_code(&self) -> Option<u16> {
        match self {
            SdkError::ApiError { status, .. } => Some(*status),
            SdkError::ServerError { status, .. } => Some(*status),
            SdkError::RateLimited { .. } => Some(429),
            SdkError::AuthenticationError(_) => Some(401),
            SdkError::AuthorizationError(_) => Some(403),
            SdkError::NotFound(_) => Some(404),
            _ => None,
        }
    }
}

impl From<SdkError> for FetchError {
    fn from(error: SdkError) -> Self {
        match error.status_code() {
            Some(status) => FetchError::Server {
                status,
                message: error.to_string(),
            },
            None => FetchError::Transport(error.to_string()),
        }
    }
}
