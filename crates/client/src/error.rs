//! Error types for the Selfmade API client.

use selfmade_config::StoreError;
use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during Selfmade client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Non-2xx response other than 401.
    #[error("API error ({status}) at {url}: {message}")]
    ApiError {
        status: u16,
        url: String,
        message: String,
        /// Parsed response body (JSON value, or the raw text as a string).
        data: Option<serde_json::Value>,
    },

    /// The server rejected the stored token. The token has been removed.
    #[error("Session expired, sign in again at {redirect}")]
    SessionExpired { redirect: String },

    /// The response body did not match the expected shape.
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// The request body could not be encoded.
    #[error("Invalid request body: {0}")]
    InvalidRequest(String),

    /// Request timed out.
    #[error("Request to {0} timed out")]
    Timeout(String),

    /// Connection refused or unreachable host.
    #[error("Connection refused to {0}")]
    ConnectionRefused(String),

    /// Maximum retries exceeded.
    #[error("Maximum retries exceeded ({0} attempts)")]
    MaxRetriesExceeded(usize),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Token storage failed.
    #[error("Token storage error: {0}")]
    Store(#[from] StoreError),
}

impl ClientError {
    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::HttpError(_) | Self::Timeout(_) | Self::MaxRetriesExceeded(_) => true,
            Self::ApiError { status, .. } => Self::is_retryable_status(*status),
            _ => false,
        }
    }

    /// Check if an HTTP status code is retryable.
    ///
    /// Retryable status codes:
    /// - 429: Too Many Requests (rate limiting)
    /// - 502: Bad Gateway (transient server error)
    /// - 503: Service Unavailable (transient server error)
    /// - 504: Gateway Timeout (transient server error)
    pub fn is_retryable_status(status: u16) -> bool {
        matches!(status, 429 | 502 | 503 | 504)
    }

    /// Check if this error indicates authentication failure.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::SessionExpired { .. })
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            Self::SessionExpired { .. } => Some(401),
            Self::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Where the user should be sent to sign in again.
    pub fn login_redirect(&self) -> Option<&str> {
        match self {
            Self::SessionExpired { redirect } => Some(redirect),
            _ => None,
        }
    }
}
