//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map client, login and validation errors to exit codes.
//! - Carry server-side soft failures (`{"error": ...}` in a 200 body) as errors.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//! - Signal handling (see `cancellation` for Ctrl+C).
//!
//! Invariants:
//! - Exit codes 1-8 are reserved for specific error categories.
//! - Exit code 130 is reserved for SIGINT (Unix standard: 128 + SIGINT).

use selfmade_client::{ClientError, LoginRedirect};
use selfmade_config::{ConfigError, InvalidThemeError};
use thiserror::Error;

/// Structured exit codes for `selfmade`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Command completed successfully.
    Success = 0,

    /// Unhandled or generic failure, including soft failures reported by the server.
    GeneralError = 1,

    /// No token stored, or the server rejected it.
    ///
    /// Scripts should run `selfmade auth login` again.
    AuthenticationFailed = 2,

    /// Network, timeout, or DNS failure.
    ConnectionError = 3,

    /// Lab, service, notification or user not found.
    NotFound = 4,

    /// Invalid arguments or configuration.
    ValidationError = 5,

    /// Insufficient privileges, e.g. a non-admin calling admin endpoints.
    PermissionDenied = 6,

    /// HTTP 429 after retries were exhausted.
    RateLimited = 7,

    /// HTTP 502/503/504.
    ServiceUnavailable = 8,

    /// SIGINT/Ctrl+C.
    Interrupted = 130,
}

impl ExitCode {
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }

    /// Returns true if this exit code indicates a retryable condition.
    #[allow(dead_code)]
    pub const fn is_retryable(self) -> bool {
        matches!(
            self,
            ExitCode::ConnectionError | ExitCode::RateLimited | ExitCode::ServiceUnavailable
        )
    }
}

impl From<&ClientError> for ExitCode {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::SessionExpired { .. } => ExitCode::AuthenticationFailed,
            ClientError::ApiError { status: 401, .. } => ExitCode::AuthenticationFailed,

            ClientError::ConnectionRefused(_)
            | ClientError::Timeout(_)
            | ClientError::InvalidUrl(_) => ExitCode::ConnectionError,

            ClientError::ApiError { status: 404, .. } => ExitCode::NotFound,

            ClientError::InvalidRequest(_)
            | ClientError::InvalidResponse(_)
            | ClientError::ApiError {
                status: 400 | 422, ..
            } => ExitCode::ValidationError,

            ClientError::ApiError { status: 403, .. } => ExitCode::PermissionDenied,

            // Retries only happen on 429, so exhausting them means rate limited
            ClientError::MaxRetriesExceeded(_) => ExitCode::RateLimited,
            ClientError::ApiError { status: 429, .. } => ExitCode::RateLimited,

            ClientError::ApiError {
                status: 502..=504, ..
            } => ExitCode::ServiceUnavailable,

            ClientError::HttpError(e) => {
                if e.is_connect() || e.is_timeout() {
                    ExitCode::ConnectionError
                } else {
                    ExitCode::GeneralError
                }
            }

            ClientError::ApiError { .. } | ClientError::Store(_) => ExitCode::GeneralError,
        }
    }
}

/// The server answered 200 but reported a failure in the body.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ServerRejected(pub String);

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Returns ExitCode::GeneralError if no known error is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(client_err) = cause.downcast_ref::<ClientError>() {
                return ExitCode::from(client_err);
            }
            if cause.is::<LoginRedirect>() {
                return ExitCode::AuthenticationFailed;
            }
            if cause.is::<ConfigError>() || cause.is::<InvalidThemeError>() {
                return ExitCode::ValidationError;
            }
        }

        ExitCode::GeneralError
    }
}
