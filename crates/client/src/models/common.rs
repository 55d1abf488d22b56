//! Shapes shared by several endpoints.

use serde::{Deserialize, Serialize};

/// Empty JSON object, the default body for `POST` and `PUT`.
#[derive(Debug, Default, Clone, Copy, Serialize)]
pub struct Empty {}

/// `{"message": ...}` acknowledgement.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// Responses that can report a failure inside a 2xx body.
///
/// Lab and service operations answer `200 {"error": ..., "details": ...}`
/// instead of an error status.
pub trait SoftFailure {
    fn error(&self) -> Option<&str>;

    fn details(&self) -> Option<&str> {
        None
    }

    /// Human-readable failure, `None` when the operation succeeded.
    fn failure(&self) -> Option<String> {
        self.error().map(|error| match self.details() {
            Some(details) => format!("{error}: {details}"),
            None => error.to_string(),
        })
    }
}
