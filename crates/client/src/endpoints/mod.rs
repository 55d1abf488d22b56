//! HTTP plumbing shared by every API method.
//!
//! Responsibilities:
//! - Send requests with bearer token and JSON headers.
//! - Retry rate-limited requests with exponential backoff.
//! - Decode response bodies and turn non-2xx statuses into `ClientError`.
//! - Percent-encode caller-supplied path segments.
//!
//! Does NOT handle:
//! - Token removal on 401 (see `ApiClient`).

mod request;
pub mod url_encoding;

pub use request::{ApiResponse, execute, send_request_with_retry};
pub use url_encoding::encode_path_segment;
