//! Request execution with retry and response decoding.
//!
//! This module sends a single API request, retrying HTTP 429 (Too Many
//! Requests) responses with exponential backoff, and turns the response into
//! an [`ApiResponse`] or a [`ClientError`].

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::Value;
use selfmade_config::constants::DEFAULT_MAX_RETRIES;
use tracing::debug;

use crate::error::{ClientError, Result};

/// Message used when an error body carries neither `detail` nor `message`.
const FALLBACK_ERROR_MESSAGE: &str = "Request failed";

/// Decoded response body.
///
/// Bodies served as `application/json` are parsed; anything else is kept as text.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    Json(Value),
    Text(String),
}

impl ApiResponse {
    /// Deserialize a JSON body into `T`.
    ///
    /// A text body is an [`ClientError::InvalidResponse`].
    pub fn into_json<T: DeserializeOwned>(self) -> Result<T> {
        match self {
            Self::Json(value) => serde_json::from_value(value)
                .map_err(|e| ClientError::InvalidResponse(e.to_string())),
            Self::Text(text) => Err(ClientError::InvalidResponse(format!(
                "expected a JSON body, got text: {}",
                preview(&text)
            ))),
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Json(_) => None,
        }
    }

    fn into_value(self) -> Value {
        match self {
            Self::Json(value) => value,
            Self::Text(text) => Value::String(text),
        }
    }
}

fn preview(text: &str) -> String {
    const LIMIT: usize = 120;
    match text.char_indices().nth(LIMIT) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

/// Sends an HTTP request with automatic retry logic for HTTP 429 responses.
///
/// - Implements exponential backoff (1s, 2s, 4s = 2^attempt)
/// - Respects the `max_retries` parameter (defaults to 3 if 0)
/// - Logs retry attempts with `tracing::debug`
/// - Returns `MaxRetriesExceeded` when retries are exhausted
///
/// Responses with any other status, successful or not, are returned as-is.
pub async fn send_request_with_retry(
    builder: RequestBuilder,
    max_retries: usize,
) -> Result<Response> {
    let max_retries = if max_retries == 0 {
        DEFAULT_MAX_RETRIES
    } else {
        max_retries
    };

    for attempt in 0..=max_retries {
        let attempt_builder = match builder.try_clone() {
            Some(cloned) => cloned,
            None => {
                if attempt == 0 {
                    debug!("Request builder cannot be cloned, single attempt only");
                    return builder.send().await.map_err(classify_transport_error);
                } else {
                    debug!("Cannot clone request builder for retry");
                    return Err(ClientError::MaxRetriesExceeded(attempt));
                }
            }
        };

        match attempt_builder.send().await {
            Ok(response) if response.status().as_u16() == 429 => {
                if attempt < max_retries {
                    let backoff_secs = 2u64.pow(attempt as u32);
                    debug!(
                        attempt = attempt + 1,
                        max_retries = max_retries + 1,
                        backoff_secs = backoff_secs,
                        "Rate limited (HTTP 429), retrying with exponential backoff"
                    );

                    tokio::time::sleep(tokio::time::Duration::from_secs(backoff_secs)).await;
                } else {
                    debug!(
                        attempts = attempt + 1,
                        "Max retries exhausted for rate-limited request"
                    );
                    return Err(ClientError::MaxRetriesExceeded(max_retries + 1));
                }
            }
            Ok(response) => {
                if attempt > 0 {
                    debug!(attempt = attempt + 1, "Request succeeded after retry");
                }
                return Ok(response);
            }
            Err(e) => return Err(classify_transport_error(e)),
        }
    }

    Err(ClientError::MaxRetriesExceeded(max_retries + 1))
}

fn classify_transport_error(e: reqwest::Error) -> ClientError {
    let url = e.url().map(|u| u.to_string()).unwrap_or_default();
    if e.is_timeout() {
        ClientError::Timeout(url)
    } else if e.is_connect() {
        ClientError::ConnectionRefused(url)
    } else {
        ClientError::HttpError(e)
    }
}

/// Execute one API request.
///
/// Every request carries `Content-Type: application/json`; `Authorization:
/// Bearer <token>` is added when a token is supplied. `body` is only sent for
/// methods that take one.
pub async fn execute(
    client: &Client,
    base_url: &str,
    token: Option<&SecretString>,
    method: Method,
    endpoint: &str,
    body: Option<&Value>,
    max_retries: usize,
) -> Result<ApiResponse> {
    let url = format!("{}{}", base_url, endpoint);
    debug!(method = %method, url = %url, "Sending API request");

    let mut builder = client
        .request(method, &url)
        .header(CONTENT_TYPE, "application/json");

    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {}", token.expose_secret()));
    }

    if let Some(body) = body {
        let encoded =
            serde_json::to_vec(body).map_err(|e| ClientError::InvalidRequest(e.to_string()))?;
        builder = builder.body(encoded);
    }

    let response = send_request_with_retry(builder, max_retries).await?;
    handle_response(response).await
}

/// Decode a response and map non-2xx statuses to [`ClientError::ApiError`].
async fn handle_response(response: Response) -> Result<ApiResponse> {
    let status = response.status();
    let url = response.url().to_string();
    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .is_some_and(|ct| ct.contains("application/json"));

    let text = response.text().await.map_err(classify_transport_error)?;

    let body = if is_json {
        if text.trim().is_empty() {
            ApiResponse::Json(Value::Null)
        } else {
            match serde_json::from_str(&text) {
                Ok(value) => ApiResponse::Json(value),
                Err(e) if status.is_success() => {
                    return Err(ClientError::InvalidResponse(e.to_string()));
                }
                Err(_) => ApiResponse::Text(text),
            }
        }
    } else {
        ApiResponse::Text(text)
    };

    if status.is_success() {
        return Ok(body);
    }

    let message = error_message(&body);
    debug!(status = status.as_u16(), url = %url, message = %message, "API request failed");

    Err(ClientError::ApiError {
        status: status.as_u16(),
        url,
        message,
        data: Some(body.into_value()),
    })
}

/// Pick the error message from a response body: `detail`, then `message`,
/// then a generic fallback.
pub(crate) fn error_message(body: &ApiResponse) -> String {
    let Some(Value::Object(map)) = body.as_json() else {
        return FALLBACK_ERROR_MESSAGE.to_string();
    };

    ["detail", "message"]
        .iter()
        .filter_map(|key| map.get(*key))
        .find_map(describe)
        .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string())
}

fn describe(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        // Validation errors arrive as a list of `{loc, msg, type}` objects.
        Value::Array(items) if !items.is_empty() => Some(
            items
                .iter()
                .map(|item| match item.get("msg").and_then(Value::as_str) {
                    Some(msg) => msg.to_string(),
                    None => item.to_string(),
                })
                .collect::<Vec<_>>()
                .join("; "),
        ),
        Value::Array(_) => None,
        other => Some(other.to_string()),
    }
}
