//! Client builder for constructing [`ApiClient`] instances.
//!
//! This module is responsible for:
//! - Providing a fluent builder API for client configuration
//! - Validating required configuration (`base_url`)
//! - Normalizing the base URL (removing trailing slashes)
//! - Configuring the underlying HTTP client (timeouts, TLS verification)
//!
//! # What this module does NOT handle:
//! - Actual API calls (handled by [`ApiClient`] methods in `mod.rs`)
//! - Token persistence (handled by [`TokenStore`])
//!
//! # Invariants
//! - `base_url` must be provided before calling `build()`
//! - The base URL is always normalized to have no trailing slashes
//! - `skip_verify` only affects HTTPS connections; HTTP connections log a warning

use std::time::Duration;

use crate::client::ApiClient;
use crate::error::{ClientError, Result};
use selfmade_config::{
    Config, TokenStore,
    constants::{DEFAULT_MAX_REDIRECTS, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS},
};

/// Builder for creating a new [`ApiClient`].
///
/// All options have defaults except `base_url`. Without a token store the
/// client starts with no token.
///
/// # Example
///
/// ```rust,ignore
/// use selfmade_client::ApiClient;
/// use selfmade_config::TokenStore;
/// use secrecy::SecretString;
///
/// let client = ApiClient::builder()
///     .base_url("http://localhost:8000".to_string())
///     .token_store(TokenStore::fixed(SecretString::new("my-token".to_string().into())))
///     .timeout(Duration::from_secs(60))
///     .build()?;
/// ```
pub struct ApiClientBuilder {
    base_url: Option<String>,
    tokens: Option<TokenStore>,
    skip_verify: bool,
    timeout: Duration,
    max_retries: usize,
}

impl Default for ApiClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            tokens: None,
            skip_verify: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl ApiClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL of the API server, e.g. `http://localhost:8000`.
    ///
    /// Trailing slashes will be automatically removed.
    pub fn base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set where the bearer token is read from and removed on 401.
    pub fn token_store(mut self, tokens: TokenStore) -> Self {
        self.tokens = Some(tokens);
        self
    }

    /// Set whether to skip TLS certificate verification.
    ///
    /// # Security Warning
    /// Only use this in development or testing environments. Disabling TLS
    /// verification makes the connection vulnerable to man-in-the-middle attacks.
    pub fn skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = skip;
        self
    }

    /// Set the request timeout.
    ///
    /// Default is 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the maximum number of retries for rate-limited requests.
    ///
    /// Default is 3 retries with exponential backoff (1s, 2s, 4s delays).
    pub fn max_retries(mut self, retries: usize) -> Self {
        self.max_retries = retries;
        self
    }

    /// Copy connection settings from a loaded configuration.
    ///
    /// The token store is chosen by the caller since it depends on the
    /// storage backend, see [`ApiClientBuilder::token_store`].
    pub fn from_config(mut self, config: &Config) -> Self {
        self.base_url = Some(config.connection.base_url.clone());
        self.skip_verify = config.connection.skip_verify;
        self.timeout = config.connection.timeout;
        self.max_retries = config.connection.max_retries;
        self
    }

    /// Normalize a base URL by removing trailing slashes.
    ///
    /// This prevents double slashes when concatenating with endpoint paths.
    fn normalize_base_url(url: String) -> String {
        url.trim_end_matches('/').to_string()
    }

    /// Build the [`ApiClient`] with the configured options.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `base_url` was not provided.
    /// Returns `ClientError::HttpError` if the HTTP client fails to build.
    pub fn build(self) -> Result<ApiClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::InvalidUrl("base_url is required".to_string()))?;
        let base_url = Self::normalize_base_url(base_url);

        let mut http_builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(DEFAULT_MAX_REDIRECTS));

        if self.skip_verify {
            let is_https = base_url.starts_with("https://");
            if is_https {
                http_builder = http_builder.danger_accept_invalid_certs(true);
            } else {
                tracing::warn!(
                    "skip_verify=true has no effect on HTTP URLs. TLS verification only applies to HTTPS connections."
                );
            }
        }

        let http = http_builder.build()?;

        Ok(ApiClient {
            http,
            base_url,
            tokens: self.tokens.unwrap_or_else(TokenStore::empty),
            max_retries: self.max_retries,
        })
    }
}
