//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` for hierarchical configuration merging.
//! - Build the final `Config` from builder values, environment variables and defaults.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//! - Persisting tokens or preferences (see persistence module).
//!
//! Invariants / Assumptions:
//! - Builder methods take precedence over environment variables, regardless of call order.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

use secrecy::SecretString;
use std::path::PathBuf;
use std::time::Duration;

use super::env::apply_env;
use super::error::ConfigError;
use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_KEYRING_ACCOUNT, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS,
    MAX_MAX_RETRIES, MAX_TIMEOUT_SECS,
};
use crate::types::{Config, ConnectionConfig, TokenStorage};

/// Configuration loader that builds config from builder values and environment variables.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    pub(super) base_url: Option<String>,
    pub(super) token: Option<SecretString>,
    pub(super) skip_verify: Option<bool>,
    pub(super) timeout: Option<Duration>,
    pub(super) max_retries: Option<usize>,
    pub(super) store_path: Option<PathBuf>,
    pub(super) use_keyring: Option<bool>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var("DOTENV_DISABLED").ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` is set to "true" or "1", the .env file is not loaded.
    /// Missing `.env` files are silently ignored.
    ///
    /// SAFETY: Error messages never include raw .env line contents to prevent secret leakage.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Read configuration from environment variables.
    ///
    /// Only fills values that were not already set through builder methods.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    /// Set the API base URL.
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set an explicit bearer token.
    pub fn with_token(mut self, token: String) -> Self {
        self.token = Some(SecretString::new(token.into()));
        self
    }

    /// Set whether to skip TLS verification.
    pub fn with_skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = Some(skip);
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the maximum number of retries.
    pub fn with_max_retries(mut self, retries: usize) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// Override the local store file location.
    pub fn with_store_path(mut self, path: PathBuf) -> Self {
        self.store_path = Some(path);
        self
    }

    /// Keep the token in the OS keyring instead of the local store.
    pub fn with_keyring(mut self, enabled: bool) -> Self {
        self.use_keyring = Some(enabled);
        self
    }

    /// Build the final configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is blank or malformed, or if the timeout
    /// or retry count are out of range.
    pub fn build(self) -> Result<Config, ConfigError> {
        let base_url =
            validate_and_normalize_base_url(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;

        let connection = ConnectionConfig {
            base_url,
            skip_verify: self.skip_verify.unwrap_or(false),
            timeout: self
                .timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            max_retries: self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
        };

        Self::validate_connection(&connection)?;

        let token_storage = if self.use_keyring.unwrap_or(false) {
            TokenStorage::Keyring {
                account: DEFAULT_KEYRING_ACCOUNT.to_string(),
            }
        } else {
            TokenStorage::Local
        };

        Ok(Config {
            connection,
            token: self.token,
            store_path: self.store_path,
            token_storage,
        })
    }

    fn validate_connection(connection: &ConnectionConfig) -> Result<(), ConfigError> {
        let timeout_secs = connection.timeout.as_secs();

        if timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout {
                message: "timeout must be greater than 0 seconds".to_string(),
            });
        }

        if timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::InvalidTimeout {
                message: format!(
                    "timeout ({timeout_secs}s) exceeds maximum allowed ({MAX_TIMEOUT_SECS}s)"
                ),
            });
        }

        if connection.max_retries > MAX_MAX_RETRIES {
            return Err(ConfigError::InvalidMaxRetries {
                message: format!(
                    "max retries ({}) exceeds maximum allowed ({MAX_MAX_RETRIES})",
                    connection.max_retries
                ),
            });
        }

        Ok(())
    }
}

/// Validate and normalize a base URL.
///
/// - Require scheme is http or https
/// - Require host is present
/// - Normalize by stripping trailing slash
fn validate_and_normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(ConfigError::MissingBaseUrl);
    }

    let parsed = url::Url::parse(trimmed).map_err(|e| ConfigError::InvalidValue {
        var: "base_url".into(),
        message: format!(
            "must be an absolute http(s) URL with a host (e.g. http://localhost:8000): {e}"
        ),
    })?;

    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ConfigError::InvalidValue {
            var: "base_url".into(),
            message: format!(
                "scheme must be http or https (e.g. http://localhost:8000), got: {scheme}"
            ),
        });
    }

    if parsed.host_str().is_none() {
        return Err(ConfigError::InvalidValue {
            var: "base_url".into(),
            message: "host is required (e.g. http://localhost:8000)".into(),
        });
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}
