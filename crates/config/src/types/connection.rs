//! Connection configuration types for Selfmade.
//!
//! Responsibilities:
//! - Define connection settings (URL, TLS verification, timeouts, retries).
//! - Define the main `Config` structure combining connection and token settings.
//!
//! Does NOT handle:
//! - Configuration loading from env (see `loader` module).
//! - Token persistence (see `persistence` module).
//! - Actual network connections (see client crate).
//!
//! Invariants:
//! - Duration fields are serialized as seconds (integers).
//! - `base_url` never carries trailing slashes once built by `ConfigLoader`.

use crate::constants::{DEFAULT_BASE_URL, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Module for serializing Duration as seconds (integer).
mod duration_seconds {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

/// Connection configuration for the Selfmade Labs API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Origin of the API server (e.g., http://localhost:8000)
    pub base_url: String,
    /// Whether to skip TLS verification (for self-signed certificates)
    pub skip_verify: bool,
    /// Request timeout (serialized as seconds)
    #[serde(with = "duration_seconds")]
    pub timeout: Duration,
    /// Maximum number of retries for rate-limited requests
    pub max_retries: usize,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            skip_verify: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

/// Where the bearer token is kept between runs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TokenStorage {
    /// The local key/value store file.
    #[default]
    Local,
    /// The OS keyring under the given account name.
    Keyring { account: String },
}

/// Fully resolved runtime configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub connection: ConnectionConfig,
    /// Explicit token supplied via CLI flag or environment; bypasses storage.
    pub token: Option<SecretString>,
    /// Override for the local store file location.
    pub store_path: Option<PathBuf>,
    pub token_storage: TokenStorage,
}

impl Config {
    /// Create a config pointing at `base_url` with everything else defaulted.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            connection: ConnectionConfig {
                base_url: base_url.into(),
                ..ConnectionConfig::default()
            },
            ..Self::default()
        }
    }
}
