//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read and parse `SELFMADE_*` environment variables.
//! - Apply environment variable values to a `ConfigLoader` instance.
//!
//! Does NOT handle:
//! - Building the final Config (see builder.rs).
//! - .env file loading (handled by `ConfigLoader::load_dotenv`).
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Values already set on the loader (CLI/builder) are not overwritten.

use secrecy::SecretString;
use std::path::PathBuf;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn parse_bool(var: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var: var.to_string(),
            message: "must be true or false".to_string(),
        }),
    }
}

/// Apply environment variable configuration to the loader.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if loader.base_url.is_none() {
        loader.base_url = env_var_or_none("SELFMADE_BASE_URL");
    }
    if loader.token.is_none() {
        loader.token = env_var_or_none("SELFMADE_TOKEN").map(|t| SecretString::new(t.into()));
    }
    if loader.store_path.is_none() {
        loader.store_path = env_var_or_none("SELFMADE_STORE_PATH").map(PathBuf::from);
    }
    if loader.skip_verify.is_none()
        && let Some(skip) = env_var_or_none("SELFMADE_SKIP_VERIFY")
    {
        loader.skip_verify = Some(parse_bool("SELFMADE_SKIP_VERIFY", &skip)?);
    }
    if loader.use_keyring.is_none()
        && let Some(flag) = env_var_or_none("SELFMADE_USE_KEYRING")
    {
        loader.use_keyring = Some(parse_bool("SELFMADE_USE_KEYRING", &flag)?);
    }
    if loader.timeout.is_none()
        && let Some(timeout) = env_var_or_none("SELFMADE_TIMEOUT")
    {
        let secs: u64 = timeout.parse().map_err(|_| ConfigError::InvalidValue {
            var: "SELFMADE_TIMEOUT".to_string(),
            message: "must be a number".to_string(),
        })?;
        loader.timeout = Some(Duration::from_secs(secs));
    }
    if loader.max_retries.is_none()
        && let Some(retries) = env_var_or_none("SELFMADE_MAX_RETRIES")
    {
        let value: usize = retries.parse().map_err(|_| ConfigError::InvalidValue {
            var: "SELFMADE_MAX_RETRIES".to_string(),
            message: "must be a non-negative integer".to_string(),
        })?;
        loader.max_retries = Some(value);
    }
    Ok(())
}
