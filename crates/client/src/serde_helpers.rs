//! Serde helpers for the backend's loosely typed JSON.
//!
//! Responsibilities:
//! - Parse timestamps written with or without a UTC offset.
//! - Accept unknown theme names without failing the whole payload.
//! - Read and write `SecretString` fields as plain strings.
//!
//! Explicitly does NOT handle:
//! - Validating business rules (ranges, required fields).
//!
//! Invariants / assumptions:
//! - The backend stores naive UTC datetimes and serializes them in ISO 8601
//!   without an offset; some proxies append `Z`.

use chrono::{DateTime, NaiveDateTime};
use serde::Deserialize;
use serde::de::Error as _;
use selfmade_config::ThemePreference;

fn parse_naive(raw: &str) -> Option<NaiveDateTime> {
    raw.parse::<NaiveDateTime>()
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_utc()))
}

/// Optional ISO 8601 timestamp; `null`, missing and empty strings become `None`.
pub fn opt_naive_datetime<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => parse_naive(&raw)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid timestamp: {raw}"))),
    }
}

/// Theme name as stored on the profile; unknown values fall back to `auto`.
pub fn lenient_theme<'de, D>(deserializer: D) -> Result<ThemePreference, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(ThemePreference::from_stored(raw.as_deref()))
}

/// String that may be `null`; `null` becomes an empty string.
pub fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Serializes `SecretString` as a plain string.
pub mod secret_string {
    use secrecy::{ExposeSecret, SecretString};
    use serde::{Deserialize as DeserializeTrait, Serialize as SerializeTrait};
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        secret.expose_secret().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(SecretString::new(s.into()))
    }
}
