//! Theme types for Selfmade configuration.
//!
//! Responsibilities:
//! - Define the user-selectable theme preference (`ThemePreference`).
//! - Define the resolved, effective color scheme (`ColorScheme`).
//! - Provide the toggle control state (`ToggleIndicator`).
//!
//! Does NOT handle:
//! - Persistence of the preference (see `persistence` module).
//! - Detecting the OS color scheme or notifying listeners (see `theme` module).
//!
//! Invariants:
//! - `ThemePreference` is the persisted representation; `ColorScheme` is never persisted.
//! - The wire/storage form is always lowercase (`light`, `dark`, `auto`).
//! - Unknown stored values fall back to `Auto`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when parsing an unknown theme name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid theme '{0}': expected one of light, dark, auto")]
pub struct InvalidThemeError(pub String);

/// User-selectable theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
    #[default]
    Auto,
}

impl ThemePreference {
    /// All valid preferences in cycle order.
    pub const ALL: [ThemePreference; 3] = [Self::Light, Self::Dark, Self::Auto];

    /// Storage form of the preference.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Auto => "auto",
        }
    }

    /// Interpret a raw stored value, falling back to `Auto` when it is missing or unknown.
    pub fn from_stored(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }

    /// Next preference in the toggle sequence: light -> dark -> auto -> light.
    pub fn cycle_next(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Auto,
            Self::Auto => Self::Light,
        }
    }

    /// Material icon name shown on the toggle control.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Light => "light_mode",
            Self::Dark => "dark_mode",
            Self::Auto => "brightness_auto",
        }
    }

    /// Tooltip shown on the toggle control.
    pub fn title(self) -> &'static str {
        match self {
            Self::Light => "Light theme",
            Self::Dark => "Dark theme",
            Self::Auto => "Auto theme (system)",
        }
    }

    /// Resolve against the host color scheme. `Auto` defers to `system`.
    pub fn resolve(self, system: ColorScheme) -> ColorScheme {
        match self {
            Self::Light => ColorScheme::Light,
            Self::Dark => ColorScheme::Dark,
            Self::Auto => system,
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemePreference {
    type Err = InvalidThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "auto" => Ok(Self::Auto),
            other => Err(InvalidThemeError(other.to_string())),
        }
    }
}

/// Effective color scheme after resolving `auto`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Icon and tooltip of the theme toggle control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToggleIndicator {
    pub icon: &'static str,
    pub title: &'static str,
}

impl From<ThemePreference> for ToggleIndicator {
    fn from(preference: ThemePreference) -> Self {
        Self {
            icon: preference.icon(),
            title: preference.title(),
        }
    }
}
