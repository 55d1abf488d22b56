//! Configuration type definitions for Selfmade.
//!
//! Responsibilities:
//! - Define connection settings and the resolved runtime `Config`.
//! - Define theme preference types shared by the CLI and the theme manager.
//!
//! Does NOT handle:
//! - Configuration loading from environment variables (see `loader` module).
//! - Persistence of tokens or preferences (see `persistence` module).
//!
//! Invariants:
//! - All secret types use `secrecy::SecretString` to prevent accidental logging.

pub(crate) mod connection;
mod theme;

pub use connection::{Config, ConnectionConfig, TokenStorage};
pub use theme::{ColorScheme, InvalidThemeError, ThemePreference, ToggleIndicator};
