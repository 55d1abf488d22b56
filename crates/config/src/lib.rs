//! Configuration, local storage and theme management for Selfmade.
//!
//! This crate provides the settings loader, the key/value store that holds the
//! bearer token and theme preference, and the theme manager that resolves
//! `auto` against the host color scheme.

pub mod constants;
mod loader;
pub mod persistence;
pub mod theme;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, env_var_or_none};
pub use persistence::{
    FileStore, LocalStore, MemoryStore, StoreError, TokenBackend, TokenStore, default_store_path,
};
pub use theme::{
    FixedColorScheme, OsColorScheme, SystemColorScheme, SystemWatch, ThemeChanged, ThemeManager,
};
pub use types::{
    ColorScheme, Config, ConnectionConfig, InvalidThemeError, ThemePreference, ToggleIndicator,
    TokenStorage,
};
