//! Configuration loader for environment variables.
//!
//! Responsibilities:
//! - Load configuration from `.env` files and `SELFMADE_*` environment variables.
//! - Provide a builder-pattern `ConfigLoader` for hierarchical configuration merging.
//! - Enforce `DOTENV_DISABLED` gate to prevent accidental dotenv loading in tests.
//!
//! Does NOT handle:
//! - Persisting tokens or preferences (see `persistence`).
//!
//! Invariants / Assumptions:
//! - Builder values take precedence over environment variables.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.

mod builder;
mod env;
mod error;

pub use builder::ConfigLoader;
pub use env::env_var_or_none;
pub use error::ConfigError;

#[cfg(test)]
mod tests;
