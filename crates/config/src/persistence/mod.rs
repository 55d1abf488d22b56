//! Persistence for tokens and user preferences.
//!
//! Responsibilities:
//! - Provide the local key/value store that replaces browser local storage.
//! - Provide bearer token storage on top of the local store or the OS keyring.
//! - Back up corrupt store files before they are overwritten.
//!
//! Does NOT handle:
//! - Loading environment variables (see `loader`).
//! - Interpreting the theme preference (see `theme`).
//!
//! Invariants:
//! - Every write is atomic (temp file + rename).
//! - Corrupt store files are backed up, never silently discarded.

use std::path::{Path, PathBuf};

use thiserror::Error;

mod path;
mod store;
mod token;

pub use path::default_store_path;
pub use store::{FileStore, LocalStore, MemoryStore};
pub use token::{TokenBackend, TokenStore};

/// Errors raised by the local store and token storage.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Unable to determine config directory")]
    ConfigDirUnavailable,

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse local store at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize local store: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),
}

/// Creates a backup of a corrupt store file before it is overwritten.
///
/// The file is renamed to `<name>.corrupt.<unix_ts>` so its contents stay
/// available for manual recovery.
pub(crate) fn create_corrupt_backup(path: &Path) -> Result<PathBuf, std::io::Error> {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    let backup_path = path.with_extension(format!("corrupt.{}", timestamp));

    std::fs::rename(path, &backup_path)?;

    Ok(backup_path)
}
