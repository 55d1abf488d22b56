//! Path helpers for the local store location.
//!
//! Responsibilities:
//! - Determine the standard local store path.
//! - Use `directories` crate for platform-appropriate paths.
//!
//! Does NOT handle:
//! - File I/O operations.

use std::path::PathBuf;

use super::StoreError;
use crate::constants::STORE_FILE_NAME;

/// Returns the default path to the local key/value store.
///
/// - Linux: `~/.config/selfmade/storage.json`
/// - macOS: `~/Library/Application Support/selfmade/storage.json`
/// - Windows: `%AppData%\selfmade\config\storage.json`
pub fn default_store_path() -> Result<PathBuf, StoreError> {
    let proj_dirs =
        directories::ProjectDirs::from("", "", "selfmade").ok_or(StoreError::ConfigDirUnavailable)?;

    Ok(proj_dirs.config_dir().join(STORE_FILE_NAME))
}
