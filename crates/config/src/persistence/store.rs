//! Local key/value store.
//!
//! Responsibilities:
//! - Define the `LocalStore` trait (string keys, string values).
//! - Provide a file-backed implementation (`FileStore`) and an in-memory one (`MemoryStore`).
//!
//! Does NOT handle:
//! - Interpretation of stored values (see `token` and the theme manager).
//!
//! Invariants:
//! - `FileStore` never caches: every read sees the latest file contents, so several
//!   handles on the same file stay coherent.
//! - Writes go through a temporary file followed by a rename.
//! - A corrupt file is backed up before anything is written over it, on open or
//!   on a later write, and the store starts empty.
//! - Writes never proceed from a file that could not be read.
//! - Removing a missing key is a no-op and does not touch the file.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use super::{StoreError, create_corrupt_backup};

/// Minimal string key/value storage.
pub trait LocalStore: Send + Sync + fmt::Debug {
    /// Read a value. Returns `None` when the key is absent.
    fn get_item(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete a value.
    fn remove_item(&self, key: &str) -> Result<(), StoreError>;
}

/// JSON file holding a flat object of string values.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Open the store at `path`.
    ///
    /// A missing file is treated as an empty store. A file that cannot be parsed
    /// is moved aside to `<file>.corrupt.<timestamp>`.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        if path.exists()
            && let Err(e @ StoreError::Parse { .. }) = read_items(&path)
        {
            back_up_corrupt(&path, &e);
        }

        Self { path }
    }

    /// Open the store at the platform default location.
    pub fn open_default() -> Result<Self, StoreError> {
        Ok(Self::open(super::default_store_path()?))
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> BTreeMap<String, String> {
        match read_items(&self.path) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to read local store");
                BTreeMap::new()
            }
        }
    }

    /// Current items for a read-modify-write.
    ///
    /// A file that stopped parsing since `open` is backed up first so the
    /// write that follows cannot discard it. Other read errors abort the write.
    fn load_for_write(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match read_items(&self.path) {
            Ok(items) => Ok(items),
            Err(e @ StoreError::Parse { .. }) => {
                if !back_up_corrupt(&self.path, &e) {
                    return Err(e);
                }
                Ok(BTreeMap::new())
            }
            Err(e) => Err(e),
        }
    }

    fn atomic_save(&self, items: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let content = serde_json::to_string_pretty(items)?;

        let temp_path = self.path.with_extension("tmp");
        std::fs::write(&temp_path, content).map_err(|source| StoreError::Io {
            path: temp_path.clone(),
            source,
        })?;
        std::fs::rename(&temp_path, &self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        tracing::debug!(path = %self.path.display(), "Local store saved");
        Ok(())
    }
}

impl LocalStore for FileStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.load().remove(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut items = self.load_for_write()?;
        items.insert(key.to_string(), value.to_string());
        self.atomic_save(&items)
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        let mut items = self.load_for_write()?;
        if items.remove(key).is_some() {
            self.atomic_save(&items)?;
        }
        Ok(())
    }
}

/// Move a corrupt store aside. Returns whether the backup succeeded.
fn back_up_corrupt(path: &Path, error: &StoreError) -> bool {
    match create_corrupt_backup(path) {
        Ok(backup_path) => {
            tracing::warn!(
                path = %path.display(),
                backup_path = %backup_path.display(),
                error = %error,
                "Local store is corrupt, backed up and starting empty"
            );
            true
        }
        Err(backup_err) => {
            tracing::error!(
                path = %path.display(),
                error = %error,
                backup_error = %backup_err,
                "Local store is corrupt and backup failed"
            );
            false
        }
    }
}

/// Read the item map from disk. A missing file yields an empty map.
fn read_items(path: &Path) -> Result<BTreeMap<String, String>, StoreError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    if content.trim().is_empty() {
        return Ok(BTreeMap::new());
    }

    serde_json::from_str(&content).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// In-process store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.items.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LocalStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}
