//! Regression tests for corrupt local store backup behavior.

use selfmade_config::{FileStore, LocalStore};
use std::io::Write;

fn corrupt_backups(dir: &std::path::Path) -> Vec<std::path::PathBuf> {
    std::fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.to_string_lossy().contains(".corrupt."))
        .collect()
}

#[test]
fn test_corrupt_store_is_backed_up_and_starts_empty() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("storage.json");

    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(b"{ invalid json }").unwrap();
    drop(file);

    let store = FileStore::open(&path);

    assert!(store.get_item("selfmade_token").is_none());
    assert!(!path.exists(), "corrupt file should have been moved aside");

    let backups = corrupt_backups(temp_dir.path());
    assert_eq!(backups.len(), 1);
    assert_eq!(
        std::fs::read_to_string(&backups[0]).unwrap(),
        "{ invalid json }"
    );
}

#[test]
fn test_store_is_writable_after_corrupt_backup() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("storage.json");
    std::fs::write(&path, "not json at all").unwrap();

    let store = FileStore::open(&path);
    store.set_item("selfmade_theme", "dark").unwrap();

    let reopened = FileStore::open(&path);
    assert_eq!(reopened.get_item("selfmade_theme").as_deref(), Some("dark"));
    assert_eq!(corrupt_backups(temp_dir.path()).len(), 1);
}

#[test]
fn test_valid_store_is_not_backed_up() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("storage.json");
    std::fs::write(&path, r#"{"selfmade_theme":"light"}"#).unwrap();

    let store = FileStore::open(&path);

    assert_eq!(store.get_item("selfmade_theme").as_deref(), Some("light"));
    assert!(corrupt_backups(temp_dir.path()).is_empty());
}

#[test]
fn test_file_corrupted_after_open_is_backed_up_before_write() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("storage.json");

    let store = FileStore::open(&path);
    store.set_item("selfmade_token", "jwt").unwrap();

    std::fs::write(&path, "{ not json").unwrap();
    store.set_item("selfmade_theme", "dark").unwrap();

    let backups = corrupt_backups(temp_dir.path());
    assert_eq!(backups.len(), 1);
    assert_eq!(std::fs::read_to_string(&backups[0]).unwrap(), "{ not json");
    assert_eq!(store.get_item("selfmade_theme").as_deref(), Some("dark"));
    assert!(store.get_item("selfmade_token").is_none());
}

#[test]
fn test_remove_on_file_corrupted_after_open_keeps_backup() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("storage.json");

    let store = FileStore::open(&path);
    store.set_item("selfmade_token", "jwt").unwrap();
    std::fs::write(&path, "[1, 2").unwrap();

    store.remove_item("selfmade_token").unwrap();

    let backups = corrupt_backups(temp_dir.path());
    assert_eq!(backups.len(), 1);
    assert_eq!(std::fs::read_to_string(&backups[0]).unwrap(), "[1, 2");
}

/// A corrupt file that cannot be moved aside must not be overwritten.
#[cfg(unix)]
#[test]
fn test_write_refused_when_corrupt_file_cannot_be_backed_up() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = tempfile::tempdir().unwrap();
    let dir = temp_dir.path().join("ro");
    std::fs::create_dir(&dir).unwrap();
    let path = dir.join("storage.json");

    let store = FileStore::open(&path);
    store.set_item("selfmade_token", "jwt").unwrap();
    std::fs::write(&path, "{ not json").unwrap();

    std::fs::set_permissions(&dir, std::fs::Permissions::from_mode(0o555)).unwrap();
    let canary = dir.join("canary");
    let read_only = std::fs::write(&canary, "x").is_err();

    let result = store.set_item("selfmade_theme", "dark");

    std::fs::set_permissions(&dir, std::fs::Permissions::from_mode(0o755)).unwrap();

    // Root ignores directory permissions, so only assert when the rename is blocked.
    if read_only {
        assert!(result.is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
    }
}

/// Backup fails when the parent directory is read-only; the store must still open.
#[cfg(unix)]
#[test]
fn test_corrupt_store_backup_failure_keeps_original() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = tempfile::tempdir().unwrap();
    let dir = temp_dir.path().join("ro");
    std::fs::create_dir(&dir).unwrap();
    let path = dir.join("storage.json");
    std::fs::write(&path, "{ invalid json }").unwrap();

    std::fs::set_permissions(&dir, std::fs::Permissions::from_mode(0o555)).unwrap();

    // Root ignores directory permissions, so only assert when the rename is blocked.
    let canary = dir.join("canary");
    let read_only = std::fs::write(&canary, "x").is_err();

    let store = FileStore::open(&path);
    assert!(store.get_item("selfmade_token").is_none());

    if read_only {
        assert!(path.exists());
        assert!(corrupt_backups(&dir).is_empty());
    }

    std::fs::set_permissions(&dir, std::fs::Permissions::from_mode(0o755)).unwrap();
}
