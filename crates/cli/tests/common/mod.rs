//! Shared test utilities for selfmade CLI integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//! - Point every command at a throwaway local store.
//!
//! Invariants / Assumptions:
//! - All integration tests using these helpers are hermetic by default.
//! - The OS color scheme is pinned with `--system-scheme` where it matters.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

#[allow(dead_code)]
pub const TEST_TOKEN: &str = "test-token";

/// Returns a hermetic `selfmade` command.
///
/// It ensures:
/// - `DOTENV_DISABLED=1` is set to prevent local `.env` contamination.
/// - `SELFMADE_*` variables from the host are cleared.
pub fn selfmade_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("selfmade");

    cmd.env("DOTENV_DISABLED", "1");

    cmd.env_remove("SELFMADE_BASE_URL")
        .env_remove("SELFMADE_TOKEN")
        .env_remove("SELFMADE_TIMEOUT")
        .env_remove("SELFMADE_MAX_RETRIES")
        .env_remove("SELFMADE_SKIP_VERIFY")
        .env_remove("SELFMADE_STORE_PATH")
        .env_remove("SELFMADE_USE_KEYRING")
        .env_remove("RUST_LOG");

    cmd
}

/// A local store in a temporary directory.
#[allow(dead_code)]
pub struct TestStore {
    _dir: TempDir,
    path: PathBuf,
}

#[allow(dead_code)]
impl TestStore {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        Self { _dir: dir, path }
    }

    /// Store pre-seeded with `TEST_TOKEN`.
    pub fn with_token() -> Self {
        let store = Self::new();
        store.write(&serde_json::json!({ "selfmade_token": TEST_TOKEN }));
        store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&self, value: &serde_json::Value) {
        std::fs::write(&self.path, value.to_string()).unwrap();
    }

    /// Stored items; empty when the file does not exist.
    pub fn read(&self) -> serde_json::Value {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => serde_json::from_str(&content).unwrap(),
            Err(_) => serde_json::json!({}),
        }
    }

    /// Command using this store against `base_url`.
    pub fn cmd(&self, base_url: &str) -> Command {
        let mut cmd = selfmade_cmd();
        cmd.env("SELFMADE_STORE_PATH", &self.path)
            .env("SELFMADE_BASE_URL", base_url);
        cmd
    }
}
