//! Integration tests for `selfmade theme`. No server is involved.

mod common;

use common::TestStore;
use predicates::prelude::*;

const UNUSED_URL: &str = "http://127.0.0.1:1";

#[test]
fn test_show_defaults_to_auto_following_system() {
    let store = TestStore::new();

    store
        .cmd(UNUSED_URL)
        .args(["theme", "show", "--system-scheme", "dark", "-o", "json"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains(r#""preference": "auto""#)
                .and(predicate::str::contains(r#""effective": "dark""#)),
        );
}

#[test]
fn test_set_persists_preference() {
    let store = TestStore::new();

    store
        .cmd(UNUSED_URL)
        .args(["theme", "set", "light", "--system-scheme", "dark"])
        .assert()
        .success();

    assert_eq!(store.read()["selfmade_theme"], "light");

    store
        .cmd(UNUSED_URL)
        .args(["theme", "show", "--system-scheme", "dark", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""effective": "light""#));
}

#[test]
fn test_toggle_cycles_from_stored_value() {
    let store = TestStore::new();
    store.write(&serde_json::json!({"selfmade_theme": "dark"}));

    store
        .cmd(UNUSED_URL)
        .args(["theme", "toggle", "--system-scheme", "light", "-o", "json"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains(r#""preference": "auto""#)
                .and(predicate::str::contains(r#""effective": "light""#)),
        );

    assert_eq!(store.read()["selfmade_theme"], "auto");
}

#[test]
fn test_invalid_theme_exits_5_and_keeps_stored_value() {
    let store = TestStore::new();
    store.write(&serde_json::json!({"selfmade_theme": "dark"}));

    store
        .cmd(UNUSED_URL)
        .args(["theme", "set", "purple", "--system-scheme", "light"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("purple"));

    assert_eq!(store.read()["selfmade_theme"], "dark");
}

#[test]
fn test_theme_works_without_token() {
    let store = TestStore::new();

    store
        .cmd(UNUSED_URL)
        .args(["theme", "show", "--system-scheme", "light"])
        .assert()
        .success()
        .stdout(predicate::str::contains("auto"));
}
