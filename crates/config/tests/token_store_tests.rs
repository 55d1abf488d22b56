//! Token storage shared with the theme preference through one local store.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use selfmade_config::constants::{THEME_KEY, TOKEN_KEY};
use selfmade_config::{FileStore, LocalStore, TokenStore};

#[test]
fn test_token_persists_across_store_instances() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("storage.json");

    let mut tokens = TokenStore::local(Arc::new(FileStore::open(&path)));
    tokens
        .set_token(&SecretString::new("abc.def".to_string().into()))
        .unwrap();

    let reopened = TokenStore::local(Arc::new(FileStore::open(&path)));
    assert!(reopened.is_authenticated());
    assert_eq!(reopened.get_token().unwrap().expose_secret(), "abc.def");

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw[TOKEN_KEY], "abc.def");
}

#[test]
fn test_removing_token_keeps_theme() {
    let temp_dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileStore::open(temp_dir.path().join("storage.json")));
    store.set_item(THEME_KEY, "dark").unwrap();

    let mut tokens = TokenStore::local(store.clone());
    tokens
        .set_token(&SecretString::new("t".to_string().into()))
        .unwrap();
    tokens.remove_token().unwrap();

    assert!(!tokens.is_authenticated());
    assert_eq!(store.get_item(THEME_KEY).as_deref(), Some("dark"));
}

#[test]
fn test_remove_without_token_succeeds() {
    let temp_dir = tempfile::tempdir().unwrap();
    let mut tokens = TokenStore::local(Arc::new(FileStore::open(
        temp_dir.path().join("storage.json"),
    )));

    assert!(tokens.remove_token().is_ok());
    assert!(tokens.get_token().is_none());
}
