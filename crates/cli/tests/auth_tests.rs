//! Integration tests for `selfmade auth` and login gating.

mod common;

use common::{TEST_TOKEN, TestStore};
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn test_login_with_token_writes_store() {
    let store = TestStore::new();

    store
        .cmd("http://localhost:8000")
        .args(["auth", "login", "--token", "abc.def.ghi"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Token stored in local store"));

    assert_eq!(store.read()["selfmade_token"], "abc.def.ghi");
}

#[test]
fn test_login_with_callback_url() {
    let store = TestStore::new();

    store
        .cmd("http://localhost:8000")
        .args([
            "-o",
            "json",
            "auth",
            "login",
            "--callback-url",
            "http://localhost:8000/ui/dashboard.html?token=eyJ.payload.sig",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""clean_url": "/ui/dashboard.html""#));

    assert_eq!(store.read()["selfmade_token"], "eyJ.payload.sig");
}

#[test]
fn test_login_callback_without_token_fails() {
    let store = TestStore::new();

    store
        .cmd("http://localhost:8000")
        .args([
            "auth",
            "login",
            "--callback-url",
            "/ui/login.html?error=oauth_failed",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No token found"));

    assert!(store.read().get("selfmade_token").is_none());
}

#[test]
fn test_command_without_token_points_to_login() {
    let store = TestStore::new();

    store
        .cmd("http://localhost:8000")
        .args(["labs", "list"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "http://localhost:8000/ui/login.html",
        ));
}

#[tokio::test]
async fn test_env_token_is_used_but_not_stored() {
    let server = MockServer::start().await;
    let store = TestStore::new();

    Mock::given(method("GET"))
        .and(path("/profile/stats"))
        .and(header("Authorization", "Bearer env-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "labs_started_total": 1,
            "services_started_total": 0,
            "active_labs": 0,
            "active_services": 0
        })))
        .expect(1)
        .mount(&server)
        .await;

    store
        .cmd(&server.uri())
        .env("SELFMADE_TOKEN", "env-token")
        .args(["profile", "stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Labs Started: 1"));

    assert!(store.read().get("selfmade_token").is_none());
}

#[tokio::test]
async fn test_status_reports_server_and_session() {
    let server = MockServer::start().await;
    let store = TestStore::with_token();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "Selfmade Labs running", "version": "2.0.0"})),
        )
        .mount(&server)
        .await;

    store
        .cmd(&server.uri())
        .args(["auth", "status"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Selfmade Labs running (version 2.0.0)")
                .and(predicate::str::contains("Authenticated: yes"))
                .and(predicate::str::contains("Token Source: local store")),
        );
}

#[test]
fn test_status_with_unreachable_server_still_succeeds() {
    let store = TestStore::new();

    store
        .cmd("http://127.0.0.1:1")
        .args(["-o", "json", "auth", "status"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains(r#""authenticated": false"#)
                .and(predicate::str::contains(r#""server": null"#)),
        );
}

#[tokio::test]
async fn test_logout_removes_token() {
    let server = MockServer::start().await;
    let store = TestStore::with_token();
    store.write(&json!({"selfmade_token": TEST_TOKEN, "selfmade_theme": "dark"}));

    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "Logged out successfully"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    store
        .cmd(&server.uri())
        .args(["auth", "logout"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "{}/ui/login.html",
            server.uri()
        )));

    let items = store.read();
    assert!(items.get("selfmade_token").is_none());
    assert_eq!(items["selfmade_theme"], "dark");
}

#[tokio::test]
async fn test_session_expired_clears_token_and_exits_2() {
    let server = MockServer::start().await;
    let store = TestStore::with_token();

    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid token"})),
        )
        .mount(&server)
        .await;

    store
        .cmd(&server.uri())
        .args(["profile", "show"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains(format!(
            "{}/ui/login.html?error=session_expired",
            server.uri()
        )));

    assert!(store.read().get("selfmade_token").is_none());
}
