//! Lab endpoint tests.
//!
//! # Invariants
//! - Start and stop send `{"lab_id": ...}`
//! - Soft failures in a 200 body are decoded, not raised

mod common;

use common::*;
use selfmade_client::SoftFailure;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};

#[tokio::test]
async fn test_get_labs() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/labs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("labs/catalog.json")))
        .mount(&mock_server)
        .await;

    let mut client = authed_client(&mock_server);
    let labs = client.get_labs().await.unwrap();

    assert_eq!(labs.len(), 3);
    assert_eq!(labs[0].id, "ubuntu-ssh");
    assert_eq!(labs[1].description.as_deref(), Some("Pentesting environment"));
    assert_eq!(labs[2].image.as_deref(), Some("n8nio/n8n"));
}

#[tokio::test]
async fn test_start_lab() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/labs/start"))
        .and(body_json(json!({"lab_id": "ubuntu-ssh"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("labs/start_success.json")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = authed_client(&mock_server);
    let resp = client.start_lab("ubuntu-ssh").await.unwrap();

    assert_eq!(resp.port, Some(2250));
    assert!(resp.failure().is_none());
}

#[tokio::test]
async fn test_start_lab_already_running() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/labs/start"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"error": "Lab already running", "port": 2231})),
        )
        .mount(&mock_server)
        .await;

    let mut client = authed_client(&mock_server);
    let resp = client.start_lab("ubuntu-ssh").await.unwrap();

    assert_eq!(resp.failure().as_deref(), Some("Lab already running"));
    assert_eq!(resp.port, Some(2231));
}

#[tokio::test]
async fn test_stop_lab() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/labs/stop"))
        .and(body_json(json!({"lab_id": "kali-linux"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Lab stopped"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = authed_client(&mock_server);
    let resp = client.stop_lab("kali-linux").await.unwrap();
    assert_eq!(resp.message.as_deref(), Some("Lab stopped"));
}

#[tokio::test]
async fn test_get_lab_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/labs/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("labs/status.json")))
        .mount(&mock_server)
        .await;

    let mut client = authed_client(&mock_server);
    let status = client.get_lab_status().await.unwrap();

    assert!(status.is_running());
    assert_eq!(status.port, Some(2250));
    assert!(status.started_at.is_some());
}
