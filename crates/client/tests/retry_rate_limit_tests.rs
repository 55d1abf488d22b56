//! Rate limit (429) retry behavior tests.
//!
//! # Invariants
//! - 429 responses trigger retry with exponential backoff
//! - Exhausted retries surface as `MaxRetriesExceeded`
//! - Other error statuses are not retried

mod common;

use common::*;
use serde_json::json;
use wiremock::matchers::{method, path};

#[tokio::test]
async fn test_retry_on_429_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/labs"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({"detail": "Slow down"})))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/labs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("labs/catalog.json")))
        .mount(&mock_server)
        .await;

    let mut client = authed_client(&mock_server);
    let labs = client.get_labs().await.unwrap();

    assert_eq!(labs.len(), 3);
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_retry_on_429_exhaustion() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/services/start"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&mock_server)
        .await;

    // Test clients allow one retry.
    let mut client = authed_client(&mock_server);
    let err = client.start_service("redis").await.unwrap_err();

    assert!(matches!(err, ClientError::MaxRetriesExceeded(2)), "{err:?}");
    assert!(err.is_retryable());
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_no_retry_on_503() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/labs"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({"detail": "Maintenance"})))
        .mount(&mock_server)
        .await;

    let mut client = authed_client(&mock_server);
    let err = client.get_labs().await.unwrap_err();

    assert_eq!(err.status(), Some(503));
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_zero_max_retries_falls_back_to_default() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/labs"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/labs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let mut client = ApiClient::builder()
        .base_url(mock_server.uri())
        .token_store(TokenStore::empty())
        .max_retries(0)
        .build()
        .unwrap();

    let labs = client.get_labs().await.unwrap();

    assert!(labs.is_empty());
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 2);
}
