//! Common test utilities for integration tests.
//!
//! This module provides shared helper functions and re-exports commonly used
//! types for testing the Selfmade client.
//!
//! # Invariants
//! - Fixtures are loaded from the `fixtures/` directory relative to the crate root
//! - Clients built here keep their token in a `MemoryStore` the test can inspect
//!
//! # What this does NOT handle
//! - Mock server setup (use wiremock directly in tests)

use std::sync::Arc;

#[allow(unused_imports)]
pub use selfmade_client::testing::load_fixture;

#[allow(unused_imports)]
pub use selfmade_client::{ApiClient, ClientError};
#[allow(unused_imports)]
pub use selfmade_config::constants::TOKEN_KEY;
#[allow(unused_imports)]
pub use selfmade_config::{LocalStore, MemoryStore, TokenStore};
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

/// Token used by authenticated test clients.
#[allow(dead_code)]
pub const TEST_TOKEN: &str = "test-token";

/// Build a client against `server` whose token lives in the returned store.
#[allow(dead_code)]
pub fn client_with_store(server: &MockServer, token: Option<&str>) -> (ApiClient, MemoryStore) {
    let store = MemoryStore::new();
    if let Some(token) = token {
        store.set_item(TOKEN_KEY, token).unwrap();
    }

    let client = ApiClient::builder()
        .base_url(server.uri())
        .token_store(TokenStore::local(Arc::new(store.clone())))
        .max_retries(1)
        .build()
        .unwrap();

    (client, store)
}

/// Client holding `TEST_TOKEN`.
#[allow(dead_code)]
pub fn authed_client(server: &MockServer) -> ApiClient {
    client_with_store(server, Some(TEST_TOKEN)).0
}
