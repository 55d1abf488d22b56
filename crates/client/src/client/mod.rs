//! Main Selfmade API client and API methods.
//!
//! This module provides the primary [`ApiClient`]. Every endpoint method is a
//! thin wrapper over the generic helpers defined here.
//!
//! # Submodules
//! - [`builder`]: Client construction and configuration
//! - `profile`: Profile, stats and logout
//! - `labs`: Lab catalog and lab lifecycle
//! - `services`: Service catalog, lifecycle and credentials
//! - `notifications`: Notification inbox
//! - `admin`: User management, audit log and platform stats
//!
//! # What this module does NOT handle:
//! - Direct HTTP request implementation (delegated to [`crate::endpoints`])
//! - Token persistence (delegated to [`selfmade_config::TokenStore`])
//!
//! # Invariants
//! - The token is read from the store on every request.
//! - A 401 response removes the stored token and yields
//!   [`ClientError::SessionExpired`] carrying the login redirect.

pub mod builder;

mod admin;
mod labs;
mod notifications;
mod profile;
mod services;

use reqwest::Method;
use selfmade_config::TokenStore;
use selfmade_config::constants::SESSION_EXPIRED_REDIRECT;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::endpoints::{self, ApiResponse};
use crate::error::{ClientError, Result};
use crate::models::{Empty, ServerInfo};

/// Selfmade REST API client.
///
/// # Creating a Client
///
/// ```rust,ignore
/// use selfmade_client::ApiClient;
/// use selfmade_config::{FileStore, TokenStore};
/// use std::sync::Arc;
///
/// let tokens = TokenStore::local(Arc::new(FileStore::open_default()?));
/// let mut client = ApiClient::builder()
///     .base_url("http://localhost:8000".to_string())
///     .token_store(tokens)
///     .build()?;
///
/// let profile = client.get_profile().await?;
/// ```
#[derive(Debug)]
pub struct ApiClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) tokens: TokenStore,
    pub(crate) max_retries: usize,
}

impl ApiClient {
    /// Create a new client builder.
    pub fn builder() -> builder::ApiClientBuilder {
        builder::ApiClientBuilder::new()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token_store(&self) -> &TokenStore {
        &self.tokens
    }

    pub fn token_store_mut(&mut self) -> &mut TokenStore {
        &mut self.tokens
    }

    /// Whether a token is currently stored.
    pub fn is_authenticated(&self) -> bool {
        self.tokens.is_authenticated()
    }

    /// Send a request and return the decoded body.
    ///
    /// `body` is only sent for methods that carry one (`POST`, `PUT`).
    pub async fn request(
        &mut self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
    ) -> Result<ApiResponse> {
        let token = self.tokens.get_token();
        let result = endpoints::execute(
            &self.http,
            &self.base_url,
            token.as_ref(),
            method,
            endpoint,
            body,
            self.max_retries,
        )
        .await;

        match result {
            Err(ClientError::ApiError { status: 401, url, .. }) => {
                self.expire_session(&url);
                Err(ClientError::SessionExpired {
                    redirect: SESSION_EXPIRED_REDIRECT.to_string(),
                })
            }
            other => other,
        }
    }

    fn expire_session(&mut self, url: &str) {
        tracing::debug!(url = %url, "Server rejected token, removing it");
        if let Err(e) = self.tokens.remove_token() {
            tracing::warn!(error = %e, "Failed to remove rejected token");
        }
    }

    async fn send_json<T, B>(&mut self, method: Method, endpoint: &str, body: Option<&B>) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = body
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| ClientError::InvalidRequest(e.to_string()))?;
        self.request(method, endpoint, body.as_ref())
            .await?
            .into_json()
    }

    /// `GET` and decode the JSON body.
    pub async fn get<T: DeserializeOwned>(&mut self, endpoint: &str) -> Result<T> {
        self.send_json::<T, Empty>(Method::GET, endpoint, None)
            .await
    }

    /// `POST` a JSON body and decode the JSON response.
    pub async fn post<T, B>(&mut self, endpoint: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_json(Method::POST, endpoint, Some(body)).await
    }

    /// `POST` an empty object.
    pub async fn post_empty<T: DeserializeOwned>(&mut self, endpoint: &str) -> Result<T> {
        self.post(endpoint, &Empty {}).await
    }

    /// `PUT` a JSON body and decode the JSON response.
    pub async fn put<T, B>(&mut self, endpoint: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_json(Method::PUT, endpoint, Some(body)).await
    }

    /// `PUT` an empty object.
    pub async fn put_empty<T: DeserializeOwned>(&mut self, endpoint: &str) -> Result<T> {
        self.put(endpoint, &Empty {}).await
    }

    /// `DELETE` and decode the JSON body.
    pub async fn delete<T: DeserializeOwned>(&mut self, endpoint: &str) -> Result<T> {
        self.send_json::<T, Empty>(Method::DELETE, endpoint, None)
            .await
    }

    /// `GET` without decoding into a model.
    pub async fn get_raw(&mut self, endpoint: &str) -> Result<ApiResponse> {
        self.request(Method::GET, endpoint, None).await
    }

    /// Server banner from `GET /`.
    pub async fn get_server_info(&mut self) -> Result<ServerInfo> {
        self.get("/").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use selfmade_config::TokenStore;

    #[test]
    fn test_client_builder_with_token_store() {
        let client = ApiClient::builder()
            .base_url("http://localhost:8000".to_string())
            .token_store(TokenStore::empty())
            .build();

        assert!(client.is_ok());
        let client = client.unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert!(!client.is_authenticated());
    }

    #[test]
    fn test_client_builder_missing_base_url() {
        let client = ApiClient::builder().token_store(TokenStore::empty()).build();

        assert!(matches!(client.unwrap_err(), ClientError::InvalidUrl(_)));
    }

    #[test]
    fn test_client_builder_normalizes_base_url() {
        let client = ApiClient::builder()
            .base_url("https://labs.example.com/".to_string())
            .token_store(TokenStore::empty())
            .build()
            .unwrap();

        assert_eq!(client.base_url(), "https://labs.example.com");
    }

    #[test]
    fn test_skip_verify_with_http_url() {
        // Succeeds but logs that skip_verify has no effect
        let client = ApiClient::builder()
            .base_url("http://localhost:8000".to_string())
            .token_store(TokenStore::empty())
            .skip_verify(true)
            .build();

        assert!(client.is_ok());
    }
}
