//! Selfmade Labs REST API client.
//!
//! This crate provides a typed async client for the Selfmade Labs API. It
//! injects the stored bearer token into every request, decodes JSON and text
//! responses, and drops the token when the server answers 401.

mod auth;
pub mod client;
pub mod error;
pub mod models;
mod serde_helpers;

pub mod endpoints;

#[cfg(any(feature = "test-utils", test))]
pub mod testing;

pub use auth::{LoginRedirect, TokenExtraction, extract_token_from_url, require_auth};
pub use client::ApiClient;
pub use client::builder::ApiClientBuilder;
pub use endpoints::ApiResponse;
pub use error::{ClientError, Result};
pub use models::{
    AdminStats, AuditLogEntry, Lab, LabActionResponse, LabStatus, ManagedUser, MessageResponse,
    Notification, ProfileUpdate, Role, ServerInfo, ServiceActionResponse, ServiceCatalogEntry,
    ServiceCredentials, ServiceCredentialsResponse, ServiceInstance, ServiceStartResponse,
    SoftFailure, UserCreateRequest, UserMutationResponse, UserProfile, UserStats,
};
