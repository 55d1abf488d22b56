//! Data models for Selfmade API requests and responses.
//!
//! Types are organized by resource in submodules and re-exported here
//! for convenient access. Unknown response fields are ignored.

pub mod admin;
pub mod common;
pub mod labs;
pub mod notifications;
pub mod profile;
pub mod server;
pub mod services;

pub use admin::{
    AdminStats, AuditLogEntry, LabCounts, ManagedUser, ServiceCounts, UserCounts,
    UserCreateRequest, UserMutationResponse, UserRoleUpdate,
};
pub use common::{Empty, MessageResponse, SoftFailure};
pub use labs::{Lab, LabActionResponse, LabRequest, LabStatus};
pub use notifications::{Notification, UnreadCount};
pub use profile::{ProfileUpdate, Role, UserProfile, UserStats};
pub use server::ServerInfo;
pub use services::{
    ServiceActionResponse, ServiceCatalogEntry, ServiceCredentials, ServiceCredentialsResponse,
    ServiceInstance, ServiceRequest, ServiceStartResponse,
};
