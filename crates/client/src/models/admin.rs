//! Admin surface models: user management, audit log and platform stats.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::profile::Role;
use crate::serde_helpers::{null_as_empty, opt_naive_datetime};

/// Body for `POST /admin/users`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserCreateRequest {
    pub email: String,
    pub full_name: String,
    #[serde(default)]
    pub role: Role,
}

/// Body for `PUT /admin/users/{email}/role`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRoleUpdate {
    pub role: Role,
}

/// Acknowledgement for create, role change and delete.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserMutationResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// User row from `GET /admin/users`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ManagedUser {
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub full_name: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub oauth_provider: String,
    #[serde(default, deserialize_with = "opt_naive_datetime")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "opt_naive_datetime")]
    pub last_login: Option<NaiveDateTime>,
}

/// Audit log record, newest first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditLogEntry {
    #[serde(default)]
    pub user_email: String,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub details: serde_json::Value,
    #[serde(default, deserialize_with = "opt_naive_datetime")]
    pub timestamp: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserCounts {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub admins: u64,
    #[serde(default)]
    pub regular: u64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LabCounts {
    #[serde(default)]
    pub active: u64,
    #[serde(default)]
    pub total_started: u64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceCounts {
    #[serde(default)]
    pub active: u64,
    #[serde(default)]
    pub total_started: u64,
}

/// Platform statistics from `GET /admin/stats`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdminStats {
    #[serde(default)]
    pub users: UserCounts,
    #[serde(default)]
    pub labs: LabCounts,
    #[serde(default)]
    pub services: ServiceCounts,
}
