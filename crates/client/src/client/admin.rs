//! Admin API methods for [`ApiClient`].
//!
//! # What this module handles:
//! - Creating, listing, re-roling and deleting users
//! - Audit log and platform statistics
//!
//! # What this module does NOT handle:
//! - Checking the caller's role; the server answers 403 for non-admins

use selfmade_config::constants::DEFAULT_AUDIT_LOG_LIMIT;

use crate::client::ApiClient;
use crate::endpoints::encode_path_segment;
use crate::error::Result;
use crate::models::{
    AdminStats, AuditLogEntry, ManagedUser, Role, UserCreateRequest, UserMutationResponse,
    UserRoleUpdate,
};

impl ApiClient {
    pub async fn admin_create_user(
        &mut self,
        request: &UserCreateRequest,
    ) -> Result<UserMutationResponse> {
        self.post("/admin/users", request).await
    }

    pub async fn admin_get_users(&mut self) -> Result<Vec<ManagedUser>> {
        self.get("/admin/users").await
    }

    pub async fn admin_update_user_role(
        &mut self,
        email: &str,
        role: Role,
    ) -> Result<UserMutationResponse> {
        let endpoint = format!("/admin/users/{}/role", encode_path_segment(email));
        self.put(&endpoint, &UserRoleUpdate { role }).await
    }

    pub async fn admin_delete_user(&mut self, email: &str) -> Result<UserMutationResponse> {
        let endpoint = format!("/admin/users/{}", encode_path_segment(email));
        self.delete(&endpoint).await
    }

    /// Audit log, newest first. `None` requests the default of 100 entries.
    pub async fn admin_get_audit_logs(&mut self, limit: Option<u32>) -> Result<Vec<AuditLogEntry>> {
        let limit = limit.unwrap_or(DEFAULT_AUDIT_LOG_LIMIT);
        self.get(&format!("/admin/audit-logs?limit={limit}")).await
    }

    pub async fn admin_get_stats(&mut self) -> Result<AdminStats> {
        self.get("/admin/stats").await
    }
}
