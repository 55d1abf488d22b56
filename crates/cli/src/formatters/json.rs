//! JSON formatter implementation.
//!
//! Responsibilities:
//! - Format all resource types as pretty-printed JSON.
//!
//! Does NOT handle:
//! - Other output formats.

use anyhow::Result;
use selfmade_client::{
    AdminStats, AuditLogEntry, Lab, LabActionResponse, LabStatus, ManagedUser, MessageResponse,
    Notification, ServiceActionResponse, ServiceCatalogEntry, ServiceCredentials,
    ServiceCredentialsResponse, ServiceInstance, ServiceStartResponse, UserMutationResponse,
    UserProfile, UserStats,
};
use selfmade_config::ThemeChanged;
use serde::Serialize;
use serde_json::Value;

use super::common::CredentialsView;
use super::{AuthStatus, Formatter, LoginOutcome, LogoutOutcome, ThemeStatus};

/// JSON formatter.
pub struct JsonFormatter;

fn pretty<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Serialize `value` with its `credentials` field replaced by a masked view.
fn with_credentials<T: Serialize>(
    value: &T,
    credentials: Option<&ServiceCredentials>,
    reveal: bool,
) -> Result<Value> {
    let mut json = serde_json::to_value(value)?;
    if let (Some(creds), Some(obj)) = (credentials, json.as_object_mut()) {
        obj.insert(
            "credentials".to_string(),
            serde_json::to_value(CredentialsView::new(creds, reveal))?,
        );
    }
    Ok(json)
}

impl Formatter for JsonFormatter {
    fn format_profile(&self, profile: &UserProfile) -> Result<String> {
        pretty(profile)
    }

    fn format_user_stats(&self, stats: &UserStats) -> Result<String> {
        pretty(stats)
    }

    fn format_message(&self, message: &MessageResponse) -> Result<String> {
        pretty(message)
    }

    fn format_labs(&self, labs: &[Lab]) -> Result<String> {
        pretty(labs)
    }

    fn format_lab_action(&self, response: &LabActionResponse) -> Result<String> {
        pretty(response)
    }

    fn format_lab_status(&self, status: &LabStatus) -> Result<String> {
        pretty(status)
    }

    fn format_services_catalog(&self, services: &[ServiceCatalogEntry]) -> Result<String> {
        pretty(services)
    }

    fn format_service_start(
        &self,
        response: &ServiceStartResponse,
        reveal: bool,
    ) -> Result<String> {
        pretty(&with_credentials(
            response,
            response.credentials.as_ref(),
            reveal,
        )?)
    }

    fn format_service_action(&self, response: &ServiceActionResponse) -> Result<String> {
        pretty(response)
    }

    fn format_service_instances(
        &self,
        instances: &[ServiceInstance],
        reveal: bool,
    ) -> Result<String> {
        let values = instances
            .iter()
            .map(|i| with_credentials(i, i.credentials.as_ref(), reveal))
            .collect::<Result<Vec<_>>>()?;
        pretty(&values)
    }

    fn format_service_credentials(
        &self,
        response: &ServiceCredentialsResponse,
        reveal: bool,
    ) -> Result<String> {
        pretty(&with_credentials(
            response,
            response.credentials.as_ref(),
            reveal,
        )?)
    }

    fn format_notifications(&self, notifications: &[Notification]) -> Result<String> {
        pretty(notifications)
    }

    fn format_unread_count(&self, count: u64) -> Result<String> {
        pretty(&serde_json::json!({ "count": count }))
    }

    fn format_managed_users(&self, users: &[ManagedUser]) -> Result<String> {
        pretty(users)
    }

    fn format_user_mutation(&self, response: &UserMutationResponse) -> Result<String> {
        pretty(response)
    }

    fn format_audit_logs(&self, entries: &[AuditLogEntry]) -> Result<String> {
        pretty(entries)
    }

    fn format_admin_stats(&self, stats: &AdminStats) -> Result<String> {
        pretty(stats)
    }

    fn format_theme(&self, status: &ThemeStatus) -> Result<String> {
        pretty(status)
    }

    fn format_theme_event(&self, event: &ThemeChanged) -> Result<String> {
        // One compact object per line so `theme watch` output can be streamed
        Ok(serde_json::to_string(event)?)
    }

    fn format_auth_status(&self, status: &AuthStatus) -> Result<String> {
        pretty(status)
    }

    fn format_login(&self, outcome: &LoginOutcome) -> Result<String> {
        pretty(outcome)
    }

    fn format_logout(&self, outcome: &LogoutOutcome) -> Result<String> {
        pretty(outcome)
    }
}
