//! Table formatter implementation.
//!
//! Responsibilities:
//! - Format lists as tab-separated tables with a header row.
//! - Format single objects as `Key: Value` lines.
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

use super::common::{CredentialsView, format_missing, format_missing_display, format_timestamp};
use super::{AuthStatus, Formatter, LoginOutcome, LogoutOutcome, ThemeStatus};

/// Table formatter.
pub struct TableFormatter;

fn table(header: &[&str], rows: impl IntoIterator<Item = Vec<String>>) -> String {
    let mut output = header.join("\t");
    output.push('\n');
    for row in rows {
        output.push_str(&row.join("\t"));
        output.push('\n');
    }
    output
}

fn fields(pairs: &[(&str, String)]) -> String {
    let mut output = String::new();
    for (key, value) in pairs {
        output.push_str(&format!("{key}: {value}\n"));
    }
    output
}

fn credentials_fields(
    credentials: &ServiceCredentials,
    reveal: bool,
) -> Vec<(&'static str, String)> {
    let view = CredentialsView::new(credentials, reveal);
    let mut pairs = vec![
        ("Host", view.host),
        ("Port", view.port.to_string()),
        ("Username", view.username),
        ("Password", view.password),
        ("Connection String", view.connection_string),
    ];
    if let Some(url) = view.management_url {
        pairs.push(("Management URL", url));
    }
    pairs
}

impl Formatter for TableFormatter {
    fn format_profile(&self, profile: &UserProfile) -> Result<String> {
        Ok(fields(&[
            ("Email", profile.email.clone()),
            ("Name", format_missing(Some(&profile.full_name)).to_string()),
            ("Role", profile.role.to_string()),
            (
                "Provider",
                format_missing(Some(&profile.oauth_provider)).to_string(),
            ),
            ("Theme", profile.theme_preference.to_string()),
            (
                "Notifications",
                if profile.notifications_enabled {
                    "enabled".to_string()
                } else {
                    "disabled".to_string()
                },
            ),
            ("Created", format_timestamp(profile.created_at)),
            ("Last Login", format_timestamp(profile.last_login)),
        ]))
    }

    fn format_user_stats(&self, stats: &UserStats) -> Result<String> {
        Ok(fields(&[
            ("Labs Started", stats.labs_started_total.to_string()),
            ("Services Started", stats.services_started_total.to_string()),
            ("Active Labs", stats.active_labs.to_string()),
            ("Active Services", stats.active_services.to_string()),
        ]))
    }

    fn format_message(&self, message: &MessageResponse) -> Result<String> {
        Ok(format_missing(Some(&message.message)).to_string())
    }

    fn format_labs(&self, labs: &[Lab]) -> Result<String> {
        if labs.is_empty() {
            return Ok("No labs found.".to_string());
        }
        Ok(table(
            &["ID", "Name", "Type", "Description"],
            labs.iter().map(|lab| {
                vec![
                    lab.id.clone(),
                    lab.name.clone(),
                    format_missing(lab.kind.as_deref()).to_string(),
                    format_missing(lab.description.as_deref()).to_string(),
                ]
            }),
        ))
    }

    fn format_lab_action(&self, response: &LabActionResponse) -> Result<String> {
        let mut output = String::new();
        if let Some(message) = &response.message {
            output.push_str(&format!("{message}\n"));
        }
        if let Some(lab) = &response.lab {
            output.push_str(&format!("Lab: {lab}\n"));
        }
        if let Some(port) = response.port {
            output.push_str(&format!("SSH Port: {port}\n"));
        }
        Ok(output)
    }

    fn format_lab_status(&self, status: &LabStatus) -> Result<String> {
        if !status.is_running() && status.lab.is_none() {
            return Ok(status
                .message
                .clone()
                .unwrap_or_else(|| "No lab running.".to_string()));
        }
        Ok(fields(&[
            ("Lab", format_missing(status.lab.as_deref()).to_string()),
            ("Status", format_missing(status.status.as_deref()).to_string()),
            ("Port", format_missing_display(status.port)),
            ("Container", format_missing(status.container.as_deref()).to_string()),
            ("Started", format_timestamp(status.started_at)),
        ]))
    }

    fn format_services_catalog(&self, services: &[ServiceCatalogEntry]) -> Result<String> {
        if services.is_empty() {
            return Ok("No services found.".to_string());
        }
        Ok(table(
            &["ID", "Name", "Port", "Management Port", "Description"],
            services.iter().map(|s| {
                vec![
                    s.id.clone(),
                    s.name.clone(),
                    format_missing_display(s.port),
                    format_missing_display(s.management_port),
                    format_missing(s.description.as_deref()).to_string(),
                ]
            }),
        ))
    }

    fn format_service_start(
        &self,
        response: &ServiceStartResponse,
        reveal: bool,
    ) -> Result<String> {
        let mut output = String::new();
        if let Some(service) = &response.service {
            output.push_str(&format!(
                "{service} {}\n",
                response.status.as_deref().unwrap_or("started")
            ));
        }
        if let Some(creds) = &response.credentials {
            output.push_str(&fields(&credentials_fields(creds, reveal)));
        }
        Ok(output)
    }

    fn format_service_action(&self, response: &ServiceActionResponse) -> Result<String> {
        let mut output = String::new();
        if let Some(message) = &response.message {
            output.push_str(message);
            if let Some(service) = &response.service {
                output.push_str(&format!(" ({service})"));
            }
            output.push('\n');
        }
        Ok(output)
    }

    fn format_service_instances(
        &self,
        instances: &[ServiceInstance],
        reveal: bool,
    ) -> Result<String> {
        if instances.is_empty() {
            return Ok("No services running.".to_string());
        }
        Ok(table(
            &["ID", "Name", "Status", "Port", "Connection String", "Started"],
            instances.iter().map(|i| {
                let connection = i
                    .credentials
                    .as_ref()
                    .map(|c| CredentialsView::new(c, reveal).connection_string);
                vec![
                    i.service_id.clone(),
                    i.service_name.clone(),
                    i.status.clone(),
                    format_missing_display(i.port),
                    format_missing(connection.as_deref()).to_string(),
                    format_timestamp(i.started_at),
                ]
            }),
        ))
    }

    fn format_service_credentials(
        &self,
        response: &ServiceCredentialsResponse,
        reveal: bool,
    ) -> Result<String> {
        let mut output = String::new();
        if let Some(service) = &response.service {
            output.push_str(&format!("Service: {service}\n"));
        }
        if let Some(creds) = &response.credentials {
            output.push_str(&fields(&credentials_fields(creds, reveal)));
        }
        Ok(output)
    }

    fn format_notifications(&self, notifications: &[Notification]) -> Result<String> {
        if notifications.is_empty() {
            return Ok("No notifications.".to_string());
        }
        Ok(table(
            &["ID", "Read", "Type", "Title", "Message", "Created"],
            notifications.iter().map(|n| {
                vec![
                    n.id.clone(),
                    if n.read { "yes" } else { "no" }.to_string(),
                    n.kind.clone(),
                    n.title.clone(),
                    n.message.clone(),
                    format_timestamp(n.created_at),
                ]
            }),
        ))
    }

    fn format_unread_count(&self, count: u64) -> Result<String> {
        Ok(format!("Unread: {count}"))
    }

    fn format_managed_users(&self, users: &[ManagedUser]) -> Result<String> {
        if users.is_empty() {
            return Ok("No users found.".to_string());
        }
        Ok(table(
            &["Email", "Name", "Role", "Provider", "Created", "Last Login"],
            users.iter().map(|u| {
                vec![
                    u.email.clone(),
                    format_missing(Some(&u.full_name)).to_string(),
                    u.role.to_string(),
                    format_missing(Some(&u.oauth_provider)).to_string(),
                    format_timestamp(u.created_at),
                    format_timestamp(u.last_login),
                ]
            }),
        ))
    }

    fn format_user_mutation(&self, response: &UserMutationResponse) -> Result<String> {
        let mut output = format!("{}\n", format_missing(Some(&response.message)));
        if !response.email.is_empty() {
            output.push_str(&format!("Email: {}\n", response.email));
        }
        if let Some(role) = response.role {
            output.push_str(&format!("Role: {role}\n"));
        }
        Ok(output)
    }

    fn format_audit_logs(&self, entries: &[AuditLogEntry]) -> Result<String> {
        if entries.is_empty() {
            return Ok("No audit log entries.".to_string());
        }
        Ok(table(
            &["Timestamp", "User", "Action", "Target", "Details"],
            entries.iter().map(|e| {
                vec![
                    format_timestamp(e.timestamp),
                    e.user_email.clone(),
                    e.action.clone(),
                    format_missing(Some(&e.target)).to_string(),
                    if e.details.is_null() {
                        String::new()
                    } else {
                        e.details.to_string()
                    },
                ]
            }),
        ))
    }

    fn format_admin_stats(&self, stats: &AdminStats) -> Result<String> {
        Ok(fields(&[
            ("Users", stats.users.total.to_string()),
            ("Admins", stats.users.admins.to_string()),
            ("Regular Users", stats.users.regular.to_string()),
            ("Active Labs", stats.labs.active.to_string()),
            ("Labs Started", stats.labs.total_started.to_string()),
            ("Active Services", stats.services.active.to_string()),
            ("Services Started", stats.services.total_started.to_string()),
        ]))
    }

    fn format_theme(&self, status: &ThemeStatus) -> Result<String> {
        Ok(fields(&[
            ("Preference", status.preference.to_string()),
            ("Effective", status.effective.to_string()),
            ("System", status.system.to_string()),
            ("Icon", status.icon.to_string()),
            ("Title", status.title.to_string()),
        ]))
    }

    fn format_theme_event(&self, event: &ThemeChanged) -> Result<String> {
        Ok(format!(
            "Theme changed: {} ({})",
            event.preference, event.effective
        ))
    }

    fn format_auth_status(&self, status: &AuthStatus) -> Result<String> {
        let server = match (&status.server, &status.server_error) {
            (Some(info), _) => format!(
                "{} (version {})",
                info.status,
                format_missing(info.version.as_deref())
            ),
            (None, Some(err)) => format!("unreachable: {err}"),
            (None, None) => "not checked".to_string(),
        };
        Ok(fields(&[
            ("Server", status.base_url.clone()),
            ("Status", server),
            (
                "Authenticated",
                if status.authenticated { "yes" } else { "no" }.to_string(),
            ),
            ("Token Source", status.token_source.to_string()),
        ]))
    }

    fn format_login(&self, outcome: &LoginOutcome) -> Result<String> {
        let mut output = format!("Token stored in {}\n", outcome.stored_in);
        if let Some(url) = &outcome.clean_url {
            output.push_str(&format!("Continue at {url}\n"));
        }
        Ok(output)
    }

    fn format_logout(&self, outcome: &LogoutOutcome) -> Result<String> {
        Ok(format!("Logged out. Sign in again at {}", outcome.redirect))
    }
}
