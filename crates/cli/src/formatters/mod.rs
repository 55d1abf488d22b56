//! Output formatters for CLI commands.
//!
//! Responsibilities:
//! - Provide JSON and table output for every resource the CLI prints.
//! - Mask service passwords unless the caller asks to reveal them.
//!
//! Does NOT handle:
//! - Direct printing to stdout (returns formatted strings).
//!
//! Invariants:
//! - JSON output is always valid JSON; empty lists print as `[]`.
//! - Tables are tab-separated; empty lists print a human message.
//! - Missing values print as `N/A` in tables and `null` in JSON.

use anyhow::Result;
use clap::ValueEnum;
use selfmade_client::{
    AdminStats, AuditLogEntry, Lab, LabActionResponse, LabStatus, ManagedUser, MessageResponse,
    Notification, ServerInfo, ServiceActionResponse, ServiceCatalogEntry,
    ServiceCredentialsResponse, ServiceInstance, ServiceStartResponse, UserMutationResponse,
    UserProfile, UserStats,
};
use selfmade_config::{ColorScheme, ThemeChanged, ThemePreference};
use serde::Serialize;

mod common;
mod json;
mod table;

pub use json::JsonFormatter;
pub use table::TableFormatter;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

/// Theme state as printed by `theme show`.
#[derive(Debug, Clone, Serialize)]
pub struct ThemeStatus {
    pub preference: ThemePreference,
    pub effective: ColorScheme,
    pub system: ColorScheme,
    pub icon: &'static str,
    pub title: &'static str,
}

/// Session state as printed by `auth status`.
#[derive(Debug, Clone, Serialize)]
pub struct AuthStatus {
    pub base_url: String,
    pub authenticated: bool,
    pub token_source: &'static str,
    pub server: Option<ServerInfo>,
    pub server_error: Option<String>,
}

/// Result of `auth login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginOutcome {
    pub stored_in: &'static str,
    pub clean_url: Option<String>,
}

/// Result of `auth logout`.
#[derive(Debug, Clone, Serialize)]
pub struct LogoutOutcome {
    pub redirect: String,
}

/// Formatter trait for the resources the CLI prints.
pub trait Formatter {
    fn format_profile(&self, profile: &UserProfile) -> Result<String>;
    fn format_user_stats(&self, stats: &UserStats) -> Result<String>;
    fn format_message(&self, message: &MessageResponse) -> Result<String>;

    fn format_labs(&self, labs: &[Lab]) -> Result<String>;
    fn format_lab_action(&self, response: &LabActionResponse) -> Result<String>;
    fn format_lab_status(&self, status: &LabStatus) -> Result<String>;

    fn format_services_catalog(&self, services: &[ServiceCatalogEntry]) -> Result<String>;
    fn format_service_start(&self, response: &ServiceStartResponse, reveal: bool)
    -> Result<String>;
    fn format_service_action(&self, response: &ServiceActionResponse) -> Result<String>;
    fn format_service_instances(&self, instances: &[ServiceInstance], reveal: bool)
    -> Result<String>;
    fn format_service_credentials(
        &self,
        response: &ServiceCredentialsResponse,
        reveal: bool,
    ) -> Result<String>;

    fn format_notifications(&self, notifications: &[Notification]) -> Result<String>;
    fn format_unread_count(&self, count: u64) -> Result<String>;

    fn format_managed_users(&self, users: &[ManagedUser]) -> Result<String>;
    fn format_user_mutation(&self, response: &UserMutationResponse) -> Result<String>;
    fn format_audit_logs(&self, entries: &[AuditLogEntry]) -> Result<String>;
    fn format_admin_stats(&self, stats: &AdminStats) -> Result<String>;

    fn format_theme(&self, status: &ThemeStatus) -> Result<String>;
    fn format_theme_event(&self, event: &ThemeChanged) -> Result<String>;

    fn format_auth_status(&self, status: &AuthStatus) -> Result<String>;
    fn format_login(&self, outcome: &LoginOutcome) -> Result<String>;
    fn format_logout(&self, outcome: &LogoutOutcome) -> Result<String>;
}

pub fn get_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Table => Box::new(TableFormatter),
    }
}

/// Print formatted output, ensuring a trailing newline. Empty output prints nothing.
pub fn print_output(output: &str) {
    if output.is_empty() {
        return;
    }
    if output.ends_with('\n') {
        print!("{output}");
    } else {
        println!("{output}");
    }
}
