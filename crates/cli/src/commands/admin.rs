//! Admin command implementation.
//!
//! Responsibilities:
//! - Create, list, re-role and delete users
//! - Read the audit log and platform statistics
//!
//! Does NOT handle:
//! - Role checks; the server answers 403 for non-admins (exit code 6)

use anyhow::Result;
use clap::Subcommand;
use selfmade_client::{Role, UserCreateRequest};
use selfmade_config::constants::DEFAULT_AUDIT_LOG_LIMIT;
use tracing::info;

use crate::cancellation::CancellationToken;
use crate::commands::cancellable;
use crate::context::AppContext;
use crate::formatters::{OutputFormat, get_formatter, print_output};

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// List all users
    Users,
    /// Create a user ahead of their first OAuth login
    CreateUser {
        /// Email address
        email: String,
        /// Display name
        #[arg(long)]
        full_name: String,
        /// Role to assign (admin, user)
        #[arg(long, default_value_t = Role::User)]
        role: Role,
    },
    /// Change a user's role
    SetRole {
        /// Email address
        email: String,
        /// New role (admin, user)
        role: Role,
    },
    /// Delete a user
    DeleteUser {
        /// Email address
        email: String,
    },
    /// Show recent audit log entries
    AuditLogs {
        /// Maximum number of entries
        #[arg(short, long, default_value_t = DEFAULT_AUDIT_LOG_LIMIT)]
        limit: u32,
    },
    /// Show platform statistics
    Stats,
}

pub async fn run(
    ctx: &AppContext,
    command: AdminCommand,
    output_format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    let formatter = get_formatter(output_format);
    let mut client = ctx.authed_client()?;

    let output = match command {
        AdminCommand::Users => {
            let users = cancellable(cancel, client.admin_get_users()).await?;
            formatter.format_managed_users(&users)?
        }
        AdminCommand::CreateUser {
            email,
            full_name,
            role,
        } => {
            info!(email = %email, role = %role, "Creating user");
            let request = UserCreateRequest {
                email,
                full_name,
                role,
            };
            let resp = cancellable(cancel, client.admin_create_user(&request)).await?;
            formatter.format_user_mutation(&resp)?
        }
        AdminCommand::SetRole { email, role } => {
            info!(email = %email, role = %role, "Updating user role");
            let resp = cancellable(cancel, client.admin_update_user_role(&email, role)).await?;
            formatter.format_user_mutation(&resp)?
        }
        AdminCommand::DeleteUser { email } => {
            info!(email = %email, "Deleting user");
            let resp = cancellable(cancel, client.admin_delete_user(&email)).await?;
            formatter.format_user_mutation(&resp)?
        }
        AdminCommand::AuditLogs { limit } => {
            let entries = cancellable(cancel, client.admin_get_audit_logs(Some(limit))).await?;
            formatter.format_audit_logs(&entries)?
        }
        AdminCommand::Stats => {
            let stats = cancellable(cancel, client.admin_get_stats()).await?;
            formatter.format_admin_stats(&stats)?
        }
    };

    print_output(&output);
    Ok(())
}
