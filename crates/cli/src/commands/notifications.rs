//! Notifications command implementation.

use anyhow::Result;
use clap::Subcommand;

use crate::cancellation::CancellationToken;
use crate::commands::cancellable;
use crate::context::AppContext;
use crate::formatters::{OutputFormat, get_formatter, print_output};

#[derive(Debug, Subcommand)]
pub enum NotificationsCommand {
    /// List notifications, newest first
    List {
        /// Only unread notifications
        #[arg(long)]
        unread: bool,
    },
    /// Print the number of unread notifications
    Count,
    /// Mark one notification as read
    Read {
        /// Notification ID
        id: String,
    },
    /// Mark all notifications as read
    ReadAll,
    /// Delete a notification
    Delete {
        /// Notification ID
        id: String,
    },
}

pub async fn run(
    ctx: &AppContext,
    command: NotificationsCommand,
    output_format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    let formatter = get_formatter(output_format);
    let mut client = ctx.authed_client()?;

    let output = match command {
        NotificationsCommand::List { unread } => {
            let items = cancellable(cancel, client.get_notifications(unread)).await?;
            formatter.format_notifications(&items)?
        }
        NotificationsCommand::Count => {
            let count = cancellable(cancel, client.get_unread_count()).await?;
            formatter.format_unread_count(count)?
        }
        NotificationsCommand::Read { id } => {
            let resp = cancellable(cancel, client.mark_notification_read(&id)).await?;
            formatter.format_message(&resp)?
        }
        NotificationsCommand::ReadAll => {
            let resp = cancellable(cancel, client.mark_all_notifications_read()).await?;
            formatter.format_message(&resp)?
        }
        NotificationsCommand::Delete { id } => {
            let resp = cancellable(cancel, client.delete_notification(&id)).await?;
            formatter.format_message(&resp)?
        }
    };

    print_output(&output);
    Ok(())
}
