//! Profile command implementation.

use anyhow::{Result, bail};
use clap::Subcommand;
use selfmade_client::ProfileUpdate;
use selfmade_config::ThemePreference;

use crate::cancellation::CancellationToken;
use crate::commands::cancellable;
use crate::context::AppContext;
use crate::formatters::{OutputFormat, get_formatter, print_output};

#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    /// Show the signed-in user's profile
    Show,
    /// Update name, theme or notification settings
    Update {
        /// Display name
        #[arg(long)]
        full_name: Option<String>,
        /// Theme preference stored on the server (light, dark, auto)
        #[arg(long)]
        theme: Option<ThemePreference>,
        /// Enable or disable notifications
        #[arg(long)]
        notifications: Option<bool>,
    },
    /// Show lab and service usage counters
    Stats,
}

pub async fn run(
    ctx: &AppContext,
    command: ProfileCommand,
    output_format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    let formatter = get_formatter(output_format);
    let mut client = ctx.authed_client()?;

    let output = match command {
        ProfileCommand::Show => {
            let profile = cancellable(cancel, client.get_profile()).await?;
            formatter.format_profile(&profile)?
        }
        ProfileCommand::Update {
            full_name,
            theme,
            notifications,
        } => {
            let update = ProfileUpdate {
                full_name,
                theme,
                notifications_enabled: notifications,
            };
            if update.is_empty() {
                bail!("Nothing to update: pass --full-name, --theme or --notifications");
            }
            let resp = cancellable(cancel, client.update_profile(&update)).await?;
            formatter.format_message(&resp)?
        }
        ProfileCommand::Stats => {
            let stats = cancellable(cancel, client.get_user_stats()).await?;
            formatter.format_user_stats(&stats)?
        }
    };

    print_output(&output);
    Ok(())
}
