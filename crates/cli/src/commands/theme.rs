//! Theme command implementation.
//!
//! Responsibilities:
//! - Show, set and toggle the stored theme preference.
//! - Follow OS color scheme changes while the `auto` theme is active.
//!
//! Does NOT handle:
//! - Syncing the preference to the server profile (see `profile update --theme`).
//!
//! Invariants:
//! - Only local state is touched; no token or network access is needed.
//! - `watch` runs until Ctrl+C and then exits successfully.

use std::time::Duration;

use anyhow::Result;
use clap::Subcommand;
use selfmade_config::constants::DEFAULT_SYSTEM_SCHEME_POLL_MS;
use selfmade_config::{InvalidThemeError, ThemeManager};
use tokio::sync::broadcast::error::RecvError;

use crate::cancellation::CancellationToken;
use crate::context::AppContext;
use crate::formatters::{Formatter, OutputFormat, ThemeStatus, get_formatter, print_output};

#[derive(Debug, Subcommand)]
pub enum ThemeCommand {
    /// Show the stored preference and the effective color scheme
    Show,
    /// Set the preference (light, dark, auto)
    Set {
        /// Theme name
        value: String,
    },
    /// Cycle light -> dark -> auto -> light
    Toggle,
    /// Print a line every time the effective theme changes
    Watch {
        /// How often to poll the OS color scheme, in milliseconds
        #[arg(long, default_value_t = DEFAULT_SYSTEM_SCHEME_POLL_MS)]
        interval_ms: u64,
    },
}

fn status(manager: &ThemeManager) -> ThemeStatus {
    let indicator = manager.indicator();
    ThemeStatus {
        preference: manager.applied(),
        effective: manager.effective(),
        system: manager.system_scheme(),
        icon: indicator.icon,
        title: indicator.title,
    }
}

pub async fn run(
    ctx: &AppContext,
    command: ThemeCommand,
    output_format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    let formatter = get_formatter(output_format);
    let manager = ctx.theme_manager();

    match command {
        ThemeCommand::Show => {}
        ThemeCommand::Set { value } => {
            if !manager.set_theme_str(&value) {
                return Err(InvalidThemeError(value).into());
            }
        }
        ThemeCommand::Toggle => {
            manager.toggle();
        }
        ThemeCommand::Watch { interval_ms } => {
            print_output(&formatter.format_theme(&status(&manager))?);
            return watch(&manager, formatter.as_ref(), interval_ms, cancel).await;
        }
    }

    print_output(&formatter.format_theme(&status(&manager))?);
    Ok(())
}

async fn watch(
    manager: &ThemeManager,
    formatter: &dyn Formatter,
    interval_ms: u64,
    cancel: &CancellationToken,
) -> Result<()> {
    let mut events = manager.subscribe();
    let watcher = manager.watch_system(Duration::from_millis(interval_ms.max(1)));
    tracing::debug!(interval_ms, "Watching OS color scheme");

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => print_output(&formatter.format_theme_event(&event)?),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Dropped theme change events");
                }
                Err(RecvError::Closed) => break,
            },
            _ = cancel.cancelled() => break,
        }
    }

    watcher.stop();
    Ok(())
}
