//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to the matching command handler.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Configuration loading (see `context` module).
//!
//! Invariants:
//! - Every handler receives the shared context and cancellation token.

use anyhow::Result;

use crate::args::{Cli, Commands};
use crate::cancellation::CancellationToken;
use crate::commands;
use crate::context::AppContext;

pub(crate) async fn run_command(
    cli: Cli,
    ctx: &AppContext,
    cancel_token: &CancellationToken,
) -> Result<()> {
    let output = cli.output;

    match cli.command {
        Commands::Auth { command } => commands::auth::run(ctx, command, output, cancel_token).await,
        Commands::Profile { command } => {
            commands::profile::run(ctx, command, output, cancel_token).await
        }
        Commands::Labs { command } => commands::labs::run(ctx, command, output, cancel_token).await,
        Commands::Services { command } => {
            commands::services::run(ctx, command, output, cancel_token).await
        }
        Commands::Notifications { command } => {
            commands::notifications::run(ctx, command, output, cancel_token).await
        }
        Commands::Admin { command } => {
            commands::admin::run(ctx, command, output, cancel_token).await
        }
        Commands::Theme { command } => {
            commands::theme::run(ctx, command, output, cancel_token).await
        }
    }
}
