//! Labs command implementation.
//!
//! Responsibilities:
//! - List the lab catalog and show the running lab
//! - Start and stop labs
//!
//! Invariants:
//! - A soft failure (`{"error": ...}` with status 200) prints the body and exits non-zero

use anyhow::Result;
use clap::Subcommand;
use tracing::info;

use crate::cancellation::CancellationToken;
use crate::commands::{cancellable, reject_soft_failure};
use crate::context::AppContext;
use crate::formatters::{OutputFormat, get_formatter, print_output};

#[derive(Debug, Subcommand)]
pub enum LabsCommand {
    /// List available labs
    List,
    /// Start a lab
    Start {
        /// Lab ID (e.g., ubuntu-ssh)
        lab_id: String,
    },
    /// Stop a lab
    Stop {
        /// Lab ID
        lab_id: String,
    },
    /// Show the running lab
    Status,
}

pub async fn run(
    ctx: &AppContext,
    command: LabsCommand,
    output_format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    let formatter = get_formatter(output_format);
    let mut client = ctx.authed_client()?;

    match command {
        LabsCommand::List => {
            let labs = cancellable(cancel, client.get_labs()).await?;
            print_output(&formatter.format_labs(&labs)?);
        }
        LabsCommand::Start { lab_id } => {
            info!(lab_id = %lab_id, "Starting lab");
            let resp = cancellable(cancel, client.start_lab(&lab_id)).await?;
            print_output(&formatter.format_lab_action(&resp)?);
            reject_soft_failure(&resp)?;
        }
        LabsCommand::Stop { lab_id } => {
            info!(lab_id = %lab_id, "Stopping lab");
            let resp = cancellable(cancel, client.stop_lab(&lab_id)).await?;
            print_output(&formatter.format_lab_action(&resp)?);
            reject_soft_failure(&resp)?;
        }
        LabsCommand::Status => {
            let status = cancellable(cancel, client.get_lab_status()).await?;
            print_output(&formatter.format_lab_status(&status)?);
            reject_soft_failure(&status)?;
        }
    }

    Ok(())
}
