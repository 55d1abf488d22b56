//! Services command implementation.
//!
//! Responsibilities:
//! - List the service catalog and running services
//! - Start and stop services
//! - Print service credentials
//!
//! Does NOT handle:
//! - Connecting to the started services
//!
//! Invariants:
//! - Passwords are masked unless `--reveal` is given
//! - A soft failure prints the body and exits non-zero

use anyhow::Result;
use clap::Subcommand;
use tracing::info;

use crate::cancellation::CancellationToken;
use crate::commands::{cancellable, reject_soft_failure};
use crate::context::AppContext;
use crate::formatters::{OutputFormat, get_formatter, print_output};

#[derive(Debug, Subcommand)]
pub enum ServicesCommand {
    /// List available services
    Catalog,
    /// Start a service and print its credentials
    Start {
        /// Service ID (e.g., postgresql)
        service_id: String,
        /// Show the password instead of masking it
        #[arg(long)]
        reveal: bool,
    },
    /// Stop a service
    Stop {
        /// Service ID
        service_id: String,
    },
    /// List running services
    Status {
        /// Show passwords in connection strings
        #[arg(long)]
        reveal: bool,
    },
    /// Print credentials of a running service
    Credentials {
        /// Service ID
        service_id: String,
        /// Show the password instead of masking it
        #[arg(long)]
        reveal: bool,
    },
}

pub async fn run(
    ctx: &AppContext,
    command: ServicesCommand,
    output_format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    let formatter = get_formatter(output_format);
    let mut client = ctx.authed_client()?;

    match command {
        ServicesCommand::Catalog => {
            let catalog = cancellable(cancel, client.get_services_catalog()).await?;
            print_output(&formatter.format_services_catalog(&catalog)?);
        }
        ServicesCommand::Start { service_id, reveal } => {
            info!(service_id = %service_id, "Starting service");
            let resp = cancellable(cancel, client.start_service(&service_id)).await?;
            print_output(&formatter.format_service_start(&resp, reveal)?);
            reject_soft_failure(&resp)?;
        }
        ServicesCommand::Stop { service_id } => {
            info!(service_id = %service_id, "Stopping service");
            let resp = cancellable(cancel, client.stop_service(&service_id)).await?;
            print_output(&formatter.format_service_action(&resp)?);
            reject_soft_failure(&resp)?;
        }
        ServicesCommand::Status { reveal } => {
            let running = cancellable(cancel, client.get_service_status()).await?;
            print_output(&formatter.format_service_instances(&running, reveal)?);
        }
        ServicesCommand::Credentials { service_id, reveal } => {
            let resp = cancellable(cancel, client.get_service_credentials(&service_id)).await?;
            print_output(&formatter.format_service_credentials(&resp, reveal)?);
            reject_soft_failure(&resp)?;
        }
    }

    Ok(())
}
