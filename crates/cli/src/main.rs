//! Selfmade CLI - Command-line interface for Selfmade Labs.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Execute API commands via the shared client library.
//! - Format and display results as tables or JSON.
//!
//! Does NOT handle:
//! - REST API implementation (see `crates/client`).
//! - Token and theme persistence (see `crates/config`).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing so `.env` can provide clap defaults.
//! - Logs go to stderr; stdout carries only command output.

mod args;
mod cancellation;
mod commands;
mod context;
mod dispatch;
mod error;
mod formatters;

use args::Cli;
use cancellation::{CancellationToken, is_cancelled_error, print_cancelled_message};
use clap::Parser;
use context::AppContext;
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt};
use selfmade_client::ClientError;
use selfmade_config::ConfigLoader;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() {
    // Load .env file BEFORE CLI parsing so clap env defaults can read .env values
    if let Err(e) = ConfigLoader::new().load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::GeneralError.as_i32());
    }

    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let ctx = match AppContext::from_cli(&cli) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Failed to build configuration: {:#}", e);
            std::process::exit(e.exit_code().as_i32());
        }
    };

    let cancel = CancellationToken::new();
    cancel.cancel_on_ctrl_c();

    tracing::debug!(base_url = %ctx.base_url(), "Running command");

    let exit_code = match run_command(cli, &ctx, &cancel).await {
        Ok(()) => ExitCode::Success,
        Err(e) if is_cancelled_error(&e) => {
            print_cancelled_message();
            ExitCode::Interrupted
        }
        Err(e) => {
            eprintln!("{:#}", e);
            if let Some(redirect) = e
                .chain()
                .find_map(|cause| cause.downcast_ref::<ClientError>())
                .and_then(ClientError::login_redirect)
            {
                eprintln!(
                    "Sign in at {}{} and run `selfmade auth login`",
                    ctx.base_url(),
                    redirect
                );
            }
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}
