//! Auth command implementation.
//!
//! Responsibilities:
//! - Store a bearer token given directly or inside an OAuth callback URL.
//! - Log out on the server and drop the stored token.
//! - Report whether a token is stored and whether the server answers.
//!
//! Does NOT handle:
//! - The OAuth flow itself; users finish it in a browser and paste the
//!   callback URL.

use anyhow::{Result, bail};
use clap::Subcommand;
use secrecy::SecretString;
use selfmade_client::extract_token_from_url;
use tracing::info;

use crate::cancellation::CancellationToken;
use crate::commands::cancellable;
use crate::context::AppContext;
use crate::formatters::{
    AuthStatus, LoginOutcome, LogoutOutcome, OutputFormat, get_formatter, print_output,
};

#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Store a bearer token
    Login {
        /// Token to store
        #[arg(long, conflicts_with = "callback_url", required_unless_present = "callback_url")]
        token: Option<String>,
        /// OAuth callback URL carrying `?token=...`
        #[arg(long, value_name = "URL")]
        callback_url: Option<String>,
    },
    /// Log out on the server and remove the stored token
    Logout,
    /// Show where the token comes from and whether the server is reachable
    Status,
}

pub async fn run(
    ctx: &AppContext,
    command: AuthCommand,
    output_format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    let formatter = get_formatter(output_format);

    match command {
        AuthCommand::Login {
            token,
            callback_url,
        } => {
            let mut tokens = ctx.persistent_tokens();
            let clean_url = match (token, callback_url) {
                (Some(token), _) => {
                    if token.trim().is_empty() {
                        bail!("Token must not be empty");
                    }
                    tokens.set_token(&SecretString::new(token.into()))?;
                    None
                }
                (None, Some(url)) => match extract_token_from_url(&url, &mut tokens)? {
                    Some(extraction) => Some(extraction.clean_url),
                    None => bail!("No token found in callback URL"),
                },
                (None, None) => bail!("Either --token or --callback-url is required"),
            };

            let stored_in = ctx.storage_name();
            info!(stored_in, "Stored bearer token");

            print_output(&formatter.format_login(&LoginOutcome {
                stored_in,
                clean_url,
            })?);
        }
        AuthCommand::Logout => {
            let mut client = ctx.authed_client()?;
            let redirect = cancellable(cancel, client.logout()).await?;
            print_output(&formatter.format_logout(&LogoutOutcome {
                redirect: redirect.absolute(ctx.base_url()),
            })?);
        }
        AuthCommand::Status => {
            let mut client = ctx.client()?;
            let authenticated = client.is_authenticated();
            let (server, server_error) =
                match cancellable(cancel, client.get_server_info()).await {
                    Ok(info) => (Some(info), None),
                    Err(e) if crate::cancellation::is_cancelled_error(&e) => return Err(e),
                    Err(e) => (None, Some(format!("{e:#}"))),
                };

            print_output(&formatter.format_auth_status(&AuthStatus {
                base_url: ctx.base_url().to_string(),
                authenticated,
                token_source: ctx.token_source(),
                server,
                server_error,
            })?);
        }
    }

    Ok(())
}
