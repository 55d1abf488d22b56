//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Map global flags onto their `SELFMADE_*` environment fallbacks.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not build configuration (see `context` module).

use clap::{Parser, Subcommand, ValueEnum};
use selfmade_config::ColorScheme;
use std::path::PathBuf;

use crate::commands;
use crate::formatters::OutputFormat;

#[derive(Parser)]
#[command(name = "selfmade")]
#[command(about = "Selfmade Labs CLI - Manage labs, services and your account from the command line", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  selfmade auth login --callback-url 'http://localhost:8000/ui/dashboard.html?token=...'\n  selfmade labs list\n  selfmade labs start ubuntu-ssh\n  selfmade services credentials postgresql --reveal\n  selfmade notifications list --unread\n  selfmade -o json admin stats\n  selfmade theme toggle\n"
)]
pub struct Cli {
    /// Base URL of the Selfmade Labs server (e.g., http://localhost:8000)
    #[arg(short, long, global = true, env = "SELFMADE_BASE_URL")]
    pub base_url: Option<String>,

    /// Bearer token to use instead of the stored one
    #[arg(short, long, global = true, env = "SELFMADE_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "SELFMADE_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Maximum number of retries for rate-limited requests
    #[arg(long, global = true, env = "SELFMADE_MAX_RETRIES")]
    pub max_retries: Option<usize>,

    /// Skip TLS certificate verification (for self-signed certificates)
    #[arg(long, global = true)]
    pub skip_verify: bool,

    /// Path of the local store holding the token and theme preference
    #[arg(long, global = true, env = "SELFMADE_STORE_PATH", value_name = "FILE")]
    pub store_path: Option<PathBuf>,

    /// Keep the token in the OS keyring instead of the local store
    #[arg(long, global = true)]
    pub keyring: bool,

    /// Color scheme to assume for the `auto` theme instead of asking the OS
    #[arg(long, global = true, value_enum, value_name = "SCHEME")]
    pub system_scheme: Option<SchemeArg>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Host color scheme accepted by `--system-scheme`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SchemeArg {
    Light,
    Dark,
}

impl From<SchemeArg> for ColorScheme {
    fn from(arg: SchemeArg) -> Self {
        match arg {
            SchemeArg::Light => ColorScheme::Light,
            SchemeArg::Dark => ColorScheme::Dark,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in, sign out and inspect the session
    Auth {
        #[command(subcommand)]
        command: commands::auth::AuthCommand,
    },

    /// Show and edit your profile
    Profile {
        #[command(subcommand)]
        command: commands::profile::ProfileCommand,
    },

    /// Browse, start and stop labs
    Labs {
        #[command(subcommand)]
        command: commands::labs::LabsCommand,
    },

    /// Browse, start and stop services
    Services {
        #[command(subcommand)]
        command: commands::services::ServicesCommand,
    },

    /// Read and manage notifications
    Notifications {
        #[command(subcommand)]
        command: commands::notifications::NotificationsCommand,
    },

    /// Administer users and inspect the platform (admin role required)
    Admin {
        #[command(subcommand)]
        command: commands::admin::AdminCommand,
    },

    /// Show and change the theme preference
    Theme {
        #[command(subcommand)]
        command: commands::theme::ThemeCommand,
    },
}
