//! Runtime context shared by all commands.
//!
//! Responsibilities:
//! - Build the `Config` from CLI flags and `SELFMADE_*` environment variables.
//! - Open the local store and choose where the bearer token lives.
//! - Construct API clients and the theme manager.
//!
//! Does NOT handle:
//! - `.env` loading (done in `main` before argument parsing).
//!
//! Invariants:
//! - A token passed with `--api-token` / `SELFMADE_TOKEN` is used for requests
//!   but never persisted; `auth login` always writes to the persistent backend.

use std::sync::Arc;

use anyhow::{Context, Result};
use selfmade_client::{ApiClient, require_auth};
use selfmade_config::{
    Config, ConfigLoader, FileStore, FixedColorScheme, LocalStore, OsColorScheme,
    SystemColorScheme, ThemeManager, TokenStorage, TokenStore,
};

use crate::args::Cli;

pub struct AppContext {
    config: Config,
    store: Arc<FileStore>,
    system: Arc<dyn SystemColorScheme>,
}

impl AppContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut loader = ConfigLoader::new();

        if let Some(ref url) = cli.base_url {
            loader = loader.with_base_url(url.clone());
        }
        if let Some(ref token) = cli.api_token {
            loader = loader.with_token(token.clone());
        }
        if let Some(timeout_secs) = cli.timeout {
            loader = loader.with_timeout(std::time::Duration::from_secs(timeout_secs));
        }
        if let Some(retries) = cli.max_retries {
            loader = loader.with_max_retries(retries);
        }
        if cli.skip_verify {
            loader = loader.with_skip_verify(true);
        }
        if let Some(ref path) = cli.store_path {
            loader = loader.with_store_path(path.clone());
        }
        if cli.keyring {
            loader = loader.with_keyring(true);
        }

        // Environment only fills values the flags left unset
        let config = loader.from_env()?.build()?;

        let store = match config.store_path {
            Some(ref path) => FileStore::open(path.clone()),
            None => FileStore::open_default().context("Failed to locate the local store")?,
        };
        tracing::debug!(path = %store.path().display(), "Using local store");

        let system: Arc<dyn SystemColorScheme> = match cli.system_scheme {
            Some(scheme) => Arc::new(FixedColorScheme::new(scheme.into())),
            None => Arc::new(OsColorScheme),
        };

        Ok(Self {
            config,
            store: Arc::new(store),
            system,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.config.connection.base_url
    }

    /// Where `auth login` stores the token.
    pub fn persistent_tokens(&self) -> TokenStore {
        match self.config.token_storage {
            TokenStorage::Keyring { ref account } => TokenStore::keyring(account.clone()),
            TokenStorage::Local => TokenStore::local(self.local_store()),
        }
    }

    /// Token store used for requests.
    pub fn request_tokens(&self) -> TokenStore {
        match self.config.token {
            Some(ref token) => TokenStore::fixed(token.clone()),
            None => self.persistent_tokens(),
        }
    }

    /// Name of the persistent token backend.
    pub fn storage_name(&self) -> &'static str {
        match self.config.token_storage {
            TokenStorage::Keyring { .. } => "keyring",
            TokenStorage::Local => "local store",
        }
    }

    /// Describe where request tokens come from.
    pub fn token_source(&self) -> &'static str {
        if self.config.token.is_some() {
            "environment"
        } else {
            self.storage_name()
        }
    }

    pub fn local_store(&self) -> Arc<dyn LocalStore> {
        self.store.clone()
    }

    /// Client for endpoints that do not need a token.
    pub fn client(&self) -> Result<ApiClient> {
        let client = ApiClient::builder()
            .from_config(&self.config)
            .token_store(self.request_tokens())
            .build()?;
        Ok(client)
    }

    /// Client for endpoints behind login; fails with a login redirect when no token is stored.
    pub fn authed_client(&self) -> Result<ApiClient> {
        let tokens = self.request_tokens();
        if let Err(redirect) = require_auth(&tokens) {
            let location = redirect.absolute(self.base_url());
            return Err(anyhow::Error::new(redirect).context(format!(
                "Not logged in. Sign in at {location} and run `selfmade auth login`"
            )));
        }

        let client = ApiClient::builder()
            .from_config(&self.config)
            .token_store(tokens)
            .build()?;
        Ok(client)
    }

    pub fn theme_manager(&self) -> ThemeManager {
        ThemeManager::new(self.local_store(), self.system.clone())
    }
}
