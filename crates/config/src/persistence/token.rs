//! Bearer token storage.
//!
//! Responsibilities:
//! - Read, write and remove the API bearer token.
//! - Support the local store, the OS keyring, and a fixed token supplied at startup.
//!
//! Does NOT handle:
//! - Attaching the token to requests (see client crate).
//!
//! Invariants:
//! - Tokens are held as `SecretString` and never logged.
//! - An empty stored token is reported as absent.
//! - Removing a token that is not stored succeeds.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};

use super::{LocalStore, StoreError};
use crate::constants::{KEYRING_SERVICE, TOKEN_KEY};

/// Backend holding the token.
#[derive(Debug)]
pub enum TokenBackend {
    /// Stored under `selfmade_token` in a local key/value store.
    Local(Arc<dyn LocalStore>),
    /// Stored in the OS keyring under `account`.
    Keyring { account: String },
    /// Supplied on the command line or via environment; only lives in memory.
    Fixed(Option<SecretString>),
}

/// Token accessor used by the API client.
#[derive(Debug)]
pub struct TokenStore {
    backend: TokenBackend,
}

impl TokenStore {
    pub fn new(backend: TokenBackend) -> Self {
        Self { backend }
    }

    /// Token kept in a local key/value store.
    pub fn local(store: Arc<dyn LocalStore>) -> Self {
        Self::new(TokenBackend::Local(store))
    }

    /// Token kept in the OS keyring.
    pub fn keyring(account: impl Into<String>) -> Self {
        Self::new(TokenBackend::Keyring {
            account: account.into(),
        })
    }

    /// Token fixed for the lifetime of the process.
    pub fn fixed(token: SecretString) -> Self {
        Self::new(TokenBackend::Fixed(Some(token)))
    }

    /// Store without any token.
    pub fn empty() -> Self {
        Self::new(TokenBackend::Fixed(None))
    }

    pub fn backend(&self) -> &TokenBackend {
        &self.backend
    }

    /// Current token, if any.
    pub fn get_token(&self) -> Option<SecretString> {
        let raw = match &self.backend {
            TokenBackend::Local(store) => store.get_item(TOKEN_KEY),
            TokenBackend::Keyring { account } => read_keyring(account),
            TokenBackend::Fixed(token) => token.as_ref().map(|t| t.expose_secret().to_string()),
        }?;

        if raw.is_empty() {
            None
        } else {
            Some(SecretString::new(raw.into()))
        }
    }

    /// Persist a new token.
    pub fn set_token(&mut self, token: &SecretString) -> Result<(), StoreError> {
        match &mut self.backend {
            TokenBackend::Local(store) => store.set_item(TOKEN_KEY, token.expose_secret()),
            TokenBackend::Keyring { account } => {
                let entry = keyring::Entry::new(KEYRING_SERVICE, account)?;
                entry.set_password(token.expose_secret())?;
                Ok(())
            }
            TokenBackend::Fixed(slot) => {
                *slot = Some(token.clone());
                Ok(())
            }
        }
    }

    /// Forget the token.
    pub fn remove_token(&mut self) -> Result<(), StoreError> {
        match &mut self.backend {
            TokenBackend::Local(store) => store.remove_item(TOKEN_KEY),
            TokenBackend::Keyring { account } => {
                let entry = keyring::Entry::new(KEYRING_SERVICE, account)?;
                match entry.delete_credential() {
                    Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
                    Err(e) => Err(e.into()),
                }
            }
            TokenBackend::Fixed(slot) => {
                *slot = None;
                Ok(())
            }
        }
    }

    /// Whether a token is present.
    pub fn is_authenticated(&self) -> bool {
        self.get_token().is_some()
    }
}

fn read_keyring(account: &str) -> Option<String> {
    let entry = match keyring::Entry::new(KEYRING_SERVICE, account) {
        Ok(entry) => entry,
        Err(e) => {
            tracing::warn!(account = %account, error = %e, "Failed to open keyring entry");
            return None;
        }
    };

    match entry.get_password() {
        Ok(value) => Some(value),
        Err(keyring::Error::NoEntry) => None,
        Err(e) => {
            tracing::warn!(account = %account, error = %e, "Failed to read token from keyring");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string().into())
    }

    #[test]
    fn test_local_token_round_trip() {
        let memory = MemoryStore::new();
        let mut store = TokenStore::local(Arc::new(memory.clone()));

        assert!(!store.is_authenticated());

        store.set_token(&secret("jwt-abc")).unwrap();
        assert!(store.is_authenticated());
        assert_eq!(memory.get_item(TOKEN_KEY).as_deref(), Some("jwt-abc"));
        assert_eq!(store.get_token().unwrap().expose_secret(), "jwt-abc");

        store.remove_token().unwrap();
        assert!(!store.is_authenticated());
        assert!(memory.get_item(TOKEN_KEY).is_none());
    }

    #[test]
    fn test_empty_token_counts_as_absent() {
        let memory = MemoryStore::new();
        memory.set_item(TOKEN_KEY, "").unwrap();
        let store = TokenStore::local(Arc::new(memory));
        assert!(store.get_token().is_none());
    }

    #[test]
    fn test_fixed_token_can_be_removed() {
        let mut store = TokenStore::fixed(secret("cli-token"));
        assert!(store.is_authenticated());

        store.remove_token().unwrap();
        assert!(!store.is_authenticated());

        // Removing twice is fine
        store.remove_token().unwrap();
    }

    #[test]
    fn test_debug_does_not_leak_token() {
        let store = TokenStore::fixed(secret("super-secret-token"));
        let debug = format!("{:?}", store);
        assert!(!debug.contains("super-secret-token"));
    }
}
