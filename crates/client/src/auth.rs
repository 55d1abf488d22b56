//! Login helpers: OAuth callback token capture and auth gating.
//!
//! Responsibilities:
//! - Pull the bearer token out of an OAuth callback URL and store it.
//! - Report where to send the user when no token is stored.
//!
//! Does NOT handle:
//! - The OAuth flow itself, which runs server-side.
//! - Token removal on 401 (see `ApiClient`).

use secrecy::SecretString;
use selfmade_config::TokenStore;
use selfmade_config::constants::{LOGIN_PATH, SESSION_EXPIRED_REDIRECT};
use thiserror::Error;
use url::Url;

use crate::error::{ClientError, Result};

/// Base used to resolve callback URLs given as a bare path.
const RELATIVE_BASE: &str = "http://localhost/";

/// Location the user must visit to sign in.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Login required, continue at {location}")]
pub struct LoginRedirect {
    location: String,
}

impl LoginRedirect {
    /// Plain login page.
    pub fn login() -> Self {
        Self {
            location: LOGIN_PATH.to_string(),
        }
    }

    /// Login page flagged with `error=session_expired`.
    pub fn session_expired() -> Self {
        Self {
            location: SESSION_EXPIRED_REDIRECT.to_string(),
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Location resolved against the server's base URL.
    pub fn absolute(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.location)
    }
}

/// Token captured from an OAuth callback.
#[derive(Debug, Clone)]
pub struct TokenExtraction {
    pub token: SecretString,
    /// Path of the callback URL with the query removed.
    pub clean_url: String,
}

/// Capture the `token` query parameter from an OAuth callback URL.
///
/// When present and non-empty the token is stored and returned with the
/// cleaned URL (path only). Returns `Ok(None)` when the URL carries no token.
pub fn extract_token_from_url(
    url: &str,
    tokens: &mut TokenStore,
) -> Result<Option<TokenExtraction>> {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(RELATIVE_BASE)
            .and_then(|base| base.join(url))
            .map_err(|e| ClientError::InvalidUrl(format!("{url}: {e}")))?,
        Err(e) => return Err(ClientError::InvalidUrl(format!("{url}: {e}"))),
    };

    let Some(raw) = parsed
        .query_pairs()
        .find(|(key, _)| key == "token")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
    else {
        return Ok(None);
    };

    let token = SecretString::new(raw.into());
    tokens.set_token(&token)?;
    tracing::debug!(path = %parsed.path(), "Stored token from callback URL");

    Ok(Some(TokenExtraction {
        token,
        clean_url: parsed.path().to_string(),
    }))
}

/// Gate an action on a stored token.
pub fn require_auth(tokens: &TokenStore) -> std::result::Result<(), LoginRedirect> {
    if tokens.is_authenticated() {
        Ok(())
    } else {
        Err(LoginRedirect::login())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use selfmade_config::MemoryStore;
    use std::sync::Arc;

    fn store() -> TokenStore {
        TokenStore::local(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_extracts_and_stores_token() {
        let mut tokens = store();
        let extraction = extract_token_from_url(
            "https://labs.example.com/ui/dashboard.html?token=eyJhbGciOi.abc&tab=labs",
            &mut tokens,
        )
        .unwrap()
        .unwrap();

        assert_eq!(extraction.token.expose_secret(), "eyJhbGciOi.abc");
        assert_eq!(extraction.clean_url, "/ui/dashboard.html");
        assert_eq!(tokens.get_token().unwrap().expose_secret(), "eyJhbGciOi.abc");
    }

    #[test]
    fn test_relative_callback_url() {
        let mut tokens = store();
        let extraction = extract_token_from_url("/ui/dashboard.html?token=t1", &mut tokens)
            .unwrap()
            .unwrap();
        assert_eq!(extraction.clean_url, "/ui/dashboard.html");
    }

    #[test]
    fn test_percent_encoded_token_is_decoded() {
        let mut tokens = store();
        let extraction = extract_token_from_url("/ui/dashboard.html?token=a%2Bb", &mut tokens)
            .unwrap()
            .unwrap();
        assert_eq!(extraction.token.expose_secret(), "a+b");
    }

    #[test]
    fn test_missing_or_empty_token() {
        let mut tokens = store();
        assert!(
            extract_token_from_url("/ui/login.html?error=oauth_failed", &mut tokens)
                .unwrap()
                .is_none()
        );
        assert!(
            extract_token_from_url("/ui/dashboard.html?token=", &mut tokens)
                .unwrap()
                .is_none()
        );
        assert!(!tokens.is_authenticated());
    }

    #[test]
    fn test_require_auth() {
        let mut tokens = store();
        assert_eq!(require_auth(&tokens), Err(LoginRedirect::login()));

        tokens
            .set_token(&SecretString::new("t".to_string().into()))
            .unwrap();
        assert!(require_auth(&tokens).is_ok());
    }

    #[test]
    fn test_redirect_absolute() {
        assert_eq!(
            LoginRedirect::session_expired().absolute("https://labs.example.com/"),
            "https://labs.example.com/ui/login.html?error=session_expired"
        );
    }
}
