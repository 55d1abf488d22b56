//! Centralized constants for the Selfmade workspace.
//!
//! This module contains default values used across crates to avoid
//! magic number duplication and improve maintainability.

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default base URL of the Selfmade Labs API.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum allowed request timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Default maximum number of retries for rate-limited requests.
pub const DEFAULT_MAX_RETRIES: usize = 3;

/// Upper bound for the configurable retry count.
pub const MAX_MAX_RETRIES: usize = 10;

// =============================================================================
// Local Storage Keys
// =============================================================================

/// Storage key holding the bearer token.
pub const TOKEN_KEY: &str = "selfmade_token";

/// Storage key holding the theme preference.
pub const THEME_KEY: &str = "selfmade_theme";

/// Service name used for OS keyring entries.
pub const KEYRING_SERVICE: &str = "selfmade";

/// Default keyring account for the bearer token.
pub const DEFAULT_KEYRING_ACCOUNT: &str = "api-token";

/// File name of the local key/value store.
pub const STORE_FILE_NAME: &str = "storage.json";

// =============================================================================
// Login Redirects
// =============================================================================

/// Login page location.
pub const LOGIN_PATH: &str = "/ui/login.html";

/// Login page location used when the server rejected the stored token.
pub const SESSION_EXPIRED_REDIRECT: &str = "/ui/login.html?error=session_expired";

// =============================================================================
// API Defaults
// =============================================================================

/// Default number of audit log entries requested by admin views.
pub const DEFAULT_AUDIT_LOG_LIMIT: u32 = 100;

// =============================================================================
// Theme Defaults
// =============================================================================

/// Capacity of the theme change broadcast channel.
pub const DEFAULT_THEME_CHANNEL_CAPACITY: usize = 16;

/// Default polling interval for OS color scheme changes in milliseconds.
pub const DEFAULT_SYSTEM_SCHEME_POLL_MS: u64 = 2000;
