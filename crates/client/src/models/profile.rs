//! Profile models for `/me` and `/profile`.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use selfmade_config::ThemePreference;
use serde::{Deserialize, Serialize};

use crate::serde_helpers::{lenient_theme, null_as_empty, opt_naive_datetime};

/// Platform role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            other => Err(format!("unknown role '{other}', expected admin or user")),
        }
    }
}

/// Signed-in user's profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub full_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub avatar_url: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub oauth_provider: String,
    #[serde(default, deserialize_with = "lenient_theme")]
    pub theme_preference: ThemePreference,
    #[serde(default = "default_true")]
    pub notifications_enabled: bool,
    #[serde(default, deserialize_with = "opt_naive_datetime")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "opt_naive_datetime")]
    pub last_login: Option<NaiveDateTime>,
}

fn default_true() -> bool {
    true
}

impl UserProfile {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Partial profile update; unset fields are left untouched by the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemePreference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications_enabled: Option<bool>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.theme.is_none() && self.notifications_enabled.is_none()
    }
}

/// Usage counters from `/profile/stats`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserStats {
    #[serde(default)]
    pub labs_started_total: u64,
    #[serde(default)]
    pub services_started_total: u64,
    #[serde(default)]
    pub active_labs: u64,
    #[serde(default)]
    pub active_services: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_profile() {
        let json = r#"{
            "email": "ann@example.com",
            "full_name": "Ann Example",
            "avatar_url": "",
            "role": "admin",
            "oauth_provider": "github",
            "theme_preference": "dark",
            "notifications_enabled": false,
            "created_at": "2025-01-10T08:00:00.512000",
            "last_login": null
        }"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.email, "ann@example.com");
        assert!(profile.is_admin());
        assert_eq!(profile.theme_preference, ThemePreference::Dark);
        assert!(!profile.notifications_enabled);
        assert!(profile.created_at.is_some());
        assert!(profile.last_login.is_none());
    }

    #[test]
    fn test_profile_defaults_for_sparse_payload() {
        let profile: UserProfile =
            serde_json::from_str(r#"{"email": "bob@example.com", "full_name": null}"#).unwrap();
        assert_eq!(profile.full_name, "");
        assert_eq!(profile.role, Role::User);
        assert_eq!(profile.theme_preference, ThemePreference::Auto);
        assert!(profile.notifications_enabled);
    }

    #[test]
    fn test_profile_update_omits_unset_fields() {
        let update = ProfileUpdate {
            theme: Some(ThemePreference::Light),
            ..Default::default()
        };
        assert_eq!(serde_json::to_string(&update).unwrap(), r#"{"theme":"light"}"#);
        assert!(ProfileUpdate::default().is_empty());
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert!("root".parse::<Role>().is_err());
    }
}
