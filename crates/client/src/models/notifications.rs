//! Notification models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::serde_helpers::{null_as_empty, opt_naive_datetime};

/// A user notification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub user_email: String,
    /// Event kind, e.g. `lab_started` or `service_stopped`.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub read: bool,
    #[serde(default, deserialize_with = "opt_naive_datetime")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

/// `{"count": n}` from `/notifications/unread-count`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UnreadCount {
    pub count: u64,
}
