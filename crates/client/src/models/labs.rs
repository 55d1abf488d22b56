//! Lab catalog and lab lifecycle models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::common::SoftFailure;
use crate::serde_helpers::opt_naive_datetime;

/// Catalog entry from `GET /labs`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Lab {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Body for `/labs/start` and `/labs/stop`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LabRequest {
    pub lab_id: String,
}

/// Result of starting or stopping a lab.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LabActionResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lab: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl SoftFailure for LabActionResponse {
    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }
}

/// Most recent lab instance from `GET /labs/status`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LabStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lab: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
    #[serde(
        default,
        deserialize_with = "opt_naive_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub started_at: Option<NaiveDateTime>,
    #[serde(
        default,
        deserialize_with = "opt_naive_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub stopped_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LabStatus {
    pub fn is_running(&self) -> bool {
        self.status.as_deref() == Some("running")
    }
}

impl SoftFailure for LabStatus {
    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_catalog_entry() {
        let json = r#"{
            "id": "ubuntu-ssh",
            "name": "Essentials Lab",
            "icon": "ubuntu",
            "type": "machine",
            "description": "Ubuntu 22.04 with SSH access",
            "image": "ubuntu-ssh-lab"
        }"#;
        let lab: Lab = serde_json::from_str(json).unwrap();
        assert_eq!(lab.id, "ubuntu-ssh");
        assert_eq!(lab.kind.as_deref(), Some("machine"));
    }

    #[test]
    fn test_already_running_is_soft_failure() {
        let resp: LabActionResponse =
            serde_json::from_str(r#"{"error": "Lab already running", "port": 2242}"#).unwrap();
        assert_eq!(resp.failure().as_deref(), Some("Lab already running"));
        assert_eq!(resp.port, Some(2242));
    }

    #[test]
    fn test_lab_status_running() {
        let status: LabStatus = serde_json::from_str(
            r#"{"lab": "ubuntu-ssh", "status": "running", "port": 2210, "started_at": "2025-02-01T09:00:00"}"#,
        )
        .unwrap();
        assert!(status.is_running());
        assert!(status.failure().is_none());
    }
}
