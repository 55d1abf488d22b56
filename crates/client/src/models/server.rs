//! Server banner returned by `GET /`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerInfo {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub version: Option<String>,
}
