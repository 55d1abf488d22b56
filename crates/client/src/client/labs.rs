//! Lab API methods for [`ApiClient`].

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{Lab, LabActionResponse, LabRequest, LabStatus};

impl ApiClient {
    /// Lab catalog.
    pub async fn get_labs(&mut self) -> Result<Vec<Lab>> {
        self.get("/labs").await
    }

    pub async fn start_lab(&mut self, lab_id: &str) -> Result<LabActionResponse> {
        let body = LabRequest {
            lab_id: lab_id.to_string(),
        };
        self.post("/labs/start", &body).await
    }

    pub async fn stop_lab(&mut self, lab_id: &str) -> Result<LabActionResponse> {
        let body = LabRequest {
            lab_id: lab_id.to_string(),
        };
        self.post("/labs/stop", &body).await
    }

    /// Most recent lab instance of the current user.
    pub async fn get_lab_status(&mut self) -> Result<LabStatus> {
        self.get("/labs/status").await
    }
}
