//! Service API methods for [`ApiClient`].
//!
//! # What this module handles:
//! - Service catalog and running services
//! - Starting and stopping services
//! - Fetching service credentials
//!
//! # What this module does NOT handle:
//! - Redacting credentials for display (left to callers)

use crate::client::ApiClient;
use crate::endpoints::encode_path_segment;
use crate::error::Result;
use crate::models::{
    ServiceActionResponse, ServiceCatalogEntry, ServiceCredentialsResponse, ServiceInstance,
    ServiceRequest, ServiceStartResponse,
};

impl ApiClient {
    pub async fn get_services_catalog(&mut self) -> Result<Vec<ServiceCatalogEntry>> {
        self.get("/services/catalog").await
    }

    pub async fn start_service(&mut self, service_id: &str) -> Result<ServiceStartResponse> {
        let body = ServiceRequest {
            service_id: service_id.to_string(),
        };
        self.post("/services/start", &body).await
    }

    pub async fn stop_service(&mut self, service_id: &str) -> Result<ServiceActionResponse> {
        let body = ServiceRequest {
            service_id: service_id.to_string(),
        };
        self.post("/services/stop", &body).await
    }

    /// Running services of the current user.
    pub async fn get_service_status(&mut self) -> Result<Vec<ServiceInstance>> {
        self.get("/services/status").await
    }

    pub async fn get_service_credentials(
        &mut self,
        service_id: &str,
    ) -> Result<ServiceCredentialsResponse> {
        let endpoint = format!("/services/{}/credentials", encode_path_segment(service_id));
        self.get(&endpoint).await
    }
}
