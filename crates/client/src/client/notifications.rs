//! Notification API methods for [`ApiClient`].

use crate::client::ApiClient;
use crate::endpoints::encode_path_segment;
use crate::error::Result;
use crate::models::{MessageResponse, Notification, UnreadCount};

impl ApiClient {
    /// Notifications, newest first. `unread_only` adds `?unread_only=true`.
    pub async fn get_notifications(&mut self, unread_only: bool) -> Result<Vec<Notification>> {
        let endpoint = if unread_only {
            "/notifications?unread_only=true"
        } else {
            "/notifications"
        };
        self.get(endpoint).await
    }

    pub async fn get_unread_count(&mut self) -> Result<u64> {
        let count: UnreadCount = self.get("/notifications/unread-count").await?;
        Ok(count.count)
    }

    pub async fn mark_notification_read(&mut self, id: &str) -> Result<MessageResponse> {
        let endpoint = format!("/notifications/{}/read", encode_path_segment(id));
        self.post_empty(&endpoint).await
    }

    pub async fn mark_all_notifications_read(&mut self) -> Result<MessageResponse> {
        self.post_empty("/notifications/read-all").await
    }

    pub async fn delete_notification(&mut self, id: &str) -> Result<MessageResponse> {
        let endpoint = format!("/notifications/{}", encode_path_segment(id));
        self.delete(&endpoint).await
    }
}
