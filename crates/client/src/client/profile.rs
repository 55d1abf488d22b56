//! Profile and session API methods for [`ApiClient`].
//!
//! # What this module handles:
//! - Reading and updating the signed-in user's profile
//! - Usage statistics
//! - Logout
//!
//! # What this module does NOT handle:
//! - Token capture from OAuth callbacks (in [`crate::auth`])

use crate::auth::LoginRedirect;
use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{MessageResponse, ProfileUpdate, UserProfile, UserStats};

impl ApiClient {
    /// Current user's profile.
    pub async fn get_profile(&mut self) -> Result<UserProfile> {
        self.get("/me").await
    }

    /// Update profile fields; unset fields are left unchanged.
    pub async fn update_profile(&mut self, update: &ProfileUpdate) -> Result<MessageResponse> {
        self.put("/profile", update).await
    }

    /// Lab and service usage counters.
    pub async fn get_user_stats(&mut self) -> Result<UserStats> {
        self.get("/profile/stats").await
    }

    /// End the session: notify the server, then forget the token.
    ///
    /// Returns where to send the user next.
    pub async fn logout(&mut self) -> Result<LoginRedirect> {
        let _: MessageResponse = self.post_empty("/auth/logout").await?;
        self.tokens.remove_token()?;
        Ok(LoginRedirect::login())
    }
}
