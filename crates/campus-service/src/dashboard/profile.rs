//! Profile page: view and edit the signed-in user's own details.

use std::sync::Arc;

use tracing::info;

use campus_client::PortalApi;
use campus_core::error::AppError;
use campus_core::result::AppResult;
use campus_entity::user::{UpdateProfile, User};

use crate::context::PageContext;

/// Reads and updates the current user's profile.
#[derive(Debug, Clone)]
pub struct ProfilePage {
    api: Arc<dyn PortalApi>,
}

impl ProfilePage {
    /// Creates a new profile page service.
    pub fn new(api: Arc<dyn PortalApi>) -> Self {
        Self { api }
    }

    /// Sends the changed fields and returns the updated user.
    pub async fn update(&self, ctx: &PageContext, update: &UpdateProfile) -> AppResult<User> {
        if update.full_name.is_none()
            && update.email.is_none()
            && update.birthdate.is_none()
            && update.department.is_none()
            && update.title.is_none()
        {
            return Err(AppError::validation("Nothing to update"));
        }
        if let Some(email) = &update.email {
            if !email.contains('@') {
                return Err(AppError::validation(format!("'{email}' is not an email address")));
            }
        }

        let user = ctx
            .run("update profile", self.api.update_me(ctx.token(), update))
            .await?;
        info!(username = %user.username, "Profile updated");
        Ok(user)
    }
}
