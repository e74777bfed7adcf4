//! Admin console: role management.

use std::sync::Arc;

use tracing::info;

use campus_client::PortalApi;
use campus_core::error::AppError;
use campus_core::result::AppResult;
use campus_entity::user::UserRole;

use crate::context::PageContext;

/// Account administration actions.
#[derive(Debug, Clone)]
pub struct AdminConsole {
    /// Backend client.
    api: Arc<dyn PortalApi>,
}

impl AdminConsole {
    /// Creates a new admin console.
    pub fn new(api: Arc<dyn PortalApi>) -> Self {
        Self { api }
    }

    /// Changes the role of `username`.
    ///
    /// The signed-in user must be an admin and the role must be one of
    /// student, teacher or admin.
    pub async fn set_role(&self, ctx: &PageContext, username: &str, role: UserRole) -> AppResult<()> {
        if !ctx.user().role.is_admin() {
            return Err(AppError::authorization("Only administrators can change roles"));
        }
        let username = username.trim();
        if username.is_empty() {
            return Err(AppError::validation("Username is required"));
        }
        if !role.is_known() {
            return Err(AppError::validation("Role must be student, teacher or admin"));
        }

        ctx.run(
            "update role",
            self.api.update_role(ctx.token(), username, role),
        )
        .await?;
        info!(
            admin = %ctx.user().username,
            username,
            role = role.as_str(),
            "Role updated"
        );
        Ok(())
    }
}
