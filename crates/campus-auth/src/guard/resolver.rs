//! Collaborator that turns a bearer token into the current user.

use async_trait::async_trait;

use campus_core::result::AppResult;
use campus_entity::user::User;

/// Resolves the user behind a bearer token (`GET /api/me`).
///
/// Any error is treated by the guard as an invalid session.
#[async_trait]
pub trait UserResolver: Send + Sync {
    /// Fetches the user the token belongs to.
    async fn resolve_user(&self, token: &str) -> AppResult<User>;
}
