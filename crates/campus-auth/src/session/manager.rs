//! Session lifecycle: start on login, cache the user, clear on logout or
//! authentication failure.

use std::sync::Arc;

use tracing::info;

use campus_core::result::AppResult;
use campus_entity::session::SessionData;
use campus_entity::user::User;

use super::store::SessionStore;

/// Manages the single local session on top of a [`SessionStore`].
#[derive(Debug, Clone)]
pub struct SessionManager {
    /// Storage backend.
    store: Arc<dyn SessionStore>,
}

impl SessionManager {
    /// Creates a manager over the given store.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Stores a fresh token, discarding any cached user info.
    pub async fn start(&self, token: &str) -> AppResult<SessionData> {
        let session = SessionData::new(token.trim());
        self.store.save(&session).await?;
        info!("Session started");
        Ok(session)
    }

    /// Returns the stored token, if a non-blank one exists.
    pub async fn token(&self) -> AppResult<Option<String>> {
        Ok(self
            .store
            .load()
            .await?
            .filter(SessionData::has_token)
            .map(|s| s.token))
    }

    /// Returns the full stored session.
    pub async fn current(&self) -> AppResult<Option<SessionData>> {
        self.store.load().await
    }

    /// Caches the user info next to the token. No-op without a session.
    pub async fn remember_user(&self, user: &User) -> AppResult<()> {
        if let Some(session) = self.store.load().await? {
            self.store.save(&session.with_user(user.clone())).await?;
        }
        Ok(())
    }

    /// User info cached by the last successful user fetch.
    pub async fn cached_user(&self) -> AppResult<Option<User>> {
        Ok(self.store.load().await?.and_then(|s| s.user_info))
    }

    /// Removes the token and the cached user info.
    pub async fn clear(&self, reason: &str) -> AppResult<()> {
        self.store.clear().await?;
        info!(reason, "Session cleared");
        Ok(())
    }
}
