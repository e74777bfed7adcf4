//! Session model: the bearer token plus the cached user-info blob.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::user::User;

/// What the portal remembers between runs.
///
/// Single writer, single reader; scoped to one local profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    /// Bearer token for the `Authorization` header.
    pub token: String,
    /// User info cached from the last successful `/api/me`.
    #[serde(default)]
    pub user_info: Option<User>,
    /// When the token was stored.
    pub saved_at: DateTime<Utc>,
}

impl SessionData {
    /// Creates a session holding only a token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            user_info: None,
            saved_at: Utc::now(),
        }
    }

    /// Returns a copy with the user info replaced.
    pub fn with_user(mut self, user: User) -> Self {
        self.user_info = Some(user);
        self
    }

    /// Whether the token is blank.
    pub fn has_token(&self) -> bool {
        !self.token.trim().is_empty()
    }

    /// Formats the `Authorization` header value.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}
