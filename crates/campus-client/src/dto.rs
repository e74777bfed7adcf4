//! Request and response bodies that exist only on the wire.

use serde::{Deserialize, Serialize};

use campus_entity::user::UserRole;

/// Body of `POST /api/login` and `POST /api/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Login name.
    pub username: String,
    /// Plain-text password, sent over the configured transport.
    pub password: String,
}

/// Token returned by login/register.
///
/// Some backend versions answer with a bare JSON string, others with
/// `{ "token": ... }` (optionally `access_token`).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TokenResponse {
    /// `"eyJ..."`
    Bare(String),
    /// `{ "token": "eyJ..." }`
    Wrapped {
        /// The bearer token.
        #[serde(alias = "access_token")]
        token: String,
    },
}

impl TokenResponse {
    /// The bearer token.
    pub fn into_token(self) -> String {
        match self {
            Self::Bare(token) | Self::Wrapped { token } => token,
        }
    }
}

/// Body of `POST /api/admin/update-role`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleUpdate {
    /// Account to change.
    pub username: String,
    /// New role.
    pub new_role: UserRole,
}

/// FastAPI-style error body.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    /// Error detail; a string or a validation error list.
    pub detail: serde_json::Value,
}
