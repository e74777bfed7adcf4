//! Session storage trait.

use async_trait::async_trait;

use campus_core::result::AppResult;
use campus_entity::session::SessionData;

/// Backend for the locally persisted session.
///
/// Exactly one session exists per store. Implementations must make
/// `clear` idempotent.
#[async_trait]
pub trait SessionStore: Send + Sync + std::fmt::Debug + 'static {
    /// Loads the stored session, or `None` when nothing is stored.
    async fn load(&self) -> AppResult<Option<SessionData>>;

    /// Replaces the stored session.
    async fn save(&self, session: &SessionData) -> AppResult<()>;

    /// Removes the stored session.
    async fn clear(&self) -> AppResult<()>;
}
