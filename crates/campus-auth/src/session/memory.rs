//! In-memory session store for tests and one-shot runs.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use campus_core::result::AppResult;
use campus_entity::session::SessionData;

use super::store::SessionStore;

/// Session store that lives only as long as the process.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    /// Current session.
    inner: Arc<RwLock<Option<SessionData>>>,
}

impl MemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding `session`.
    pub fn with_session(session: SessionData) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Some(session))),
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> AppResult<Option<SessionData>> {
        Ok(self.inner.read().await.clone())
    }

    async fn save(&self, session: &SessionData) -> AppResult<()> {
        *self.inner.write().await = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> AppResult<()> {
        *self.inner.write().await = None;
        Ok(())
    }
}
