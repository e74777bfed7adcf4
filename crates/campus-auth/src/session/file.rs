//! JSON-file session store.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use campus_core::config::SessionConfig;
use campus_core::error::AppError;
use campus_core::result::AppResult;
use campus_entity::session::SessionData;

use super::store::SessionStore;

/// Persists the session as a JSON document on disk.
///
/// Writes go to a sibling temp file first and are renamed into place, so
/// a crash never leaves a half-written session. A file that cannot be
/// parsed is treated as no session.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    /// Session file location.
    path: PathBuf,
    /// Serializes writers within this process.
    write_lock: Arc<Mutex<()>>,
}

impl FileSessionStore {
    /// Creates a store backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Creates a store at the configured location.
    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.file_path())
    }

    /// Location of the session file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> AppResult<Option<SessionData>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(AppError::with_source(
                    campus_core::ErrorKind::Session,
                    format!("Failed to read session file {}", self.path.display()),
                    e,
                ));
            }
        };

        match serde_json::from_str::<SessionData>(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring unreadable session file");
                Ok(None)
            }
        }
    }

    async fn save(&self, session: &SessionData) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let body = serde_json::to_vec_pretty(session)?;
        let tmp = self.temp_path();
        tokio::fs::write(&tmp, body).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }

    async fn clear(&self) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;

        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = %self.path.display(), "Session file removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
