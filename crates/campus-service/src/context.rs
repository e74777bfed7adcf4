//! Page-scoped state for one navigation.

use std::future::Future;

use tokio_util::sync::CancellationToken;

use campus_core::error::AppError;
use campus_core::result::AppResult;
use campus_entity::ClassId;
use campus_entity::user::User;

/// State owned by the page currently being shown.
///
/// Created once the access guard has let the navigation through and
/// dropped (or cancelled) when the user navigates away. Every backend call
/// a dashboard makes on behalf of the page is raced against
/// [`PageContext::cancel_token`].
#[derive(Debug, Clone)]
pub struct PageContext {
    path: String,
    token: String,
    user: User,
    current_class: Option<ClassId>,
    cancel: CancellationToken,
}

impl PageContext {
    /// Creates a context for `path` with a fresh cancellation token.
    pub fn new(path: impl Into<String>, token: impl Into<String>, user: User) -> Self {
        Self::with_cancel(path, token, user, CancellationToken::new())
    }

    /// Creates a context bound to an existing navigation token.
    pub fn with_cancel(
        path: impl Into<String>,
        token: impl Into<String>,
        user: User,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            path: path.into(),
            token: token.into(),
            user,
            current_class: None,
            cancel,
        }
    }

    /// Page path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Bearer token of the session.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The signed-in user.
    pub fn user(&self) -> &User {
        &self.user
    }

    /// Class the page is focused on, if any.
    pub fn current_class(&self) -> Option<ClassId> {
        self.current_class
    }

    /// Focuses the page on `class_id`.
    pub fn select_class(&mut self, class_id: ClassId) {
        self.current_class = Some(class_id);
    }

    /// Cancellation token of the navigation.
    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Abandons every in-flight request of this page.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Runs `fut` unless the navigation is cancelled first.
    pub async fn run<T, F>(&self, what: &str, fut: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                tracing::debug!(path = %self.path, what, "Request abandoned by navigation");
                Err(AppError::cancelled(format!("{what} abandoned: page {} was left", self.path)))
            }
            result = fut => result,
        }
    }
}
