//! Access enforcement for a single navigation.
//!
//! Runs on every page load: resolves the session, fetches the current user
//! and consults the route table. The user fetch always completes (or is
//! cancelled) before the path check runs.

use std::fmt;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use campus_core::error::AppError;
use campus_core::result::AppResult;
use campus_entity::user::{User, UserRole};

use super::navigator::Navigator;
use super::resolver::UserResolver;
use crate::rbac::{FORBIDDEN_PATH, LOGIN_PATH, RouteEnforcer, RoutePolicies, normalize_path};
use crate::session::SessionManager;

/// Why a navigation was redirected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectReason {
    /// No token is stored.
    NoSession,
    /// The token was rejected or the user could not be fetched.
    SessionInvalid,
    /// The user is valid but the role may not open the page.
    Forbidden(UserRole),
}

impl fmt::Display for RedirectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSession => write!(f, "no session"),
            Self::SessionInvalid => write!(f, "session invalid"),
            Self::Forbidden(role) => write!(f, "forbidden for role '{role}'"),
        }
    }
}

/// Result of enforcing access for one navigation.
#[derive(Debug, Clone, PartialEq)]
pub enum AccessOutcome {
    /// The page may be shown. `user` is `None` for public pages, which are
    /// allowed without fetching anything.
    Allowed {
        /// Normalized path.
        path: String,
        /// The resolved user.
        user: Option<User>,
    },
    /// The navigation was redirected.
    Redirected {
        /// Normalized path that was requested.
        from: String,
        /// Redirect target.
        to: &'static str,
        /// Why.
        reason: RedirectReason,
    },
}

impl AccessOutcome {
    /// Whether the requested page may be shown.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }

    /// Redirect target, if redirected.
    pub fn redirect_target(&self) -> Option<&'static str> {
        match self {
            Self::Allowed { .. } => None,
            Self::Redirected { to, .. } => Some(*to),
        }
    }

    /// The resolved user, if one was fetched and access was granted.
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Allowed { user, .. } => user.as_ref(),
            Self::Redirected { .. } => None,
        }
    }
}

/// Decides and performs redirects for page navigations.
#[derive(Debug, Clone)]
pub struct AccessGuard {
    /// Route table.
    enforcer: RouteEnforcer,
    /// Session state.
    sessions: SessionManager,
}

impl AccessGuard {
    /// Creates a guard with the default route table.
    pub fn new(sessions: SessionManager) -> Self {
        Self {
            enforcer: RouteEnforcer::new(),
            sessions,
        }
    }

    /// Creates a guard with a custom enforcer.
    pub fn with_enforcer(enforcer: RouteEnforcer, sessions: SessionManager) -> Self {
        Self { enforcer, sessions }
    }

    /// The route enforcer.
    pub fn enforcer(&self) -> &RouteEnforcer {
        &self.enforcer
    }

    /// The session manager.
    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// Enforces access to `current_path`.
    ///
    /// - public pages (`/login`, `/`, `/403`) are always allowed;
    /// - without a token, redirects to `/login`;
    /// - if the user cannot be resolved, clears the session and redirects
    ///   to `/login`;
    /// - if the role may not open the page, redirects to `/403`.
    ///
    /// Returns `Err` only when `cancel` fires before the user is resolved;
    /// the session is left untouched in that case.
    pub async fn enforce_access(
        &self,
        current_path: &str,
        resolver: &dyn UserResolver,
        navigator: &dyn Navigator,
        cancel: &CancellationToken,
    ) -> AppResult<AccessOutcome> {
        let path = normalize_path(current_path);

        if RoutePolicies::is_public(&path) {
            info!(path = %path, "Public page, access allowed");
            return Ok(AccessOutcome::Allowed { path, user: None });
        }

        let token = match self.sessions.token().await {
            Ok(Some(token)) => token,
            Ok(None) => {
                info!(path = %path, "No session token, redirecting to login");
                return Ok(self.redirect(navigator, path, LOGIN_PATH, RedirectReason::NoSession));
            }
            Err(e) => {
                warn!(path = %path, error = %e, "Session unreadable, redirecting to login");
                self.invalidate("session unreadable").await;
                return Ok(self.redirect(
                    navigator,
                    path,
                    LOGIN_PATH,
                    RedirectReason::SessionInvalid,
                ));
            }
        };

        let resolved = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                return Err(AppError::cancelled(format!("Navigation to '{path}' superseded")));
            }
            res = resolver.resolve_user(&token) => res,
        };

        let user = match resolved {
            Ok(user) => user,
            Err(e) => {
                warn!(path = %path, error = %e, "User resolution failed, clearing session");
                self.invalidate("user resolution failed").await;
                return Ok(self.redirect(
                    navigator,
                    path,
                    LOGIN_PATH,
                    RedirectReason::SessionInvalid,
                ));
            }
        };

        if let Err(e) = self.sessions.remember_user(&user).await {
            warn!(error = %e, "Failed to cache user info");
        }

        if !self.enforcer.is_path_allowed(&user.role, &path) {
            info!(path = %path, username = %user.username, role = %user.role, "Access denied");
            return Ok(self.redirect(
                navigator,
                path,
                FORBIDDEN_PATH,
                RedirectReason::Forbidden(user.role),
            ));
        }

        info!(path = %path, username = %user.username, role = %user.role, "Access granted");
        Ok(AccessOutcome::Allowed {
            path,
            user: Some(user),
        })
    }

    async fn invalidate(&self, reason: &str) {
        if let Err(e) = self.sessions.clear(reason).await {
            warn!(error = %e, "Failed to clear session");
        }
    }

    fn redirect(
        &self,
        navigator: &dyn Navigator,
        from: String,
        to: &'static str,
        reason: RedirectReason,
    ) -> AccessOutcome {
        navigator.redirect(to);
        AccessOutcome::Redirected { from, to, reason }
    }
}
