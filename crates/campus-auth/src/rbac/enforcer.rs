//! Page access decisions: checks whether a role may open a path.

use campus_core::error::AppError;
use campus_entity::user::UserRole;

use super::policies::{ADMIN_PATH, HOME_PATH, RoutePolicies, STUDENT_PATH, TEACHER_PATH};

/// Enforces role-based access control for page navigation.
#[derive(Debug, Clone)]
pub struct RouteEnforcer {
    /// The policy configuration.
    policies: RoutePolicies,
}

impl RouteEnforcer {
    /// Creates a new enforcer with the default policy set.
    pub fn new() -> Self {
        Self {
            policies: RoutePolicies::new(),
        }
    }

    /// Creates an enforcer with custom policies.
    pub fn with_policies(policies: RoutePolicies) -> Self {
        Self { policies }
    }

    /// Whether `role` may open `path`.
    ///
    /// Pure and deterministic. `path` must already be normalized; an
    /// unrecognized role is denied everything.
    pub fn is_path_allowed(&self, role: &UserRole, path: &str) -> bool {
        let allowed = self.policies.allows(role, path);
        tracing::debug!(role = %role, path, allowed, "Page permission check");
        allowed
    }

    /// Like [`is_path_allowed`](Self::is_path_allowed) but returns
    /// `Err(AppError::authorization)` when denied.
    pub fn require_path(&self, role: &UserRole, path: &str) -> Result<(), AppError> {
        if self.is_path_allowed(role, path) {
            Ok(())
        } else {
            Err(AppError::authorization(format!(
                "Role '{role}' may not open '{path}'"
            )))
        }
    }

    /// Page a freshly logged-in user is sent to.
    pub fn landing_path_for(&self, role: &UserRole) -> &'static str {
        match role {
            UserRole::Student => STUDENT_PATH,
            UserRole::Teacher => TEACHER_PATH,
            UserRole::Admin => ADMIN_PATH,
            UserRole::Unknown => HOME_PATH,
        }
    }

    /// Returns a reference to the underlying policies.
    pub fn policies(&self) -> &RoutePolicies {
        &self.policies
    }
}

impl Default for RouteEnforcer {
    fn default() -> Self {
        Self::new()
    }
}
