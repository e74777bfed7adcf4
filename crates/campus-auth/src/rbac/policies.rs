//! Role-to-page mapping definitions.

use std::collections::{HashMap, HashSet};

use campus_entity::user::UserRole;

/// Landing page shared by every role.
pub const HOME_PATH: &str = "/";
/// Login page.
pub const LOGIN_PATH: &str = "/login";
/// Access-denied page.
pub const FORBIDDEN_PATH: &str = "/403";
/// Student portal.
pub const STUDENT_PATH: &str = "/student";
/// Teacher portal.
pub const TEACHER_PATH: &str = "/teacher";
/// Admin console.
pub const ADMIN_PATH: &str = "/admin";

/// Pages reachable without a session or a permission check.
pub const PUBLIC_PATHS: [&str; 3] = [LOGIN_PATH, HOME_PATH, FORBIDDEN_PATH];

/// Defines the mapping from each role to its set of allowed page paths.
///
/// Fixed at build time. A role missing from the table (including
/// [`UserRole::Unknown`]) has an empty set.
#[derive(Debug, Clone)]
pub struct RoutePolicies {
    /// Role → set of allowed paths.
    policies: HashMap<UserRole, HashSet<&'static str>>,
}

impl RoutePolicies {
    /// Creates the default policy set.
    pub fn new() -> Self {
        let mut policies = HashMap::new();

        // Student: home + own portal
        policies.insert(
            UserRole::Student,
            [HOME_PATH, STUDENT_PATH].into_iter().collect(),
        );

        // Teacher: home + own portal
        policies.insert(
            UserRole::Teacher,
            [HOME_PATH, TEACHER_PATH].into_iter().collect(),
        );

        // Admin: every portal
        policies.insert(
            UserRole::Admin,
            [HOME_PATH, STUDENT_PATH, TEACHER_PATH, ADMIN_PATH]
                .into_iter()
                .collect(),
        );

        Self { policies }
    }

    /// Returns the set of paths allowed for the given role.
    pub fn paths_for_role(&self, role: &UserRole) -> HashSet<&'static str> {
        self.policies.get(role).cloned().unwrap_or_default()
    }

    /// Checks whether the given role may open `path` (exact match).
    pub fn allows(&self, role: &UserRole, path: &str) -> bool {
        self.policies
            .get(role)
            .map(|paths| paths.contains(path))
            .unwrap_or(false)
    }

    /// Whether `path` bypasses the permission table entirely.
    pub fn is_public(path: &str) -> bool {
        PUBLIC_PATHS.contains(&path)
    }
}

impl Default for RoutePolicies {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalizes a request path for table lookup.
///
/// Drops the query string and fragment, collapses an empty path to `/`
/// and removes trailing slashes except on the root.
pub fn normalize_path(raw: &str) -> String {
    let end = raw.find(['?', '#']).unwrap_or(raw.len());
    let path = raw[..end].trim();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return HOME_PATH.to_string();
    }
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}
