//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles known to the portal.
///
/// The backend sends roles as free-form strings. Anything that is not one
/// of the three known roles (including a missing role) becomes
/// [`UserRole::Unknown`], which is denied every protected page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum UserRole {
    /// Enrolled student.
    Student,
    /// Teacher assigned to classes.
    Teacher,
    /// Portal administrator.
    Admin,
    /// Absent or unrecognized role.
    #[default]
    Unknown,
}

impl UserRole {
    /// Parses a role name case-insensitively; never fails.
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "student" => Self::Student,
            "teacher" => Self::Teacher,
            "admin" => Self::Admin,
            _ => Self::Unknown,
        }
    }

    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Check if this role is one of the known roles.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
            Self::Admin => "admin",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = campus_core::AppError;

    /// Strict parsing for user input (e.g. the admin role editor).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::parse_lenient(s) {
            Self::Unknown => Err(campus_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: student, teacher, admin"
            ))),
            role => Ok(role),
        }
    }
}

impl From<Option<String>> for UserRole {
    fn from(value: Option<String>) -> Self {
        value
            .as_deref()
            .map(Self::parse_lenient)
            .unwrap_or(Self::Unknown)
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        role.as_str().to_string()
    }
}
