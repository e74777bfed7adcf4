//! User entity model as returned by `GET /api/me`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::role::UserRole;
use crate::ids::StudentId;

/// The authenticated user.
///
/// Created server-side; the client only reads it. Cached for the lifetime
/// of one page (see the page context in `campus-service`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Backend user id, when the backend exposes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    /// Unique login name.
    pub username: String,
    /// Role used for navigation permissions.
    #[serde(default)]
    pub role: UserRole,
    /// Display name.
    #[serde(default)]
    pub full_name: Option<String>,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Present when the user is a student.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_profile: Option<StudentProfile>,
    /// Present when the user is a teacher.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher_profile: Option<TeacherProfile>,
}

impl User {
    /// Name to greet the user with: full name, falling back to the username.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.username)
    }

    /// The student id for grade and enrollment lookups, if any.
    pub fn student_id(&self) -> Option<StudentId> {
        self.student_profile.as_ref().map(|p| p.student_id)
    }
}

/// Student-specific profile data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    /// Student id used by the grades and enrollments endpoints.
    pub student_id: StudentId,
    /// School-issued student code.
    #[serde(default)]
    pub student_code: Option<String>,
    /// Date of birth.
    #[serde(default)]
    pub birthdate: Option<NaiveDate>,
}

/// Teacher-specific profile data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherProfile {
    /// Teacher id.
    pub teacher_id: i64,
    /// Department name.
    #[serde(default)]
    pub department: Option<String>,
    /// Academic title.
    #[serde(default)]
    pub title: Option<String>,
}

/// Body of `PUT /api/me`. Only set fields are sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfile {
    /// New display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// New email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New birth date (students).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthdate: Option<NaiveDate>,
    /// New department (teachers).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// New title (teachers).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}
