//! Class metadata, enrollments and the teacher's class detail view.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::ids::{ClassId, StudentId};

/// Class metadata from `GET /api/classes/{id}` and the teacher class list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassInfo {
    /// Class identifier.
    pub class_id: ClassId,
    /// Human-readable class name.
    pub class_name: String,
    /// Academic year the class runs in.
    pub year: i32,
    /// Semester within the year (1 or 2).
    pub semester: u8,
    /// Capacity, when the backend exposes it.
    #[serde(default)]
    pub max_students: Option<u32>,
}

/// A student's membership in a class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    /// Enrolled student.
    pub student_id: StudentId,
    /// Class enrolled in.
    pub class_id: ClassId,
    /// Date of enrollment.
    #[serde(default)]
    pub enroll_date: Option<NaiveDate>,
}

/// Teacher view of a class: metadata plus every enrolled student's grades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDetail {
    /// Class identifier.
    pub class_id: ClassId,
    /// Human-readable class name.
    pub class_name: String,
    /// Academic year.
    pub year: i32,
    /// Semester within the year.
    pub semester: u8,
    /// Capacity.
    #[serde(default)]
    pub max_students: Option<u32>,
    /// Enrolled students.
    #[serde(default)]
    pub students: Vec<ClassStudent>,
}

/// One student row in [`ClassDetail`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassStudent {
    /// Student id.
    pub student_id: StudentId,
    /// Display name.
    pub full_name: String,
    /// School-issued code.
    #[serde(default)]
    pub student_code: Option<String>,
    /// Current component scores.
    #[serde(default)]
    pub grades: StudentGradeSlots,
}

/// Component scores as the backend reports them in the class detail.
///
/// The backend sends an empty string for a missing score; that and `null`
/// both map to `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentGradeSlots {
    /// Attendance score.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub attendance: Option<f64>,
    /// Midterm score.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub mid: Option<f64>,
    /// Final exam score.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub r#final: Option<f64>,
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(n)) => Ok(Some(n)),
        Some(Raw::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Raw::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid score '{s}'"))),
    }
}
