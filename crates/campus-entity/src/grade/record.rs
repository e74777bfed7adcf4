//! A single observed score, as returned by the student grades endpoint.

use serde::{Deserialize, Serialize};

use super::subject::Subject;
use crate::ids::{ClassId, StudentId};

/// One (class, subject, score) observation for a student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeRecord {
    /// Backend grade id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade_id: Option<i64>,
    /// Owning student.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<StudentId>,
    /// Class the score belongs to.
    pub class_id: ClassId,
    /// Component slot.
    pub subject: Subject,
    /// Score in `[0, 10]`, validated before storage.
    pub score: f64,
}

impl GradeRecord {
    /// Builds a record without backend ids.
    pub fn new(class_id: impl Into<ClassId>, subject: impl Into<Subject>, score: f64) -> Self {
        Self {
            grade_id: None,
            student_id: None,
            class_id: class_id.into(),
            subject: subject.into(),
            score,
        }
    }
}
