//! Grade submission payload.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::subject::Subject;
use crate::ids::{ClassId, StudentId};

/// Lowest accepted score.
pub const SCORE_MIN: f64 = 0.0;
/// Highest accepted score.
pub const SCORE_MAX: f64 = 10.0;

/// One element of the `POST /api/teacher/classes/{id}/grades` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct GradeEntry {
    /// Student being graded.
    pub student_id: StudentId,
    /// Class the grade belongs to.
    pub class_id: ClassId,
    /// Component slot.
    pub subject: Subject,
    /// Score.
    #[validate(range(min = 0.0, max = 10.0, message = "Score must be between 0 and 10"))]
    pub score: f64,
}
