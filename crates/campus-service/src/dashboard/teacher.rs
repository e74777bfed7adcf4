//! Teacher home: assigned classes, class roster and grade entry.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;
use validator::Validate;

use campus_client::PortalApi;
use campus_core::error::AppError;
use campus_core::result::AppResult;
use campus_entity::class::{ClassDetail, ClassInfo};
use campus_entity::grade::{GradeEntry, Subject};
use campus_entity::{ClassId, StudentId};

use crate::context::PageContext;
use crate::grades::{GradeAggregator, format_score, validate_score};

/// One student line of the class roster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterRow {
    /// Student id.
    pub student_id: StudentId,
    /// Student name.
    pub full_name: String,
    /// Student code, empty when unknown.
    pub student_code: String,
    /// Formatted attendance score.
    pub attendance: String,
    /// Formatted midterm score.
    pub mid: String,
    /// Formatted final score.
    #[serde(rename = "final")]
    pub final_: String,
    /// Roster average, missing scores counted as zero; `None` when the
    /// student has no scores yet.
    pub average: Option<f64>,
}

/// Loads and updates the data behind the teacher home page.
#[derive(Debug, Clone)]
pub struct TeacherDashboard {
    /// Backend client.
    api: Arc<dyn PortalApi>,
    /// Grade weights.
    aggregator: GradeAggregator,
}

impl TeacherDashboard {
    /// Creates a new teacher dashboard.
    pub fn new(api: Arc<dyn PortalApi>, aggregator: GradeAggregator) -> Self {
        Self { api, aggregator }
    }

    /// Classes assigned to the signed-in teacher.
    pub async fn classes(&self, ctx: &PageContext) -> AppResult<Vec<ClassInfo>> {
        ctx.run("load classes", self.api.teacher_classes(ctx.token()))
            .await
    }

    /// Class metadata and roster; focuses the page on the class.
    pub async fn class_detail(
        &self,
        ctx: &mut PageContext,
        class_id: ClassId,
    ) -> AppResult<ClassDetail> {
        ctx.select_class(class_id);
        ctx.run(
            "load class detail",
            self.api.teacher_class_detail(ctx.token(), class_id),
        )
        .await
    }

    /// Display rows for a class roster.
    pub fn roster_rows(&self, detail: &ClassDetail) -> Vec<RosterRow> {
        detail
            .students
            .iter()
            .map(|student| RosterRow {
                student_id: student.student_id,
                full_name: student.full_name.clone(),
                student_code: student.student_code.clone().unwrap_or_default(),
                attendance: format_score(student.grades.attendance),
                mid: format_score(student.grades.mid),
                final_: format_score(student.grades.r#final),
                average: self.aggregator.roster_average(&student.grades),
            })
            .collect()
    }

    /// Builds a grade entry from raw input.
    pub fn build_entry(
        student_id: StudentId,
        class_id: ClassId,
        subject: &str,
        raw_score: &str,
    ) -> AppResult<GradeEntry> {
        let subject = Subject::parse(subject);
        if !subject.is_known() {
            return Err(AppError::validation(format!(
                "Unknown subject '{}'; expected attendance, mid or final",
                subject.as_str()
            )));
        }
        Ok(GradeEntry {
            student_id,
            class_id,
            subject,
            score: validate_score(raw_score)?,
        })
    }

    /// Validates and submits grades, then reloads the class.
    ///
    /// Nothing is sent unless every entry is valid. The returned detail is
    /// the backend's state after the save.
    pub async fn submit_grades(
        &self,
        ctx: &mut PageContext,
        class_id: ClassId,
        entries: &[GradeEntry],
    ) -> AppResult<ClassDetail> {
        if entries.is_empty() {
            return Err(AppError::validation("No grades to submit"));
        }
        for entry in entries {
            check_entry(entry, class_id)?;
        }

        ctx.run(
            "save grades",
            self.api.save_grades(ctx.token(), class_id, entries),
        )
        .await?;
        info!(%class_id, count = entries.len(), "Grades submitted");

        self.class_detail(ctx, class_id).await
    }
}

fn check_entry(entry: &GradeEntry, class_id: ClassId) -> AppResult<()> {
    if entry.class_id != class_id {
        return Err(AppError::validation(format!(
            "Grade for student {} targets class {}, not {class_id}",
            entry.student_id, entry.class_id
        )));
    }
    if !entry.subject.is_known() {
        return Err(AppError::validation(format!(
            "Unknown subject '{}'",
            entry.subject.as_str()
        )));
    }
    if !entry.score.is_finite() {
        return Err(AppError::validation("Score must be a number"));
    }
    entry.validate().map_err(|e| {
        AppError::validation(format!(
            "Invalid grade for student {}: {e}",
            entry.student_id
        ))
    })
}
