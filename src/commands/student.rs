//! Student pages: enrolled classes and grades.

use chrono::Local;
use serde::Serialize;
use tabled::Tabled;

use campus_core::result::AppResult;
use campus_entity::ClassId;
use campus_service::{GradeRow, StudentDashboard, class_progress};

use super::Portal;
use crate::output::{self, OutputFormat};

#[derive(Debug, Serialize, Tabled)]
pub(crate) struct ClassRow {
    /// Class ID
    #[tabled(rename = "ID")]
    pub id: i64,
    /// Class name
    #[tabled(rename = "Class")]
    pub name: String,
    /// Academic year
    #[tabled(rename = "Year")]
    pub year: i32,
    /// Semester
    #[tabled(rename = "Semester")]
    pub semester: u8,
    /// Elapsed share of the semester
    #[tabled(rename = "Progress")]
    pub progress: String,
}

impl From<&campus_entity::class::ClassInfo> for ClassRow {
    fn from(class: &campus_entity::class::ClassInfo) -> Self {
        let today = Local::now().date_naive();
        Self {
            id: class.class_id.value(),
            name: class.class_name.clone(),
            year: class.year,
            semester: class.semester,
            progress: format!("{}%", class_progress(class.year, class.semester, today)),
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
struct GradeTableRow {
    #[tabled(rename = "Class")]
    class_name: String,
    #[tabled(rename = "Attendance")]
    attendance: String,
    #[tabled(rename = "Mid")]
    mid: String,
    #[tabled(rename = "Final")]
    #[serde(rename = "final")]
    final_: String,
    #[tabled(rename = "Average")]
    average: String,
}

impl From<GradeRow> for GradeTableRow {
    fn from(row: GradeRow) -> Self {
        Self {
            class_name: row.class_name,
            attendance: row.attendance,
            mid: row.mid,
            final_: row.final_,
            average: row.average,
        }
    }
}

/// `portal classes`
pub async fn classes(portal: &Portal, format: OutputFormat) -> AppResult<()> {
    let ctx = portal.open_page("/student").await?;
    let dashboard = StudentDashboard::new(portal.api.clone(), portal.aggregator);

    let classes = dashboard.classes(&ctx).await?;
    let rows: Vec<ClassRow> = classes.iter().map(ClassRow::from).collect();
    output::print_list(&rows, format, "You are not enrolled in any class.");
    Ok(())
}

/// `portal grades <class_id>`
pub async fn grades(portal: &Portal, class_id: i64, format: OutputFormat) -> AppResult<()> {
    let mut ctx = portal.open_page("/student").await?;
    let dashboard = StudentDashboard::new(portal.api.clone(), portal.aggregator);

    let class = ctx
        .run("load class", portal.api.class(ctx.token(), ClassId(class_id)))
        .await?;
    let rows: Vec<GradeTableRow> = dashboard
        .grades(&mut ctx, &class)
        .await?
        .into_iter()
        .map(GradeTableRow::from)
        .collect();
    output::print_list(&rows, format, "No grades yet.");
    Ok(())
}
