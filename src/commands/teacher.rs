//! Teacher pages: assigned classes, roster and grade entry.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use campus_core::result::AppResult;
use campus_entity::class::ClassDetail;
use campus_entity::{ClassId, StudentId};
use campus_service::{RosterRow, TeacherDashboard};

use super::Portal;
use super::student::ClassRow;
use crate::output::{self, OutputFormat};

/// Arguments for teacher commands
#[derive(Debug, Args)]
pub struct TeacherArgs {
    /// Teacher subcommand
    #[command(subcommand)]
    pub command: TeacherCommand,
}

/// Teacher subcommands
#[derive(Debug, Subcommand)]
pub enum TeacherCommand {
    /// List the classes you teach
    Classes,
    /// Show a class roster with current grades
    Class {
        /// Class id
        class_id: i64,
    },
    /// Record one grade and show the updated roster
    Grade {
        /// Class id
        class_id: i64,
        /// Student id
        student_id: i64,
        /// attendance, mid or final
        subject: String,
        /// Score between 0 and 10
        score: String,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct RosterTableRow {
    #[tabled(rename = "ID")]
    student_id: i64,
    #[tabled(rename = "Name")]
    full_name: String,
    #[tabled(rename = "Code")]
    student_code: String,
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

impl From<RosterRow> for RosterTableRow {
    fn from(row: RosterRow) -> Self {
        Self {
            student_id: row.student_id.value(),
            full_name: row.full_name,
            student_code: row.student_code,
            attendance: row.attendance,
            mid: row.mid,
            final_: row.final_,
            average: row
                .average
                .map_or_else(|| "-".to_string(), |avg| format!("{avg:.1}")),
        }
    }
}

/// Execute teacher commands
pub async fn execute(portal: &Portal, args: &TeacherArgs, format: OutputFormat) -> AppResult<()> {
    let mut ctx = portal.open_page("/teacher").await?;
    let dashboard = TeacherDashboard::new(portal.api.clone(), portal.aggregator);

    match &args.command {
        TeacherCommand::Classes => {
            let classes = dashboard.classes(&ctx).await?;
            let rows: Vec<ClassRow> = classes.iter().map(ClassRow::from).collect();
            output::print_list(&rows, format, "No classes assigned.");
        }
        TeacherCommand::Class { class_id } => {
            let detail = dashboard.class_detail(&mut ctx, ClassId(*class_id)).await?;
            print_roster(&dashboard, &detail, format);
        }
        TeacherCommand::Grade {
            class_id,
            student_id,
            subject,
            score,
        } => {
            let class_id = ClassId(*class_id);
            let entry =
                TeacherDashboard::build_entry(StudentId(*student_id), class_id, subject, score)?;
            let detail = dashboard.submit_grades(&mut ctx, class_id, &[entry]).await?;
            output::print_success("Grade saved");
            print_roster(&dashboard, &detail, format);
        }
    }
    Ok(())
}

fn print_roster(dashboard: &TeacherDashboard, detail: &ClassDetail, format: OutputFormat) {
    let rows: Vec<RosterTableRow> = dashboard
        .roster_rows(detail)
        .into_iter()
        .map(RosterTableRow::from)
        .collect();
    if format == OutputFormat::Table {
        output::print_kv("Class", &detail.class_name);
        output::print_kv(
            "Term",
            &format!("{} semester {}", detail.year, detail.semester),
        );
        output::print_kv("Students", &detail.students.len().to_string());
    }
    output::print_list(&rows, format, "No students enrolled.");
}
