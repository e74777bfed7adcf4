//! Student home: enrolled classes and per-class grades.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{info, warn};

use campus_client::PortalApi;
use campus_core::error::AppError;
use campus_core::result::AppResult;
use campus_entity::StudentId;
use campus_entity::class::ClassInfo;

use crate::context::PageContext;
use crate::grades::{GradeAggregator, GradeRow};

/// Loads the data behind the student home page.
#[derive(Debug, Clone)]
pub struct StudentDashboard {
    /// Backend client.
    api: Arc<dyn PortalApi>,
    /// Grade weights.
    aggregator: GradeAggregator,
}

impl StudentDashboard {
    /// Creates a new student dashboard.
    pub fn new(api: Arc<dyn PortalApi>, aggregator: GradeAggregator) -> Self {
        Self { api, aggregator }
    }

    /// Classes the current student is enrolled in.
    ///
    /// Class details are fetched concurrently; a class that fails to load
    /// is logged and left out. Failing to load the enrollments is an error.
    pub async fn classes(&self, ctx: &PageContext) -> AppResult<Vec<ClassInfo>> {
        let student_id = student_id(ctx)?;

        let enrollments = ctx
            .run(
                "load enrollments",
                self.api.enrollments(ctx.token(), student_id),
            )
            .await?;

        let fetches = enrollments.iter().map(|enrollment| {
            let api = Arc::clone(&self.api);
            let class_id = enrollment.class_id;
            async move { (class_id, api.class(ctx.token(), class_id).await) }
        });
        let results = ctx
            .run("load classes", async {
                Ok::<_, AppError>(join_all(fetches).await)
            })
            .await?;

        let classes: Vec<ClassInfo> = results
            .into_iter()
            .filter_map(|(class_id, result)| match result {
                Ok(class) => Some(class),
                Err(e) => {
                    warn!(%class_id, error = %e, "Skipping class that failed to load");
                    None
                }
            })
            .collect();

        info!(
            %student_id,
            enrolled = enrollments.len(),
            loaded = classes.len(),
            "Student classes loaded"
        );
        Ok(classes)
    }

    /// Grade rows for one class; focuses the page on that class.
    pub async fn grades(&self, ctx: &mut PageContext, class: &ClassInfo) -> AppResult<Vec<GradeRow>> {
        let student_id = student_id(ctx)?;
        ctx.select_class(class.class_id);

        let records = ctx
            .run(
                "load grades",
                self.api
                    .student_grades(ctx.token(), student_id, class.class_id),
            )
            .await?;

        let rows = self.aggregator.grade_rows(&records, &class.class_name);
        info!(%student_id, class_id = %class.class_id, records = records.len(), "Grades loaded");
        Ok(rows)
    }
}

fn student_id(ctx: &PageContext) -> AppResult<StudentId> {
    ctx.user().student_id().ok_or_else(|| {
        AppError::not_found(format!(
            "No student profile for '{}'; contact an administrator",
            ctx.user().username
        ))
    })
}
