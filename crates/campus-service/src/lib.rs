//! # campus-service
//!
//! Page-level logic for Campus Portal. The grade aggregator, score
//! validation and class progress are pure functions; the dashboards
//! orchestrate [`campus_client::PortalApi`] calls for one page and run
//! every network step against the page's cancellation token.
//!
//! Services follow constructor injection: the backend client is provided
//! at construction time as an `Arc<dyn PortalApi>`.

pub mod classes;
pub mod context;
pub mod dashboard;
pub mod grades;

pub use classes::class_progress;
pub use context::PageContext;
pub use dashboard::{AdminConsole, ProfilePage, RosterRow, StudentDashboard, TeacherDashboard};
pub use grades::{
    GradeAggregator, GradeGroup, GradeRow, GradeWeights, clamp_score, format_score,
    group_by_class, round_display, validate_score,
};
