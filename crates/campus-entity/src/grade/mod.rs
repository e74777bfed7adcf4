//! Grade entities.

pub mod entry;
pub mod record;
pub mod subject;

pub use entry::{GradeEntry, SCORE_MAX, SCORE_MIN};
pub use record::GradeRecord;
pub use subject::Subject;
