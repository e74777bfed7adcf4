//! Grade grouping, averaging and score validation.

pub mod aggregator;
pub mod validation;

pub use aggregator::{
    GradeAggregator, GradeGroup, GradeRow, GradeWeights, format_score, group_by_class,
    round_display,
};
pub use validation::{clamp_score, validate_score};
