//! Class and enrollment entities.

pub mod model;

pub use model::{ClassDetail, ClassInfo, ClassStudent, Enrollment, StudentGradeSlots};
