//! User domain entities.

pub mod model;
pub mod role;

pub use model::{StudentProfile, TeacherProfile, UpdateProfile, User};
pub use role::UserRole;
