//! Page services: one per portal area.

pub mod admin;
pub mod profile;
pub mod student;
pub mod teacher;

#[cfg(test)]
pub(crate) mod fake;

pub use admin::AdminConsole;
pub use profile::ProfilePage;
pub use student::StudentDashboard;
pub use teacher::{RosterRow, TeacherDashboard};
