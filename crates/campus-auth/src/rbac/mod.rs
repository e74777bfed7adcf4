//! Role-based page access control.

pub mod enforcer;
pub mod policies;

pub use enforcer::RouteEnforcer;
pub use policies::{
    ADMIN_PATH, FORBIDDEN_PATH, HOME_PATH, LOGIN_PATH, PUBLIC_PATHS, RoutePolicies, STUDENT_PATH,
    TEACHER_PATH, normalize_path,
};
