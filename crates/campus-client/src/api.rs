//! Backend contract as an async trait.

use async_trait::async_trait;

use campus_auth::UserResolver;
use campus_core::result::AppResult;
use campus_entity::class::{ClassDetail, ClassInfo, Enrollment};
use campus_entity::grade::{GradeEntry, GradeRecord};
use campus_entity::user::{UpdateProfile, User, UserRole};
use campus_entity::{ClassId, StudentId};

/// Operations the portal performs against the backend.
///
/// Every authenticated call takes the bearer token explicitly; the client
/// holds no session state of its own.
#[async_trait]
pub trait PortalApi: Send + Sync + std::fmt::Debug + 'static {
    /// `POST /api/login`; returns the bearer token.
    async fn login(&self, username: &str, password: &str) -> AppResult<String>;

    /// `POST /api/register`; returns the bearer token of the new account.
    async fn register(&self, username: &str, password: &str) -> AppResult<String>;

    /// `GET /api/me`.
    async fn me(&self, token: &str) -> AppResult<User>;

    /// `PUT /api/me`.
    async fn update_me(&self, token: &str, update: &UpdateProfile) -> AppResult<User>;

    /// `GET /api/students/{id}/enrollments`.
    async fn enrollments(&self, token: &str, student_id: StudentId) -> AppResult<Vec<Enrollment>>;

    /// `GET /api/classes/{id}`.
    async fn class(&self, token: &str, class_id: ClassId) -> AppResult<ClassInfo>;

    /// `GET /api/students/{id}/grades?class_id=...`.
    async fn student_grades(
        &self,
        token: &str,
        student_id: StudentId,
        class_id: ClassId,
    ) -> AppResult<Vec<GradeRecord>>;

    /// `GET /api/teacher/classes`.
    async fn teacher_classes(&self, token: &str) -> AppResult<Vec<ClassInfo>>;

    /// `GET /api/teacher/classes/{id}`.
    async fn teacher_class_detail(&self, token: &str, class_id: ClassId)
    -> AppResult<ClassDetail>;

    /// `POST /api/teacher/classes/{id}/grades`.
    async fn save_grades(
        &self,
        token: &str,
        class_id: ClassId,
        entries: &[GradeEntry],
    ) -> AppResult<()>;

    /// `POST /api/admin/update-role`.
    async fn update_role(&self, token: &str, username: &str, role: UserRole) -> AppResult<()>;
}

/// Adapts any [`PortalApi`] to the guard's [`UserResolver`] seam.
#[derive(Debug, Clone, Copy)]
pub struct ApiUserResolver<'a> {
    api: &'a dyn PortalApi,
}

impl<'a> ApiUserResolver<'a> {
    /// Wraps `api`.
    pub fn new(api: &'a dyn PortalApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl UserResolver for ApiUserResolver<'_> {
    async fn resolve_user(&self, token: &str) -> AppResult<User> {
        self.api.me(token).await
    }
}
