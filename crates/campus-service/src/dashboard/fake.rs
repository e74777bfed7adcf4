//! In-memory backend for dashboard tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use campus_client::PortalApi;
use campus_core::error::AppError;
use campus_core::result::AppResult;
use campus_entity::class::{ClassDetail, ClassInfo, Enrollment};
use campus_entity::grade::{GradeEntry, GradeRecord};
use campus_entity::user::{UpdateProfile, User, UserRole};
use campus_entity::{ClassId, StudentId};

#[derive(Debug, Default)]
pub(crate) struct FakeApi {
    pub users: Mutex<HashMap<String, User>>,
    pub enrollments: Vec<Enrollment>,
    pub classes: Vec<ClassInfo>,
    pub failing_classes: Vec<ClassId>,
    pub grades: Vec<GradeRecord>,
    pub details: Mutex<HashMap<ClassId, ClassDetail>>,
    pub saved: Mutex<Vec<GradeEntry>>,
    pub role_updates: Mutex<Vec<(String, UserRole)>>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeApi {
    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PortalApi for FakeApi {
    async fn login(&self, username: &str, _password: &str) -> AppResult<String> {
        self.record("login");
        Ok(format!("token-{username}"))
    }

    async fn register(&self, username: &str, _password: &str) -> AppResult<String> {
        self.record("register");
        Ok(format!("token-{username}"))
    }

    async fn me(&self, token: &str) -> AppResult<User> {
        self.record("me");
        self.users
            .lock()
            .unwrap()
            .get(token)
            .cloned()
            .ok_or_else(|| AppError::authentication("unknown token"))
    }

    async fn update_me(&self, token: &str, update: &UpdateProfile) -> AppResult<User> {
        self.record("update_me");
        let mut users = self.users.lock().unwrap();
        let user = users
            .get_mut(token)
            .ok_or_else(|| AppError::authentication("unknown token"))?;
        if let Some(name) = &update.full_name {
            user.full_name = Some(name.clone());
        }
        if let Some(email) = &update.email {
            user.email = Some(email.clone());
        }
        Ok(user.clone())
    }

    async fn enrollments(&self, _token: &str, student_id: StudentId) -> AppResult<Vec<Enrollment>> {
        self.record("enrollments");
        Ok(self
            .enrollments
            .iter()
            .filter(|e| e.student_id == student_id)
            .cloned()
            .collect())
    }

    async fn class(&self, _token: &str, class_id: ClassId) -> AppResult<ClassInfo> {
        self.record(format!("class {class_id}"));
        if self.failing_classes.contains(&class_id) {
            return Err(AppError::external_service("502 Bad Gateway"));
        }
        self.classes
            .iter()
            .find(|c| c.class_id == class_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("class {class_id}")))
    }

    async fn student_grades(
        &self,
        _token: &str,
        student_id: StudentId,
        class_id: ClassId,
    ) -> AppResult<Vec<GradeRecord>> {
        self.record("student_grades");
        Ok(self
            .grades
            .iter()
            .filter(|g| g.class_id == class_id && g.student_id.is_none_or(|s| s == student_id))
            .cloned()
            .collect())
    }

    async fn teacher_classes(&self, _token: &str) -> AppResult<Vec<ClassInfo>> {
        self.record("teacher_classes");
        Ok(self.classes.clone())
    }

    async fn teacher_class_detail(
        &self,
        _token: &str,
        class_id: ClassId,
    ) -> AppResult<ClassDetail> {
        self.record("teacher_class_detail");
        self.details
            .lock()
            .unwrap()
            .get(&class_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("class {class_id}")))
    }

    async fn save_grades(
        &self,
        _token: &str,
        class_id: ClassId,
        entries: &[GradeEntry],
    ) -> AppResult<()> {
        self.record("save_grades");
        let mut details = self.details.lock().unwrap();
        if let Some(detail) = details.get_mut(&class_id) {
            for entry in entries {
                if let Some(student) = detail
                    .students
                    .iter_mut()
                    .find(|s| s.student_id == entry.student_id)
                {
                    let slot = match entry.subject.as_str() {
                        "attendance" => &mut student.grades.attendance,
                        "mid" => &mut student.grades.mid,
                        _ => &mut student.grades.r#final,
                    };
                    *slot = Some(entry.score);
                }
            }
        }
        self.saved.lock().unwrap().extend_from_slice(entries);
        Ok(())
    }

    async fn update_role(&self, _token: &str, username: &str, role: UserRole) -> AppResult<()> {
        self.record("update_role");
        self.role_updates
            .lock()
            .unwrap()
            .push((username.to_string(), role));
        Ok(())
    }
}

pub(crate) fn user(username: &str, role: UserRole) -> User {
    User {
        user_id: Some(1),
        username: username.to_string(),
        role,
        full_name: None,
        email: None,
        student_profile: None,
        teacher_profile: None,
    }
}

pub(crate) fn class_info(id: i64, name: &str) -> ClassInfo {
    ClassInfo {
        class_id: ClassId(id),
        class_name: name.to_string(),
        year: 2024,
        semester: 1,
        max_students: Some(40),
    }
}
