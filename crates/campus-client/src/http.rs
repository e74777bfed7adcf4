//! `reqwest` implementation of [`PortalApi`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use campus_core::config::ApiConfig;
use campus_core::error::AppError;
use campus_core::result::AppResult;
use campus_entity::class::{ClassDetail, ClassInfo, Enrollment};
use campus_entity::grade::{GradeEntry, GradeRecord};
use campus_entity::user::{UpdateProfile, User, UserRole};
use campus_entity::{ClassId, StudentId};

use crate::api::PortalApi;
use crate::dto::{Credentials, RoleUpdate, TokenResponse};
use crate::error::{status_error, transport_error};

/// HTTP client for the portal backend.
#[derive(Debug, Clone)]
pub struct HttpPortalApi {
    client: Client,
    base_url: String,
}

impl HttpPortalApi {
    /// Builds a client from the `[api]` configuration section.
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    campus_core::ErrorKind::Configuration,
                    format!("Failed to build HTTP client: {e}"),
                    e,
                )
            })?;
        Ok(Self::with_client(client, &config.base_url))
    }

    /// Uses an existing `reqwest` client.
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.client.request(method, url);
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder, context: &str) -> AppResult<Response> {
        let response = builder
            .send()
            .await
            .map_err(|e| transport_error(e, context))?;
        let status = response.status();
        if status.is_success() {
            debug!(%status, context, "Backend request succeeded");
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        warn!(%status, context, "Backend request failed");
        Err(status_error(status, &body, context))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, token: &str) -> AppResult<T> {
        let context = format!("GET {path}");
        let response = self
            .send(self.request(Method::GET, path, Some(token)), &context)
            .await?;
        response
            .json::<T>()
            .await
            .map_err(|e| transport_error(e, &context))
    }

    async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> AppResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let context = format!("{method} {path}");
        let response = self
            .send(self.request(method, path, token).json(body), &context)
            .await?;
        response
            .json::<T>()
            .await
            .map_err(|e| transport_error(e, &context))
    }

    async fn credentials(&self, path: &str, username: &str, password: &str) -> AppResult<String> {
        let body = Credentials {
            username: username.to_string(),
            password: password.to_string(),
        };
        let token: TokenResponse = self.send_json(Method::POST, path, None, &body).await?;
        let token = token.into_token();
        if token.trim().is_empty() {
            return Err(AppError::authentication("Backend returned an empty token"));
        }
        Ok(token)
    }
}

#[async_trait]
impl PortalApi for HttpPortalApi {
    async fn login(&self, username: &str, password: &str) -> AppResult<String> {
        self.credentials("/api/login", username, password).await
    }

    async fn register(&self, username: &str, password: &str) -> AppResult<String> {
        self.credentials("/api/register", username, password).await
    }

    async fn me(&self, token: &str) -> AppResult<User> {
        self.get_json("/api/me", token).await
    }

    async fn update_me(&self, token: &str, update: &UpdateProfile) -> AppResult<User> {
        self.send_json(Method::PUT, "/api/me", Some(token), update)
            .await
    }

    async fn enrollments(&self, token: &str, student_id: StudentId) -> AppResult<Vec<Enrollment>> {
        self.get_json(&format!("/api/students/{student_id}/enrollments"), token)
            .await
    }

    async fn class(&self, token: &str, class_id: ClassId) -> AppResult<ClassInfo> {
        self.get_json(&format!("/api/classes/{class_id}"), token)
            .await
    }

    async fn student_grades(
        &self,
        token: &str,
        student_id: StudentId,
        class_id: ClassId,
    ) -> AppResult<Vec<GradeRecord>> {
        self.get_json(
            &format!("/api/students/{student_id}/grades?class_id={class_id}"),
            token,
        )
        .await
    }

    async fn teacher_classes(&self, token: &str) -> AppResult<Vec<ClassInfo>> {
        self.get_json("/api/teacher/classes", token).await
    }

    async fn teacher_class_detail(
        &self,
        token: &str,
        class_id: ClassId,
    ) -> AppResult<ClassDetail> {
        self.get_json(&format!("/api/teacher/classes/{class_id}"), token)
            .await
    }

    async fn save_grades(
        &self,
        token: &str,
        class_id: ClassId,
        entries: &[GradeEntry],
    ) -> AppResult<()> {
        let path = format!("/api/teacher/classes/{class_id}/grades");
        let context = format!("POST {path}");
        self.send(
            self.request(Method::POST, &path, Some(token)).json(entries),
            &context,
        )
        .await?;
        debug!(%class_id, count = entries.len(), "Grades saved");
        Ok(())
    }

    async fn update_role(&self, token: &str, username: &str, role: UserRole) -> AppResult<()> {
        let body = RoleUpdate {
            username: username.to_string(),
            new_role: role,
        };
        let path = "/api/admin/update-role";
        self.send(
            self.request(Method::POST, path, Some(token)).json(&body),
            &format!("POST {path}"),
        )
        .await?;
        Ok(())
    }
}
