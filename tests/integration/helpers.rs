//! Shared test helpers for integration tests.
//!
//! `StubBackend` is an in-process axum server speaking the portal REST
//! contract over real HTTP; `TestPortal` wires the reqwest client, a file
//! session store in a temp directory and the access guard against it.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use campus_auth::{AccessGuard, FileSessionStore, SessionManager};
use campus_client::HttpPortalApi;

/// Backend state the stub serves from.
#[derive(Debug, Default)]
pub struct BackendState {
    /// username -> (password, `/api/me` payload)
    pub accounts: HashMap<String, (String, Value)>,
    /// (student_id, class_id)
    pub enrollments: Vec<(i64, i64)>,
    /// class_id -> class payload
    pub classes: HashMap<i64, Value>,
    /// Classes whose `GET /api/classes/{id}` fails with 500.
    pub broken_classes: Vec<i64>,
    /// (student_id, class_id, subject, score)
    pub grades: Vec<(i64, i64, String, f64)>,
    /// class_id -> roster: student_id -> (name, attendance, mid, final)
    pub rosters: HashMap<i64, Vec<(i64, String, Value, Value, Value)>>,
    /// Grade batches received.
    pub saved_batches: Vec<Value>,
    /// Role changes received.
    pub role_updates: Vec<(String, String)>,
    /// Number of `GET /api/me` calls.
    pub me_calls: usize,
    /// Delay applied to `GET /api/me`.
    pub me_delay: Option<Duration>,
}

type Shared = Arc<Mutex<BackendState>>;

/// In-process HTTP backend.
pub struct StubBackend {
    /// Base URL, e.g. `http://127.0.0.1:43121`.
    pub base_url: String,
    /// Mutable state.
    pub state: Shared,
    shutdown: Option<oneshot::Sender<()>>,
}

impl StubBackend {
    /// Starts the stub on an ephemeral port.
    pub async fn start(state: BackendState) -> Self {
        let state = Arc::new(Mutex::new(state));
        let app = Router::new()
            .route("/api/login", post(login))
            .route("/api/register", post(register))
            .route("/api/me", get(me).put(update_me))
            .route("/api/students/{id}/enrollments", get(enrollments))
            .route("/api/students/{id}/grades", get(student_grades))
            .route("/api/classes/{id}", get(class))
            .route("/api/teacher/classes", get(teacher_classes))
            .route("/api/teacher/classes/{id}", get(teacher_class_detail))
            .route("/api/teacher/classes/{id}/grades", post(save_grades))
            .route("/api/admin/update-role", post(update_role))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        let (tx, rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = rx.await;
                })
                .await
                .expect("stub backend");
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
            shutdown: Some(tx),
        }
    }

    /// Number of `GET /api/me` calls so far.
    pub fn me_calls(&self) -> usize {
        self.state.lock().unwrap().me_calls
    }
}

impl Drop for StubBackend {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// Client-side wiring against a [`StubBackend`].
pub struct TestPortal {
    /// HTTP client.
    pub api: Arc<HttpPortalApi>,
    /// Guard over the file session store.
    pub guard: AccessGuard,
    /// Session file location.
    pub session_path: std::path::PathBuf,
    _dir: tempfile::TempDir,
}

impl TestPortal {
    /// Creates a portal with an empty session.
    pub fn new(backend: &StubBackend) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let session_path = dir.path().join("session.json");
        let store = Arc::new(FileSessionStore::new(session_path.clone()));
        let client = reqwest::Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .expect("client");
        Self {
            api: Arc::new(HttpPortalApi::with_client(client, &backend.base_url)),
            guard: AccessGuard::new(SessionManager::new(store)),
            session_path,
            _dir: dir,
        }
    }

    /// Session manager of the guard.
    pub fn sessions(&self) -> &SessionManager {
        self.guard.sessions()
    }
}

/// Token the stub issues for `username`.
pub fn token_for(username: &str) -> String {
    format!("tok-{username}")
}

/// `/api/me` payload for a student.
pub fn student_account(username: &str, student_id: i64) -> Value {
    json!({
        "user_id": student_id + 100,
        "username": username,
        "full_name": format!("Student {username}"),
        "email": format!("{username}@school.example"),
        "role": "student",
        "student_profile": {
            "student_id": student_id,
            "student_code": format!("SV{student_id:04}"),
            "birthdate": "2003-05-01"
        },
        "teacher_profile": null
    })
}

/// `/api/me` payload for a non-student role.
pub fn staff_account(username: &str, role: &str) -> Value {
    json!({
        "user_id": 1,
        "username": username,
        "full_name": format!("Staff {username}"),
        "role": role,
        "teacher_profile": if role == "teacher" {
            json!({"teacher_id": 3, "department": "CS", "title": "Dr."})
        } else {
            Value::Null
        }
    })
}

/// Class payload.
pub fn class_payload(id: i64, name: &str) -> Value {
    json!({
        "class_id": id,
        "class_name": name,
        "year": 2024,
        "semester": 1,
        "max_students": 40
    })
}

fn detail(message: &str) -> Json<Value> {
    Json(json!({ "detail": message }))
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, detail("Could not validate credentials")).into_response()
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

fn account_for(state: &BackendState, headers: &HeaderMap) -> Option<Value> {
    let token = bearer(headers)?;
    state
        .accounts
        .iter()
        .find(|(username, _)| token_for(username) == token)
        .map(|(_, (_, me))| me.clone())
}

fn role_of(me: &Value) -> &str {
    me.get("role").and_then(Value::as_str).unwrap_or("")
}

#[derive(Deserialize)]
struct Credentials {
    username: String,
    password: String,
}

async fn login(State(state): State<Shared>, Json(body): Json<Credentials>) -> Response {
    let state = state.lock().unwrap();
    match state.accounts.get(&body.username) {
        Some((password, _)) if *password == body.password => {
            Json(json!(token_for(&body.username))).into_response()
        }
        _ => (
            StatusCode::UNAUTHORIZED,
            detail("Incorrect username or password"),
        )
            .into_response(),
    }
}

async fn register(State(state): State<Shared>, Json(body): Json<Credentials>) -> Response {
    let mut state = state.lock().unwrap();
    if state.accounts.contains_key(&body.username) {
        return (StatusCode::BAD_REQUEST, detail("Username already registered")).into_response();
    }
    let me = json!({ "username": body.username, "role": "student" });
    state
        .accounts
        .insert(body.username.clone(), (body.password, me));
    Json(json!({ "token": token_for(&body.username) })).into_response()
}

async fn me(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let delay = {
        let mut guard = state.lock().unwrap();
        guard.me_calls += 1;
        guard.me_delay
    };
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    match account_for(&state.lock().unwrap(), &headers) {
        Some(me) => Json(me).into_response(),
        None => unauthorized(),
    }
}

async fn update_me(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(update): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    let Some(token) = bearer(&headers) else {
        return unauthorized();
    };
    let Some((_, (_, me))) = state
        .accounts
        .iter_mut()
        .find(|(username, _)| token_for(username) == token)
    else {
        return unauthorized();
    };
    if let (Some(me), Some(update)) = (me.as_object_mut(), update.as_object()) {
        for key in ["full_name", "email"] {
            if let Some(value) = update.get(key) {
                me.insert(key.to_string(), value.clone());
            }
        }
    }
    Json(me.clone()).into_response()
}

async fn enrollments(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(student_id): Path<i64>,
) -> Response {
    let state = state.lock().unwrap();
    if account_for(&state, &headers).is_none() {
        return unauthorized();
    }
    let items: Vec<Value> = state
        .enrollments
        .iter()
        .filter(|(s, _)| *s == student_id)
        .map(|(s, c)| json!({"student_id": s, "class_id": c, "enroll_date": "2024-09-01"}))
        .collect();
    Json(items).into_response()
}

#[derive(Deserialize)]
struct GradeQuery {
    class_id: Option<i64>,
}

async fn student_grades(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(student_id): Path<i64>,
    Query(query): Query<GradeQuery>,
) -> Response {
    let state = state.lock().unwrap();
    if account_for(&state, &headers).is_none() {
        return unauthorized();
    }
    let items: Vec<Value> = state
        .grades
        .iter()
        .enumerate()
        .filter(|(_, (s, c, _, _))| *s == student_id && query.class_id.is_none_or(|q| q == *c))
        .map(|(i, (s, c, subject, score))| {
            json!({"grade_id": i, "student_id": s, "class_id": c, "subject": subject, "score": score})
        })
        .collect();
    Json(items).into_response()
}

async fn class(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    let state = state.lock().unwrap();
    if account_for(&state, &headers).is_none() {
        return unauthorized();
    }
    if state.broken_classes.contains(&id) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }
    match state.classes.get(&id) {
        Some(class) => Json(class.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, detail("Class not found")).into_response(),
    }
}

fn require_role(state: &BackendState, headers: &HeaderMap, role: &str) -> Result<(), Response> {
    match account_for(state, headers) {
        None => Err(unauthorized()),
        Some(me) if role_of(&me) == role => Ok(()),
        Some(_) => Err((StatusCode::FORBIDDEN, detail("Not enough permissions")).into_response()),
    }
}

async fn teacher_classes(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let state = state.lock().unwrap();
    if let Err(resp) = require_role(&state, &headers, "teacher") {
        return resp;
    }
    let mut items: Vec<Value> = state
        .rosters
        .keys()
        .filter_map(|id| state.classes.get(id).cloned())
        .collect();
    items.sort_by_key(|c| c["class_id"].as_i64());
    Json(items).into_response()
}

async fn teacher_class_detail(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    let state = state.lock().unwrap();
    if let Err(resp) = require_role(&state, &headers, "teacher") {
        return resp;
    }
    let (Some(class), Some(roster)) = (state.classes.get(&id), state.rosters.get(&id)) else {
        return (StatusCode::NOT_FOUND, detail("Class not found")).into_response();
    };
    let students: Vec<Value> = roster
        .iter()
        .map(|(sid, name, att, mid, fin)| {
            json!({
                "student_id": sid,
                "full_name": name,
                "student_code": format!("SV{sid:04}"),
                "grades": {"attendance": att, "mid": mid, "final": fin}
            })
        })
        .collect();
    let mut body = class.clone();
    body["students"] = Value::Array(students);
    Json(body).into_response()
}

async fn save_grades(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(entries): Json<Vec<Value>>,
) -> Response {
    let mut state = state.lock().unwrap();
    if let Err(resp) = require_role(&state, &headers, "teacher") {
        return resp;
    }
    let Some(roster) = state.rosters.get_mut(&id) else {
        return (StatusCode::NOT_FOUND, detail("Class not found")).into_response();
    };
    for entry in &entries {
        let sid = entry["student_id"].as_i64();
        let score = entry["score"].clone();
        if let Some(row) = roster.iter_mut().find(|row| Some(row.0) == sid) {
            match entry["subject"].as_str() {
                Some("attendance") => row.2 = score,
                Some("mid") => row.3 = score,
                Some("final") => row.4 = score,
                _ => {
                    return (StatusCode::UNPROCESSABLE_ENTITY, detail("Unknown subject"))
                        .into_response();
                }
            }
        }
    }
    state.saved_batches.push(Value::Array(entries));
    Json(json!({"message": "Grades saved"})).into_response()
}

#[derive(Deserialize)]
struct RoleUpdate {
    username: String,
    new_role: String,
}

async fn update_role(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<RoleUpdate>,
) -> Response {
    let mut state = state.lock().unwrap();
    if let Err(resp) = require_role(&state, &headers, "admin") {
        return resp;
    }
    let Some((_, me)) = state.accounts.get_mut(&body.username) else {
        return (StatusCode::NOT_FOUND, detail("User not found")).into_response();
    };
    me["role"] = json!(body.new_role);
    state.role_updates.push((body.username, body.new_role));
    Json(json!({"message": "Role updated"})).into_response()
}
