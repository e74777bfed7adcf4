//! Mapping of HTTP failures into [`AppError`].

use reqwest::StatusCode;

use campus_core::error::{AppError, ErrorKind};

use crate::dto::ErrorBody;

/// Maps a non-success status and its body to an error kind and message.
pub fn status_error(status: StatusCode, body: &str, context: &str) -> AppError {
    let kind = match status {
        StatusCode::UNAUTHORIZED => ErrorKind::Authentication,
        StatusCode::FORBIDDEN => ErrorKind::Authorization,
        StatusCode::NOT_FOUND => ErrorKind::NotFound,
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ErrorKind::Validation,
        _ => ErrorKind::ExternalService,
    };
    let detail = detail_message(body).unwrap_or_else(|| status.to_string());
    AppError::new(kind, format!("{context}: {detail}"))
}

/// Maps a transport-level failure (connect, timeout, decode).
pub fn transport_error(err: reqwest::Error, context: &str) -> AppError {
    let kind = if err.is_decode() {
        ErrorKind::Serialization
    } else {
        ErrorKind::ExternalService
    };
    AppError::with_source(kind, format!("{context}: {err}"), err)
}

fn detail_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail {
        serde_json::Value::String(s) if !s.is_empty() => Some(s),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}
