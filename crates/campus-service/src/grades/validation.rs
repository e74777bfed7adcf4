//! Score input checks for grade entry.

use campus_core::error::AppError;
use campus_core::result::AppResult;
use campus_entity::grade::{SCORE_MAX, SCORE_MIN};

/// Parses a score typed by a teacher.
///
/// Rejects empty, non-numeric and out-of-range input.
pub fn validate_score(raw: &str) -> AppResult<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("Score is required"));
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| AppError::validation(format!("Score '{trimmed}' is not a number")))?;
    if !value.is_finite() || !(SCORE_MIN..=SCORE_MAX).contains(&value) {
        return Err(AppError::validation(format!(
            "Score must be between {SCORE_MIN} and {SCORE_MAX}, got {trimmed}"
        )));
    }
    Ok(value)
}

/// Rounds to one decimal and clamps into the score range.
pub fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        return SCORE_MIN;
    }
    ((value * 10.0).round() / 10.0).clamp(SCORE_MIN, SCORE_MAX)
}
