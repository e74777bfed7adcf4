//! Grade weighting configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Weights of the three grade components used for the class average.
///
/// Weights are relative; the average is renormalized over the components
/// that are present, so they need not sum to one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradingConfig {
    /// Weight of the attendance score.
    #[serde(default = "default_attendance")]
    pub attendance_weight: f64,
    /// Weight of the midterm score.
    #[serde(default = "default_mid")]
    pub mid_weight: f64,
    /// Weight of the final exam score.
    #[serde(default = "default_final")]
    pub final_weight: f64,
}

impl GradingConfig {
    /// Every weight must be a positive finite number.
    pub fn validate(&self) -> Result<(), AppError> {
        for (name, weight) in [
            ("attendance_weight", self.attendance_weight),
            ("mid_weight", self.mid_weight),
            ("final_weight", self.final_weight),
        ] {
            if !weight.is_finite() || weight <= 0.0 {
                return Err(AppError::configuration(format!(
                    "grading.{name} must be a positive number, got {weight}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self {
            attendance_weight: default_attendance(),
            mid_weight: default_mid(),
            final_weight: default_final(),
        }
    }
}

fn default_attendance() -> f64 {
    0.2
}

fn default_mid() -> f64 {
    0.3
}

fn default_final() -> f64 {
    0.5
}
