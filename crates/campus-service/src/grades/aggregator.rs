//! Per-class grouping of grade records and the weighted class average.
//!
//! The backend returns one [`GradeRecord`] per (class, subject). The
//! aggregator folds them into one [`GradeGroup`] per class and averages the
//! three component slots with weights renormalized over the slots that are
//! present.

use std::collections::HashMap;

use serde::Serialize;

use campus_core::config::GradingConfig;
use campus_entity::ClassId;
use campus_entity::class::StudentGradeSlots;
use campus_entity::grade::{GradeRecord, Subject};

/// Relative weights of the grade components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradeWeights {
    /// Attendance weight.
    pub attendance: f64,
    /// Midterm weight.
    pub mid: f64,
    /// Final exam weight.
    pub final_: f64,
}

impl Default for GradeWeights {
    fn default() -> Self {
        Self {
            attendance: 0.2,
            mid: 0.3,
            final_: 0.5,
        }
    }
}

impl From<&GradingConfig> for GradeWeights {
    fn from(config: &GradingConfig) -> Self {
        Self {
            attendance: config.attendance_weight,
            mid: config.mid_weight,
            final_: config.final_weight,
        }
    }
}

/// The three component scores of one class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeGroup {
    /// Class the scores belong to.
    pub class_id: ClassId,
    /// Attendance score.
    pub attendance: Option<f64>,
    /// Midterm score.
    pub mid: Option<f64>,
    /// Final exam score.
    #[serde(rename = "final")]
    pub final_: Option<f64>,
}

impl GradeGroup {
    /// An empty group for `class_id`.
    pub fn empty(class_id: ClassId) -> Self {
        Self {
            class_id,
            attendance: None,
            mid: None,
            final_: None,
        }
    }

    /// A group from the slots of a teacher class-detail row.
    pub fn from_slots(class_id: ClassId, slots: &StudentGradeSlots) -> Self {
        Self {
            class_id,
            attendance: slots.attendance,
            mid: slots.mid,
            final_: slots.r#final,
        }
    }

    /// Whether no slot holds a score.
    pub fn is_empty(&self) -> bool {
        self.attendance.is_none() && self.mid.is_none() && self.final_.is_none()
    }

    fn put(&mut self, subject: &Subject, score: f64) {
        match subject {
            Subject::Attendance => self.attendance = Some(score),
            Subject::Mid => self.mid = Some(score),
            Subject::Final => self.final_ = Some(score),
            Subject::Other(_) => {}
        }
    }
}

/// Groups records by class in a single pass.
///
/// Groups keep the order in which each class was first seen. Records with
/// an unrecognised subject are skipped; when a class has several records
/// for the same subject, the last one wins.
pub fn group_by_class(records: &[GradeRecord]) -> Vec<GradeGroup> {
    let mut groups: Vec<GradeGroup> = Vec::new();
    let mut index: HashMap<ClassId, usize> = HashMap::new();

    for record in records {
        if !record.subject.is_known() {
            continue;
        }
        let slot = *index.entry(record.class_id).or_insert_with(|| {
            groups.push(GradeGroup::empty(record.class_id));
            groups.len() - 1
        });
        groups[slot].put(&record.subject, record.score);
    }

    groups
}

/// Rounds to two decimals for display.
pub fn round_display(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Renders a score with two decimals, or `-` when absent.
pub fn format_score(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => "-".to_string(),
    }
}

/// One display row of the student grade table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GradeRow {
    /// Class name.
    pub class_name: String,
    /// Formatted attendance score.
    pub attendance: String,
    /// Formatted midterm score.
    pub mid: String,
    /// Formatted final score.
    #[serde(rename = "final")]
    pub final_: String,
    /// Formatted weighted average.
    pub average: String,
}

/// Applies the configured weights to grade groups.
#[derive(Debug, Clone, Copy, Default)]
pub struct GradeAggregator {
    weights: GradeWeights,
}

impl GradeAggregator {
    /// Creates an aggregator with explicit weights.
    pub fn new(weights: GradeWeights) -> Self {
        Self { weights }
    }

    /// Creates an aggregator from the `[grading]` configuration section.
    pub fn from_config(config: &GradingConfig) -> Self {
        Self::new(GradeWeights::from(config))
    }

    /// The weights in use.
    pub fn weights(&self) -> GradeWeights {
        self.weights
    }

    /// Weighted average over the present slots, unrounded.
    ///
    /// Returns `None` when no slot is present.
    pub fn weighted_average(&self, group: &GradeGroup) -> Option<f64> {
        let parts = [
            (group.attendance, self.weights.attendance),
            (group.mid, self.weights.mid),
            (group.final_, self.weights.final_),
        ];

        let (sum, total) = parts
            .iter()
            .filter_map(|(score, weight)| score.map(|s| (s * weight, *weight)))
            .fold((0.0, 0.0), |(sum, total), (part, weight)| {
                (sum + part, total + weight)
            });

        if total > 0.0 { Some(sum / total) } else { None }
    }

    /// Class-roster average: missing slots count as zero, rounded to one
    /// decimal. `None` when the student has no score at all.
    pub fn roster_average(&self, slots: &StudentGradeSlots) -> Option<f64> {
        if slots.attendance.is_none() && slots.mid.is_none() && slots.r#final.is_none() {
            return None;
        }
        let w = self.weights;
        let total = w.attendance + w.mid + w.final_;
        let sum = slots.attendance.unwrap_or(0.0) * w.attendance
            + slots.mid.unwrap_or(0.0) * w.mid
            + slots.r#final.unwrap_or(0.0) * w.final_;
        Some(((sum / total) * 10.0).round() / 10.0)
    }

    /// Groups `records` and renders one row per class under `class_name`.
    pub fn grade_rows(&self, records: &[GradeRecord], class_name: &str) -> Vec<GradeRow> {
        group_by_class(records)
            .iter()
            .map(|group| GradeRow {
                class_name: class_name.to_string(),
                attendance: format_score(group.attendance),
                mid: format_score(group.mid),
                final_: format_score(group.final_),
                average: format_score(self.weighted_average(group).map(round_display)),
            })
            .collect()
    }
}
