//! Grade component (subject slot) enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The component a score belongs to.
///
/// Matching is case-insensitive. Names other than the three known
/// components are kept verbatim in [`Subject::Other`] so they round-trip,
/// but aggregation ignores them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Subject {
    /// Attendance score.
    Attendance,
    /// Midterm exam score.
    Mid,
    /// Final exam score.
    Final,
    /// Any other subject name.
    Other(String),
}

impl Subject {
    /// Parses a subject name case-insensitively; never fails.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "attendance" => Self::Attendance,
            "mid" => Self::Mid,
            "final" => Self::Final,
            _ => Self::Other(s.to_string()),
        }
    }

    /// Whether this is one of the three aggregated components.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// Canonical wire name.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Attendance => "attendance",
            Self::Mid => "mid",
            Self::Final => "final",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<String> for Subject {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<&str> for Subject {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<Subject> for String {
    fn from(subject: Subject) -> Self {
        subject.as_str().to_string()
    }
}
