//! Typed identifiers for backend records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use campus_core::AppError;

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Returns the raw numeric value.
            pub fn value(&self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = AppError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<i64>().map(Self).map_err(|_| {
                    AppError::validation(format!("Invalid {}: '{s}'", $label))
                })
            }
        }
    };
}

numeric_id!(
    /// Identifier of a class (course section).
    ClassId,
    "class id"
);

numeric_id!(
    /// Identifier of a student profile (not the user id).
    StudentId,
    "student id"
);
