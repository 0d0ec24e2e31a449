//! Two-state result of an aggregation.
//!
//! A missing or invalid grade is an expected condition, not a fault, so every
//! aggregator returns an [`Average`] instead of a `Result`. On the wire the
//! value is a plain number when complete and `null` when incomplete.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum Average {
    /// Every required input was present and valid.
    Complete(f64),
    /// At least one required input was missing, invalid or weightless.
    #[default]
    Incomplete,
}

impl Average {
    pub fn value(self) -> Option<f64> {
        match self {
            Average::Complete(v) => Some(v),
            Average::Incomplete => None,
        }
    }

    pub fn is_complete(self) -> bool {
        matches!(self, Average::Complete(_))
    }

    /// Wraps a manually entered average, rejecting values outside 0..=20.
    pub fn from_entry(entry: Option<f64>) -> Self {
        match entry {
            Some(v) if super::score::is_in_range(v) => Average::Complete(v),
            _ => Average::Incomplete,
        }
    }
}

impl From<Option<f64>> for Average {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(v) if v.is_finite() => Average::Complete(v),
            _ => Average::Incomplete,
        }
    }
}

impl From<Average> for Option<f64> {
    fn from(avg: Average) -> Self {
        avg.value()
    }
}

impl std::fmt::Display for Average {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Average::Complete(v) => write!(f, "{v:.2}/20"),
            Average::Incomplete => f.write_str("--"),
        }
    }
}
