//! Grade bands on the fixed 0-20 scale.
//!
//! | Average  | Band        |
//! |----------|-------------|
//! | >= 16    | Très Bien   |
//! | [14, 16) | Bien        |
//! | [12, 14) | Assez Bien  |
//! | [10, 12) | Passable    |
//! | < 10     | À rattraper |
//!
//! The same bands apply at module, unit, semester and annual level.

use serde::{Deserialize, Serialize};

use super::outcome::Average;

/// Minimum average to pass a semester or a year.
pub const PASS_THRESHOLD: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GradeBand {
    #[serde(rename = "Très Bien")]
    TresBien,
    #[serde(rename = "Bien")]
    Bien,
    #[serde(rename = "Assez Bien")]
    AssezBien,
    #[serde(rename = "Passable")]
    Passable,
    #[serde(rename = "À rattraper")]
    ARattraper,
}

impl GradeBand {
    /// Every band, best first.
    pub const ALL: [GradeBand; 5] = [
        GradeBand::TresBien,
        GradeBand::Bien,
        GradeBand::AssezBien,
        GradeBand::Passable,
        GradeBand::ARattraper,
    ];

    pub fn classify(average: Average) -> Option<Self> {
        average.value().and_then(Self::from_value)
    }

    pub fn from_value(value: f64) -> Option<Self> {
        if value.is_nan() {
            return None;
        }
        let band = if value >= 16.0 {
            GradeBand::TresBien
        } else if value >= 14.0 {
            GradeBand::Bien
        } else if value >= 12.0 {
            GradeBand::AssezBien
        } else if value >= PASS_THRESHOLD {
            GradeBand::Passable
        } else {
            GradeBand::ARattraper
        };
        Some(band)
    }

    pub fn label(self) -> &'static str {
        match self {
            GradeBand::TresBien => "Très Bien",
            GradeBand::Bien => "Bien",
            GradeBand::AssezBien => "Assez Bien",
            GradeBand::Passable => "Passable",
            GradeBand::ARattraper => "À rattraper",
        }
    }

    pub fn is_passing(self) -> bool {
        self != GradeBand::ARattraper
    }
}

impl std::fmt::Display for GradeBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Binary pass/fail at [`PASS_THRESHOLD`].
///
/// Authoritative at the annual level; informational for a single semester.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PassStatus {
    #[serde(rename = "Admis")]
    Admis,
    #[serde(rename = "À rattraper")]
    ARattraper,
}

impl PassStatus {
    pub fn from_average(average: Average) -> Option<Self> {
        average.value().map(|v| {
            if v >= PASS_THRESHOLD {
                PassStatus::Admis
            } else {
                PassStatus::ARattraper
            }
        })
    }

    pub fn label(self) -> &'static str {
        match self {
            PassStatus::Admis => "Admis",
            PassStatus::ARattraper => "À rattraper",
        }
    }
}

impl std::fmt::Display for PassStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
