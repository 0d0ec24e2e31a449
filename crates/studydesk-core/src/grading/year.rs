//! Annual average and promotion status.
//!
//! Each semester entry either embeds a full [`Semester`] tree, whose average
//! is recomputed from raw scores, or carries an average typed in by hand.
//! The year is only decided when every entry is complete.

use serde::{Deserialize, Serialize};

use super::band::{GradeBand, PassStatus};
use super::mean::weighted_mean;
use super::module::default_coefficient;
use super::outcome::Average;
use super::semester::Semester;
use crate::error::ValidationError;
use crate::events::{CalculationLevel, Event};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemesterSource {
    Computed(Semester),
    Manual(Option<f64>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SemesterEdit {
    Name(String),
    Coefficient(f64),
    Manual(Option<f64>),
    Computed(Semester),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSemesterResult")]
pub struct SemesterResult {
    pub id: String,
    pub name: String,
    pub coefficient: f64,
    pub source: SemesterSource,
    #[serde(rename = "moyenne")]
    pub average: Average,
}

/// Accepts both the tagged shape and the dashboard's plain
/// `{ id, name, moyenne, coefficient }` entries, read as manual averages.
#[derive(Deserialize)]
struct RawSemesterResult {
    id: String,
    name: String,
    #[serde(default = "default_coefficient")]
    coefficient: f64,
    #[serde(default)]
    source: Option<SemesterSource>,
    #[serde(rename = "moyenne", default)]
    average: Option<f64>,
}

impl From<RawSemesterResult> for SemesterResult {
    fn from(raw: RawSemesterResult) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            coefficient: raw.coefficient,
            source: raw.source.unwrap_or(SemesterSource::Manual(raw.average)),
            average: Average::from(raw.average),
        }
    }
}

impl SemesterResult {
    pub fn manual(id: impl Into<String>, name: impl Into<String>, coefficient: f64, average: Option<f64>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            coefficient,
            source: SemesterSource::Manual(average),
            average: Average::Incomplete,
        }
    }

    pub fn computed(semester: Semester, coefficient: f64) -> Self {
        Self {
            id: semester.id.clone(),
            name: semester.name.clone(),
            coefficient,
            source: SemesterSource::Computed(semester),
            average: Average::Incomplete,
        }
    }

    pub fn recompute(&self) -> SemesterResult {
        let (source, average) = match &self.source {
            SemesterSource::Computed(semester) => {
                let semester = semester.recompute();
                let average = semester.average;
                (SemesterSource::Computed(semester), average)
            }
            SemesterSource::Manual(entry) => (SemesterSource::Manual(*entry), Average::from_entry(*entry)),
        };
        SemesterResult {
            id: self.id.clone(),
            name: self.name.clone(),
            coefficient: self.coefficient,
            source,
            average,
        }
    }

    pub fn apply(&self, edit: SemesterEdit) -> SemesterResult {
        let mut next = self.clone();
        match edit {
            SemesterEdit::Name(name) => next.name = name,
            SemesterEdit::Coefficient(c) => next.coefficient = c,
            SemesterEdit::Manual(entry) => next.source = SemesterSource::Manual(entry),
            SemesterEdit::Computed(semester) => next.source = SemesterSource::Computed(semester),
        }
        next.average = Average::Incomplete;
        next
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicYear {
    #[serde(rename = "academicYear")]
    pub name: String,
    #[serde(default)]
    pub semesters: Vec<SemesterResult>,
    #[serde(rename = "annualAverage", default)]
    pub average: Average,
    #[serde(default)]
    pub status: Option<PassStatus>,
}

impl AcademicYear {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            semesters: Vec::new(),
            average: Average::Incomplete,
            status: None,
        }
    }

    pub fn with_semesters(mut self, semesters: Vec<SemesterResult>) -> Self {
        self.semesters = semesters;
        self.average = Average::Incomplete;
        self.status = None;
        self
    }

    pub fn recompute(&self) -> AcademicYear {
        let semesters: Vec<SemesterResult> = self.semesters.iter().map(SemesterResult::recompute).collect();
        let average = weighted_mean(semesters.iter().map(|s| (s.average, s.coefficient)));
        AcademicYear {
            name: self.name.clone(),
            semesters,
            average,
            status: PassStatus::from_average(average),
        }
    }

    pub fn calculate(&self) -> YearReport {
        let year = self.recompute();
        tracing::debug!(
            year = %year.name,
            average = ?year.average.value(),
            status = ?year.status,
            "academic year calculated"
        );
        YearReport {
            average: year.average,
            band: GradeBand::classify(year.average),
            status: year.status,
            year,
        }
    }

    pub fn total_coefficient(&self) -> f64 {
        self.semesters.iter().map(|s| s.coefficient).sum()
    }

    pub fn with_semester(&self, semester_id: &str, edit: SemesterEdit) -> Result<AcademicYear, ValidationError> {
        let index = self
            .semesters
            .iter()
            .position(|s| s.id == semester_id)
            .ok_or_else(|| ValidationError::not_found("semester", semester_id))?;
        let mut next = self.clone();
        next.semesters[index] = self.semesters[index].apply(edit);
        next.average = Average::Incomplete;
        next.status = None;
        Ok(next)
    }

    pub fn with_added_semester(&self, semester: SemesterResult) -> AcademicYear {
        let mut next = self.clone();
        next.semesters.push(semester);
        next.average = Average::Incomplete;
        next.status = None;
        next
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearReport {
    pub year: AcademicYear,
    pub average: Average,
    pub band: Option<GradeBand>,
    pub status: Option<PassStatus>,
}

impl YearReport {
    pub fn is_complete(&self) -> bool {
        self.average.is_complete()
    }

    pub fn notification(&self) -> Event {
        Event::calculation(CalculationLevel::Year, self.average)
    }
}
