//! Persisted record shapes.
//!
//! Records are stored as opaque JSON blobs under fixed keys. Field names
//! follow the dashboard's camelCase layout so existing blobs stay readable.
//! Decoding is tolerant: anything that does not parse into the expected
//! shape is treated as "no prior state".

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::band::{GradeBand, PassStatus};
use super::module::ScoreSet;
use super::outcome::Average;
use super::semester::{GradeDistribution, Semester, SemesterReport, UnitSummary};
use super::unit::Unit;
use super::year::{AcademicYear, SemesterResult, YearReport};

/// Flattened per-module line of a semester record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleResult {
    pub unit_id: String,
    pub unit_name: String,
    pub module_id: String,
    pub module_name: String,
    pub coefficient: f64,
    pub grades: ScoreSet,
    pub moyenne: Average,
    #[serde(rename = "hasTD")]
    pub has_practical: bool,
    #[serde(rename = "hasTP")]
    pub has_lab: bool,
    pub status: Option<GradeBand>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterRecord {
    pub semester_name: String,
    pub units: Vec<Unit>,
    #[serde(default)]
    pub semester_average: Average,
    #[serde(default)]
    pub calculation_timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub total_coefficient: f64,
    #[serde(default)]
    pub total_modules: usize,
    #[serde(default)]
    pub completed_modules: usize,
    #[serde(default)]
    pub unit_averages: Vec<UnitSummary>,
    #[serde(default)]
    pub module_results: Vec<ModuleResult>,
    #[serde(default)]
    pub grade_distribution: GradeDistribution,
    #[serde(default)]
    pub semester_status: Option<PassStatus>,
}

impl SemesterRecord {
    pub fn from_report(report: &SemesterReport, at: DateTime<Utc>) -> Self {
        let semester = &report.semester;
        let module_results = semester
            .units
            .iter()
            .flat_map(|unit| {
                unit.modules.iter().map(move |m| ModuleResult {
                    unit_id: unit.id.clone(),
                    unit_name: unit.name.clone(),
                    module_id: m.id.clone(),
                    module_name: m.name.clone(),
                    coefficient: m.coefficient,
                    grades: m.scores,
                    moyenne: m.average,
                    has_practical: m.has_practical,
                    has_lab: m.has_lab,
                    status: m.band(),
                })
            })
            .collect();

        Self {
            semester_name: semester.name.clone(),
            units: semester.units.clone(),
            semester_average: report.average,
            calculation_timestamp: Some(at),
            total_coefficient: report.total_coefficient,
            total_modules: report.total_modules,
            completed_modules: report.completed_modules,
            unit_averages: report.units.clone(),
            module_results,
            grade_distribution: report.distribution,
            semester_status: report.status,
        }
    }

    /// Rebuilds the editable tree. Derived values come along as stored;
    /// callers recompute before trusting them.
    pub fn to_semester(&self) -> Semester {
        Semester {
            id: String::new(),
            name: self.semester_name.clone(),
            units: self.units.clone(),
            average: self.semester_average,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearRecord {
    pub academic_year: String,
    pub semesters: Vec<SemesterResult>,
    #[serde(default)]
    pub annual_average: Average,
    #[serde(default)]
    pub status: Option<PassStatus>,
    #[serde(default)]
    pub calculation_timestamp: Option<DateTime<Utc>>,
}

impl YearRecord {
    pub fn from_report(report: &YearReport, at: DateTime<Utc>) -> Self {
        Self {
            academic_year: report.year.name.clone(),
            semesters: report.year.semesters.clone(),
            annual_average: report.average,
            status: report.status,
            calculation_timestamp: Some(at),
        }
    }

    pub fn to_year(&self) -> AcademicYear {
        AcademicYear {
            name: self.academic_year.clone(),
            semesters: self.semesters.clone(),
            average: self.annual_average,
            status: self.status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitRecord {
    pub unit_name: String,
    pub modules: Vec<super::module::Module>,
    #[serde(default)]
    pub unit_average: Average,
    #[serde(default)]
    pub calculation_timestamp: Option<DateTime<Utc>>,
}

impl UnitRecord {
    /// `unit` is expected to be freshly recomputed.
    pub fn from_unit(unit: &Unit, at: DateTime<Utc>) -> Self {
        Self {
            unit_name: unit.name.clone(),
            modules: unit.modules.clone(),
            unit_average: unit.average,
            calculation_timestamp: Some(at),
        }
    }

    pub fn to_unit(&self) -> Unit {
        Unit {
            id: String::new(),
            name: self.unit_name.clone(),
            coefficient: 1.0,
            modules: self.modules.clone(),
            average: self.unit_average,
        }
    }
}

/// Decode a stored blob, degrading to `None` on absence or corruption.
pub fn decode<T: DeserializeOwned>(key: &str, blob: Option<&str>) -> Option<T> {
    let blob = blob?;
    match serde_json::from_str(blob) {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::warn!(key, error = %e, "ignoring malformed persisted record");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::templates;

    #[test]
    fn semester_record_captures_report() {
        let report = templates::default_semester().calculate();
        let at = Utc::now();
        let record = SemesterRecord::from_report(&report, at);
        assert_eq!(record.semester_name, "Semester 1");
        assert_eq!(record.module_results.len(), 7);
        assert_eq!(record.unit_averages.len(), 5);
        assert_eq!(record.semester_average, Average::Incomplete);
        assert_eq!(record.calculation_timestamp, Some(at));
    }

    #[test]
    fn semester_record_uses_camel_case_keys() {
        let report = templates::default_semester().calculate();
        let json = serde_json::to_value(SemesterRecord::from_report(&report, Utc::now())).unwrap();
        for key in ["semesterName", "units", "semesterAverage", "calculationTimestamp", "gradeDistribution"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert!(json["semesterAverage"].is_null());
    }

    #[test]
    fn decode_absent_is_none() {
        assert!(decode::<SemesterRecord>("semesterData", None).is_none());
    }

    #[test]
    fn decode_garbage_is_none() {
        assert!(decode::<SemesterRecord>("semesterData", Some("{not json")).is_none());
        assert!(decode::<SemesterRecord>("semesterData", Some("[1,2,3]")).is_none());
    }

    #[test]
    fn decode_partial_shape_is_none() {
        assert!(decode::<SemesterRecord>("semesterData", Some(r#"{"semesterName":"S1"}"#)).is_none());
        assert!(decode::<YearRecord>("yearlyData", Some(r#"{"semesters":[]}"#)).is_none());
    }

    #[test]
    fn decode_minimal_dashboard_blob() {
        let blob = r#"{"semesterName":"S1","units":[],"semesterAverage":null}"#;
        let record: SemesterRecord = decode("semesterData", Some(blob)).unwrap();
        assert!(record.units.is_empty());
        assert_eq!(record.grade_distribution, GradeDistribution::default());
    }

    #[test]
    fn year_record_round_trips_tree() {
        let report = templates::default_year().calculate();
        let record = YearRecord::from_report(&report, Utc::now());
        assert_eq!(record.to_year(), report.year);
    }
}
