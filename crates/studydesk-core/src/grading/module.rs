//! Module (course) level aggregation.
//!
//! A module is scored from an exam (EMD), an optional practical (TD) and an
//! optional lab (TP). Which components count is decided by the module's
//! capability flags, and the formula is fixed per combination:
//!
//! | TD | TP | Average                         |
//! |----|----|---------------------------------|
//! | ✓  | ✓  | exam×0.6 + td×0.2 + tp×0.2      |
//! | ✓  |    | (exam×2 + td) / 3               |
//! |    | ✓  | (exam×2 + tp) / 3               |
//! |    |    | exam                            |
//!
//! Coefficients do not matter here; they weight the module inside its unit.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::band::GradeBand;
use super::outcome::Average;
use super::score::{validate_score, ScoreCheck};

/// The three raw component scores of a module.
///
/// `None` means "not entered", which is distinct from a score of zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreSet {
    #[serde(rename = "emd", default)]
    pub exam: Option<f64>,
    #[serde(rename = "td", default)]
    pub practical: Option<f64>,
    #[serde(rename = "tp", default)]
    pub lab: Option<f64>,
}

impl ScoreSet {
    pub fn new(exam: Option<f64>, practical: Option<f64>, lab: Option<f64>) -> Self {
        Self {
            exam,
            practical,
            lab,
        }
    }
}

/// Weighting policy, keyed by which optional components a module declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weighting {
    ExamOnly,
    ExamPractical,
    ExamLab,
    Full,
}

impl Weighting {
    pub fn for_flags(has_practical: bool, has_lab: bool) -> Self {
        match (has_practical, has_lab) {
            (true, true) => Weighting::Full,
            (true, false) => Weighting::ExamPractical,
            (false, true) => Weighting::ExamLab,
            (false, false) => Weighting::ExamOnly,
        }
    }

    pub fn formula(self) -> &'static str {
        match self {
            Weighting::Full => "EMD×0.6 + TD×0.2 + TP×0.2",
            Weighting::ExamPractical => "(EMD×2 + TD) / 3",
            Weighting::ExamLab => "(EMD×2 + TP) / 3",
            Weighting::ExamOnly => "EMD",
        }
    }

    /// Components the policy does not use are passed as 0.0 and ignored.
    fn combine(self, exam: f64, practical: f64, lab: f64) -> f64 {
        match self {
            Weighting::Full => exam * 0.6 + practical * 0.2 + lab * 0.2,
            Weighting::ExamPractical => (exam * 2.0 + practical) / 3.0,
            Weighting::ExamLab => (exam * 2.0 + lab) / 3.0,
            Weighting::ExamOnly => exam,
        }
    }
}

/// A single user edit to a module.
#[derive(Debug, Clone, PartialEq)]
pub enum ModuleEdit {
    Name(String),
    Coefficient(f64),
    HasPractical(bool),
    HasLab(bool),
    Exam(Option<f64>),
    Practical(Option<f64>),
    Lab(Option<f64>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub id: String,
    pub name: String,
    #[serde(default = "default_coefficient")]
    pub coefficient: f64,
    #[serde(rename = "hasTD", default)]
    pub has_practical: bool,
    #[serde(rename = "hasTP", default)]
    pub has_lab: bool,
    #[serde(rename = "grades", default)]
    pub scores: ScoreSet,
    /// Derived; only [`Module::recompute`] sets it.
    #[serde(rename = "moyenne", default)]
    pub average: Average,
}

pub(crate) fn default_coefficient() -> f64 {
    1.0
}

impl Module {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        coefficient: f64,
        has_practical: bool,
        has_lab: bool,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            coefficient,
            has_practical,
            has_lab,
            scores: ScoreSet::default(),
            average: Average::Incomplete,
        }
    }

    /// A fresh exam-only module with coefficient 1 and a random id.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(Uuid::new_v4().to_string(), name, 1.0, false, false)
    }

    pub fn with_scores(mut self, scores: ScoreSet) -> Self {
        self.scores = scores;
        self.average = Average::Incomplete;
        self
    }

    pub fn weighting(&self) -> Weighting {
        Weighting::for_flags(self.has_practical, self.has_lab)
    }

    /// Validates every required component and applies the weighting table.
    pub fn compute_average(&self) -> Average {
        let ScoreCheck::Valid(exam) = validate_score(self.scores.exam, true) else {
            return Average::Incomplete;
        };
        let Some(practical) = component(self.scores.practical, self.has_practical) else {
            return Average::Incomplete;
        };
        let Some(lab) = component(self.scores.lab, self.has_lab) else {
            return Average::Incomplete;
        };
        Average::Complete(self.weighting().combine(exam, practical, lab))
    }

    pub fn recompute(&self) -> Module {
        Module {
            average: self.compute_average(),
            ..self.clone()
        }
    }

    pub fn band(&self) -> Option<GradeBand> {
        GradeBand::classify(self.average)
    }

    /// Returns the edited module. Its derived average is cleared.
    pub fn apply(&self, edit: ModuleEdit) -> Module {
        let mut next = self.clone();
        match edit {
            ModuleEdit::Name(name) => next.name = name,
            ModuleEdit::Coefficient(c) => next.coefficient = c,
            ModuleEdit::HasPractical(flag) => next.has_practical = flag,
            ModuleEdit::HasLab(flag) => next.has_lab = flag,
            ModuleEdit::Exam(v) => next.scores.exam = v,
            ModuleEdit::Practical(v) => next.scores.practical = v,
            ModuleEdit::Lab(v) => next.scores.lab = v,
        }
        next.average = Average::Incomplete;
        next
    }
}

/// `Some(0.0)` for an undeclared component, `None` for an invalid one.
fn component(raw: Option<f64>, required: bool) -> Option<f64> {
    match validate_score(raw, required) {
        ScoreCheck::Valid(v) => Some(v),
        ScoreCheck::NotRequired => Some(0.0),
        ScoreCheck::Invalid => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module(has_td: bool, has_tp: bool, emd: Option<f64>, td: Option<f64>, tp: Option<f64>) -> Module {
        Module::new("m", "Test", 1.0, has_td, has_tp).with_scores(ScoreSet::new(emd, td, tp))
    }

    #[test]
    fn exam_and_practical_weighs_two_to_one() {
        let m = module(true, false, Some(15.0), Some(14.0), None);
        assert_eq!(m.compute_average(), Average::Complete((15.0 * 2.0 + 14.0) / 3.0));
    }

    #[test]
    fn exam_and_lab_weighs_two_to_one() {
        let m = module(false, true, Some(12.0), None, Some(18.0));
        assert_eq!(m.compute_average(), Average::Complete(14.0));
    }

    #[test]
    fn full_module_uses_sixty_twenty_twenty() {
        let m = module(true, true, Some(16.0), Some(13.0), Some(17.0));
        let avg = m.compute_average().value().unwrap();
        assert!((avg - 15.6).abs() < 1e-9);
    }

    #[test]
    fn exam_only_module_is_the_exam_score() {
        let m = module(false, false, Some(11.5), None, None);
        assert_eq!(m.compute_average(), Average::Complete(11.5));
    }

    #[test]
    fn missing_exam_is_incomplete() {
        let m = module(true, false, None, Some(14.0), None);
        assert_eq!(m.compute_average(), Average::Incomplete);
    }

    #[test]
    fn missing_declared_component_is_incomplete() {
        assert_eq!(module(true, true, Some(15.0), Some(14.0), None).compute_average(), Average::Incomplete);
        assert_eq!(module(true, true, Some(15.0), None, Some(14.0)).compute_average(), Average::Incomplete);
    }

    #[test]
    fn out_of_range_component_is_incomplete() {
        assert_eq!(module(true, false, Some(15.0), Some(21.0), None).compute_average(), Average::Incomplete);
        assert_eq!(module(false, false, Some(-1.0), None, None).compute_average(), Average::Incomplete);
    }

    #[test]
    fn undeclared_component_value_is_ignored() {
        let m = module(false, false, Some(13.0), Some(99.0), Some(2.0));
        assert_eq!(m.compute_average(), Average::Complete(13.0));
    }

    #[test]
    fn zero_scores_are_valid() {
        let m = module(true, true, Some(0.0), Some(0.0), Some(0.0));
        assert_eq!(m.compute_average(), Average::Complete(0.0));
    }

    #[test]
    fn recompute_does_not_touch_input() {
        let m = module(false, false, Some(12.0), None, None);
        let computed = m.recompute();
        assert_eq!(m.average, Average::Incomplete);
        assert_eq!(computed.average, Average::Complete(12.0));
        assert_eq!(computed.recompute(), computed);
    }

    #[test]
    fn stale_average_is_replaced_on_recompute() {
        let mut m = module(false, false, None, None, None);
        m.average = Average::Complete(19.0);
        assert_eq!(m.recompute().average, Average::Incomplete);
    }

    #[test]
    fn apply_clears_derived_average() {
        let m = module(false, false, Some(12.0), None, None).recompute();
        let edited = m.apply(ModuleEdit::Exam(Some(14.0)));
        assert_eq!(edited.average, Average::Incomplete);
        assert_eq!(edited.scores.exam, Some(14.0));
        assert_eq!(m.scores.exam, Some(12.0));
        assert_eq!(edited.recompute().average, Average::Complete(14.0));
    }

    #[test]
    fn toggling_flag_changes_weighting() {
        let m = module(false, false, Some(15.0), Some(12.0), None);
        assert_eq!(m.weighting(), Weighting::ExamOnly);
        let with_td = m.apply(ModuleEdit::HasPractical(true));
        assert_eq!(with_td.weighting(), Weighting::ExamPractical);
        assert_eq!(with_td.compute_average(), Average::Complete(14.0));
    }

    #[test]
    fn deserializes_dashboard_shape() {
        let json = r#"{
            "id": "mod1",
            "name": "Molecular Biology",
            "coefficient": 3,
            "hasTD": true,
            "hasTP": false,
            "grades": { "emd": 15, "td": 14, "tp": null },
            "moyenne": null
        }"#;
        let m: Module = serde_json::from_str(json).unwrap();
        assert!(m.has_practical);
        assert!(!m.has_lab);
        assert_eq!(m.scores, ScoreSet::new(Some(15.0), Some(14.0), None));
        assert_eq!(m.coefficient, 3.0);
        assert!(m.recompute().average.is_complete());
    }
}
