//! Starting structures offered to a new user and restored on "clear".

use super::module::{Module, ScoreSet};
use super::semester::Semester;
use super::unit::Unit;
use super::year::{AcademicYear, SemesterResult};

fn module(id: &str, name: &str, coefficient: f64, has_practical: bool, has_lab: bool) -> Module {
    Module::new(id, name, coefficient, has_practical, has_lab)
}

/// The biotechnology semester: five units, every grade empty.
pub fn default_semester() -> Semester {
    Semester::new("s1", "Semester 1").with_units(vec![
        Unit::new("unit1", "Unit 1", 6.0).with_modules(vec![
            module("mod1", "Biotechnologie Pharmaceutique", 3.0, true, true),
            module("mod2", "Production des Enzymes", 3.0, true, true),
        ]),
        Unit::new("unit2", "Unit 2", 3.0)
            .with_modules(vec![module("mod3", "Physiologie Bactérienne", 3.0, true, true)]),
        Unit::new("unit3", "Unit 3", 5.0).with_modules(vec![
            module("mod4", "Clonage", 3.0, true, true),
            module("mod5", "Transposons", 2.0, true, false),
        ]),
        Unit::new("unit4", "Unit 4", 2.0)
            .with_modules(vec![module("mod6", "Sequencage ADN", 2.0, true, false)]),
        Unit::new("unit5", "Unit 5", 1.0)
            .with_modules(vec![module("mod7", "Legislation", 1.0, true, false)]),
    ])
}

/// Standalone unit used by the module calculator.
pub fn default_unit() -> Unit {
    Unit::new("unit1", "Biotechnology", 1.0).with_modules(vec![
        module("mod1", "Molecular Biology", 3.0, true, false)
            .with_scores(ScoreSet::new(Some(15.0), Some(14.0), None)),
        module("mod2", "Physiology", 2.0, true, true)
            .with_scores(ScoreSet::new(Some(16.0), Some(13.0), Some(17.0))),
    ])
}

pub fn default_year() -> AcademicYear {
    AcademicYear::new("2025-2026").with_semesters(vec![
        SemesterResult::manual("s1", "Semester 1", 1.0, Some(14.75)),
        SemesterResult::manual("s2", "Semester 2", 1.0, Some(15.25)),
    ])
}
