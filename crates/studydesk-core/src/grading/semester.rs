//! Semester level aggregation and reporting.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::band::{GradeBand, PassStatus};
use super::mean::weighted_mean;
use super::module::ModuleEdit;
use super::outcome::Average;
use super::unit::{Unit, UnitEdit};
use crate::error::ValidationError;
use crate::events::{CalculationLevel, Event};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Semester {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub units: Vec<Unit>,
    #[serde(rename = "moyenne", default)]
    pub average: Average,
}

impl Semester {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            units: Vec::new(),
            average: Average::Incomplete,
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self::new(Uuid::new_v4().to_string(), name)
    }

    pub fn with_units(mut self, units: Vec<Unit>) -> Self {
        self.units = units;
        self.average = Average::Incomplete;
        self
    }

    /// Weighted mean of the units' current averages.
    pub fn aggregate(&self) -> Average {
        weighted_mean(self.units.iter().map(|u| (u.average, u.coefficient)))
    }

    /// Derives every module, unit and semester average from the raw scores.
    pub fn recompute(&self) -> Semester {
        let units: Vec<Unit> = self.units.iter().map(Unit::recompute).collect();
        let average = weighted_mean(units.iter().map(|u| (u.average, u.coefficient)));
        Semester {
            id: self.id.clone(),
            name: self.name.clone(),
            units,
            average,
        }
    }

    pub fn calculate(&self) -> SemesterReport {
        let semester = self.recompute();
        tracing::debug!(
            semester = %semester.name,
            average = ?semester.average.value(),
            "semester calculated"
        );
        SemesterReport::from_computed(semester)
    }

    pub fn band(&self) -> Option<GradeBand> {
        GradeBand::classify(self.average)
    }

    pub fn total_coefficient(&self) -> f64 {
        self.units.iter().map(|u| u.coefficient).sum()
    }

    pub fn total_modules(&self) -> usize {
        self.units.iter().map(|u| u.modules.len()).sum()
    }

    pub fn completed_modules(&self) -> usize {
        self.units.iter().map(Unit::completed_modules).sum()
    }

    pub fn unit(&self, unit_id: &str) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == unit_id)
    }

    fn unit_index(&self, unit_id: &str) -> Result<usize, ValidationError> {
        self.units
            .iter()
            .position(|u| u.id == unit_id)
            .ok_or_else(|| ValidationError::not_found("unit", unit_id))
    }

    fn replace_unit(&self, index: usize, unit: Unit) -> Semester {
        let mut next = self.clone();
        next.units[index] = unit;
        next.average = Average::Incomplete;
        next
    }

    pub fn with_unit(&self, unit_id: &str, edit: UnitEdit) -> Result<Semester, ValidationError> {
        let index = self.unit_index(unit_id)?;
        Ok(self.replace_unit(index, self.units[index].apply(edit)))
    }

    pub fn with_module(
        &self,
        unit_id: &str,
        module_id: &str,
        edit: ModuleEdit,
    ) -> Result<Semester, ValidationError> {
        let index = self.unit_index(unit_id)?;
        let unit = self.units[index].with_module(module_id, edit)?;
        Ok(self.replace_unit(index, unit))
    }

    pub fn with_added_unit(&self, unit: Unit) -> Semester {
        let mut next = self.clone();
        next.units.push(unit);
        next.average = Average::Incomplete;
        next
    }

    pub fn without_unit(&self, unit_id: &str) -> Result<Semester, ValidationError> {
        let index = self.unit_index(unit_id)?;
        let mut next = self.clone();
        next.units.remove(index);
        next.average = Average::Incomplete;
        Ok(next)
    }

    pub fn with_added_module(
        &self,
        unit_id: &str,
        module: super::module::Module,
    ) -> Result<Semester, ValidationError> {
        let index = self.unit_index(unit_id)?;
        Ok(self.replace_unit(index, self.units[index].with_added_module(module)))
    }

    pub fn without_module(&self, unit_id: &str, module_id: &str) -> Result<Semester, ValidationError> {
        let index = self.unit_index(unit_id)?;
        let unit = self.units[index].without_module(module_id)?;
        Ok(self.replace_unit(index, unit))
    }
}

/// Count of complete modules per grade band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeDistribution {
    pub tres_bien: usize,
    pub bien: usize,
    pub assez_bien: usize,
    pub passable: usize,
    pub a_rattraper: usize,
}

impl GradeDistribution {
    pub fn from_units(units: &[Unit]) -> Self {
        let mut dist = Self::default();
        for band in units
            .iter()
            .flat_map(|u| u.modules.iter())
            .filter_map(|m| m.band())
        {
            dist.record(band);
        }
        dist
    }

    pub fn record(&mut self, band: GradeBand) {
        match band {
            GradeBand::TresBien => self.tres_bien += 1,
            GradeBand::Bien => self.bien += 1,
            GradeBand::AssezBien => self.assez_bien += 1,
            GradeBand::Passable => self.passable += 1,
            GradeBand::ARattraper => self.a_rattraper += 1,
        }
    }

    pub fn count(&self, band: GradeBand) -> usize {
        match band {
            GradeBand::TresBien => self.tres_bien,
            GradeBand::Bien => self.bien,
            GradeBand::AssezBien => self.assez_bien,
            GradeBand::Passable => self.passable,
            GradeBand::ARattraper => self.a_rattraper,
        }
    }

    pub fn total(&self) -> usize {
        GradeBand::ALL.iter().map(|b| self.count(*b)).sum()
    }
}

/// Per-unit line of a semester report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitSummary {
    pub id: String,
    pub name: String,
    pub coefficient: f64,
    pub moyenne: Average,
    pub module_count: usize,
    pub completed_modules: usize,
}

impl From<&Unit> for UnitSummary {
    fn from(unit: &Unit) -> Self {
        Self {
            id: unit.id.clone(),
            name: unit.name.clone(),
            coefficient: unit.coefficient,
            moyenne: unit.average,
            module_count: unit.modules.len(),
            completed_modules: unit.completed_modules(),
        }
    }
}

/// Result of a full semester calculation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemesterReport {
    pub semester: Semester,
    pub average: Average,
    pub band: Option<GradeBand>,
    /// Informational; the year level decides promotion.
    pub status: Option<PassStatus>,
    pub total_coefficient: f64,
    pub total_modules: usize,
    pub completed_modules: usize,
    pub units: Vec<UnitSummary>,
    pub distribution: GradeDistribution,
}

impl SemesterReport {
    fn from_computed(semester: Semester) -> Self {
        Self {
            average: semester.average,
            band: semester.band(),
            status: PassStatus::from_average(semester.average),
            total_coefficient: semester.total_coefficient(),
            total_modules: semester.total_modules(),
            completed_modules: semester.completed_modules(),
            units: semester.units.iter().map(UnitSummary::from).collect(),
            distribution: GradeDistribution::from_units(&semester.units),
            semester,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.average.is_complete()
    }

    pub fn notification(&self) -> Event {
        Event::calculation(CalculationLevel::Semester, self.average)
    }
}
