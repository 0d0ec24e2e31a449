//! Unit level aggregation: a coefficient-weighted group of modules.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::band::GradeBand;
use super::mean::weighted_mean;
use super::module::{default_coefficient, Module, ModuleEdit};
use super::outcome::Average;
use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq)]
pub enum UnitEdit {
    Name(String),
    Coefficient(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: String,
    pub name: String,
    #[serde(default = "default_coefficient")]
    pub coefficient: f64,
    #[serde(default)]
    pub modules: Vec<Module>,
    #[serde(rename = "moyenne", default)]
    pub average: Average,
}

impl Unit {
    pub fn new(id: impl Into<String>, name: impl Into<String>, coefficient: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            coefficient,
            modules: Vec::new(),
            average: Average::Incomplete,
        }
    }

    /// An empty unit with coefficient 1 and a random id.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(Uuid::new_v4().to_string(), name, 1.0)
    }

    pub fn with_modules(mut self, modules: Vec<Module>) -> Self {
        self.modules = modules;
        self.average = Average::Incomplete;
        self
    }

    /// Weighted mean of the modules' current averages.
    ///
    /// Assumes the modules are already aggregated; use [`Unit::recompute`]
    /// to derive everything from raw scores.
    pub fn aggregate(&self) -> Average {
        weighted_mean(self.modules.iter().map(|m| (m.average, m.coefficient)))
    }

    pub fn recompute(&self) -> Unit {
        let modules: Vec<Module> = self.modules.iter().map(Module::recompute).collect();
        let average = weighted_mean(modules.iter().map(|m| (m.average, m.coefficient)));
        Unit {
            id: self.id.clone(),
            name: self.name.clone(),
            coefficient: self.coefficient,
            modules,
            average,
        }
    }

    pub fn band(&self) -> Option<GradeBand> {
        GradeBand::classify(self.average)
    }

    pub fn total_coefficient(&self) -> f64 {
        self.modules.iter().map(|m| m.coefficient).sum()
    }

    pub fn completed_modules(&self) -> usize {
        self.modules.iter().filter(|m| m.average.is_complete()).count()
    }

    pub fn module(&self, module_id: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.id == module_id)
    }

    pub fn apply(&self, edit: UnitEdit) -> Unit {
        let mut next = self.clone();
        match edit {
            UnitEdit::Name(name) => next.name = name,
            UnitEdit::Coefficient(c) => next.coefficient = c,
        }
        next.average = Average::Incomplete;
        next
    }

    /// Copy-on-write edit of one module; the unit's average is cleared.
    pub fn with_module(&self, module_id: &str, edit: ModuleEdit) -> Result<Unit, ValidationError> {
        let index = self
            .modules
            .iter()
            .position(|m| m.id == module_id)
            .ok_or_else(|| ValidationError::not_found("module", module_id))?;
        let mut next = self.clone();
        next.modules[index] = self.modules[index].apply(edit);
        next.average = Average::Incomplete;
        Ok(next)
    }

    pub fn with_added_module(&self, module: Module) -> Unit {
        let mut next = self.clone();
        next.modules.push(module);
        next.average = Average::Incomplete;
        next
    }

    pub fn without_module(&self, module_id: &str) -> Result<Unit, ValidationError> {
        if self.module(module_id).is_none() {
            return Err(ValidationError::not_found("module", module_id));
        }
        let mut next = self.clone();
        next.modules.retain(|m| m.id != module_id);
        next.average = Average::Incomplete;
        Ok(next)
    }
}
