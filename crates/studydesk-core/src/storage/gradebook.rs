//! Keyed grade records on top of a [`KvStore`].

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::kv::KvStore;
use crate::calendar::Calendar;
use crate::error::{CoreError, StorageError};
use crate::events::Event;
use crate::grading::record::{decode, SemesterRecord, UnitRecord, YearRecord};
use crate::grading::{SemesterReport, Unit, YearReport};
use crate::timer::FocusTimer;

/// Storage keys. They match the dashboard's so existing blobs load unchanged.
pub mod keys {
    pub const SEMESTER: &str = "semesterData";
    pub const SEMESTER_UPDATED: &str = "lastSemesterUpdate";
    pub const YEAR: &str = "yearlyData";
    pub const UNIT: &str = "unitData";
    pub const CALENDAR: &str = "calendarTasks";
    pub const TIMER: &str = "focusTimer";
}

pub struct GradeBook<S: KvStore> {
    store: S,
}

impl<S: KvStore> GradeBook<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.store.get(key) {
            Ok(blob) => decode(key, blob.as_deref()),
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read persisted record");
                None
            }
        }
    }

    fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<Event, CoreError> {
        let blob = serde_json::to_string(value)?;
        self.store.set(key, &blob)?;
        tracing::debug!(key, bytes = blob.len(), "saved record");
        Ok(Event::DataSaved {
            key: key.to_string(),
            at: Utc::now(),
        })
    }

    fn clear(&self, key: &str) -> Result<Event, StorageError> {
        self.store.remove(key)?;
        Ok(Event::DataCleared {
            key: key.to_string(),
            at: Utc::now(),
        })
    }

    pub fn load_semester(&self) -> Option<SemesterRecord> {
        self.read(keys::SEMESTER)
    }

    pub fn save_semester(&self, report: &SemesterReport) -> Result<Event, CoreError> {
        let at = Utc::now();
        let event = self.write(keys::SEMESTER, &SemesterRecord::from_report(report, at))?;
        self.store.set(keys::SEMESTER_UPDATED, &at.to_rfc3339())?;
        Ok(event)
    }

    pub fn clear_semester(&self) -> Result<Event, StorageError> {
        self.store.remove(keys::SEMESTER_UPDATED)?;
        self.clear(keys::SEMESTER)
    }

    /// Timestamp of the last semester save, if any.
    pub fn last_semester_update(&self) -> Option<DateTime<Utc>> {
        let raw = self.store.get(keys::SEMESTER_UPDATED).ok().flatten()?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|t| t.with_timezone(&Utc))
            .ok()
    }

    pub fn load_year(&self) -> Option<YearRecord> {
        self.read(keys::YEAR)
    }

    pub fn save_year(&self, report: &YearReport) -> Result<Event, CoreError> {
        self.write(keys::YEAR, &YearRecord::from_report(report, Utc::now()))
    }

    pub fn clear_year(&self) -> Result<Event, StorageError> {
        self.clear(keys::YEAR)
    }

    pub fn load_unit(&self) -> Option<UnitRecord> {
        self.read(keys::UNIT)
    }

    /// Saves the recomputed unit.
    pub fn save_unit(&self, unit: &Unit) -> Result<Event, CoreError> {
        self.write(keys::UNIT, &UnitRecord::from_unit(&unit.recompute(), Utc::now()))
    }

    pub fn clear_unit(&self) -> Result<Event, StorageError> {
        self.clear(keys::UNIT)
    }

    pub fn load_calendar(&self) -> Calendar {
        self.read(keys::CALENDAR).unwrap_or_default()
    }

    pub fn save_calendar(&self, calendar: &Calendar) -> Result<Event, CoreError> {
        self.write(keys::CALENDAR, calendar)
    }

    pub fn load_timer(&self) -> Option<FocusTimer> {
        self.read(keys::TIMER)
    }

    pub fn save_timer(&self, timer: &FocusTimer) -> Result<(), CoreError> {
        self.write(keys::TIMER, timer).map(|_| ())
    }

    /// `DataLoaded` or `NoSavedData` for a load result.
    pub fn load_event(key: &str, calculated_at: Option<Option<DateTime<Utc>>>) -> Event {
        let at = Utc::now();
        match calculated_at {
            Some(calculated_at) => Event::DataLoaded {
                key: key.to_string(),
                calculated_at,
                at,
            },
            None => Event::NoSavedData {
                key: key.to_string(),
                at,
            },
        }
    }
}
