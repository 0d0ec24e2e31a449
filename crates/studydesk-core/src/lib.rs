//! # Studydesk Core Library
//!
//! Core logic for the Studydesk student dashboard: weighted grade
//! aggregation from modules up to the academic year, plus the focus timer
//! and task calendar that sit beside it. The CLI binary is a thin layer over
//! this crate.
//!
//! ## Architecture
//!
//! - **Grading**: pure, synchronous aggregation. Every level produces an
//!   [`Average`] that is either complete or incomplete; calculations never
//!   fail on missing data.
//! - **Storage**: records persisted as JSON blobs in a SQLite key-value
//!   table, and TOML-based configuration
//! - **Timer**: a wall-clock-based state machine that requires the caller
//!   to periodically invoke `tick()` for progress updates
//! - **Calendar**: dated tasks with today/upcoming/month queries
//!
//! ## Key Components
//!
//! - [`Semester`]: unit tree with `calculate()` producing a [`SemesterReport`]
//! - [`AcademicYear`]: semester results aggregated into an annual status
//! - [`GradeBook`]: keyed record persistence over any [`KvStore`]
//! - [`FocusTimer`]: work/break state machine
//! - [`Calendar`]: task list and queries

pub mod calendar;
pub mod error;
pub mod events;
pub mod grading;
pub mod storage;
pub mod timer;

pub use calendar::{Calendar, CalendarTask, MonthGrid, NewTask, Priority, TaskUpdate};
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use events::{CalculationLevel, Event};
pub use grading::{
    AcademicYear, Average, GradeBand, Module, ModuleEdit, PassStatus, ScoreSet, Semester,
    SemesterEdit, SemesterReport, SemesterResult, SemesterSource, Unit, UnitEdit, YearReport,
};
pub use storage::{Config, Database, GradeBook, KvStore, MemoryStore};
pub use timer::{FocusTimer, TimerMode, TimerSettings, TimerState};
