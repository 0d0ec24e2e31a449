//! Weighted grade aggregation on the 0-20 scale.
//!
//! Data flows strictly upward:
//!
//! ```text
//! raw scores -> module average -> unit average -> semester average -> annual average
//! ```
//!
//! Every level is a pure function of the level below plus coefficients.
//! `recompute` never mutates its input and always rebuilds the derived values
//! of the whole subtree from raw scores, so re-running it is idempotent.
//! A single missing or invalid score makes every dependent average
//! [`Average::Incomplete`], all the way to the year.

mod band;
mod mean;
mod module;
mod outcome;
pub mod record;
mod score;
mod semester;
pub mod templates;
mod unit;
mod year;

pub use band::{GradeBand, PassStatus, PASS_THRESHOLD};
pub use module::{Module, ModuleEdit, ScoreSet, Weighting};
pub use outcome::Average;
pub use record::{ModuleResult, SemesterRecord, UnitRecord, YearRecord};
pub use score::{is_in_range, parse_score_input, validate_score, ScoreCheck, MAX_SCORE, MIN_SCORE};
pub use semester::{GradeDistribution, Semester, SemesterReport, UnitSummary};
pub use unit::{Unit, UnitEdit};
pub use year::{AcademicYear, SemesterEdit, SemesterResult, SemesterSource, YearReport};
