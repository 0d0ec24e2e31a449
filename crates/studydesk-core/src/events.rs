use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::grading::Average;
use crate::timer::{TimerMode, TimerState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculationLevel {
    Unit,
    Semester,
    Year,
}

/// Every user-visible outcome produces an Event.
/// Front ends turn them into notifications; nothing in the core waits on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    CalculationComplete {
        level: CalculationLevel,
        average: f64,
        at: DateTime<Utc>,
    },
    /// Some required grade was missing or invalid.
    CalculationIncomplete {
        level: CalculationLevel,
        at: DateTime<Utc>,
    },
    DataSaved {
        key: String,
        at: DateTime<Utc>,
    },
    DataLoaded {
        key: String,
        calculated_at: Option<DateTime<Utc>>,
        at: DateTime<Utc>,
    },
    NoSavedData {
        key: String,
        at: DateTime<Utc>,
    },
    DataCleared {
        key: String,
        at: DateTime<Utc>,
    },
    TimerStarted {
        mode: TimerMode,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    TimerCompleted {
        mode: TimerMode,
        next_mode: TimerMode,
        completed_sessions: u32,
        at: DateTime<Utc>,
    },
    TimerSkipped {
        from: TimerMode,
        to: TimerMode,
        at: DateTime<Utc>,
    },
    TimerReset {
        mode: TimerMode,
        at: DateTime<Utc>,
    },
    TimerSnapshot {
        state: TimerState,
        mode: TimerMode,
        remaining: String,
        remaining_ms: u64,
        total_ms: u64,
        progress_pct: f64,
        completed_sessions: u32,
        at: DateTime<Utc>,
    },
    TaskAdded {
        id: String,
        title: String,
        date: NaiveDate,
        at: DateTime<Utc>,
    },
    TaskUpdated {
        id: String,
        title: String,
        at: DateTime<Utc>,
    },
    TaskDeleted {
        id: String,
        at: DateTime<Utc>,
    },
    TaskToggled {
        id: String,
        title: String,
        completed: bool,
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn calculation(level: CalculationLevel, average: Average) -> Self {
        let at = Utc::now();
        match average {
            Average::Complete(average) => Event::CalculationComplete { level, average, at },
            Average::Incomplete => Event::CalculationIncomplete { level, at },
        }
    }

    /// Short headline for a notification toast.
    pub fn title(&self) -> &'static str {
        match self {
            Event::CalculationComplete { .. } => "Calculation complete",
            Event::CalculationIncomplete { .. } => "Calculation incomplete",
            Event::DataSaved { .. } => "Data saved",
            Event::DataLoaded { .. } => "Data loaded",
            Event::NoSavedData { .. } => "No saved data",
            Event::DataCleared { .. } => "Data cleared",
            Event::TimerStarted { .. } => "Timer started",
            Event::TimerPaused { .. } => "Timer paused",
            Event::TimerResumed { .. } => "Timer resumed",
            Event::TimerCompleted { .. } => "Session complete",
            Event::TimerSkipped { .. } => "Session skipped",
            Event::TimerReset { .. } => "Timer reset",
            Event::TimerSnapshot { .. } => "Timer",
            Event::TaskAdded { .. } => "Task added",
            Event::TaskUpdated { .. } => "Task updated",
            Event::TaskDeleted { .. } => "Task deleted",
            Event::TaskToggled { completed: true, .. } => "Task completed",
            Event::TaskToggled { completed: false, .. } => "Task reopened",
        }
    }

    /// Whether the notification should be shown as a failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, Event::CalculationIncomplete { .. } | Event::NoSavedData { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calculation_event_follows_average() {
        let ok = Event::calculation(CalculationLevel::Semester, Average::Complete(12.0));
        assert_eq!(ok.title(), "Calculation complete");
        assert!(!ok.is_failure());

        let missing = Event::calculation(CalculationLevel::Semester, Average::Incomplete);
        assert_eq!(missing.title(), "Calculation incomplete");
        assert!(missing.is_failure());
    }

    #[test]
    fn events_are_tagged_by_type() {
        let event = Event::calculation(CalculationLevel::Year, Average::Complete(15.0));
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "CalculationComplete");
        assert_eq!(json["level"], "year");
        assert_eq!(json["average"], 15.0);
    }
}
