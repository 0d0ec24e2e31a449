use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(format!("unknown priority: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarTask {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    #[serde(with = "hh_mm")]
    pub time: NaiveTime,
    /// Duration in minutes.
    #[serde(rename = "duration", default = "default_duration_min")]
    pub duration_min: u32,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
}

pub(crate) fn default_duration_min() -> u32 {
    60
}

impl CalendarTask {
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    /// Whole days from `today` to the task date; negative when overdue.
    pub fn days_until(&self, today: NaiveDate) -> i64 {
        (self.date - today).num_days()
    }
}

/// Input for a new task; the id is assigned by the calendar.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub duration_min: u32,
    pub priority: Priority,
}

impl NewTask {
    pub fn new(title: impl Into<String>, date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            date,
            time,
            duration_min: default_duration_min(),
            priority: Priority::default(),
        }
    }
}

/// Partial update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub duration_min: Option<u32>,
    pub priority: Option<Priority>,
}

/// Times are stored as `HH:MM`, matching the dashboard's task blobs.
mod hh_mm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveTime::parse_from_str(&raw, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dashboard_task() {
        let json = r#"{
            "id": "1",
            "title": "Mathematics Final Exam",
            "description": "Advanced Calculus final examination",
            "date": "2025-05-25",
            "time": "09:00",
            "duration": 180,
            "priority": "high",
            "completed": false
        }"#;
        let task: CalendarTask = serde_json::from_str(json).unwrap();
        assert_eq!(task.time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(task.duration_min, 180);
        assert_eq!(task.priority, Priority::High);
        let back = serde_json::to_value(&task).unwrap();
        assert_eq!(back["time"], "09:00");
    }

    #[test]
    fn days_until_counts_calendar_days() {
        let task = CalendarTask {
            id: "t".into(),
            title: "Lab".into(),
            description: String::new(),
            date: NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
            time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            duration_min: 30,
            priority: Priority::Medium,
            completed: false,
        };
        assert_eq!(task.days_until(NaiveDate::from_ymd_opt(2025, 6, 5).unwrap()), 10);
        assert_eq!(task.days_until(NaiveDate::from_ymd_opt(2025, 6, 16).unwrap()), -1);
    }

    #[test]
    fn priority_from_str() {
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert!("urgent".parse::<Priority>().is_err());
    }
}
