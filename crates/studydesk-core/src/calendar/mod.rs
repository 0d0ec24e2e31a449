//! Task calendar.
//!
//! A flat list of dated tasks with the queries the dashboard widgets need:
//! today's schedule, upcoming deadlines and a month grid.

mod month;
mod task;

pub use month::{MonthDay, MonthGrid};
pub use task::{CalendarTask, NewTask, Priority, TaskUpdate};

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::events::Event;

/// Number of tasks shown by the compact today/upcoming widgets.
pub const WIDGET_LIMIT: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Calendar {
    tasks: Vec<CalendarTask>,
}

impl Calendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<CalendarTask>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[CalendarTask] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&CalendarTask> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn index_of(&self, id: &str) -> Result<usize, ValidationError> {
        self.tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| ValidationError::not_found("task", id))
    }

    pub fn add(&mut self, new: NewTask) -> Result<(&CalendarTask, Event), ValidationError> {
        let title = new.title.trim().to_string();
        if title.is_empty() {
            return Err(ValidationError::EmptyField("title"));
        }
        let task = CalendarTask {
            id: Uuid::new_v4().to_string(),
            title,
            description: new.description,
            date: new.date,
            time: new.time,
            duration_min: new.duration_min,
            priority: new.priority,
            completed: false,
        };
        let event = Event::TaskAdded {
            id: task.id.clone(),
            title: task.title.clone(),
            date: task.date,
            at: Utc::now(),
        };
        self.tasks.push(task);
        let added = self.tasks.last().ok_or(ValidationError::EmptyField("title"))?;
        Ok((added, event))
    }

    pub fn update(&mut self, id: &str, update: TaskUpdate) -> Result<Event, ValidationError> {
        let index = self.index_of(id)?;
        if let Some(title) = &update.title {
            if title.trim().is_empty() {
                return Err(ValidationError::EmptyField("title"));
            }
        }
        let task = &mut self.tasks[index];
        if let Some(title) = update.title {
            task.title = title.trim().to_string();
        }
        if let Some(description) = update.description {
            task.description = description;
        }
        if let Some(date) = update.date {
            task.date = date;
        }
        if let Some(time) = update.time {
            task.time = time;
        }
        if let Some(duration) = update.duration_min {
            task.duration_min = duration;
        }
        if let Some(priority) = update.priority {
            task.priority = priority;
        }
        Ok(Event::TaskUpdated {
            id: task.id.clone(),
            title: task.title.clone(),
            at: Utc::now(),
        })
    }

    pub fn delete(&mut self, id: &str) -> Result<Event, ValidationError> {
        let index = self.index_of(id)?;
        let task = self.tasks.remove(index);
        Ok(Event::TaskDeleted {
            id: task.id,
            at: Utc::now(),
        })
    }

    pub fn toggle_completion(&mut self, id: &str) -> Result<Event, ValidationError> {
        let index = self.index_of(id)?;
        let task = &mut self.tasks[index];
        task.completed = !task.completed;
        Ok(Event::TaskToggled {
            id: task.id.clone(),
            title: task.title.clone(),
            completed: task.completed,
            at: Utc::now(),
        })
    }

    pub fn tasks_on(&self, date: NaiveDate) -> Vec<&CalendarTask> {
        self.tasks.iter().filter(|t| t.date == date).collect()
    }

    pub fn todays_tasks(&self, today: NaiveDate) -> Vec<&CalendarTask> {
        self.tasks_on(today).into_iter().take(WIDGET_LIMIT).collect()
    }

    /// Open tasks from today on, soonest first.
    pub fn upcoming(&self, today: NaiveDate) -> Vec<&CalendarTask> {
        let mut open: Vec<&CalendarTask> = self
            .tasks
            .iter()
            .filter(|t| t.date >= today && !t.completed)
            .collect();
        open.sort_by_key(|t| t.starts_at());
        open.truncate(WIDGET_LIMIT);
        open
    }

    /// Days from `today` until the task with `id`; `None` for an unknown id.
    pub fn days_until(&self, id: &str, today: NaiveDate) -> Option<i64> {
        self.get(id).map(|t| t.days_until(today))
    }

    pub fn month_grid(&self, year: i32, month: u32) -> Option<MonthGrid> {
        MonthGrid::build(year, month, &self.tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn add(cal: &mut Calendar, title: &str, d: NaiveDate, t: NaiveTime) -> String {
        cal.add(NewTask::new(title, d, t)).unwrap().0.id.clone()
    }

    #[test]
    fn add_assigns_id_and_defaults() {
        let mut cal = Calendar::new();
        let (task, event) = cal.add(NewTask::new("  Exam  ", date(2025, 5, 25), at(9, 0))).unwrap();
        assert_eq!(task.title, "Exam");
        assert_eq!(task.duration_min, 60);
        assert_eq!(task.priority, Priority::Medium);
        assert!(!task.completed);
        assert_eq!(event.title(), "Task added");
    }

    #[test]
    fn add_rejects_blank_title() {
        let mut cal = Calendar::new();
        let err = cal.add(NewTask::new("   ", date(2025, 5, 25), at(9, 0))).unwrap_err();
        assert_eq!(err, ValidationError::EmptyField("title"));
        assert!(cal.tasks().is_empty());
    }

    #[test]
    fn update_changes_only_given_fields() {
        let mut cal = Calendar::new();
        let id = add(&mut cal, "Report", date(2025, 6, 15), at(17, 0));
        cal.update(
            &id,
            TaskUpdate {
                priority: Some(Priority::High),
                duration_min: Some(30),
                ..TaskUpdate::default()
            },
        )
        .unwrap();
        let task = cal.get(&id).unwrap();
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.duration_min, 30);
        assert_eq!(task.title, "Report");
    }

    #[test]
    fn update_rejects_blank_title() {
        let mut cal = Calendar::new();
        let id = add(&mut cal, "Report", date(2025, 6, 15), at(17, 0));
        let update = TaskUpdate {
            title: Some(" ".into()),
            ..TaskUpdate::default()
        };
        assert!(cal.update(&id, update).is_err());
        assert_eq!(cal.get(&id).unwrap().title, "Report");
    }

    #[test]
    fn unknown_ids_are_not_found() {
        let mut cal = Calendar::new();
        assert!(cal.delete("x").is_err());
        assert!(cal.toggle_completion("x").is_err());
        assert!(cal.update("x", TaskUpdate::default()).is_err());
    }

    #[test]
    fn toggle_and_delete() {
        let mut cal = Calendar::new();
        let id = add(&mut cal, "Project", date(2025, 6, 5), at(23, 59));
        let event = cal.toggle_completion(&id).unwrap();
        assert_eq!(event.title(), "Task completed");
        assert!(cal.get(&id).unwrap().completed);
        assert_eq!(cal.toggle_completion(&id).unwrap().title(), "Task reopened");
        cal.delete(&id).unwrap();
        assert!(cal.get(&id).is_none());
    }

    #[test]
    fn upcoming_skips_past_and_completed_and_sorts() {
        let mut cal = Calendar::new();
        let today = date(2025, 6, 1);
        add(&mut cal, "Past", date(2025, 5, 30), at(9, 0));
        let done = add(&mut cal, "Done", date(2025, 6, 2), at(9, 0));
        cal.toggle_completion(&done).unwrap();
        add(&mut cal, "Later", date(2025, 6, 20), at(8, 0));
        add(&mut cal, "Evening", date(2025, 6, 1), at(18, 0));
        add(&mut cal, "Morning", date(2025, 6, 1), at(7, 30));
        add(&mut cal, "Far", date(2025, 7, 1), at(7, 30));

        let titles: Vec<&str> = cal.upcoming(today).iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Morning", "Evening", "Later"]);
    }

    #[test]
    fn todays_tasks_are_capped() {
        let mut cal = Calendar::new();
        let today = date(2025, 6, 1);
        for i in 0..5 {
            add(&mut cal, &format!("T{i}"), today, at(9 + i, 0));
        }
        assert_eq!(cal.tasks_on(today).len(), 5);
        assert_eq!(cal.todays_tasks(today).len(), WIDGET_LIMIT);
    }

    #[test]
    fn serializes_as_plain_array() {
        let mut cal = Calendar::new();
        add(&mut cal, "Exam", date(2025, 5, 25), at(9, 0));
        let json = serde_json::to_value(&cal).unwrap();
        assert!(json.is_array());
        let back: Calendar = serde_json::from_value(json).unwrap();
        assert_eq!(back, cal);
    }
}
