use chrono::{Datelike, Local, NaiveDate, NaiveTime};
use clap::Subcommand;
use studydesk_core::calendar::{CalendarTask, NewTask, Priority, TaskUpdate};
use studydesk_core::Config;

use super::{notify, open_book, print_json, CmdResult};

fn parse_time(raw: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(raw, "%H:%M").map_err(|e| format!("expected HH:MM: {e}"))
}

#[derive(Subcommand)]
pub enum CalendarAction {
    /// Add a task
    Add {
        title: String,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Start time (HH:MM)
        #[arg(long, value_parser = parse_time, default_value = "09:00")]
        time: NaiveTime,
        /// Duration in minutes
        #[arg(long)]
        duration: Option<u32>,
        /// low, medium or high
        #[arg(long)]
        priority: Option<Priority>,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// List tasks, optionally for a single date
    List {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Today's tasks (first three)
    Today,
    /// Next open tasks, soonest first
    Upcoming,
    /// Update a task
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long, value_parser = parse_time)]
        time: Option<NaiveTime>,
        #[arg(long)]
        duration: Option<u32>,
        #[arg(long)]
        priority: Option<Priority>,
    },
    /// Delete a task
    Delete { id: String },
    /// Mark a task done, or open again
    Toggle { id: String },
    /// Month grid with per-day task counts
    Month {
        #[arg(long)]
        year: Option<i32>,
        /// 1-12
        #[arg(long)]
        month: Option<u32>,
    },
}

/// Task plus the day countdown shown in the deadline widget.
fn with_countdown(tasks: Vec<&CalendarTask>, today: NaiveDate) -> Vec<serde_json::Value> {
    tasks
        .into_iter()
        .map(|t| {
            serde_json::json!({
                "task": t,
                "daysUntil": t.days_until(today),
            })
        })
        .collect()
}

pub fn run(action: CalendarAction) -> CmdResult {
    let book = open_book()?;
    let mut calendar = book.load_calendar();
    let today = Local::now().date_naive();

    match action {
        CalendarAction::Add {
            title,
            date,
            time,
            duration,
            priority,
            description,
        } => {
            let defaults = Config::load_or_default().calendar;
            let new = NewTask {
                description,
                duration_min: duration.unwrap_or(defaults.default_duration_min),
                priority: priority.unwrap_or(defaults.default_priority),
                ..NewTask::new(title, date.unwrap_or(today), time)
            };
            let (task, event) = calendar.add(new)?;
            println!("Task created: {}", task.id);
            print_json(task)?;
            notify(&event);
            book.save_calendar(&calendar)?;
        }
        CalendarAction::List { date } => {
            let tasks: Vec<&CalendarTask> = match date {
                Some(date) => calendar.tasks_on(date),
                None => calendar.tasks().iter().collect(),
            };
            print_json(&tasks)?;
        }
        CalendarAction::Today => {
            print_json(&with_countdown(calendar.todays_tasks(today), today))?;
        }
        CalendarAction::Upcoming => {
            print_json(&with_countdown(calendar.upcoming(today), today))?;
        }
        CalendarAction::Update {
            id,
            title,
            description,
            date,
            time,
            duration,
            priority,
        } => {
            let update = TaskUpdate {
                title,
                description,
                date,
                time,
                duration_min: duration,
                priority,
            };
            notify(&calendar.update(&id, update)?);
            print_json(&calendar.get(&id))?;
            book.save_calendar(&calendar)?;
        }
        CalendarAction::Delete { id } => {
            let event = calendar.delete(&id)?;
            notify(&event);
            print_json(&event)?;
            book.save_calendar(&calendar)?;
        }
        CalendarAction::Toggle { id } => {
            notify(&calendar.toggle_completion(&id)?);
            print_json(&calendar.get(&id))?;
            book.save_calendar(&calendar)?;
        }
        CalendarAction::Month { year, month } => {
            let year = year.unwrap_or_else(|| today.year());
            let month = month.unwrap_or_else(|| today.month());
            let grid = calendar
                .month_grid(year, month)
                .ok_or_else(|| format!("invalid month: {year}-{month}"))?;
            print_json(&grid)?;
        }
    }
    Ok(())
}
