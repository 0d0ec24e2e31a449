use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::CalendarTask;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthDay {
    pub date: NaiveDate,
    pub task_count: usize,
}

/// Month view laid out in Sunday-first weeks.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    /// Empty cells before the 1st (0 when the month starts on a Sunday).
    pub leading_blanks: u32,
    pub days: Vec<MonthDay>,
}

impl MonthGrid {
    /// `None` for an invalid month.
    pub fn build(year: i32, month: u32, tasks: &[CalendarTask]) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let days = days_in_month(year, month)?;
        let days = (1..=days)
            .filter_map(|d| NaiveDate::from_ymd_opt(year, month, d))
            .map(|date| MonthDay {
                date,
                task_count: tasks.iter().filter(|t| t.date == date).count(),
            })
            .collect();
        Some(Self {
            year,
            month,
            leading_blanks: first.weekday().num_days_from_sunday(),
            days,
        })
    }

    pub fn day(&self, day: u32) -> Option<&MonthDay> {
        self.days.get(day.checked_sub(1)? as usize)
    }

    /// Grid cells grouped by week; `None` marks a blank cell.
    pub fn weeks(&self) -> Vec<Vec<Option<&MonthDay>>> {
        let mut cells: Vec<Option<&MonthDay>> = vec![None; self.leading_blanks as usize];
        cells.extend(self.days.iter().map(Some));
        while cells.len() % 7 != 0 {
            cells.push(None);
        }
        cells.chunks(7).map(|w| w.to_vec()).collect()
    }
}

pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    u32::try_from((next - first).num_days()).ok()
}
