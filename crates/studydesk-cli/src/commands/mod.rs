pub mod band;
pub mod calendar;
pub mod config;
pub mod module;
pub mod semester;
pub mod timer;
pub mod unit;
pub mod year;

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use studydesk_core::storage::{Database, GradeBook};
use studydesk_core::Event;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

pub fn open_book() -> Result<GradeBook<Database>, Box<dyn std::error::Error>> {
    Ok(GradeBook::new(Database::open()?))
}

pub fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let value = serde_json::from_str(&content)
        .map_err(|e| format!("invalid JSON in {}: {e}", path.display()))?;
    Ok(value)
}

/// Notification line on stderr; stdout stays machine-readable.
pub fn notify(event: &Event) {
    tracing::info!(event = event.title(), "notification");
    match event {
        Event::CalculationComplete { level, average, .. } => {
            eprintln!("{}: {level:?} average {average:.2}/20", event.title())
        }
        Event::CalculationIncomplete { level, .. } => eprintln!(
            "{}: {level:?} has missing or invalid grades",
            event.title()
        ),
        Event::DataSaved { key, .. }
        | Event::DataCleared { key, .. }
        | Event::DataLoaded { key, .. }
        | Event::NoSavedData { key, .. } => eprintln!("{}: {key}", event.title()),
        _ => eprintln!("{}", event.title()),
    }
}
