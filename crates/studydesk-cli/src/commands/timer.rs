use clap::Subcommand;
use studydesk_core::storage::{Config, Database, GradeBook};
use studydesk_core::{Event, FocusTimer};

use super::{notify, open_book, print_json, CmdResult};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start or resume the timer
    Start,
    /// Pause the running timer
    Pause,
    /// Start when stopped, pause when running
    Toggle,
    /// Skip to the next mode without crediting the session
    Skip,
    /// Restart the current mode from its full duration
    Reset,
    /// Print current timer state as JSON
    Status,
}

/// The saved timer, with durations refreshed from the config file.
fn load_timer(book: &GradeBook<Database>, config: &Config) -> FocusTimer {
    let mut timer = book
        .load_timer()
        .unwrap_or_else(|| FocusTimer::new(config.timer.clone()));
    timer.set_settings(config.timer.clone());
    timer
}

fn report(event: Option<Event>, timer: &FocusTimer) -> CmdResult {
    if let Some(event) = event {
        notify(&event);
        print_json(&event)?;
    }
    print_json(&timer.snapshot())?;
    Ok(())
}

pub fn run(action: TimerAction) -> CmdResult {
    let book = open_book()?;
    let config = Config::load_or_default();
    let mut timer = load_timer(&book, &config);

    // Catch up on time elapsed since the last invocation.
    if let Some(completed) = timer.tick() {
        notify(&completed);
        print_json(&completed)?;
    }

    let event = match action {
        TimerAction::Start => timer.start(),
        TimerAction::Pause => timer.pause(),
        TimerAction::Toggle => timer.toggle(),
        TimerAction::Skip => timer.skip(),
        TimerAction::Reset => timer.reset(),
        TimerAction::Status => None,
    };
    report(event, &timer)?;

    book.save_timer(&timer)?;
    Ok(())
}
