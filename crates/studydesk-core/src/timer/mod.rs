mod engine;
mod mode;

pub use engine::{FocusTimer, TimerState};
pub use mode::{TimerMode, TimerSettings};
