use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerMode {
    Work,
    ShortBreak,
    LongBreak,
}

impl TimerMode {
    pub fn label(self) -> &'static str {
        match self {
            TimerMode::Work => "Focus Time",
            TimerMode::ShortBreak => "Short Break",
            TimerMode::LongBreak => "Long Break",
        }
    }

    pub fn is_break(self) -> bool {
        self != TimerMode::Work
    }
}

/// Durations and auto-start behaviour of the focus timer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSettings {
    /// Duration in minutes.
    #[serde(default = "default_work_min")]
    pub work_min: u64,
    #[serde(default = "default_short_break_min")]
    pub short_break_min: u64,
    #[serde(default = "default_long_break_min")]
    pub long_break_min: u64,
    /// A long break follows every N-th completed work session. 0 disables long breaks.
    #[serde(default = "default_sessions_until_long_break")]
    pub sessions_until_long_break: u32,
    #[serde(default = "default_true")]
    pub auto_start_breaks: bool,
    #[serde(default)]
    pub auto_start_pomodoros: bool,
    #[serde(default = "default_true")]
    pub sound_enabled: bool,
}

fn default_work_min() -> u64 {
    25
}
fn default_short_break_min() -> u64 {
    5
}
fn default_long_break_min() -> u64 {
    15
}
fn default_sessions_until_long_break() -> u32 {
    4
}
fn default_true() -> bool {
    true
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            work_min: default_work_min(),
            short_break_min: default_short_break_min(),
            long_break_min: default_long_break_min(),
            sessions_until_long_break: default_sessions_until_long_break(),
            auto_start_breaks: true,
            auto_start_pomodoros: false,
            sound_enabled: true,
        }
    }
}

impl TimerSettings {
    pub fn duration_min(&self, mode: TimerMode) -> u64 {
        match mode {
            TimerMode::Work => self.work_min,
            TimerMode::ShortBreak => self.short_break_min,
            TimerMode::LongBreak => self.long_break_min,
        }
    }

    /// Uses saturating arithmetic so absurd durations cannot overflow.
    pub fn duration_ms(&self, mode: TimerMode) -> u64 {
        self.duration_min(mode).saturating_mul(60).saturating_mul(1000)
    }

    /// Break that follows the given number of completed work sessions.
    pub fn break_after(&self, completed_sessions: u32) -> TimerMode {
        let n = self.sessions_until_long_break;
        if n > 0 && completed_sessions > 0 && completed_sessions % n == 0 {
            TimerMode::LongBreak
        } else {
            TimerMode::ShortBreak
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_durations() {
        let s = TimerSettings::default();
        assert_eq!(s.duration_ms(TimerMode::Work), 25 * 60 * 1000);
        assert_eq!(s.duration_min(TimerMode::ShortBreak), 5);
        assert_eq!(s.duration_min(TimerMode::LongBreak), 15);
    }

    #[test]
    fn every_fourth_session_earns_long_break() {
        let s = TimerSettings::default();
        assert_eq!(s.break_after(1), TimerMode::ShortBreak);
        assert_eq!(s.break_after(3), TimerMode::ShortBreak);
        assert_eq!(s.break_after(4), TimerMode::LongBreak);
        assert_eq!(s.break_after(8), TimerMode::LongBreak);
    }

    #[test]
    fn zero_interval_disables_long_breaks() {
        let s = TimerSettings {
            sessions_until_long_break: 0,
            ..TimerSettings::default()
        };
        assert_eq!(s.break_after(4), TimerMode::ShortBreak);
    }

    #[test]
    fn overflowing_duration_saturates() {
        let s = TimerSettings {
            work_min: u64::MAX,
            ..TimerSettings::default()
        };
        assert_eq!(s.duration_ms(TimerMode::Work), u64::MAX);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let s: TimerSettings = toml::from_str("work_min = 50").unwrap();
        assert_eq!(s.work_min, 50);
        assert_eq!(s.short_break_min, 5);
        assert!(s.auto_start_breaks);
        assert!(!s.auto_start_pomodoros);
    }
}
