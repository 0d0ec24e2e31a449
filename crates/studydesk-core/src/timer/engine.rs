//! Focus timer engine.
//!
//! The timer is a wall-clock-based state machine. It does not use internal
//! threads - the caller is responsible for calling `tick()` periodically.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> Paused -> Running -> (mode complete) -> Idle | Running
//! ```
//!
//! Finishing a work session credits it and moves to a short or long break;
//! finishing a break moves back to work. Whether the next mode starts by
//! itself is governed by the auto-start settings.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::mode::{TimerMode, TimerSettings};
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusTimer {
    settings: TimerSettings,
    mode: TimerMode,
    state: TimerState,
    /// Remaining time in milliseconds for the current mode.
    remaining_ms: u64,
    completed_sessions: u32,
    /// Timestamp (ms since epoch) of the last start/resume/tick while running.
    #[serde(default)]
    last_tick_epoch_ms: Option<u64>,
}

impl FocusTimer {
    /// Starts idle at the beginning of a work session.
    pub fn new(settings: TimerSettings) -> Self {
        let remaining_ms = settings.duration_ms(TimerMode::Work);
        Self {
            settings,
            mode: TimerMode::Work,
            state: TimerState::Idle,
            remaining_ms,
            completed_sessions: 0,
            last_tick_epoch_ms: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    pub fn completed_sessions(&self) -> u32 {
        self.completed_sessions
    }

    pub fn settings(&self) -> &TimerSettings {
        &self.settings
    }

    pub fn total_ms(&self) -> u64 {
        self.settings.duration_ms(self.mode)
    }

    /// 0.0 .. 100.0 progress within the current mode.
    pub fn progress_pct(&self) -> f64 {
        let total = self.total_ms();
        if total == 0 {
            return 0.0;
        }
        100.0 - (self.remaining_ms as f64 / total as f64) * 100.0
    }

    /// Remaining time as `MM:SS`, rounding partial seconds up.
    pub fn format_remaining(&self) -> String {
        let secs = self.remaining_ms.div_ceil(1000);
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }

    pub fn snapshot(&self) -> Event {
        Event::TimerSnapshot {
            state: self.state,
            mode: self.mode,
            remaining: self.format_remaining(),
            remaining_ms: self.remaining_ms,
            total_ms: self.total_ms(),
            progress_pct: self.progress_pct(),
            completed_sessions: self.completed_sessions,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        self.start_at(now_ms())
    }

    pub fn start_at(&mut self, now: u64) -> Option<Event> {
        match self.state {
            TimerState::Idle => {
                self.state = TimerState::Running;
                self.last_tick_epoch_ms = Some(now);
                Some(Event::TimerStarted {
                    mode: self.mode,
                    duration_secs: self.settings.duration_min(self.mode).saturating_mul(60),
                    at: Utc::now(),
                })
            }
            TimerState::Paused => {
                self.state = TimerState::Running;
                self.last_tick_epoch_ms = Some(now);
                Some(Event::TimerResumed {
                    remaining_ms: self.remaining_ms,
                    at: Utc::now(),
                })
            }
            TimerState::Running => None,
        }
    }

    pub fn pause(&mut self) -> Option<Event> {
        self.pause_at(now_ms())
    }

    pub fn pause_at(&mut self, now: u64) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.flush_elapsed(now);
        self.state = TimerState::Paused;
        self.last_tick_epoch_ms = None;
        Some(Event::TimerPaused {
            remaining_ms: self.remaining_ms,
            at: Utc::now(),
        })
    }

    /// Play/pause button.
    pub fn toggle(&mut self) -> Option<Event> {
        self.toggle_at(now_ms())
    }

    pub fn toggle_at(&mut self, now: u64) -> Option<Event> {
        match self.state {
            TimerState::Running => self.pause_at(now),
            TimerState::Idle | TimerState::Paused => self.start_at(now),
        }
    }

    /// Back to the full duration of the current mode, stopped.
    pub fn reset(&mut self) -> Option<Event> {
        self.state = TimerState::Idle;
        self.last_tick_epoch_ms = None;
        self.remaining_ms = self.total_ms();
        Some(Event::TimerReset {
            mode: self.mode,
            at: Utc::now(),
        })
    }

    /// Jump to the next mode without crediting a session.
    /// Work always skips to a short break.
    pub fn skip(&mut self) -> Option<Event> {
        let from = self.mode;
        let to = if from == TimerMode::Work {
            TimerMode::ShortBreak
        } else {
            TimerMode::Work
        };
        self.state = TimerState::Idle;
        self.last_tick_epoch_ms = None;
        self.enter(to);
        Some(Event::TimerSkipped {
            from,
            to,
            at: Utc::now(),
        })
    }

    /// Call periodically. Returns `Some(Event::TimerCompleted)` when a mode finishes.
    pub fn tick(&mut self) -> Option<Event> {
        self.tick_at(now_ms())
    }

    pub fn tick_at(&mut self, now: u64) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.flush_elapsed(now);
        if self.remaining_ms > 0 {
            return None;
        }

        let finished = self.mode;
        let (next, keep_running) = if finished == TimerMode::Work {
            self.completed_sessions = self.completed_sessions.saturating_add(1);
            (
                self.settings.break_after(self.completed_sessions),
                self.settings.auto_start_breaks,
            )
        } else {
            (TimerMode::Work, self.settings.auto_start_pomodoros)
        };

        self.enter(next);
        if keep_running {
            self.state = TimerState::Running;
            self.last_tick_epoch_ms = Some(now);
        } else {
            self.state = TimerState::Idle;
            self.last_tick_epoch_ms = None;
        }

        tracing::debug!(?finished, ?next, sessions = self.completed_sessions, "timer mode completed");
        Some(Event::TimerCompleted {
            mode: finished,
            next_mode: next,
            completed_sessions: self.completed_sessions,
            at: Utc::now(),
        })
    }

    /// Replace the settings. A stopped timer picks up the new duration.
    pub fn set_settings(&mut self, settings: TimerSettings) {
        self.settings = settings;
        if self.state == TimerState::Idle {
            self.remaining_ms = self.total_ms();
        } else {
            self.remaining_ms = self.remaining_ms.min(self.total_ms());
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn enter(&mut self, mode: TimerMode) {
        self.mode = mode;
        self.remaining_ms = self.settings.duration_ms(mode);
    }

    fn flush_elapsed(&mut self, now: u64) {
        if let Some(last) = self.last_tick_epoch_ms {
            let elapsed = now.saturating_sub(last);
            self.remaining_ms = self.remaining_ms.saturating_sub(elapsed);
            self.last_tick_epoch_ms = Some(now);
        }
    }
}

impl Default for FocusTimer {
    fn default() -> Self {
        Self::new(TimerSettings::default())
    }
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
