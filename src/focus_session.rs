//! A focus timer, that alternates focus phases and breaks
//!
//! Each completed focus phase is followed by a short break, except every
//! [`SESSIONS_BEFORE_LONG_BREAK`]th one, which is followed by a long break.
//! After a break comes a new focus phase.
//!
//! The timer does not measure time by itself: it is driven by [`FocusSession::tick`].

use std::fmt::{Display, Formatter};

use chrono::Duration;

use crate::config::{FOCUS_MINUTES, LONG_BREAK_MINUTES, SESSIONS_BEFORE_LONG_BREAK, SHORT_BREAK_MINUTES};
use crate::reconciler::notification::{Notification, Notifier};


/// The phase a focus session is in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusMode {
    Focus,
    ShortBreak,
    LongBreak,
}

impl FocusMode {
    /// How long this phase lasts
    pub fn duration(self) -> Duration {
        match self {
            FocusMode::Focus => Duration::minutes(FOCUS_MINUTES),
            FocusMode::ShortBreak => Duration::minutes(SHORT_BREAK_MINUTES),
            FocusMode::LongBreak => Duration::minutes(LONG_BREAK_MINUTES),
        }
    }
}

impl Display for FocusMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FocusMode::Focus => write!(f, "Focus"),
            FocusMode::ShortBreak => write!(f, "Short break"),
            FocusMode::LongBreak => write!(f, "Long break"),
        }
    }
}


/// Whether the timer is counting down
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running,
    Paused,
}


#[derive(Clone, Debug, PartialEq)]
pub struct FocusSession {
    mode: FocusMode,
    state: TimerState,
    remaining: Duration,
    completed_sessions: u32,
}

impl Default for FocusSession {
    fn default() -> Self {
        Self::new()
    }
}

impl FocusSession {
    /// A session that is ready to start a focus phase
    pub fn new() -> Self {
        Self {
            mode: FocusMode::Focus,
            state: TimerState::Idle,
            remaining: FocusMode::Focus.duration(),
            completed_sessions: 0,
        }
    }

    pub fn mode(&self) -> FocusMode { self.mode }
    pub fn state(&self) -> TimerState { self.state }
    pub fn remaining(&self) -> Duration { self.remaining }
    /// How many focus phases have been completed (skipped ones do not count)
    pub fn completed_sessions(&self) -> u32 { self.completed_sessions }

    /// Start the timer, or pause it if it is running, or resume it if it is paused
    pub fn start_pause(&mut self) {
        self.state = match self.state {
            TimerState::Idle | TimerState::Paused => TimerState::Running,
            TimerState::Running => TimerState::Paused,
        };
    }

    /// Stop the timer, and restart the current phase from its beginning
    pub fn reset(&mut self) {
        self.state = TimerState::Idle;
        self.remaining = self.mode.duration();
    }

    /// Stop the timer, and get ready for a given phase
    pub fn switch_mode(&mut self, mode: FocusMode) {
        self.mode = mode;
        self.reset();
    }

    /// Give up the current phase. A skipped focus phase is followed by a short break, and does not count as completed
    pub fn skip(&mut self) {
        let next = match self.mode {
            FocusMode::Focus => FocusMode::ShortBreak,
            FocusMode::ShortBreak | FocusMode::LongBreak => FocusMode::Focus,
        };
        self.switch_mode(next);
    }

    /// Let some time pass.
    ///
    /// In case this completes the current phase, the notifier is told so, the timer is stopped,
    /// and the next phase is returned (the session is then ready to start it)
    pub fn tick<N: Notifier>(&mut self, elapsed: Duration, notifier: &mut N) -> Option<FocusMode> {
        if self.state != TimerState::Running || elapsed <= Duration::zero() {
            return None;
        }

        self.remaining = self.remaining - elapsed;
        if self.remaining > Duration::zero() {
            return None;
        }

        let title = match self.mode {
            FocusMode::Focus => "Focus session complete!",
            FocusMode::ShortBreak | FocusMode::LongBreak => "Break complete!",
        };
        notifier.notify(Notification::new(title, "Time for a new session."));

        let next = match self.mode {
            FocusMode::Focus => {
                self.completed_sessions += 1;
                if self.completed_sessions % SESSIONS_BEFORE_LONG_BREAK == 0 {
                    FocusMode::LongBreak
                } else {
                    FocusMode::ShortBreak
                }
            },
            FocusMode::ShortBreak | FocusMode::LongBreak => FocusMode::Focus,
        };
        log::debug!("{} phase complete, next is {}", self.mode, next);
        self.switch_mode(next);
        Some(next)
    }

    /// How much of the current phase has elapsed, between 0.0 and 1.0
    pub fn progress(&self) -> f64 {
        let total = self.mode.duration().num_seconds() as f64;
        let remaining = self.remaining.num_seconds() as f64;
        (1.0 - remaining / total).max(0.0).min(1.0)
    }

    /// The remaining time, as `MM:SS`
    pub fn remaining_display(&self) -> String {
        let seconds = self.remaining.num_seconds().max(0);
        format!("{:02}:{:02}", seconds / 60, seconds % 60)
    }
}
