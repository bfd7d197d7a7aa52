//! Focus/break countdown state machine.
//!
//! [`SessionTimer`] owns the countdown for one study session. It has no
//! clock of its own: the caller delivers one [`SessionTimer::tick`] per
//! elapsed second while the timer is running, and every other change goes
//! through an explicit command. Phase transitions are reported to an
//! injected [`TimerObserver`].

use std::fmt;

use serde::{Deserialize, Serialize};

use super::TimerConfig;
use crate::duration::format_mmss;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimerError {
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Duration must be greater than 0 seconds")]
    InvalidDuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Focus,
    Break,
}

impl Phase {
    pub fn duration(&self, config: &TimerConfig) -> u64 {
        match self {
            Phase::Focus => config.focus_duration,
            Phase::Break => config.break_duration,
        }
    }

    pub fn next(&self) -> Phase {
        match self {
            Phase::Focus => Phase::Break,
            Phase::Break => Phase::Focus,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Focus => "Focus",
            Phase::Break => "Break",
        }
    }

    pub fn is_focus(&self) -> bool {
        matches!(self, Phase::Focus)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Something the owner of a timer may want to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimerNotification {
    /// A phase counted down to zero on its own.
    IntervalElapsed { completed: Phase, next: Phase },
    /// The caller cut a phase short.
    Skipped {
        from: Phase,
        to: Phase,
        remaining_seconds: u64,
    },
    /// The caller asked to end the whole session.
    Completed { phase: Phase, remaining_seconds: u64 },
}

/// Receives timer notifications, e.g. to play an alert sound.
pub trait TimerObserver: Send {
    fn notify(&mut self, notification: &TimerNotification);
}

impl<F> TimerObserver for F
where
    F: FnMut(&TimerNotification) + Send,
{
    fn notify(&mut self, notification: &TimerNotification) {
        self(notification)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl TimerObserver for NoopObserver {
    fn notify(&mut self, _notification: &TimerNotification) {}
}

/// Point-in-time view of a timer, with derived display values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: Phase,
    pub running: bool,
    pub remaining_seconds: u64,
    pub total_duration_seconds: u64,
    pub focus_duration: u64,
    pub break_duration: u64,
    pub elapsed_fraction: f64,
    pub formatted_time: String,
}

pub struct SessionTimer {
    config: TimerConfig,
    phase: Phase,
    remaining_seconds: u64,
    running: bool,
    observer: Box<dyn TimerObserver>,
}

impl SessionTimer {
    /// Create a stopped timer at the start of a focus phase.
    pub fn new(config: TimerConfig) -> Result<Self, TimerError> {
        Self::with_focus_override(config, None)
    }

    /// Like [`SessionTimer::new`], with the focus length replaced by
    /// `focus_override` when given.
    pub fn with_focus_override(
        mut config: TimerConfig,
        focus_override: Option<u64>,
    ) -> Result<Self, TimerError> {
        if let Some(focus) = focus_override {
            config.focus_duration = focus;
        }
        config.check()?;

        Ok(Self {
            config,
            phase: Phase::Focus,
            remaining_seconds: config.focus_duration,
            running: false,
            observer: Box::new(NoopObserver),
        })
    }

    pub fn with_observer(mut self, observer: impl TimerObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    pub fn set_observer(&mut self, observer: impl TimerObserver + 'static) {
        self.observer = Box::new(observer);
    }

    /// Detach the current observer, leaving a no-op one in its place.
    pub fn take_observer(&mut self) -> Box<dyn TimerObserver> {
        std::mem::replace(&mut self.observer, Box::new(NoopObserver))
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn toggle(&mut self) {
        if self.running {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Rewind the current phase and stop.
    pub fn reset(&mut self) {
        self.remaining_seconds = self.total_duration_seconds();
        self.running = false;
    }

    /// Change the focus length. Only allowed while stopped.
    pub fn select_preset(&mut self, focus_duration: u64) -> Result<(), TimerError> {
        if focus_duration == 0 {
            return Err(TimerError::InvalidDuration);
        }
        if self.running {
            return Err(TimerError::InvalidOperation(
                "cannot change the focus preset while the timer is running".to_string(),
            ));
        }

        self.config.focus_duration = focus_duration;
        if self.phase.is_focus() {
            self.remaining_seconds = focus_duration;
        }
        Ok(())
    }

    /// Jump to the next phase without waiting for the countdown.
    pub fn skip(&mut self) {
        let from = self.phase;
        let remaining_seconds = self.remaining_seconds;
        self.advance_phase();

        self.observer.notify(&TimerNotification::Skipped {
            from,
            to: self.phase,
            remaining_seconds,
        });
    }

    /// Signal that the session is over. Timer fields are untouched.
    pub fn complete(&mut self) {
        self.observer.notify(&TimerNotification::Completed {
            phase: self.phase,
            remaining_seconds: self.remaining_seconds,
        });
    }

    /// Count down one second.
    ///
    /// Returns true if this tick finished the phase. The timer is then
    /// already in the next phase, rewound and stopped.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds > 0 {
            return false;
        }

        let completed = self.phase;
        self.advance_phase();
        self.observer.notify(&TimerNotification::IntervalElapsed {
            completed,
            next: self.phase,
        });
        true
    }

    fn advance_phase(&mut self) {
        self.phase = self.phase.next();
        self.remaining_seconds = self.total_duration_seconds();
        self.running = false;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    pub fn total_duration_seconds(&self) -> u64 {
        self.phase.duration(&self.config)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Share of the current phase already counted down, in `[0, 1]`.
    pub fn elapsed_fraction(&self) -> f64 {
        let total = self.total_duration_seconds();
        (total - self.remaining_seconds) as f64 / total as f64
    }

    pub fn formatted_time(&self) -> String {
        format_mmss(self.remaining_seconds)
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.phase,
            running: self.running,
            remaining_seconds: self.remaining_seconds,
            total_duration_seconds: self.total_duration_seconds(),
            focus_duration: self.config.focus_duration,
            break_duration: self.config.break_duration,
            elapsed_fraction: self.elapsed_fraction(),
            formatted_time: self.formatted_time(),
        }
    }
}

impl Default for SessionTimer {
    fn default() -> Self {
        let config = TimerConfig::default();
        Self {
            config,
            phase: Phase::Focus,
            remaining_seconds: config.focus_duration,
            running: false,
            observer: Box::new(NoopObserver),
        }
    }
}

impl fmt::Debug for SessionTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionTimer")
            .field("config", &self.config)
            .field("phase", &self.phase)
            .field("remaining_seconds", &self.remaining_seconds)
            .field("running", &self.running)
            .finish_non_exhaustive()
    }
}
