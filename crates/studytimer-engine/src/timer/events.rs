//! Timer events

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use studytimer_core::models::{Phase, TimerNotification, TimerSnapshot};

/// Event emitted by the timer engine
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimerEvent {
    pub event_type: TimerEventType,
    /// Timer state right after the event
    pub snapshot: TimerSnapshot,
    pub timestamp: DateTime<Utc>,
}

/// Types of timer events
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimerEventType {
    /// Countdown started or resumed
    Started,
    /// Countdown paused
    Paused,
    /// Current phase rewound
    Reset,
    /// One second counted down in `phase`
    Tick { phase: Phase, remaining_seconds: u64 },
    /// A phase ran out on its own
    IntervalElapsed { completed: Phase, next: Phase },
    /// A phase was cut short
    Skipped {
        from: Phase,
        to: Phase,
        remaining_seconds: u64,
    },
    /// The session was marked complete
    Completed { phase: Phase },
    /// Focus length changed
    PresetSelected { focus_duration: u64 },
    /// Focus length change refused
    PresetRejected { focus_duration: u64, reason: String },
}

impl From<TimerNotification> for TimerEventType {
    fn from(notification: TimerNotification) -> Self {
        match notification {
            TimerNotification::IntervalElapsed { completed, next } => {
                TimerEventType::IntervalElapsed { completed, next }
            }
            TimerNotification::Skipped {
                from,
                to,
                remaining_seconds,
            } => TimerEventType::Skipped {
                from,
                to,
                remaining_seconds,
            },
            TimerNotification::Completed { phase, .. } => TimerEventType::Completed { phase },
        }
    }
}

impl TimerEvent {
    /// Create a new timer event
    pub fn new(event_type: TimerEventType, snapshot: TimerSnapshot) -> Self {
        Self {
            event_type,
            snapshot,
            timestamp: Utc::now(),
        }
    }

    /// Create a tick event
    pub fn tick(phase: Phase, remaining_seconds: u64, snapshot: TimerSnapshot) -> Self {
        Self::new(
            TimerEventType::Tick {
                phase,
                remaining_seconds,
            },
            snapshot,
        )
    }

    pub fn is_tick(&self) -> bool {
        matches!(self.event_type, TimerEventType::Tick { .. })
    }
}
