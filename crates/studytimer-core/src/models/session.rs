//! Study session ledger
//!
//! A [`StudySession`] wraps one run of the timer view and keeps the numbers
//! a history page would show. Skipping a phase is recorded separately from
//! finishing it; whether the session as a whole counts as done is decided
//! only by how the view is closed (see [`SessionEnd`]).

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Phase, TimerNotification};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionStatus {
    Upcoming,
    InProgress,
    Completed,
    Skipped,
}

/// How the owning view was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user explicitly marked the session complete.
    Completed,
    /// The view was closed without marking it complete.
    Closed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StudySession {
    pub id: Uuid,
    pub subject: String,
    pub topic: String,
    pub planned_focus_seconds: u64,
    pub status: SessionStatus,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    /// Seconds actually counted down in focus phases
    pub focus_seconds: u64,
    /// Seconds actually counted down in break phases
    pub break_seconds: u64,
    pub completed_focus_intervals: u32,
    pub completed_breaks: u32,
    pub skipped_focus_intervals: u32,
    pub skipped_breaks: u32,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Upcoming => "Upcoming",
            SessionStatus::InProgress => "In Progress",
            SessionStatus::Completed => "Completed",
            SessionStatus::Skipped => "Skipped",
        }
    }
}

impl StudySession {
    pub fn new(subject: impl Into<String>, topic: impl Into<String>, planned_focus_seconds: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            subject: subject.into(),
            topic: topic.into(),
            planned_focus_seconds,
            status: SessionStatus::Upcoming,
            started_at: None,
            ended_at: None,
            focus_seconds: 0,
            break_seconds: 0,
            completed_focus_intervals: 0,
            completed_breaks: 0,
            skipped_focus_intervals: 0,
            skipped_breaks: 0,
        }
    }

    /// Mark the session in progress the first time the timer starts.
    pub fn begin(&mut self) {
        if self.status == SessionStatus::Upcoming {
            self.status = SessionStatus::InProgress;
            self.started_at = Some(Utc::now());
        }
    }

    /// Credit one counted-down second to `phase`.
    pub fn record_tick(&mut self, phase: Phase) {
        if !self.is_active() {
            return;
        }
        self.begin();
        match phase {
            Phase::Focus => self.focus_seconds += 1,
            Phase::Break => self.break_seconds += 1,
        }
    }

    /// Count a phase outcome. The session counts as started from here on.
    pub fn record(&mut self, notification: &TimerNotification) {
        if !self.is_active() {
            return;
        }
        self.begin();
        match notification {
            TimerNotification::IntervalElapsed { completed, .. } => match completed {
                Phase::Focus => self.completed_focus_intervals += 1,
                Phase::Break => self.completed_breaks += 1,
            },
            TimerNotification::Skipped { from, .. } => match from {
                Phase::Focus => self.skipped_focus_intervals += 1,
                Phase::Break => self.skipped_breaks += 1,
            },
            TimerNotification::Completed { .. } => {}
        }
    }

    /// Close the session. Later calls keep the first outcome.
    pub fn finish(&mut self, end: SessionEnd) -> SessionStatus {
        if self.is_active() {
            self.status = match end {
                SessionEnd::Completed => SessionStatus::Completed,
                SessionEnd::Closed => SessionStatus::Skipped,
            };
            self.ended_at = Some(Utc::now());
        }
        self.status
    }

    pub fn is_active(&self) -> bool {
        matches!(
            self.status,
            SessionStatus::Upcoming | SessionStatus::InProgress
        )
    }

    pub fn focus_time(&self) -> Duration {
        Duration::seconds(self.focus_seconds as i64)
    }

    /// Share of the planned focus time actually studied, capped at 1.
    pub fn progress(&self) -> f64 {
        if self.planned_focus_seconds == 0 {
            return 0.0;
        }
        (self.focus_seconds as f64 / self.planned_focus_seconds as f64).min(1.0)
    }

    pub fn summary(&self) -> String {
        format!(
            "{} - {} [{}]: {} focused, {} focus interval(s) finished, {} skipped",
            self.subject,
            self.topic,
            self.status.as_str(),
            crate::duration::format_mmss(self.focus_seconds),
            self.completed_focus_intervals,
            self.skipped_focus_intervals,
        )
    }
}
