//! Application state management

use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use studytimer_core::duration::format_minutes;
use studytimer_core::models::{
    Phase, Preset, SessionEnd, StudySession, TimerNotification, TimerSnapshot,
};
use studytimer_engine::{EngineError, EngineHandle, TimerEvent, TimerEventType};

pub struct App {
    engine: EngineHandle,
    pub snapshot: TimerSnapshot,
    pub session: StudySession,
    pub presets: Vec<Preset>,
    pub show_help: bool,
    pub status_message: String,
    pub should_quit: bool,
    audio_alerts: bool,
    bell_pending: bool,
}

impl App {
    pub fn new(
        engine: EngineHandle,
        snapshot: TimerSnapshot,
        session: StudySession,
        presets: Vec<Preset>,
    ) -> Self {
        Self {
            engine,
            snapshot,
            session,
            presets,
            show_help: false,
            status_message: "Press [Space] to start focusing".to_string(),
            should_quit: false,
            audio_alerts: false,
            bell_pending: false,
        }
    }

    pub fn with_audio_alerts(mut self, enabled: bool) -> Self {
        self.audio_alerts = enabled;
        self
    }

    /// True once per elapsed interval when audio alerts are on.
    pub fn take_bell(&mut self) -> bool {
        std::mem::take(&mut self.bell_pending)
    }

    pub fn engine(&self) -> &EngineHandle {
        &self.engine
    }

    /// Index of the preset matching the current focus length, if any.
    pub fn active_preset(&self) -> Option<usize> {
        self.presets
            .iter()
            .position(|p| p.seconds == self.snapshot.focus_duration)
    }

    pub async fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Result<()> {
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            self.close(SessionEnd::Closed);
            return Ok(());
        }

        if self.show_help {
            if matches!(code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
                self.show_help = false;
            }
            return Ok(());
        }

        match code {
            KeyCode::Char(' ') | KeyCode::Char('p') => {
                self.snapshot = self.engine.toggle().await?;
            }
            KeyCode::Char('r') => {
                self.snapshot = self.engine.reset().await?;
            }
            KeyCode::Char('s') | KeyCode::Char('n') => {
                self.snapshot = self.engine.skip().await?;
            }
            KeyCode::Char('c') => {
                self.snapshot = self.engine.complete().await?;
                self.close(SessionEnd::Completed);
            }
            KeyCode::Char(ch @ '1'..='9') => {
                let number = ch as usize - '0' as usize;
                self.select_preset(number).await?;
            }
            KeyCode::Char('?') => {
                self.show_help = true;
            }
            KeyCode::Char('q') | KeyCode::Esc => {
                self.close(SessionEnd::Closed);
            }
            _ => {}
        }

        Ok(())
    }

    async fn select_preset(&mut self, number: usize) -> Result<()> {
        let Some(preset) = number
            .checked_sub(1)
            .and_then(|i| self.presets.get(i))
            .cloned()
        else {
            self.status_message = format!("No preset bound to [{}]", number);
            return Ok(());
        };

        if self.snapshot.running {
            self.status_message = "Pause the timer before changing the preset".to_string();
            return Ok(());
        }

        match self.engine.select_preset(preset.seconds).await {
            Ok(snapshot) => {
                self.snapshot = snapshot;
                self.status_message =
                    format!("{} preset selected ({})", preset.name, preset.label());
            }
            Err(EngineError::Timer(e)) => {
                self.status_message = e.to_string();
            }
            Err(e) => return Err(e.into()),
        }

        Ok(())
    }

    /// Fold an engine event into the view state and session ledger.
    pub fn apply_event(&mut self, event: &TimerEvent) {
        self.snapshot = event.snapshot.clone();

        match &event.event_type {
            TimerEventType::Tick { phase, .. } => {
                self.session.record_tick(*phase);
            }
            TimerEventType::Started => {
                self.session.begin();
                self.status_message = match self.snapshot.phase {
                    Phase::Focus => "Focusing...".to_string(),
                    Phase::Break => "Enjoy your break".to_string(),
                };
            }
            TimerEventType::Paused => {
                self.status_message = "Timer paused".to_string();
            }
            TimerEventType::Reset => {
                self.status_message = format!("{} timer reset", self.snapshot.phase);
            }
            TimerEventType::IntervalElapsed { completed, next } => {
                self.session.record(&TimerNotification::IntervalElapsed {
                    completed: *completed,
                    next: *next,
                });
                self.bell_pending = self.audio_alerts;
                self.status_message = match completed {
                    Phase::Focus => format!(
                        "🔔 Focus complete! Take a {} break",
                        format_minutes(self.snapshot.break_duration)
                    ),
                    Phase::Break => "🔔 Break over. Press [Space] to focus again".to_string(),
                };
            }
            TimerEventType::Skipped {
                from,
                to,
                remaining_seconds,
            } => {
                self.session.record(&TimerNotification::Skipped {
                    from: *from,
                    to: *to,
                    remaining_seconds: *remaining_seconds,
                });
                self.status_message = format!("{} skipped", from);
            }
            TimerEventType::Completed { .. } => {
                self.status_message = "Session marked complete".to_string();
            }
            TimerEventType::PresetSelected { .. } => {}
            TimerEventType::PresetRejected { reason, .. } => {
                self.status_message = reason.clone();
            }
        }
    }

    pub fn close(&mut self, end: SessionEnd) {
        let status = self.session.finish(end);
        tracing::info!(session = %self.session.id, status = status.as_str(), "Session closed");
        self.should_quit = true;
    }
}
