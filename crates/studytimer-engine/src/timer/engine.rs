use std::sync::mpsc as std_mpsc;

use studytimer_core::models::{SessionTimer, TimerError, TimerNotification, TimerSnapshot};
use tokio::sync::{broadcast, mpsc, oneshot};

use super::events::{TimerEvent, TimerEventType};
use super::ticker::TickSource;

const COMMAND_CAPACITY: usize = 32;
const EVENT_CAPACITY: usize = 256;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Timer engine is not running")]
    Closed,

    #[error("Timer error: {0}")]
    Timer(#[from] TimerError),
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Clone, Copy)]
enum CommandKind {
    Start,
    Pause,
    Toggle,
    Reset,
    Skip,
    Complete,
    SelectPreset(u64),
    Snapshot,
    Shutdown,
}

struct Command {
    kind: CommandKind,
    reply: oneshot::Sender<Result<TimerSnapshot>>,
}

/// Owns a [`SessionTimer`] and applies ticks and commands to it one at a
/// time from a single task.
pub struct TimerEngine<T> {
    timer: SessionTimer,
    ticker: T,
    commands: mpsc::Receiver<Command>,
    event_tx: broadcast::Sender<TimerEvent>,
    notifications: std_mpsc::Receiver<TimerNotification>,
}

impl<T: TickSource + 'static> TimerEngine<T> {
    /// Spawn the engine on the current tokio runtime.
    ///
    /// Any observer already attached to `timer` keeps receiving
    /// notifications. The loop ends when every handle is dropped or
    /// [`EngineHandle::shutdown`] is called.
    pub fn spawn(mut timer: SessionTimer, ticker: T) -> EngineHandle {
        let (event_tx, _) = broadcast::channel(EVENT_CAPACITY);
        let (command_tx, commands) = mpsc::channel(COMMAND_CAPACITY);
        let (notify_tx, notifications) = std_mpsc::channel();

        let mut inner = timer.take_observer();
        timer.set_observer(move |notification: &TimerNotification| {
            inner.notify(notification);
            let _ = notify_tx.send(*notification);
        });

        let engine = Self {
            timer,
            ticker,
            commands,
            event_tx: event_tx.clone(),
            notifications,
        };
        tokio::spawn(engine.run());

        EngineHandle {
            commands: command_tx,
            event_tx,
        }
    }

    async fn run(mut self) {
        tracing::debug!(timer = ?self.timer, "Timer engine started");

        loop {
            tokio::select! {
                biased;

                _ = self.ticker.next_tick(), if self.timer.is_running() => {
                    self.handle_tick();
                }
                command = self.commands.recv() => match command {
                    Some(Command { kind: CommandKind::Shutdown, reply }) => {
                        let _ = reply.send(Ok(self.timer.snapshot()));
                        break;
                    }
                    Some(command) => self.handle_command(command),
                    None => break,
                },
            }
        }

        tracing::debug!("Timer engine stopped");
    }

    fn handle_tick(&mut self) {
        let phase = self.timer.phase();
        let elapsed = self.timer.tick();
        let remaining = if elapsed {
            0
        } else {
            self.timer.remaining_seconds()
        };

        let event = TimerEvent::tick(phase, remaining, self.timer.snapshot());
        let _ = self.event_tx.send(event);
        self.flush_notifications();
    }

    fn handle_command(&mut self, command: Command) {
        let Command { kind, reply } = command;

        let result = match kind {
            CommandKind::Start => {
                self.start();
                Ok(())
            }
            CommandKind::Pause => {
                self.pause();
                Ok(())
            }
            CommandKind::Toggle => {
                if self.timer.is_running() {
                    self.pause();
                } else {
                    self.start();
                }
                Ok(())
            }
            CommandKind::Reset => {
                self.timer.reset();
                tracing::info!(phase = %self.timer.phase(), "Timer reset");
                self.emit(TimerEventType::Reset);
                Ok(())
            }
            CommandKind::Skip => {
                self.timer.skip();
                tracing::info!(phase = %self.timer.phase(), "Phase skipped");
                Ok(())
            }
            CommandKind::Complete => {
                self.timer.complete();
                tracing::info!("Session marked complete");
                Ok(())
            }
            CommandKind::SelectPreset(seconds) => self.select_preset(seconds),
            CommandKind::Snapshot | CommandKind::Shutdown => Ok(()),
        };

        self.flush_notifications();
        let _ = reply.send(result.map(|()| self.timer.snapshot()));
    }

    fn start(&mut self) {
        if self.timer.is_running() {
            return;
        }
        self.timer.start();
        self.ticker.reset();
        tracing::info!(
            phase = %self.timer.phase(),
            remaining = self.timer.remaining_seconds(),
            "Timer started"
        );
        self.emit(TimerEventType::Started);
    }

    fn pause(&mut self) {
        if !self.timer.is_running() {
            return;
        }
        self.timer.pause();
        tracing::info!(remaining = self.timer.remaining_seconds(), "Timer paused");
        self.emit(TimerEventType::Paused);
    }

    fn select_preset(&mut self, seconds: u64) -> Result<()> {
        match self.timer.select_preset(seconds) {
            Ok(()) => {
                tracing::info!(focus_duration = seconds, "Focus preset selected");
                self.emit(TimerEventType::PresetSelected {
                    focus_duration: seconds,
                });
                Ok(())
            }
            Err(e) => {
                tracing::warn!(focus_duration = seconds, "Preset rejected: {}", e);
                self.emit(TimerEventType::PresetRejected {
                    focus_duration: seconds,
                    reason: e.to_string(),
                });
                Err(e.into())
            }
        }
    }

    fn flush_notifications(&mut self) {
        while let Ok(notification) = self.notifications.try_recv() {
            if let TimerNotification::IntervalElapsed { completed, next } = notification {
                tracing::info!(%completed, %next, "Interval elapsed");
            }
            self.emit(notification.into());
        }
    }

    fn emit(&self, event_type: TimerEventType) {
        let _ = self
            .event_tx
            .send(TimerEvent::new(event_type, self.timer.snapshot()));
    }
}

/// Cloneable handle to a running [`TimerEngine`].
#[derive(Clone)]
pub struct EngineHandle {
    commands: mpsc::Sender<Command>,
    event_tx: broadcast::Sender<TimerEvent>,
}

impl EngineHandle {
    /// Subscribe to timer events
    pub fn subscribe(&self) -> broadcast::Receiver<TimerEvent> {
        self.event_tx.subscribe()
    }

    pub async fn start(&self) -> Result<TimerSnapshot> {
        self.request(CommandKind::Start).await
    }

    pub async fn pause(&self) -> Result<TimerSnapshot> {
        self.request(CommandKind::Pause).await
    }

    pub async fn toggle(&self) -> Result<TimerSnapshot> {
        self.request(CommandKind::Toggle).await
    }

    pub async fn reset(&self) -> Result<TimerSnapshot> {
        self.request(CommandKind::Reset).await
    }

    pub async fn skip(&self) -> Result<TimerSnapshot> {
        self.request(CommandKind::Skip).await
    }

    pub async fn complete(&self) -> Result<TimerSnapshot> {
        self.request(CommandKind::Complete).await
    }

    /// Change the focus length; refused while the timer is running.
    pub async fn select_preset(&self, focus_duration: u64) -> Result<TimerSnapshot> {
        self.request(CommandKind::SelectPreset(focus_duration)).await
    }

    pub async fn snapshot(&self) -> Result<TimerSnapshot> {
        self.request(CommandKind::Snapshot).await
    }

    /// Stop the engine loop and return the final state.
    pub async fn shutdown(&self) -> Result<TimerSnapshot> {
        self.request(CommandKind::Shutdown).await
    }

    async fn request(&self, kind: CommandKind) -> Result<TimerSnapshot> {
        let (reply, rx) = oneshot::channel();
        self.commands
            .send(Command { kind, reply })
            .await
            .map_err(|_| EngineError::Closed)?;
        rx.await.map_err(|_| EngineError::Closed)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::ticker::ManualTicker;
    use studytimer_core::models::{Phase, TimerConfig};

    fn spawn_manual(focus: u64, brk: u64) -> (EngineHandle, crate::timer::TickTrigger) {
        let (ticker, trigger) = ManualTicker::new();
        let timer = SessionTimer::new(TimerConfig::new(focus, brk).unwrap()).unwrap();
        (TimerEngine::spawn(timer, ticker), trigger)
    }

    #[tokio::test]
    async fn test_engine_initial_snapshot() {
        let (engine, _trigger) = spawn_manual(1500, 300);

        let snapshot = engine.snapshot().await.unwrap();
        assert_eq!(snapshot.phase, Phase::Focus);
        assert_eq!(snapshot.remaining_seconds, 1500);
        assert!(!snapshot.running);
    }

    #[tokio::test]
    async fn test_start_pause_events() {
        let (engine, _trigger) = spawn_manual(1500, 300);
        let mut rx = engine.subscribe();

        assert!(engine.start().await.unwrap().running);
        assert!(engine.start().await.unwrap().running);
        assert!(!engine.pause().await.unwrap().running);
        assert!(!engine.pause().await.unwrap().running);

        assert_eq!(rx.recv().await.unwrap().event_type, TimerEventType::Started);
        assert_eq!(rx.recv().await.unwrap().event_type, TimerEventType::Paused);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_toggle() {
        let (engine, _trigger) = spawn_manual(1500, 300);

        assert!(engine.toggle().await.unwrap().running);
        assert!(!engine.toggle().await.unwrap().running);
    }

    #[tokio::test]
    async fn test_select_preset_rejected_while_running() {
        let (engine, trigger) = spawn_manual(1500, 300);
        let mut rx = engine.subscribe();

        engine.start().await.unwrap();
        trigger.tick();
        let before = engine.snapshot().await.unwrap();

        let result = engine.select_preset(2700).await;
        assert!(matches!(
            result,
            Err(EngineError::Timer(TimerError::InvalidOperation(_)))
        ));
        assert_eq!(engine.snapshot().await.unwrap(), before);

        let mut saw_rejection = false;
        while let Ok(event) = rx.try_recv() {
            if let TimerEventType::PresetRejected { focus_duration, .. } = event.event_type {
                assert_eq!(focus_duration, 2700);
                saw_rejection = true;
            }
        }
        assert!(saw_rejection);
    }

    #[tokio::test]
    async fn test_select_preset_while_stopped() {
        let (engine, _trigger) = spawn_manual(1500, 300);

        let snapshot = engine.select_preset(2700).await.unwrap();
        assert_eq!(snapshot.total_duration_seconds, 2700);
        assert_eq!(snapshot.remaining_seconds, 2700);
        assert_eq!(snapshot.focus_duration, 2700);
    }

    #[tokio::test]
    async fn test_existing_observer_still_notified() {
        use std::sync::{Arc, Mutex};

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let timer = SessionTimer::default().with_observer(move |n: &TimerNotification| {
            sink.lock().unwrap().push(*n);
        });
        let (ticker, _trigger) = ManualTicker::new();
        let engine = TimerEngine::spawn(timer, ticker);

        engine.skip().await.unwrap();
        engine.complete().await.unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert!(matches!(seen[0], TimerNotification::Skipped { .. }));
        assert!(matches!(seen[1], TimerNotification::Completed { .. }));
    }

    #[tokio::test]
    async fn test_shutdown_closes_engine() {
        let (engine, _trigger) = spawn_manual(1500, 300);

        let last = engine.shutdown().await.unwrap();
        assert_eq!(last.remaining_seconds, 1500);

        assert!(matches!(engine.snapshot().await, Err(EngineError::Closed)));
    }
}
