pub mod config;
pub mod session;
pub mod timer;

pub use config::{Config, NotificationConfig, Preset, TimerConfig};
pub use session::{SessionEnd, SessionStatus, StudySession};
pub use timer::{
    NoopObserver, Phase, SessionTimer, TimerError, TimerNotification, TimerObserver,
    TimerSnapshot,
};
