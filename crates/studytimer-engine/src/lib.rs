//! StudyTimer engine
//!
//! Runs one [`studytimer_core::models::SessionTimer`] inside a tokio task,
//! feeding it ticks from an injected [`TickSource`] and broadcasting
//! [`TimerEvent`]s to whoever is watching.

pub mod timer;

pub use timer::{
    EngineError, EngineHandle, IntervalTicker, ManualTicker, TickSource, TickTrigger,
    TimerEngine, TimerEvent, TimerEventType,
};
