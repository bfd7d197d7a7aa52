pub mod engine;
pub mod events;
pub mod ticker;


pub use engine::{EngineError, EngineHandle, TimerEngine};
pub use events::{TimerEvent, TimerEventType};
pub use ticker::{IntervalTicker, ManualTicker, TickSource, TickTrigger};
