//! Tick sources
//!
//! The engine never reads the clock itself; it waits on a [`TickSource`].
//! [`IntervalTicker`] is the real one-second clock, [`ManualTicker`] lets a
//! caller push ticks by hand.

use std::future::Future;

use tokio::sync::mpsc;
use tokio::time::{self, Duration, Interval, MissedTickBehavior};

pub trait TickSource: Send {
    /// Wait for the next tick. Must be cancel safe.
    fn next_tick(&mut self) -> impl Future<Output = ()> + Send;

    /// Called whenever the timer starts counting, so the first tick lands a
    /// full period later.
    fn reset(&mut self) {}
}

pub struct IntervalTicker {
    interval: Interval,
}

impl IntervalTicker {
    pub fn new(period: Duration) -> Self {
        let mut interval = time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }

    pub fn every_second() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl TickSource for IntervalTicker {
    async fn next_tick(&mut self) {
        self.interval.tick().await;
    }

    fn reset(&mut self) {
        self.interval.reset();
    }
}

/// Tick source driven by [`TickTrigger`] handles.
pub struct ManualTicker {
    rx: mpsc::UnboundedReceiver<()>,
}

#[derive(Clone)]
pub struct TickTrigger {
    tx: mpsc::UnboundedSender<()>,
}

impl ManualTicker {
    pub fn new() -> (Self, TickTrigger) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { rx }, TickTrigger { tx })
    }
}

impl TickSource for ManualTicker {
    async fn next_tick(&mut self) {
        if self.rx.recv().await.is_none() {
            // every trigger is gone, so no tick will ever arrive
            std::future::pending::<()>().await;
        }
    }

    /// Ticks pushed while the timer was stopped are dropped.
    fn reset(&mut self) {
        while self.rx.try_recv().is_ok() {}
    }
}

impl TickTrigger {
    /// Push one tick. Returns false once the ticker is gone.
    pub fn tick(&self) -> bool {
        self.tx.send(()).is_ok()
    }

    pub fn tick_n(&self, n: u64) -> bool {
        (0..n).all(|_| self.tick())
    }
}
