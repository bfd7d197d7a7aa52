use anyhow::Result;
use studytimer_core::models::{Phase, SessionTimer, TimerConfig};
use studytimer_engine::{IntervalTicker, TimerEngine, TimerEventType};
use tokio::time::{sleep, Duration};

#[tokio::test(start_paused = true)]
async fn test_interval_ticker_counts_down_real_seconds() -> Result<()> {
    let timer = SessionTimer::new(TimerConfig::new(1500, 300)?)?;
    let engine = TimerEngine::spawn(timer, IntervalTicker::every_second());

    sleep(Duration::from_secs(5)).await;
    assert_eq!(engine.snapshot().await?.remaining_seconds, 1500);

    engine.start().await?;
    sleep(Duration::from_millis(3500)).await;
    assert_eq!(engine.snapshot().await?.remaining_seconds, 1497);

    engine.pause().await?;
    sleep(Duration::from_secs(10)).await;
    assert_eq!(engine.snapshot().await?.remaining_seconds, 1497);

    engine.shutdown().await?;
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_interval_ticker_stops_at_phase_boundary() -> Result<()> {
    let timer = SessionTimer::new(TimerConfig::new(3, 2)?)?;
    let engine = TimerEngine::spawn(timer, IntervalTicker::every_second());
    let mut rx = engine.subscribe();

    engine.start().await?;
    sleep(Duration::from_secs(10)).await;

    let snapshot = engine.snapshot().await?;
    assert_eq!(snapshot.phase, Phase::Break);
    assert_eq!(snapshot.remaining_seconds, 2);
    assert!(!snapshot.running);

    let mut elapsed = 0;
    while let Ok(event) = rx.try_recv() {
        if matches!(event.event_type, TimerEventType::IntervalElapsed { .. }) {
            elapsed += 1;
        }
    }
    assert_eq!(elapsed, 1);

    engine.shutdown().await?;
    Ok(())
}
