//! Interval alerts: terminal bell and desktop notifications.

use std::io::{self, Write};

use studytimer_core::models::{NotificationConfig, Phase, TimerNotification, TimerObserver};

/// Raises a desktop notification for a finished interval. Attached to the
/// session timer as its observer, so it fires for natural transitions only.
#[derive(Debug, Clone, Copy)]
pub struct Alerts {
    desktop: bool,
}

impl Alerts {
    pub fn from_config(config: &NotificationConfig) -> Self {
        Self {
            desktop: config.desktop_notifications,
        }
    }

    fn interval_elapsed(&self, completed: Phase) {
        tracing::debug!(%completed, desktop = self.desktop, "Interval alert");

        if self.desktop {
            let (title, body) = match completed {
                Phase::Focus => ("🍅 Focus Complete!", "Time for a short break."),
                Phase::Break => ("☕ Break Over", "Ready to focus again?"),
            };
            send_os_notification(title, body);
        }
    }
}

impl TimerObserver for Alerts {
    fn notify(&mut self, notification: &TimerNotification) {
        if let TimerNotification::IntervalElapsed { completed, .. } = notification {
            self.interval_elapsed(*completed);
        }
    }
}

/// Ring the terminal bell. Called from the draw loop, between frames.
pub fn ring_bell(out: &mut impl Write) -> io::Result<()> {
    out.write_all(b"\x07")?;
    out.flush()
}

fn send_os_notification(title: &str, body: &str) {
    let mut notification = notify_rust::Notification::new();
    notification
        .summary(title)
        .body(body)
        .icon("alarm-clock")
        .timeout(notify_rust::Timeout::Milliseconds(8000));

    #[cfg(all(unix, not(target_os = "macos")))]
    notification.urgency(notify_rust::Urgency::Critical);

    if let Err(e) = notification.show() {
        tracing::error!("Failed to send notification: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_bell_writes_bel() {
        let mut out = Vec::new();
        ring_bell(&mut out).unwrap();
        assert_eq!(out, b"\x07");
    }
}
