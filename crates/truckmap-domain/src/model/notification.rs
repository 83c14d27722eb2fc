//! Single-slot transient status message

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: Level,
    shown_at: Instant,
}

/// Shows at most one message. A new message replaces the current one and restarts the timer.
#[derive(Debug, Clone)]
pub struct Notifier {
    duration: Duration,
    current: Option<Notification>,
}

impl Notifier {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            current: None,
        }
    }

    pub fn show(&mut self, message: impl Into<String>, level: Level, now: Instant) {
        self.current = Some(Notification {
            message: message.into(),
            level,
            shown_at: now,
        });
    }

    /// The visible message at `now`, dropping it once expired
    pub fn current(&mut self, now: Instant) -> Option<&Notification> {
        if let Some(n) = &self.current {
            if now.saturating_duration_since(n.shown_at) >= self.duration {
                self.current = None;
            }
        }
        self.current.as_ref()
    }

    /// Time until the visible message disappears
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.current
            .as_ref()
            .map(|n| self.duration.saturating_sub(now.saturating_duration_since(n.shown_at)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_expires() {
        let start = Instant::now();
        let mut notifier = Notifier::new(Duration::from_millis(3000));
        notifier.show("Saved", Level::Success, start);

        assert!(notifier.current(start + Duration::from_millis(2999)).is_some());
        assert!(notifier.current(start + Duration::from_millis(3000)).is_none());
    }

    #[test]
    fn test_new_message_replaces_and_restarts_timer() {
        let start = Instant::now();
        let mut notifier = Notifier::new(Duration::from_millis(3000));
        notifier.show("first", Level::Info, start);
        notifier.show("second", Level::Warning, start + Duration::from_millis(2000));

        let shown = notifier.current(start + Duration::from_millis(4000)).unwrap();
        assert_eq!(shown.message, "second");
        assert_eq!(shown.level, Level::Warning);
        assert_eq!(
            notifier.remaining(start + Duration::from_millis(4000)),
            Some(Duration::from_millis(1000))
        );
    }
}
