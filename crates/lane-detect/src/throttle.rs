use std::time::{Duration, Instant};

/// Rate limit for direction label updates.
///
/// Starts with no previous update, so the first label always goes out.
#[derive(Debug, Clone)]
pub struct LabelThrottle {
    interval: Duration,
    last_update: Option<Instant>,
}

impl LabelThrottle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_update: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn last_update(&self) -> Option<Instant> {
        self.last_update
    }

    /// True once at least `interval` has passed since the last recorded update.
    pub fn is_due(&self, now: Instant) -> bool {
        match self.last_update {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        }
    }

    /// Marks a label as dispatched at `now`.
    pub fn record(&mut self, now: Instant) {
        self.last_update = Some(now);
    }
}
