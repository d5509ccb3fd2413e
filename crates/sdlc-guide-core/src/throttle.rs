use std::time::{Duration, Instant};

/// Rate limiter for scroll and resize refreshes.
///
/// A hit inside the interval is remembered as pending and delivered by
/// [`ScrollThrottle::flush`] once the interval has elapsed, so the final
/// resting position of a scroll is always measured.
#[derive(Debug, Clone)]
pub struct ScrollThrottle {
    interval: Duration,
    last_run: Option<Instant>,
    pending: bool,
}

impl ScrollThrottle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_run: None,
            pending: false,
        }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    fn due(&self, now: Instant) -> bool {
        match self.last_run {
            Some(last) => now.duration_since(last) >= self.interval,
            None => true,
        }
    }

    /// Record an event. Returns true if the caller should refresh now.
    pub fn hit(&mut self, now: Instant) -> bool {
        if self.interval.is_zero() || self.due(now) {
            self.last_run = Some(now);
            self.pending = false;
            return true;
        }
        self.pending = true;
        false
    }

    /// Returns true if a suppressed event is waiting and may now run.
    pub fn flush(&mut self, now: Instant) -> bool {
        if !self.pending || !self.due(now) {
            return false;
        }
        self.last_run = Some(now);
        self.pending = false;
        true
    }
}
