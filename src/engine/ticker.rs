//! Fixed-interval wake-ups for the scheduler.
//!
//! The session owns at most one [`TickHandle`]; starting playback replaces
//! it, stopping drops it. Whoever drives the session (the TUI loop, a test)
//! asks the handle whether a tick is due.

use std::time::{Duration, Instant};

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(20);

#[derive(Debug, Clone)]
pub struct TickHandle {
    interval: Duration,
    next_due: Instant,
}

impl TickHandle {
    /// First tick is due immediately.
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            next_due: now,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_due
    }

    /// Consume a due tick. Missed ticks are not replayed.
    pub fn fire(&mut self, now: Instant) -> bool {
        if !self.is_due(now) {
            return false;
        }
        self.next_due += self.interval;
        if self.next_due <= now {
            self.next_due = now + self.interval;
        }
        true
    }

    /// Time left until the next tick.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }
}
