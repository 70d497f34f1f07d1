// src/client/clock.rs
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Monotonic time elapsed since the clock's origin.
pub trait Clock: Send + Sync {
    fn now(&self) -> Duration;
}

/// Wall-clock time, backed by tokio so paused test runtimes still advance it.
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    millis: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.millis.fetch_add(by.as_millis() as u64, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_millis(self.millis.load(Ordering::SeqCst))
    }
}

struct Timer<E> {
    due: Duration,
    seq: u64,
    event: E,
}

/// Pending timed transitions, fired in due order (ties in scheduling order).
/// Timers cannot be cancelled once scheduled.
pub struct Scheduler<E> {
    pending: Vec<Timer<E>>,
    next_seq: u64,
}

impl<E> Scheduler<E> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            next_seq: 0,
        }
    }

    pub fn schedule_at(&mut self, due: Duration, event: E) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Timer { due, seq, event });
    }

    /// Removes and returns the earliest timer that is due at `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<(Duration, E)> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due <= now)
            .min_by_key(|(_, timer)| (timer.due, timer.seq))
            .map(|(index, _)| index)?;

        let timer = self.pending.swap_remove(index);
        Some((timer.due, timer.event))
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.pending.iter().map(|timer| timer.due).min()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_is_shared_between_clones() {
        let clock = ManualClock::new();
        let other = clock.clone();

        clock.advance(Duration::from_millis(250));
        assert_eq!(other.now(), Duration::from_millis(250));
    }

    #[test]
    fn test_scheduler_fires_in_due_order() {
        let mut timers = Scheduler::new();
        timers.schedule_at(Duration::from_millis(1000), "navigate");
        timers.schedule_at(Duration::from_millis(320), "toast");
        timers.schedule_at(Duration::from_millis(320), "toast-again");

        assert!(timers.pop_due(Duration::from_millis(100)).is_none());
        assert_eq!(timers.next_due(), Some(Duration::from_millis(320)));

        let now = Duration::from_millis(2000);
        assert_eq!(timers.pop_due(now).map(|(_, e)| e), Some("toast"));
        assert_eq!(timers.pop_due(now).map(|(_, e)| e), Some("toast-again"));
        assert_eq!(timers.pop_due(now), Some((Duration::from_millis(1000), "navigate")));
        assert!(timers.is_empty());
    }
}
