//! Per-source request spacing.
//!
//! Each data source declares a minimum interval between consecutive
//! requests. [`RateGate`] reserves the next allowed send time under a
//! mutex and suspends the caller until that deadline, so successive
//! lookups — even for different yachts, even concurrent — never hit the
//! same source closer together than its interval.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Tracks the most recently reserved send time per source name.
///
/// Owned by the enhancer; one gate spans every lookup the enhancer runs.
/// The mutex is held only to reserve a slot, never across a sleep, so
/// concurrent lookups serialise their reservations without blocking each
/// other's waits.
#[derive(Debug, Default)]
pub struct RateGate {
    slots: Mutex<HashMap<String, Instant>>,
}

impl RateGate {
    /// Create an empty gate. Every source's first request passes immediately.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until this source may be queried again, then claim the slot.
    ///
    /// The slot is claimed before the caller issues its request, so the
    /// reservation stands whether the request later succeeds or fails.
    pub async fn wait_turn(&self, source: &str, interval: Duration) {
        let deadline = self.reserve(source, interval);
        if deadline > Instant::now() {
            tracing::trace!(source, ?interval, "rate gate waiting");
            tokio::time::sleep_until(deadline.into()).await;
        }
    }

    /// Reserve the next allowed send time for a source and return it.
    ///
    /// The reservation is `max(now, previous + interval)`, so a burst of
    /// callers is spaced exactly `interval` apart.
    pub fn reserve(&self, source: &str, interval: Duration) -> Instant {
        let mut slots = self.lock_slots();
        let now = Instant::now();
        let deadline = match slots.get(source) {
            Some(previous) => (*previous + interval).max(now),
            None => now,
        };
        slots.insert(source.to_string(), deadline);
        deadline
    }

    /// The currently reserved send time for a source, if it has been seen.
    pub fn reserved(&self, source: &str) -> Option<Instant> {
        self.lock_slots().get(source).copied()
    }

    fn lock_slots(&self) -> MutexGuard<'_, HashMap<String, Instant>> {
        match self.slots.lock() {
            Ok(guard) => guard,
            // A panicked reservation leaves the map intact, so the
            // poisoned guard is still usable.
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
