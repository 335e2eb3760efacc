//! Per-source contribution tracking.
//!
//! Counts how often each data source has successfully contributed fields
//! and how often it has failed. The success count is the merge tie-break:
//! when sources disagree on a field, the one with the longer track record
//! wins. The full report is exposed to hosts for health introspection.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Instant;

/// Health counters for a single data source.
#[derive(Debug, Clone, Default)]
pub struct SourceHealth {
    /// Lookups where this source contributed at least one field.
    pub successes: u64,
    /// Lookups where this source errored out.
    pub failures: u64,
    /// When the last successful contribution happened (if any).
    pub last_success_at: Option<Instant>,
    /// When the last failure happened (if any).
    pub last_failure_at: Option<Instant>,
}

/// Per-source success/failure tracking, shared across every lookup an
/// enhancer runs. Interior mutability so the enhancer can record outcomes
/// from concurrent source queries.
#[derive(Debug, Default)]
pub struct SourceStats {
    sources: Mutex<HashMap<String, SourceHealth>>,
}

impl SourceStats {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that a source contributed fields to a lookup.
    pub fn record_success(&self, source: &str) {
        let mut sources = self.lock_sources();
        let health = sources.entry(source.to_string()).or_default();
        health.successes += 1;
        health.last_success_at = Some(Instant::now());
    }

    /// Record that a source errored out of a lookup.
    pub fn record_failure(&self, source: &str) {
        let mut sources = self.lock_sources();
        let health = sources.entry(source.to_string()).or_default();
        health.failures += 1;
        health.last_failure_at = Some(Instant::now());
    }

    /// Number of successful contributions recorded for a source.
    pub fn successes(&self, source: &str) -> u64 {
        self.lock_sources()
            .get(source)
            .map_or(0, |health| health.successes)
    }

    /// Health counters for every source seen so far.
    pub fn health_report(&self) -> Vec<(String, SourceHealth)> {
        self.lock_sources()
            .iter()
            .map(|(name, health)| (name.clone(), health.clone()))
            .collect()
    }

    /// Forget all recorded outcomes.
    pub fn reset(&self) {
        self.lock_sources().clear();
    }

    fn lock_sources(&self) -> MutexGuard<'_, HashMap<String, SourceHealth>> {
        match self.sources.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
