//! The enhancement engine: cache check, concurrent source fan-out, merge.
//!
//! [`YachtEnhancer`] owns the adapter registry, the record cache, the
//! rate gate, and the per-source stats. Everything is instance state —
//! construct one, keep it around for as long as you want cached lookups,
//! drop it and the state goes with it.

use std::sync::Arc;

use futures::future::join_all;

use crate::adapter::SourceAdapter;
use crate::adapters::{
    BoatInternationalAdapter, MarineTrafficAdapter, SuperYachtTimesAdapter, VesselFinderAdapter,
};
use crate::cache::RecordCache;
use crate::config::EnhancerConfig;
use crate::error::EnhanceError;
use crate::rate_gate::RateGate;
use crate::stats::{SourceHealth, SourceStats};
use crate::types::{DataSource, YachtData};

use super::merge::merge_partials;

/// Yacht data enhancement engine.
///
/// Queries every registered source concurrently per lookup, merges the
/// partial records, and caches the result. Source failures degrade the
/// record's confidence instead of failing the lookup; the only surfaced
/// error is an empty yacht name.
pub struct YachtEnhancer {
    config: EnhancerConfig,
    adapters: Vec<Arc<dyn SourceAdapter>>,
    cache: RecordCache,
    gate: RateGate,
    stats: SourceStats,
}

impl YachtEnhancer {
    /// Build an enhancer with the built-in adapters named by
    /// `config.sources`, in that priority order.
    ///
    /// # Errors
    ///
    /// Returns [`EnhanceError::Config`] if the configuration is invalid
    /// or names no sources.
    pub fn new(config: EnhancerConfig) -> Result<Self, EnhanceError> {
        config.validate()?;
        if config.sources.is_empty() {
            return Err(EnhanceError::Config(
                "at least one source must be enabled".into(),
            ));
        }
        let adapters = config
            .sources
            .iter()
            .map(|source| build_adapter(*source, &config))
            .collect();
        Ok(Self::assemble(config, adapters))
    }

    /// Build an enhancer with an explicit adapter registry. This is the
    /// extension point for custom sources: list order is priority order,
    /// and `config.sources` is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`EnhanceError::Config`] if the configuration is invalid
    /// or the registry is empty.
    pub fn with_adapters(
        config: EnhancerConfig,
        adapters: Vec<Arc<dyn SourceAdapter>>,
    ) -> Result<Self, EnhanceError> {
        config.validate()?;
        if adapters.is_empty() {
            return Err(EnhanceError::Config(
                "at least one adapter must be registered".into(),
            ));
        }
        Ok(Self::assemble(config, adapters))
    }

    fn assemble(config: EnhancerConfig, adapters: Vec<Arc<dyn SourceAdapter>>) -> Self {
        let cache = RecordCache::new(config.cache_capacity);
        Self {
            config,
            adapters,
            cache,
            gate: RateGate::new(),
            stats: SourceStats::new(),
        }
    }

    /// Append an adapter to the registry (lowest priority).
    pub fn register(&mut self, adapter: Arc<dyn SourceAdapter>) {
        self.adapters.push(adapter);
    }

    /// Names of the registered sources, in priority order.
    pub fn source_names(&self) -> Vec<&str> {
        self.adapters.iter().map(|a| a.name()).collect()
    }

    /// Success/failure counters for every source seen so far.
    pub fn source_health(&self) -> Vec<(String, SourceHealth)> {
        self.stats.health_report()
    }

    /// Drop every cached record.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Number of cached records.
    pub async fn cached_records(&self) -> u64 {
        self.cache.sync().await;
        self.cache.len()
    }

    /// Look up one yacht.
    ///
    /// Checks the cache first; on a miss, queries every registered source
    /// concurrently (each waiting its rate-gate turn), merges the partial
    /// records, caches and returns the result. Total latency is bounded
    /// by the slowest source, not the sum.
    ///
    /// # Errors
    ///
    /// Returns [`EnhanceError::InvalidName`] for an empty or
    /// whitespace-only name. Source failures never surface — the worst
    /// outcome is a record with confidence 0.0.
    pub async fn enhance(&self, name: &str) -> Result<YachtData, EnhanceError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(EnhanceError::InvalidName(
                "yacht name must not be empty".into(),
            ));
        }

        if let Some(hit) = self.cache.get(trimmed).await {
            tracing::debug!(yacht = trimmed, "cache hit");
            return Ok(hit);
        }

        let lookups = self.adapters.iter().map(|adapter| {
            let gate = &self.gate;
            let config = &self.config;
            async move {
                gate.wait_turn(adapter.name(), adapter.rate_limit()).await;
                let outcome = adapter.search(trimmed, config).await;
                (adapter.name().to_string(), outcome)
            }
        });
        let outcomes = join_all(lookups).await;

        let mut partials: Vec<(String, YachtData)> = Vec::with_capacity(outcomes.len());
        for (source, outcome) in outcomes {
            match outcome {
                Ok(partial) => {
                    tracing::debug!(
                        source = %source,
                        fields = partial.populated_fields(),
                        "source returned partial"
                    );
                    if partial.populated_fields() > 0 {
                        self.stats.record_success(&source);
                    }
                    partials.push((source, partial));
                }
                Err(err) => {
                    tracing::warn!(source = %source, error = %err, "source query failed");
                    self.stats.record_failure(&source);
                    partials.push((source, YachtData::empty(trimmed)));
                }
            }
        }

        let record = merge_partials(trimmed, &partials, &self.stats, &self.config);
        self.cache.insert(trimmed, record.clone()).await;
        Ok(record)
    }

    /// Look up many yachts, in order.
    ///
    /// After each lookup completes, `progress` (when supplied) is invoked
    /// with the 1-based position, the batch size, and the yacht name. A
    /// failing item — an empty name, say — yields a record with only the
    /// name and confidence 0.0 rather than aborting the batch.
    pub async fn enhance_batch(
        &self,
        names: &[String],
        mut progress: Option<&mut (dyn FnMut(usize, usize, &str) + Send)>,
    ) -> Vec<YachtData> {
        let total = names.len();
        let mut records = Vec::with_capacity(total);

        for (index, name) in names.iter().enumerate() {
            let record = match self.enhance(name).await {
                Ok(record) => record,
                Err(err) => {
                    tracing::warn!(yacht = %name, error = %err, "batch item degraded");
                    YachtData::empty(name.trim())
                }
            };
            records.push(record);

            if let Some(callback) = progress.as_deref_mut() {
                callback(index + 1, total, name);
            }
        }

        records
    }
}

impl std::fmt::Debug for YachtEnhancer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YachtEnhancer")
            .field("config", &self.config)
            .field("adapters", &self.adapters.len())
            .field("cache", &self.cache)
            .field("gate", &self.gate)
            .field("stats", &self.stats)
            .finish()
    }
}

fn build_adapter(source: DataSource, config: &EnhancerConfig) -> Arc<dyn SourceAdapter> {
    let interval = config.rate_limit_for(source);
    match source {
        DataSource::MarineTraffic => Arc::new(MarineTrafficAdapter::with_rate_limit(interval)),
        DataSource::VesselFinder => Arc::new(VesselFinderAdapter::with_rate_limit(interval)),
        DataSource::SuperYachtTimes => {
            Arc::new(SuperYachtTimesAdapter::with_rate_limit(interval))
        }
        DataSource::BoatInternational => {
            Arc::new(BoatInternationalAdapter::with_rate_limit(interval))
        }
    }
}
