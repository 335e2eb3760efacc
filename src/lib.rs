//! # yacht-enhance
//!
//! Multi-source yacht specification aggregation for host applications.
//!
//! This crate looks up a yacht by name across several public data sources,
//! merges the partial records into one best-guess record, and scores how
//! trustworthy that record is. It compiles into the host as a library
//! dependency — no API keys, no external services, no user setup required.
//!
//! ## Design
//!
//! - Queries MarineTraffic, VesselFinder, SuperYacht Times, and BOAT
//!   International concurrently and merges per-field
//! - Conflicts resolve toward the source with the best track record,
//!   then adapter priority order; disagreement lowers the confidence score
//! - Per-source rate limiting: consecutive requests to one source are
//!   never closer together than its configured interval
//! - In-memory record cache — a repeated lookup never touches the network
//! - Graceful degradation: a failing source costs confidence, not the lookup
//!
//! ## Security
//!
//! - No API keys or secrets to leak
//! - No network listeners — this is a library, not a server
//! - Yacht names are logged only at trace level
//! - Custom sources plug in via the [`SourceAdapter`] trait

pub mod adapter;
pub mod adapters;
pub mod cache;
pub mod config;
pub mod enhancer;
pub mod error;
pub mod http;
pub mod name_normalize;
pub mod rate_gate;
pub mod stats;
pub mod types;

pub use adapter::SourceAdapter;
pub use config::{ConfidencePolicy, EnhancerConfig};
pub use enhancer::YachtEnhancer;
pub use error::{EnhanceError, Result};
pub use types::{DataSource, YachtData};

/// Look up one yacht with a one-shot enhancer.
///
/// Builds a [`YachtEnhancer`] from `config`, queries every configured
/// source, and returns the merged record. Hosts that look up more than a
/// handful of yachts should hold a [`YachtEnhancer`] instead, so the
/// record cache survives between calls.
///
/// # Errors
///
/// Returns [`EnhanceError::Config`] for an invalid configuration and
/// [`EnhanceError::InvalidName`] for an empty name. Source failures never
/// surface; the worst outcome is a record with confidence 0.0.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> yacht_enhance::Result<()> {
/// let config = yacht_enhance::EnhancerConfig::default();
/// let record = yacht_enhance::enhance_yacht_data("Eclipse", &config).await?;
/// println!("{}: {:?} m, built {:?}", record.name, record.length, record.year_built);
/// println!("confidence {:.2} from {:?}", record.confidence_score, record.sources);
/// # Ok(())
/// # }
/// ```
pub async fn enhance_yacht_data(name: &str, config: &EnhancerConfig) -> Result<YachtData> {
    YachtEnhancer::new(config.clone())?.enhance(name).await
}

/// Look up many yachts, in order, with a one-shot enhancer.
///
/// The cache is shared across the batch, so duplicate names cost one
/// lookup. After each item completes, `progress` (when supplied) receives
/// the 1-based position, the batch size, and the yacht name. A failing
/// item yields a record with only its name and confidence 0.0; the batch
/// itself never aborts.
///
/// # Errors
///
/// Returns [`EnhanceError::Config`] for an invalid configuration.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> yacht_enhance::Result<()> {
/// let config = yacht_enhance::EnhancerConfig::default();
/// let names = vec!["Eclipse".to_string(), "Azzam".to_string()];
/// let mut on_progress = |current: usize, total: usize, name: &str| {
///     println!("[{current}/{total}] {name}");
/// };
/// let records =
///     yacht_enhance::enhance_yacht_data_batch(&names, &config, Some(&mut on_progress)).await?;
/// assert_eq!(records.len(), 2);
/// # Ok(())
/// # }
/// ```
pub async fn enhance_yacht_data_batch(
    names: &[String],
    config: &EnhancerConfig,
    progress: Option<&mut (dyn FnMut(usize, usize, &str) + Send)>,
) -> Result<Vec<YachtData>> {
    let enhancer = YachtEnhancer::new(config.clone())?;
    Ok(enhancer.enhance_batch(names, progress).await)
}
