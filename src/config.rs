//! Enhancer configuration with sensible defaults.
//!
//! [`EnhancerConfig`] controls which sources are queried, per-request
//! timeouts, per-source rate limiting, caching, and the confidence policy.
//! The defaults are tuned for polite scraping of public sites.

use std::collections::HashMap;
use std::time::Duration;

use crate::error::EnhanceError;
use crate::types::DataSource;

/// How source coverage is weighted when computing the confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfidencePolicy {
    /// Every source counts equally.
    #[default]
    Uniform,
    /// Sources count by [`DataSource::reliability`]; unknown (custom)
    /// adapters count as 1.0.
    Weighted,
}

/// Configuration for yacht data enhancement.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone)]
pub struct EnhancerConfig {
    /// Which built-in sources to query. List order is priority order:
    /// earlier sources win merge tie-breaks when success counts are equal.
    pub sources: Vec<DataSource>,
    /// Per-source HTTP request timeout in seconds.
    pub timeout_seconds: u64,
    /// Maximum number of cached records before eviction.
    pub cache_capacity: u64,
    /// Per-source rate-limit overrides in seconds. Sources not listed use
    /// their [`DataSource::rate_limit`] default.
    pub rate_limit_overrides: HashMap<DataSource, f64>,
    /// How source coverage is weighted in the confidence score.
    pub confidence_policy: ConfidencePolicy,
    /// Custom User-Agent string. If `None`, rotates through a built-in list
    /// of realistic browser User-Agents.
    pub user_agent: Option<String>,
}

impl Default for EnhancerConfig {
    fn default() -> Self {
        Self {
            sources: DataSource::all().to_vec(),
            timeout_seconds: 10,
            cache_capacity: 512,
            rate_limit_overrides: HashMap::new(),
            confidence_policy: ConfidencePolicy::Uniform,
            user_agent: None,
        }
    }
}

impl EnhancerConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `timeout_seconds` must be greater than 0
    /// - `cache_capacity` must be greater than 0
    /// - rate-limit overrides must be finite and non-negative
    pub fn validate(&self) -> Result<(), EnhanceError> {
        if self.timeout_seconds == 0 {
            return Err(EnhanceError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.cache_capacity == 0 {
            return Err(EnhanceError::Config(
                "cache_capacity must be greater than 0".into(),
            ));
        }
        for (source, secs) in &self.rate_limit_overrides {
            if !secs.is_finite() || *secs < 0.0 {
                return Err(EnhanceError::Config(format!(
                    "rate limit for {source} must be finite and non-negative"
                )));
            }
        }
        Ok(())
    }

    /// Effective rate-limit interval for a built-in source: the override
    /// when one is configured, the source default otherwise.
    pub fn rate_limit_for(&self, source: DataSource) -> Duration {
        self.rate_limit_overrides
            .get(&source)
            .map(|secs| Duration::from_secs_f64(*secs))
            .unwrap_or_else(|| source.rate_limit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sensible_values() {
        let config = EnhancerConfig::default();
        assert_eq!(config.timeout_seconds, 10);
        assert_eq!(config.cache_capacity, 512);
        assert!(config.rate_limit_overrides.is_empty());
        assert_eq!(config.confidence_policy, ConfidencePolicy::Uniform);
        assert!(config.user_agent.is_none());
    }

    #[test]
    fn default_sources_include_all_four() {
        let config = EnhancerConfig::default();
        assert_eq!(config.sources.len(), 4);
        assert!(config.sources.contains(&DataSource::MarineTraffic));
        assert!(config.sources.contains(&DataSource::VesselFinder));
        assert!(config.sources.contains(&DataSource::SuperYachtTimes));
        assert!(config.sources.contains(&DataSource::BoatInternational));
    }

    #[test]
    fn valid_config_passes_validation() {
        let config = EnhancerConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = EnhancerConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_seconds"));
    }

    #[test]
    fn zero_cache_capacity_rejected() {
        let config = EnhancerConfig {
            cache_capacity: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("cache_capacity"));
    }

    #[test]
    fn negative_rate_limit_rejected() {
        let mut overrides = HashMap::new();
        overrides.insert(DataSource::MarineTraffic, -1.0);
        let config = EnhancerConfig {
            rate_limit_overrides: overrides,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("rate limit"));
    }

    #[test]
    fn non_finite_rate_limit_rejected() {
        let mut overrides = HashMap::new();
        overrides.insert(DataSource::VesselFinder, f64::NAN);
        let config = EnhancerConfig {
            rate_limit_overrides: overrides,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rate_limit_override_applies() {
        let mut overrides = HashMap::new();
        overrides.insert(DataSource::MarineTraffic, 0.5);
        let config = EnhancerConfig {
            rate_limit_overrides: overrides,
            ..Default::default()
        };
        assert_eq!(
            config.rate_limit_for(DataSource::MarineTraffic),
            Duration::from_millis(500)
        );
        // Sources without an override keep their default.
        assert_eq!(
            config.rate_limit_for(DataSource::VesselFinder),
            DataSource::VesselFinder.rate_limit()
        );
    }

    #[test]
    fn zero_rate_limit_override_valid() {
        let mut overrides = HashMap::new();
        overrides.insert(DataSource::SuperYachtTimes, 0.0);
        let config = EnhancerConfig {
            rate_limit_overrides: overrides,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(
            config.rate_limit_for(DataSource::SuperYachtTimes),
            Duration::ZERO
        );
    }

    #[test]
    fn custom_user_agent() {
        let config = EnhancerConfig {
            user_agent: Some("SeaLogBot/1.0".into()),
            ..Default::default()
        };
        assert_eq!(config.user_agent.as_deref(), Some("SeaLogBot/1.0"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn confidence_policy_defaults_to_uniform() {
        assert_eq!(ConfidencePolicy::default(), ConfidencePolicy::Uniform);
    }
}
