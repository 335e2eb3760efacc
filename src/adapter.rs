//! Trait definition for pluggable data source adapters.
//!
//! Each data source (MarineTraffic, VesselFinder, SuperYacht Times,
//! BOAT International) implements [`SourceAdapter`] to provide a uniform
//! interface for querying and parsing partial yacht records. Hosts can
//! implement the trait themselves and register additional sources with
//! the enhancer.

use std::time::Duration;

use async_trait::async_trait;

use crate::config::EnhancerConfig;
use crate::error::EnhanceError;
use crate::types::YachtData;

/// A pluggable yacht data source.
///
/// Implementors query a specific external source and extract a partial
/// [`YachtData`] record. Each adapter handles its own:
///
/// - URL construction with query encoding
/// - HTTP request with appropriate headers
/// - Response parsing (HTML via CSS selectors, or JSON)
/// - Placeholder rejection, so `None` stays a true "unknown" marker
///
/// All implementations must be `Send + Sync` for concurrent source queries.
/// The enhancer enforces [`SourceAdapter::rate_limit`] spacing before every
/// call, so implementations should not sleep themselves.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Human-readable source name, recorded in [`YachtData::sources`].
    fn name(&self) -> &str;

    /// Base URL of the external source.
    fn base_url(&self) -> &str;

    /// Minimum spacing between consecutive requests to this source.
    fn rate_limit(&self) -> Duration;

    /// Look up a yacht by name and return whatever fields this source knows.
    ///
    /// A yacht that is simply not listed is `Ok` with an empty partial
    /// record, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`EnhanceError`] if the HTTP request fails or the response
    /// cannot be parsed. The enhancer swallows these errors; a failing
    /// source never aborts the overall lookup.
    async fn search(
        &self,
        yacht_name: &str,
        config: &EnhancerConfig,
    ) -> Result<YachtData, EnhanceError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    /// A mock adapter for testing trait bounds and async execution.
    struct MockAdapter {
        name: &'static str,
        partial: Option<YachtData>,
    }

    #[async_trait]
    impl SourceAdapter for MockAdapter {
        fn name(&self) -> &str {
            self.name
        }

        fn base_url(&self) -> &str {
            "https://example.com"
        }

        fn rate_limit(&self) -> Duration {
            Duration::from_millis(10)
        }

        async fn search(
            &self,
            _yacht_name: &str,
            _config: &EnhancerConfig,
        ) -> Result<YachtData, EnhanceError> {
            self.partial
                .clone()
                .ok_or_else(|| EnhanceError::Http("mock adapter failure".into()))
        }
    }

    #[test]
    fn mock_adapter_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MockAdapter>();
    }

    #[test]
    fn trait_object_is_constructible() {
        let adapter: Arc<dyn SourceAdapter> = Arc::new(MockAdapter {
            name: "Mock",
            partial: None,
        });
        assert_eq!(adapter.name(), "Mock");
        assert_eq!(adapter.rate_limit(), Duration::from_millis(10));
    }

    #[tokio::test]
    async fn mock_adapter_returns_partial() {
        let mut partial = YachtData::empty("Eclipse");
        partial.length = Some(162.5);
        let adapter = MockAdapter {
            name: "Mock",
            partial: Some(partial),
        };
        let config = EnhancerConfig::default();

        let result = adapter.search("Eclipse", &config).await;
        let record = result.expect("should succeed");
        assert_eq!(record.length, Some(162.5));
    }

    #[tokio::test]
    async fn mock_adapter_propagates_errors() {
        let adapter = MockAdapter {
            name: "Mock",
            partial: None,
        };
        let config = EnhancerConfig::default();

        let result = adapter.search("Eclipse", &config).await;
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("mock adapter failure"));
    }
}
