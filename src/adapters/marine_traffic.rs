//! MarineTraffic adapter — AIS registry data via the asset search endpoint.
//!
//! MarineTraffic's search endpoint answers JSON, so this is the one
//! built-in adapter that parses JSON rather than HTML. AIS-sourced fields
//! (IMO, MMSI, flag, dimensions) are the most authoritative available,
//! which is why this source carries the highest reliability weight.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::adapter::SourceAdapter;
use crate::adapters::{clean_text, parse_year};
use crate::config::EnhancerConfig;
use crate::error::EnhanceError;
use crate::http;
use crate::name_normalize::strip_designation;
use crate::types::{DataSource, YachtData};

/// MarineTraffic asset search adapter.
pub struct MarineTrafficAdapter {
    interval: Duration,
}

impl MarineTrafficAdapter {
    /// Adapter with the source's default rate limit.
    pub fn new() -> Self {
        Self::with_rate_limit(DataSource::MarineTraffic.rate_limit())
    }

    /// Adapter with a custom minimum request spacing.
    pub fn with_rate_limit(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Default for MarineTrafficAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SourceAdapter for MarineTrafficAdapter {
    fn name(&self) -> &str {
        DataSource::MarineTraffic.name()
    }

    fn base_url(&self) -> &str {
        DataSource::MarineTraffic.base_url()
    }

    fn rate_limit(&self) -> Duration {
        self.interval
    }

    async fn search(
        &self,
        yacht_name: &str,
        config: &EnhancerConfig,
    ) -> Result<YachtData, EnhanceError> {
        let query = strip_designation(yacht_name);
        tracing::trace!(query, "MarineTraffic search");

        let client = http::build_client(config)?;
        let url = format!("{}/en/search/searchAsset", self.base_url());

        let response = client
            .get(&url)
            .query(&[("what", "ship"), ("term", query)])
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| EnhanceError::Http(format!("MarineTraffic request failed: {e}")))?
            .error_for_status()
            .map_err(|e| EnhanceError::Http(format!("MarineTraffic HTTP error: {e}")))?;

        let body = response
            .text()
            .await
            .map_err(|e| EnhanceError::Http(format!("MarineTraffic response read failed: {e}")))?;

        tracing::trace!(bytes = body.len(), "MarineTraffic response received");

        parse_marine_traffic_json(&body, yacht_name)
    }
}

/// Parse MarineTraffic's asset search JSON into a partial record.
///
/// The endpoint returns an array of vessel objects with upper-case AIS
/// field names. A yacht that is not listed yields an empty partial, not
/// an error. Extracted as a separate function for testability with mock
/// payloads.
pub(crate) fn parse_marine_traffic_json(
    body: &str,
    yacht_name: &str,
) -> Result<YachtData, EnhanceError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| EnhanceError::Parse(format!("MarineTraffic JSON invalid: {e}")))?;

    let vessels = match &value {
        Value::Array(items) => items.as_slice(),
        // Some responses wrap the list in {"results": [...]}.
        Value::Object(map) => map
            .get("results")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]),
        _ => {
            return Err(EnhanceError::Parse(
                "MarineTraffic JSON is neither array nor object".into(),
            ))
        }
    };

    let wanted = strip_designation(yacht_name);
    let mut record = YachtData::empty(yacht_name.trim());

    let Some(vessel) = vessels.iter().find(|v| {
        text_field(v, "SHIPNAME")
            .map(|name| name.eq_ignore_ascii_case(wanted))
            .unwrap_or(false)
    }) else {
        tracing::debug!(yacht = wanted, "MarineTraffic has no matching vessel");
        return Ok(record);
    };

    record.imo = id_field(vessel, "IMO");
    record.mmsi = id_field(vessel, "MMSI");
    record.flag = text_field(vessel, "FLAG");
    record.yacht_type = text_field(vessel, "TYPE_NAME");
    record.length = num_field(vessel, "LOA").filter(|m| *m > 0.0);
    record.beam = num_field(vessel, "BEAM").filter(|m| *m > 0.0);
    record.gross_tonnage = num_field(vessel, "GT").filter(|t| *t > 0.0);
    record.max_speed = num_field(vessel, "SPEED_MAX").filter(|kn| *kn > 0.0);
    record.year_built = text_field(vessel, "YEAR_BUILT")
        .as_deref()
        .and_then(parse_year);

    tracing::debug!(
        yacht = wanted,
        fields = record.populated_fields(),
        "MarineTraffic vessel parsed"
    );
    Ok(record)
}

/// String field, tolerating numeric JSON values.
fn text_field(vessel: &Value, key: &str) -> Option<String> {
    match vessel.get(key)? {
        Value::String(s) => clean_text(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Identifier field (IMO/MMSI). AIS feeds use `0` for "unknown".
fn id_field(vessel: &Value, key: &str) -> Option<String> {
    text_field(vessel, key).filter(|id| id != "0")
}

/// Numeric field, tolerating string-encoded JSON numbers.
fn num_field(vessel: &Value, key: &str) -> Option<f64> {
    match vessel.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
