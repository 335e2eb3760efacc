//! Core types: the aggregated yacht record and built-in source identification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// A yacht record aggregated from one or more data sources.
///
/// Every specification field is optional: `None` is the explicit "unknown"
/// marker, distinct from an empty string a source page might echo. A field
/// is `Some` only when at least one source supplied a non-placeholder value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YachtData {
    /// Yacht name. Always present and non-empty for records produced by
    /// the enhancer (degraded batch entries keep whatever the caller gave).
    pub name: String,
    /// IMO number, as registered.
    pub imo: Option<String>,
    /// MMSI number, as broadcast on AIS.
    pub mmsi: Option<String>,
    /// Length overall in metres.
    pub length: Option<f64>,
    /// Beam in metres.
    pub beam: Option<f64>,
    /// Year of delivery.
    pub year_built: Option<u16>,
    pub builder: Option<String>,
    pub designer: Option<String>,
    pub owner: Option<String>,
    /// Flag state.
    pub flag: Option<String>,
    pub gross_tonnage: Option<f64>,
    /// Maximum speed in knots.
    pub max_speed: Option<f64>,
    /// Cruising speed in knots.
    pub cruise_speed: Option<f64>,
    /// Guest capacity.
    pub guests: Option<u32>,
    /// Crew capacity.
    pub crew: Option<u32>,
    /// Asking or sale price, free text as published.
    pub price: Option<String>,
    /// Last reported location.
    pub location: Option<String>,
    /// Motor yacht, sailing yacht, explorer, etc.
    pub yacht_type: Option<String>,
    /// Names of every source that contributed at least one field.
    pub sources: Vec<String>,
    /// Trustworthiness of the merged record, in `[0.0, 1.0]`. Rises with
    /// the number of agreeing sources; disagreement lowers it.
    pub confidence_score: f64,
    /// When the record was assembled.
    pub last_updated: Option<DateTime<Utc>>,
}

impl YachtData {
    /// Create a record with only the name set and everything else unknown.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            imo: None,
            mmsi: None,
            length: None,
            beam: None,
            year_built: None,
            builder: None,
            designer: None,
            owner: None,
            flag: None,
            gross_tonnage: None,
            max_speed: None,
            cruise_speed: None,
            guests: None,
            crew: None,
            price: None,
            location: None,
            yacht_type: None,
            sources: Vec::new(),
            confidence_score: 0.0,
            last_updated: None,
        }
    }

    /// Number of specification fields carrying a value (name and the meta
    /// fields are not counted). A partial record with zero populated fields
    /// contributed nothing to a lookup.
    pub fn populated_fields(&self) -> usize {
        [
            self.imo.is_some(),
            self.mmsi.is_some(),
            self.length.is_some(),
            self.beam.is_some(),
            self.year_built.is_some(),
            self.builder.is_some(),
            self.designer.is_some(),
            self.owner.is_some(),
            self.flag.is_some(),
            self.gross_tonnage.is_some(),
            self.max_speed.is_some(),
            self.cruise_speed.is_some(),
            self.guests.is_some(),
            self.crew.is_some(),
            self.price.is_some(),
            self.location.is_some(),
            self.yacht_type.is_some(),
        ]
        .iter()
        .filter(|populated| **populated)
        .count()
    }

    /// Expose the record as a plain JSON mapping for host-application
    /// consumption. Keys match the serialized field names exactly.
    pub fn to_map(&self) -> serde_json::Map<String, serde_json::Value> {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        }
    }
}

/// Built-in data sources that yacht-enhance can query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataSource {
    /// MarineTraffic — AIS registry data, JSON search endpoint.
    MarineTraffic,
    /// VesselFinder — AIS tracking site, HTML vessel pages.
    VesselFinder,
    /// SuperYacht Times — editorial yacht registry, HTML profiles.
    SuperYachtTimes,
    /// BOAT International — editorial yacht registry, HTML profiles.
    BoatInternational,
}

impl DataSource {
    /// Returns the human-readable name of this source.
    pub fn name(&self) -> &'static str {
        match self {
            Self::MarineTraffic => "MarineTraffic",
            Self::VesselFinder => "VesselFinder",
            Self::SuperYachtTimes => "SuperYacht Times",
            Self::BoatInternational => "BOAT International",
        }
    }

    /// Base URL queried by the built-in adapter for this source.
    pub fn base_url(&self) -> &'static str {
        match self {
            Self::MarineTraffic => "https://www.marinetraffic.com",
            Self::VesselFinder => "https://www.vesselfinder.com",
            Self::SuperYachtTimes => "https://www.superyachttimes.com",
            Self::BoatInternational => "https://www.boatinternational.com",
        }
    }

    /// Default minimum spacing between consecutive requests to this source.
    pub fn rate_limit(&self) -> Duration {
        match self {
            Self::MarineTraffic => Duration::from_millis(2000),
            Self::VesselFinder => Duration::from_millis(1500),
            Self::SuperYachtTimes => Duration::from_millis(2000),
            Self::BoatInternational => Duration::from_millis(3000),
        }
    }

    /// Relative reliability weight used by the weighted confidence policy.
    /// Registry-backed AIS data is trusted above editorial profiles.
    pub fn reliability(&self) -> f64 {
        match self {
            Self::MarineTraffic => 1.0,
            Self::SuperYachtTimes => 0.9,
            Self::VesselFinder => 0.8,
            Self::BoatInternational => 0.7,
        }
    }

    /// Returns all built-in source variants.
    pub fn all() -> &'static [DataSource] {
        &[
            Self::MarineTraffic,
            Self::VesselFinder,
            Self::SuperYachtTimes,
            Self::BoatInternational,
        ]
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
