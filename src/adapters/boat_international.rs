//! BOAT International adapter — editorial yacht registry, HTML profiles.
//!
//! The yacht directory renders listings with a `<dl>` spec block. This is
//! the only built-in source that publishes ownership, price, and current
//! location, so it stays in the default set despite its lower reliability
//! weight.

use std::time::Duration;

use async_trait::async_trait;
use scraper::{Html, Selector};

use crate::adapter::SourceAdapter;
use crate::adapters::{clean_text, parse_knots, parse_metres, parse_year};
use crate::config::EnhancerConfig;
use crate::error::EnhanceError;
use crate::http;
use crate::name_normalize::strip_designation;
use crate::types::{DataSource, YachtData};

/// BOAT International yacht directory scraper.
pub struct BoatInternationalAdapter {
    interval: Duration,
}

impl BoatInternationalAdapter {
    /// Adapter with the source's default rate limit.
    pub fn new() -> Self {
        Self::with_rate_limit(DataSource::BoatInternational.rate_limit())
    }

    /// Adapter with a custom minimum request spacing.
    pub fn with_rate_limit(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Default for BoatInternationalAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SourceAdapter for BoatInternationalAdapter {
    fn name(&self) -> &str {
        DataSource::BoatInternational.name()
    }

    fn base_url(&self) -> &str {
        DataSource::BoatInternational.base_url()
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
        tracing::trace!(query, "BOAT International search");

        let client = http::build_client(config)?;
        let url = format!("{}/yachts/search", self.base_url());

        let response = client
            .get(&url)
            .query(&[("q", query)])
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| EnhanceError::Http(format!("BOAT International request failed: {e}")))?
            .error_for_status()
            .map_err(|e| EnhanceError::Http(format!("BOAT International HTTP error: {e}")))?;

        let html = response.text().await.map_err(|e| {
            EnhanceError::Http(format!("BOAT International response read failed: {e}"))
        })?;

        tracing::trace!(bytes = html.len(), "BOAT International response received");

        parse_boat_international_html(&html, yacht_name)
    }
}

/// Parse BOAT International yacht listings into a partial record.
///
/// Extracted as a separate function for testability with mock HTML.
pub(crate) fn parse_boat_international_html(
    html: &str,
    yacht_name: &str,
) -> Result<YachtData, EnhanceError> {
    let document = Html::parse_document(html);

    let listing_sel = Selector::parse("div.yacht-listing")
        .map_err(|e| EnhanceError::Parse(format!("invalid listing selector: {e:?}")))?;
    let name_sel = Selector::parse("h2.listing-title")
        .map_err(|e| EnhanceError::Parse(format!("invalid name selector: {e:?}")))?;
    let term_sel = Selector::parse("dl.specs dt")
        .map_err(|e| EnhanceError::Parse(format!("invalid term selector: {e:?}")))?;
    let detail_sel = Selector::parse("dl.specs dd")
        .map_err(|e| EnhanceError::Parse(format!("invalid detail selector: {e:?}")))?;

    let wanted = strip_designation(yacht_name);
    let mut record = YachtData::empty(yacht_name.trim());

    for listing in document.select(&listing_sel) {
        let Some(name_el) = listing.select(&name_sel).next() else {
            continue;
        };
        let listing_name = name_el.text().collect::<String>();
        if !strip_designation(&listing_name).eq_ignore_ascii_case(wanted) {
            continue;
        }

        // <dt>/<dd> pairs appear in document order.
        let terms = listing.select(&term_sel);
        let details = listing.select(&detail_sel);
        for (term, detail) in terms.zip(details) {
            let Some(label) = clean_text(&term.text().collect::<String>()) else {
                continue;
            };
            let Some(value) = clean_text(&detail.text().collect::<String>()) else {
                continue;
            };
            apply_spec(&mut record, &label, &value);
        }

        break;
    }

    tracing::debug!(
        yacht = wanted,
        fields = record.populated_fields(),
        "BOAT International listing parsed"
    );
    Ok(record)
}

/// Map one labelled spec value onto the record.
fn apply_spec(record: &mut YachtData, label: &str, value: &str) {
    match label.to_lowercase().as_str() {
        "owner" => record.owner = clean_text(value),
        "builder" | "shipyard" => record.builder = clean_text(value),
        "designer" | "naval architect" => record.designer = clean_text(value),
        "length" | "length overall" => record.length = parse_metres(value),
        "top speed" | "max speed" => record.max_speed = parse_knots(value),
        "year" | "delivery year" => record.year_built = parse_year(value),
        // Price stays free text: "POA", "€ 350,000,000", "sold".
        "price" | "asking price" => record.price = clean_text(value),
        "location" | "current location" => record.location = clean_text(value),
        "type" => record.yacht_type = clean_text(value),
        _ => {}
    }
}
