//! SuperYacht Times adapter — editorial yacht registry, HTML profiles.
//!
//! The yacht search page renders one card per yacht with a label/value
//! spec list. Labels are matched case-insensitively, so a site-side
//! wording tweak ("Length" → "Length overall") keeps working.

use std::time::Duration;

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};

use crate::adapter::SourceAdapter;
use crate::adapters::{clean_text, parse_count, parse_knots, parse_metres, parse_year};
use crate::config::EnhancerConfig;
use crate::error::EnhanceError;
use crate::http;
use crate::name_normalize::strip_designation;
use crate::types::{DataSource, YachtData};

/// SuperYacht Times yacht card scraper.
pub struct SuperYachtTimesAdapter {
    interval: Duration,
}

impl SuperYachtTimesAdapter {
    /// Adapter with the source's default rate limit.
    pub fn new() -> Self {
        Self::with_rate_limit(DataSource::SuperYachtTimes.rate_limit())
    }

    /// Adapter with a custom minimum request spacing.
    pub fn with_rate_limit(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Default for SuperYachtTimesAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SourceAdapter for SuperYachtTimesAdapter {
    fn name(&self) -> &str {
        DataSource::SuperYachtTimes.name()
    }

    fn base_url(&self) -> &str {
        DataSource::SuperYachtTimes.base_url()
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
        tracing::trace!(query, "SuperYacht Times search");

        let client = http::build_client(config)?;
        let url = format!("{}/yachts", self.base_url());

        let response = client
            .get(&url)
            .query(&[("search", query)])
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| EnhanceError::Http(format!("SuperYacht Times request failed: {e}")))?
            .error_for_status()
            .map_err(|e| EnhanceError::Http(format!("SuperYacht Times HTTP error: {e}")))?;

        let html = response.text().await.map_err(|e| {
            EnhanceError::Http(format!("SuperYacht Times response read failed: {e}"))
        })?;

        tracing::trace!(bytes = html.len(), "SuperYacht Times response received");

        parse_superyacht_times_html(&html, yacht_name)
    }
}

/// Parse SuperYacht Times yacht cards into a partial record.
///
/// Extracted as a separate function for testability with mock HTML.
pub(crate) fn parse_superyacht_times_html(
    html: &str,
    yacht_name: &str,
) -> Result<YachtData, EnhanceError> {
    let document = Html::parse_document(html);

    let card_sel = Selector::parse("article.yacht-card")
        .map_err(|e| EnhanceError::Parse(format!("invalid card selector: {e:?}")))?;
    let name_sel = Selector::parse("h3.yacht-name")
        .map_err(|e| EnhanceError::Parse(format!("invalid name selector: {e:?}")))?;
    let spec_sel = Selector::parse("ul.yacht-specs li")
        .map_err(|e| EnhanceError::Parse(format!("invalid spec selector: {e:?}")))?;
    let label_sel = Selector::parse(".label")
        .map_err(|e| EnhanceError::Parse(format!("invalid label selector: {e:?}")))?;
    let value_sel = Selector::parse(".value")
        .map_err(|e| EnhanceError::Parse(format!("invalid value selector: {e:?}")))?;

    let wanted = strip_designation(yacht_name);
    let mut record = YachtData::empty(yacht_name.trim());

    for card in document.select(&card_sel) {
        let Some(name_el) = card.select(&name_sel).next() else {
            continue;
        };
        let card_name = name_el.text().collect::<String>();
        if !strip_designation(&card_name).eq_ignore_ascii_case(wanted) {
            continue;
        }

        for spec in card.select(&spec_sel) {
            let Some(label) = element_text(&spec, &label_sel) else {
                continue;
            };
            let Some(value) = element_text(&spec, &value_sel) else {
                continue;
            };
            apply_spec(&mut record, &label, &value);
        }

        break;
    }

    tracing::debug!(
        yacht = wanted,
        fields = record.populated_fields(),
        "SuperYacht Times card parsed"
    );
    Ok(record)
}

fn element_text(spec: &ElementRef<'_>, selector: &Selector) -> Option<String> {
    spec.select(selector)
        .next()
        .and_then(|el| clean_text(&el.text().collect::<String>()))
}

/// Map one labelled spec value onto the record.
fn apply_spec(record: &mut YachtData, label: &str, value: &str) {
    match label.to_lowercase().as_str() {
        "builder" | "shipyard" => record.builder = clean_text(value),
        "designer" | "exterior designer" => record.designer = clean_text(value),
        "length" | "length overall" | "loa" => record.length = parse_metres(value),
        "year" | "year built" | "delivered" => record.year_built = parse_year(value),
        "guests" | "guest capacity" => record.guests = parse_count(value),
        "crew" | "crew capacity" => record.crew = parse_count(value),
        "cruising speed" | "cruise speed" => record.cruise_speed = parse_knots(value),
        "type" | "yacht type" => record.yacht_type = clean_text(value),
        _ => {}
    }
}
