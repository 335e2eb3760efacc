//! VesselFinder adapter — AIS tracking site, HTML results table.
//!
//! VesselFinder's vessel search renders a plain results table that needs
//! no JavaScript. Identifiers travel in the detail-page link slug
//! (`/vessels/ECLIPSE-IMO-9333085-MMSI-319175000`), the dimensions in the
//! size column as `length / beam`.

use std::time::Duration;

use async_trait::async_trait;
use scraper::{Html, Selector};

use crate::adapter::SourceAdapter;
use crate::adapters::{clean_text, first_number, parse_metres, parse_year};
use crate::config::EnhancerConfig;
use crate::error::EnhanceError;
use crate::http;
use crate::name_normalize::strip_designation;
use crate::types::{DataSource, YachtData};

/// VesselFinder search results scraper.
pub struct VesselFinderAdapter {
    interval: Duration,
}

impl VesselFinderAdapter {
    /// Adapter with the source's default rate limit.
    pub fn new() -> Self {
        Self::with_rate_limit(DataSource::VesselFinder.rate_limit())
    }

    /// Adapter with a custom minimum request spacing.
    pub fn with_rate_limit(interval: Duration) -> Self {
        Self { interval }
    }

    /// Pull IMO and MMSI out of a detail-page slug such as
    /// `/vessels/ECLIPSE-IMO-9333085-MMSI-319175000`.
    fn identifiers_from_href(href: &str) -> (Option<String>, Option<String>) {
        fn identifier(token: Option<&str>) -> Option<String> {
            token
                .filter(|id| {
                    !id.is_empty() && *id != "0" && id.chars().all(|c| c.is_ascii_digit())
                })
                .map(str::to_string)
        }

        let slug = href.rsplit('/').next().unwrap_or(href);
        let mut imo = None;
        let mut mmsi = None;
        let mut tokens = slug.split('-').peekable();
        while let Some(token) = tokens.next() {
            match token {
                "IMO" => imo = identifier(tokens.peek().copied()),
                "MMSI" => mmsi = identifier(tokens.peek().copied()),
                _ => {}
            }
        }
        (imo, mmsi)
    }
}

impl Default for VesselFinderAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SourceAdapter for VesselFinderAdapter {
    fn name(&self) -> &str {
        DataSource::VesselFinder.name()
    }

    fn base_url(&self) -> &str {
        DataSource::VesselFinder.base_url()
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
        tracing::trace!(query, "VesselFinder search");

        let client = http::build_client(config)?;
        let url = format!("{}/vessels", self.base_url());

        let response = client
            .get(&url)
            .query(&[("name", query)])
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| EnhanceError::Http(format!("VesselFinder request failed: {e}")))?
            .error_for_status()
            .map_err(|e| EnhanceError::Http(format!("VesselFinder HTTP error: {e}")))?;

        let html = response
            .text()
            .await
            .map_err(|e| EnhanceError::Http(format!("VesselFinder response read failed: {e}")))?;

        tracing::trace!(bytes = html.len(), "VesselFinder response received");

        parse_vessel_finder_html(&html, yacht_name)
    }
}

/// Parse VesselFinder's search results table into a partial record.
///
/// Extracted as a separate function for testability with mock HTML.
pub(crate) fn parse_vessel_finder_html(
    html: &str,
    yacht_name: &str,
) -> Result<YachtData, EnhanceError> {
    let document = Html::parse_document(html);

    let row_sel = Selector::parse("table.results tbody tr")
        .map_err(|e| EnhanceError::Parse(format!("invalid row selector: {e:?}")))?;
    let name_sel = Selector::parse("td.v2 a .slna")
        .map_err(|e| EnhanceError::Parse(format!("invalid name selector: {e:?}")))?;
    let type_sel = Selector::parse("td.v2 a .slty")
        .map_err(|e| EnhanceError::Parse(format!("invalid type selector: {e:?}")))?;
    let link_sel = Selector::parse("td.v2 a")
        .map_err(|e| EnhanceError::Parse(format!("invalid link selector: {e:?}")))?;
    let built_sel = Selector::parse("td.v3")
        .map_err(|e| EnhanceError::Parse(format!("invalid built selector: {e:?}")))?;
    let tonnage_sel = Selector::parse("td.v4")
        .map_err(|e| EnhanceError::Parse(format!("invalid tonnage selector: {e:?}")))?;
    let size_sel = Selector::parse("td.v5")
        .map_err(|e| EnhanceError::Parse(format!("invalid size selector: {e:?}")))?;

    let wanted = strip_designation(yacht_name);
    let mut record = YachtData::empty(yacht_name.trim());

    for row in document.select(&row_sel) {
        let Some(name_el) = row.select(&name_sel).next() else {
            continue;
        };
        let row_name = name_el.text().collect::<String>();
        if !row_name.trim().eq_ignore_ascii_case(wanted) {
            continue;
        }

        if let Some(href) = row
            .select(&link_sel)
            .next()
            .and_then(|a| a.value().attr("href"))
        {
            let (imo, mmsi) = VesselFinderAdapter::identifiers_from_href(href);
            record.imo = imo;
            record.mmsi = mmsi;
        }

        record.yacht_type = row
            .select(&type_sel)
            .next()
            .and_then(|el| clean_text(&el.text().collect::<String>()));
        record.year_built = row
            .select(&built_sel)
            .next()
            .and_then(|el| parse_year(&el.text().collect::<String>()));
        record.gross_tonnage = row
            .select(&tonnage_sel)
            .next()
            .and_then(|el| first_number(&el.text().collect::<String>()))
            .filter(|t| *t > 0.0);

        // Size column reads "length / beam" in metres.
        if let Some(size) = row.select(&size_sel).next() {
            let size_text = size.text().collect::<String>();
            let mut dims = size_text.split('/');
            record.length = dims.next().and_then(parse_metres);
            record.beam = dims.next().and_then(parse_metres);
        }

        break;
    }

    tracing::debug!(
        yacht = wanted,
        fields = record.populated_fields(),
        "VesselFinder row parsed"
    );
    Ok(record)
}
