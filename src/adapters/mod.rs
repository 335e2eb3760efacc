//! Built-in data source adapters.
//!
//! Each module provides a struct implementing [`crate::adapter::SourceAdapter`]
//! that queries one public yacht data source. Shared parsing helpers live
//! here: listing sites pad missing values with placeholder strings, and a
//! placeholder must become `None`, never a populated field.

pub mod boat_international;
pub mod marine_traffic;
pub mod superyacht_times;
pub mod vessel_finder;

pub use boat_international::BoatInternationalAdapter;
pub use marine_traffic::MarineTrafficAdapter;
pub use superyacht_times::SuperYachtTimesAdapter;
pub use vessel_finder::VesselFinderAdapter;

/// Placeholder strings sources print where they have no data.
const PLACEHOLDERS: &[&str] = &[
    "",
    "-",
    "—",
    "–",
    "n/a",
    "na",
    "unknown",
    "not available",
    "tba",
    "tbc",
];

/// Collapse whitespace and reject placeholder values.
///
/// Returns `None` for anything a source prints where it has no data, so
/// downstream fields keep `None` as a true "unknown" marker.
pub(crate) fn clean_text(raw: &str) -> Option<String> {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if PLACEHOLDERS.contains(&collapsed.to_lowercase().as_str()) {
        None
    } else {
        Some(collapsed)
    }
}

/// Extract the first number from free text like `"162.5 m (533.1 ft)"`
/// or `"2,995"`. Thousands separators are stripped.
pub(crate) fn first_number(raw: &str) -> Option<f64> {
    let mut token = String::new();
    for ch in raw.chars() {
        if ch.is_ascii_digit() || ch == '.' {
            token.push(ch);
        } else if ch == ',' && !token.is_empty() {
            // Thousands separator inside a number.
            continue;
        } else if !token.is_empty() {
            break;
        }
    }
    token.parse().ok()
}

/// Parse a dimension in metres from free text. Zero is a placeholder.
pub(crate) fn parse_metres(raw: &str) -> Option<f64> {
    first_number(raw).filter(|m| *m > 0.0)
}

/// Parse a speed in knots from free text. Zero is a placeholder.
pub(crate) fn parse_knots(raw: &str) -> Option<f64> {
    first_number(raw).filter(|kn| *kn > 0.0)
}

/// Parse a headcount (guests, crew) from free text.
pub(crate) fn parse_count(raw: &str) -> Option<u32> {
    let n = first_number(raw)?;
    if n >= 1.0 && n.fract() == 0.0 {
        Some(n as u32)
    } else {
        None
    }
}

/// Parse a build year. Anything outside a plausible range is a
/// placeholder (AIS feeds use 0 for "unknown").
pub(crate) fn parse_year(raw: &str) -> Option<u16> {
    let n = first_number(raw)?;
    let year = n as u16;
    if n.fract() == 0.0 && (1850..=2100).contains(&year) {
        Some(year)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_collapses_whitespace() {
        assert_eq!(
            clean_text("  Blohm +  Voss \n").as_deref(),
            Some("Blohm + Voss")
        );
    }

    #[test]
    fn clean_text_rejects_placeholders() {
        assert!(clean_text("").is_none());
        assert!(clean_text("   ").is_none());
        assert!(clean_text("-").is_none());
        assert!(clean_text("N/A").is_none());
        assert!(clean_text("n/a").is_none());
        assert!(clean_text("Unknown").is_none());
        assert!(clean_text("TBA").is_none());
    }

    #[test]
    fn clean_text_keeps_real_values() {
        assert_eq!(clean_text("Eclipse").as_deref(), Some("Eclipse"));
        // "Nassau" contains "na" but is not a placeholder.
        assert_eq!(clean_text("Nassau").as_deref(), Some("Nassau"));
    }

    #[test]
    fn first_number_handles_units_and_separators() {
        assert_eq!(first_number("162.5 m (533.1 ft)"), Some(162.5));
        assert_eq!(first_number("2,995 GT"), Some(2995.0));
        assert_eq!(first_number("built 2010"), Some(2010.0));
        assert_eq!(first_number("no digits"), None);
    }

    #[test]
    fn parse_metres_rejects_zero() {
        assert_eq!(parse_metres("162.5 m"), Some(162.5));
        assert_eq!(parse_metres("0"), None);
        assert_eq!(parse_metres(""), None);
    }

    #[test]
    fn parse_knots_reads_speed_text() {
        assert_eq!(parse_knots("22 kn"), Some(22.0));
        assert_eq!(parse_knots("21.5 knots"), Some(21.5));
        assert_eq!(parse_knots("0"), None);
    }

    #[test]
    fn parse_count_requires_whole_number() {
        assert_eq!(parse_count("36 guests"), Some(36));
        assert_eq!(parse_count("70"), Some(70));
        assert_eq!(parse_count("1.5"), None);
        assert_eq!(parse_count("0"), None);
    }

    #[test]
    fn parse_year_rejects_out_of_range() {
        assert_eq!(parse_year("2010"), Some(2010));
        assert_eq!(parse_year("Delivered 2013"), Some(2013));
        assert_eq!(parse_year("0"), None);
        assert_eq!(parse_year("123"), None);
        assert_eq!(parse_year("9999"), None);
    }
}
