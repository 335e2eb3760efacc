//! Field-level merge of partial records from multiple sources.
//!
//! For every record field the contributors are gathered, agreement is
//! checked under normalised equality, and conflicts are resolved in
//! favour of the source with the longest success track record, falling
//! back to adapter registry order. Each resolved conflict counts as one
//! disagreement toward the confidence penalty.

use chrono::Utc;

use crate::config::{ConfidencePolicy, EnhancerConfig};
use crate::stats::SourceStats;
use crate::types::{DataSource, YachtData};

use super::confidence::confidence_score;

/// Merge partial records into one authoritative record.
///
/// `partials` is one `(source name, partial record)` pair per queried
/// adapter, in registry order — failed sources contribute an empty
/// partial. The order doubles as the conflict tie-break priority.
pub fn merge_partials(
    name: &str,
    partials: &[(String, YachtData)],
    stats: &SourceStats,
    config: &EnhancerConfig,
) -> YachtData {
    let mut record = YachtData::empty(name);
    let mut disagreements = 0usize;

    record.imo = resolve(collect(partials, |p| p.imo.clone()), stats, text_eq, &mut disagreements);
    record.mmsi = resolve(collect(partials, |p| p.mmsi.clone()), stats, text_eq, &mut disagreements);
    record.length = resolve(collect(partials, |p| p.length), stats, float_eq, &mut disagreements);
    record.beam = resolve(collect(partials, |p| p.beam), stats, float_eq, &mut disagreements);
    record.year_built = resolve(collect(partials, |p| p.year_built), stats, exact_eq, &mut disagreements);
    record.builder = resolve(collect(partials, |p| p.builder.clone()), stats, text_eq, &mut disagreements);
    record.designer = resolve(collect(partials, |p| p.designer.clone()), stats, text_eq, &mut disagreements);
    record.owner = resolve(collect(partials, |p| p.owner.clone()), stats, text_eq, &mut disagreements);
    record.flag = resolve(collect(partials, |p| p.flag.clone()), stats, text_eq, &mut disagreements);
    record.gross_tonnage = resolve(collect(partials, |p| p.gross_tonnage), stats, float_eq, &mut disagreements);
    record.max_speed = resolve(collect(partials, |p| p.max_speed), stats, float_eq, &mut disagreements);
    record.cruise_speed = resolve(collect(partials, |p| p.cruise_speed), stats, float_eq, &mut disagreements);
    record.guests = resolve(collect(partials, |p| p.guests), stats, exact_eq, &mut disagreements);
    record.crew = resolve(collect(partials, |p| p.crew), stats, exact_eq, &mut disagreements);
    record.price = resolve(collect(partials, |p| p.price.clone()), stats, text_eq, &mut disagreements);
    record.location = resolve(collect(partials, |p| p.location.clone()), stats, text_eq, &mut disagreements);
    record.yacht_type = resolve(collect(partials, |p| p.yacht_type.clone()), stats, text_eq, &mut disagreements);

    // Every source that contributed anything is credited, whether or not
    // its values won the conflicts.
    for (source, partial) in partials {
        if partial.populated_fields() > 0 && !record.sources.contains(source) {
            record.sources.push(source.clone());
        }
    }

    let weight_of = |source: &str| source_weight(source, config.confidence_policy);
    let queried: f64 = partials.iter().map(|(source, _)| weight_of(source)).sum();
    let contributing: f64 = partials
        .iter()
        .filter(|(_, partial)| partial.populated_fields() > 0)
        .map(|(source, _)| weight_of(source))
        .sum();

    record.confidence_score = confidence_score(contributing, queried, disagreements);
    record.last_updated = Some(Utc::now());

    tracing::debug!(
        yacht = name,
        sources = record.sources.len(),
        disagreements,
        confidence = record.confidence_score,
        "partials merged"
    );
    record
}

/// Gather one field's contributors as `(priority, source, value)`.
fn collect<'a, T>(
    partials: &'a [(String, YachtData)],
    field: impl Fn(&YachtData) -> Option<T>,
) -> Vec<(usize, &'a str, T)> {
    partials
        .iter()
        .enumerate()
        .filter_map(|(priority, (source, partial))| {
            field(partial).map(|value| (priority, source.as_str(), value))
        })
        .collect()
}

/// Resolve one field from its contributors.
///
/// Agreement (all values normalised-equal) takes the first value without
/// penalty. Conflicts pick the contributor with the most recorded
/// successes; ties go to the lowest registry index.
fn resolve<T: Clone>(
    contributions: Vec<(usize, &str, T)>,
    stats: &SourceStats,
    eq: impl Fn(&T, &T) -> bool,
    disagreements: &mut usize,
) -> Option<T> {
    let (first, rest) = contributions.split_first()?;
    if rest.iter().all(|(_, _, value)| eq(&first.2, value)) {
        return Some(first.2.clone());
    }

    *disagreements += 1;
    contributions
        .iter()
        .max_by(|a, b| {
            stats
                .successes(a.1)
                .cmp(&stats.successes(b.1))
                // Lower registry index ranks higher on equal track records.
                .then(b.0.cmp(&a.0))
        })
        .map(|(_, _, value)| value.clone())
}

fn source_weight(source: &str, policy: ConfidencePolicy) -> f64 {
    match policy {
        ConfidencePolicy::Uniform => 1.0,
        ConfidencePolicy::Weighted => DataSource::all()
            .iter()
            .find(|s| s.name() == source)
            .map_or(1.0, |s| s.reliability()),
    }
}

fn text_eq(a: &String, b: &String) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

fn float_eq(a: &f64, b: &f64) -> bool {
    (a - b).abs() < 0.05
}

fn exact_eq<T: PartialEq>(a: &T, b: &T) -> bool {
    a == b
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partial(source: &str, build: impl FnOnce(&mut YachtData)) -> (String, YachtData) {
        let mut record = YachtData::empty("Eclipse");
        build(&mut record);
        (source.to_string(), record)
    }

    fn merge(partials: &[(String, YachtData)]) -> YachtData {
        let stats = SourceStats::new();
        let config = EnhancerConfig::default();
        merge_partials("Eclipse", partials, &stats, &config)
    }

    #[test]
    fn no_partials_yields_empty_zero_confidence() {
        let record = merge(&[]);
        assert_eq!(record.name, "Eclipse");
        assert_eq!(record.populated_fields(), 0);
        assert!((record.confidence_score - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn single_contributor_wins_field() {
        let partials = vec![
            partial("A", |p| p.builder = Some("Blohm+Voss".into())),
            partial("B", |_| {}),
        ];
        let record = merge(&partials);
        assert_eq!(record.builder.as_deref(), Some("Blohm+Voss"));
    }

    #[test]
    fn agreeing_sources_take_common_value() {
        let partials = vec![
            partial("A", |p| p.length = Some(162.5)),
            partial("B", |p| p.length = Some(162.5)),
        ];
        let record = merge(&partials);
        assert_eq!(record.length, Some(162.5));
        // Full coverage, no conflicts.
        assert!((record.confidence_score - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn normalised_text_counts_as_agreement() {
        let partials = vec![
            partial("A", |p| p.builder = Some("Blohm+Voss".into())),
            partial("B", |p| p.builder = Some("  BLOHM+VOSS ".into())),
        ];
        let record = merge(&partials);
        assert_eq!(record.builder.as_deref(), Some("Blohm+Voss"));
        assert!((record.confidence_score - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn near_equal_floats_count_as_agreement() {
        let partials = vec![
            partial("A", |p| p.length = Some(162.5)),
            partial("B", |p| p.length = Some(162.51)),
        ];
        let record = merge(&partials);
        assert_eq!(record.length, Some(162.5));
        assert!((record.confidence_score - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn disagreement_resolved_by_registry_order() {
        // Fresh stats: equal track records, so the first adapter wins.
        let partials = vec![
            partial("A", |p| p.length = Some(162.5)),
            partial("B", |p| p.length = Some(155.0)),
        ];
        let record = merge(&partials);
        assert_eq!(record.length, Some(162.5));
    }

    #[test]
    fn disagreement_resolved_by_success_count() {
        let stats = SourceStats::new();
        stats.record_success("B");
        stats.record_success("B");
        stats.record_success("A");

        let partials = vec![
            partial("A", |p| p.length = Some(162.5)),
            partial("B", |p| p.length = Some(155.0)),
        ];
        let config = EnhancerConfig::default();
        let record = merge_partials("Eclipse", &partials, &stats, &config);
        // B has the longer track record despite lower priority.
        assert_eq!(record.length, Some(155.0));
    }

    #[test]
    fn disagreement_lowers_confidence() {
        let agreed = merge(&[
            partial("A", |p| p.length = Some(162.5)),
            partial("B", |p| p.length = Some(162.5)),
        ]);
        let disagreed = merge(&[
            partial("A", |p| p.length = Some(162.5)),
            partial("B", |p| p.length = Some(155.0)),
        ]);
        assert!(disagreed.confidence_score < agreed.confidence_score);
    }

    #[test]
    fn losing_source_still_credited() {
        let partials = vec![
            partial("A", |p| p.length = Some(162.5)),
            partial("B", |p| p.length = Some(155.0)),
        ];
        let record = merge(&partials);
        assert_eq!(record.sources, vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn empty_partials_not_credited() {
        let partials = vec![
            partial("A", |p| p.length = Some(162.5)),
            partial("B", |_| {}),
        ];
        let record = merge(&partials);
        assert_eq!(record.sources, vec!["A".to_string()]);
        // One of two sources contributed.
        assert!((record.confidence_score - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn complementary_fields_all_kept() {
        let partials = vec![
            partial("A", |p| {
                p.length = Some(162.5);
                p.builder = Some("Blohm+Voss".into());
            }),
            partial("B", |p| {
                p.length = Some(162.5);
                p.owner = Some("Roman Abramovich".into());
            }),
        ];
        let record = merge(&partials);
        assert_eq!(record.length, Some(162.5));
        assert_eq!(record.builder.as_deref(), Some("Blohm+Voss"));
        assert_eq!(record.owner.as_deref(), Some("Roman Abramovich"));
        assert_eq!(record.sources, vec!["A".to_string(), "B".to_string()]);
        assert!(record.confidence_score > 0.5);
    }

    #[test]
    fn last_updated_stamped() {
        let record = merge(&[partial("A", |p| p.length = Some(162.5))]);
        assert!(record.last_updated.is_some());
    }

    #[test]
    fn weighted_policy_discounts_unreliable_sources() {
        let stats = SourceStats::new();
        let config = EnhancerConfig {
            confidence_policy: ConfidencePolicy::Weighted,
            ..Default::default()
        };
        // Only the least reliable built-in contributed.
        let partials = vec![
            partial("MarineTraffic", |_| {}),
            partial("BOAT International", |p| p.length = Some(162.5)),
        ];
        let record = merge_partials("Eclipse", &partials, &stats, &config);
        // 0.7 of (1.0 + 0.7) — less than the uniform 0.5.
        assert!(record.confidence_score < 0.5);
        assert!(record.confidence_score > 0.0);
    }

    #[test]
    fn custom_source_weight_defaults_to_one() {
        assert!((source_weight("Custom", ConfidencePolicy::Weighted) - 1.0).abs() < f64::EPSILON);
        assert!(
            (source_weight("MarineTraffic", ConfidencePolicy::Weighted) - 1.0).abs()
                < f64::EPSILON
        );
        assert!(
            (source_weight("BOAT International", ConfidencePolicy::Weighted) - 0.7).abs()
                < f64::EPSILON
        );
    }
}
