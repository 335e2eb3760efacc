//! Confidence scoring for merged records.
//!
//! The score is source coverage — how many of the queried sources
//! actually contributed fields — discounted for every field the sources
//! disagreed on.
//!
//! Formula: `score = (contributing / queried) * penalty^disagreements`,
//! clamped to `[0, 1]`. Under the weighted policy both terms are sums of
//! per-source reliability weights instead of counts.

/// Multiplier applied once per disagreed field.
pub const DISAGREEMENT_PENALTY: f64 = 0.85;

/// Compute the confidence score for a merged record.
///
/// # Arguments
///
/// * `contributing_weight` — summed weight of sources that returned at
///   least one non-unknown field (count of them under the uniform policy)
/// * `queried_weight` — summed weight of every source queried
/// * `disagreements` — number of fields where sources offered conflicting
///   values
///
/// Zero queried weight (no sources at all) scores 0.0.
pub fn confidence_score(
    contributing_weight: f64,
    queried_weight: f64,
    disagreements: usize,
) -> f64 {
    if queried_weight <= 0.0 {
        return 0.0;
    }
    let coverage = contributing_weight / queried_weight;
    let penalty = DISAGREEMENT_PENALTY.powi(disagreements as i32);
    (coverage * penalty).clamp(0.0, 1.0)
}
