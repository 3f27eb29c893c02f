//! Post-processing shared by both input modes: normalization, then
//! threshold, scale and top-N cap.

use crate::weights::{clamp_weight, WeightMap};

/// Rescales so the largest weight is exactly 1.0, but only when the largest
/// weight exceeds 1.0. Already fractional maps come back unchanged.
pub fn normalize(weights: &WeightMap) -> WeightMap {
    match weights.max_weight() {
        Some(max) if max > 1.0 => weights.map_weights(|weight| weight / max),
        _ => weights.clone(),
    }
}

/// Drops weights below `min_freq`, multiplies the rest by `scale` and keeps
/// at most `max_terms` of the heaviest.
///
/// Equal weights at the cut-off are kept in ascending term order.
///
/// # Panics
///
/// If `max_terms` is zero, `scale` is not a positive finite number, or
/// `min_freq` is negative or NaN.
#[tracing::instrument(skip(weights), fields(terms = weights.len()))]
pub fn apply(weights: &WeightMap, min_freq: f64, scale: f64, max_terms: usize) -> WeightMap {
    assert!(max_terms > 0, "max_terms must be positive");
    assert!(
        scale.is_finite() && scale > 0.0,
        "scale must be a positive finite number, got {scale}"
    );
    assert!(min_freq >= 0.0, "min_freq must be non-negative, got {min_freq}");

    let filtered: Vec<(&str, f64)> = weights
        .iter()
        .filter(|(_, weight)| *weight >= min_freq)
        .collect();

    if filtered.is_empty() {
        tracing::debug!("nothing at or above the threshold");
        return WeightMap::new();
    }

    let mut scaled: Vec<(&str, f64)> = filtered
        .into_iter()
        .map(|(term, weight)| (term, clamp_weight(weight * scale)))
        .collect();

    if scaled.len() > max_terms {
        scaled.sort_by(|a, b| b.1.total_cmp(&a.1));
        scaled.truncate(max_terms);
    }

    scaled.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::{apply, normalize};
    use crate::weights::WeightMap;

    fn map(entries: &[(&str, f64)]) -> WeightMap {
        entries.iter().copied().collect()
    }

    #[test]
    fn normalize_divides_by_max() {
        let normalized = normalize(&map(&[("a", 801.0), ("b", 400.5)]));
        assert_eq!(normalized, map(&[("a", 1.0), ("b", 0.5)]));
    }

    #[test]
    fn normalize_leaves_fractions_alone() {
        let input = map(&[("a", 0.5)]);
        assert_eq!(normalize(&input), input);

        let input = map(&[("a", 1.0), ("b", 0.2)]);
        assert_eq!(normalize(&input), input);
        assert!(normalize(&WeightMap::new()).is_empty());
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize(&map(&[("a", 3.0), ("b", 2.0), ("c", 1.0)]));
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn threshold_is_inclusive() {
        let out = apply(&map(&[("a", 1.0), ("b", 0.4)]), 0.5, 1.0, 10);
        assert_eq!(out, map(&[("a", 1.0)]));

        let out = apply(&map(&[("a", 1.0), ("b", 0.5)]), 0.5, 1.0, 10);
        assert_eq!(out.get("b"), Some(0.5));
    }

    #[test]
    fn scale_then_cap() {
        let out = apply(&map(&[("a", 1.0), ("b", 0.9), ("c", 0.8)]), 0.0, 2.0, 2);
        assert_eq!(out, map(&[("a", 2.0), ("b", 1.8)]));
    }

    #[test]
    fn normalize_never_loses_tiny_terms() {
        let normalized = normalize(&crate::parser::parse("big 1e308\ntiny 1e-300"));
        assert_eq!(normalized.len(), 2);
        assert_eq!(normalized.get("big"), Some(1.0));
        assert_eq!(normalized.get("tiny"), Some(f64::MIN_POSITIVE));
    }

    #[test]
    fn scaling_never_loses_the_top_term() {
        let out = apply(&map(&[("a", 1e308), ("b", 1.0)]), 0.0, 10.0, 5);
        assert_eq!(out, map(&[("a", f64::MAX), ("b", 10.0)]));

        let top = apply(&map(&[("a", 1e308), ("b", 1.0)]), 0.0, 10.0, 1);
        assert!(top.contains("a"));
    }

    #[test]
    fn everything_filtered() {
        assert!(apply(&map(&[("a", 0.1)]), 0.5, 2.0, 5).is_empty());
    }

    #[test]
    fn cap_ties_keep_lexical_order() {
        let out = apply(
            &map(&[("d", 0.5), ("c", 0.5), ("b", 0.5), ("a", 1.0)]),
            0.0,
            1.0,
            3,
        );
        assert_eq!(out, map(&[("a", 1.0), ("b", 0.5), ("c", 0.5)]));
    }

    #[test]
    #[should_panic(expected = "max_terms")]
    fn zero_max_terms_panics() {
        apply(&map(&[("a", 1.0)]), 0.0, 1.0, 0);
    }

    #[test]
    #[should_panic(expected = "scale")]
    fn non_positive_scale_panics() {
        apply(&map(&[("a", 1.0)]), 0.0, 0.0, 1);
    }

    #[test]
    #[should_panic(expected = "min_freq")]
    fn negative_threshold_panics() {
        apply(&map(&[("a", 1.0)]), -0.1, 1.0, 1);
    }
}
