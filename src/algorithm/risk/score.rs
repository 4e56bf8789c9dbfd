//! Weighted IRE score

use crate::config::ScoreWeights;
use crate::models::{IndicatorNorms, NormalizedCause, ScoredCause};

/// Composite index: the weighted sum of the normalised indicators
#[must_use]
pub fn ire(norms: &IndicatorNorms, weights: &ScoreWeights) -> f64 {
    weights.frequency * norms.freq_norm
        + weights.lethality * norms.lethal_norm
        + weights.sex_disparity * norms.sex_norm
}

/// Score every normalised cause
#[must_use]
pub fn score(normalized: Vec<NormalizedCause>, weights: &ScoreWeights) -> Vec<ScoredCause> {
    normalized
        .into_iter()
        .map(|n| ScoredCause {
            ire: ire(&n.norms, weights),
            indicators: n.indicators,
            norms: n.norms,
        })
        .collect()
}
