//! Risk tier classification

use crate::config::TierThresholds;
use crate::models::{CauseRiskRecord, RiskTier, ScoredCause};

/// Tier for an IRE value; both lower bounds are inclusive
#[must_use]
pub fn classify(ire: f64, thresholds: &TierThresholds) -> RiskTier {
    if ire >= thresholds.high {
        RiskTier::High
    } else if ire >= thresholds.medium {
        RiskTier::Medium
    } else {
        RiskTier::Low
    }
}

/// Attach a tier to every scored cause
#[must_use]
pub fn classify_all(scored: Vec<ScoredCause>, thresholds: &TierThresholds) -> Vec<CauseRiskRecord> {
    scored
        .into_iter()
        .map(|s| {
            let tier = classify(s.ire, thresholds);
            CauseRiskRecord::from_scored(s, tier)
        })
        .collect()
}
