//! Indicator calculation
//!
//! Joins the admission and death aggregates per cause and derives frequency,
//! lethality and sex disparity. Admissions anchor the join: a cause with
//! deaths but no admissions is not scored and is reported separately.

use rustc_hash::FxHashMap;

use crate::models::{CauseAggregate, CauseIndicators, EventType};

/// Result of joining admissions and deaths
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IndicatorTable {
    /// One row per cause with at least one admission aggregate, sorted by cause
    pub indicators: Vec<CauseIndicators>,
    /// Causes that only have deaths, sorted
    pub dropped_death_only: Vec<String>,
}

/// Indicators for one cause from its admission counts and death total
///
/// A zero frequency zero-fills both ratios and marks the row as having
/// insufficient data.
#[must_use]
pub fn indicators_for(
    cause: &str,
    male_admissions: u64,
    female_admissions: u64,
    deaths_total: u64,
) -> CauseIndicators {
    let admissions_total = male_admissions.saturating_add(female_admissions);
    let frequency = admissions_total.saturating_add(deaths_total);

    let (lethality, sex_disparity, insufficient_data) = if frequency == 0 {
        (0.0, 0.0, true)
    } else {
        let frequency = frequency as f64;
        (
            deaths_total as f64 / frequency,
            male_admissions.abs_diff(female_admissions) as f64 / frequency,
            false,
        )
    };

    CauseIndicators {
        cause: cause.to_string(),
        admissions_total,
        deaths_total,
        male_total: male_admissions,
        female_total: female_admissions,
        frequency,
        lethality,
        sex_disparity,
        insufficient_data,
    }
}

/// Left join the death totals onto the admission aggregates
#[must_use]
pub fn compute_indicators(aggregates: &[CauseAggregate]) -> IndicatorTable {
    let mut admissions: FxHashMap<&str, (u64, u64)> = FxHashMap::default();
    let mut deaths: FxHashMap<&str, u64> = FxHashMap::default();

    for aggregate in aggregates {
        match aggregate.event_type {
            EventType::Admission => {
                let entry = admissions.entry(aggregate.cause.as_str()).or_insert((0, 0));
                entry.0 = entry.0.saturating_add(aggregate.male_total);
                entry.1 = entry.1.saturating_add(aggregate.female_total);
            }
            EventType::Death => {
                let entry = deaths.entry(aggregate.cause.as_str()).or_insert(0);
                *entry = entry.saturating_add(aggregate.total());
            }
        }
    }

    let mut indicators: Vec<CauseIndicators> = admissions
        .iter()
        .map(|(cause, (male, female))| {
            let deaths_total = deaths.get(cause).copied().unwrap_or(0);
            indicators_for(cause, *male, *female, deaths_total)
        })
        .collect();
    indicators.sort_by(|a, b| a.cause.cmp(&b.cause));

    let mut dropped_death_only: Vec<String> = deaths
        .keys()
        .filter(|cause| !admissions.contains_key(*cause))
        .map(|cause| (*cause).to_string())
        .collect();
    dropped_death_only.sort();

    if !dropped_death_only.is_empty() {
        log::warn!(
            "{} cause(s) have deaths but no admissions and were not scored: {}",
            dropped_death_only.len(),
            dropped_death_only.join(", ")
        );
    }

    let insufficient = indicators.iter().filter(|i| i.insufficient_data).count();
    if insufficient > 0 {
        log::warn!("{insufficient} cause(s) have zero frequency; ratios set to 0");
    }

    IndicatorTable {
        indicators,
        dropped_death_only,
    }
}
