//! Descriptive summaries of an event dataset
//!
//! These are the plain totals shown next to the risk table: sex split per
//! event type, event type shares, leading causes and a cross-city comparison
//! of the leading causes. All outputs are sorted so repeated runs agree.

use std::cmp::Ordering;

use itertools::Itertools;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::config::Scope;
use crate::filter::ScopeFilter;
use crate::models::{EventRecord, EventType};

/// Number of leading causes compared across cities
pub const DEFAULT_COMPARISON_TOP: usize = 5;

/// Male and female totals for one event type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SexTotals {
    pub event_type: EventType,
    pub male: u64,
    pub female: u64,
}

impl SexTotals {
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.male.saturating_add(self.female)
    }
}

/// Total events of one type and their share of all events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventShare {
    pub event_type: EventType,
    pub total: u64,
    /// Fraction of all events in [0, 1]; 0 when there are no events
    pub share: f64,
}

/// Totals for one cause within one event type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CauseTotal {
    pub cause: String,
    pub male: u64,
    pub female: u64,
    pub total: u64,
}

/// Total for one cause in one city
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityCauseTotal {
    pub city: String,
    pub cause: String,
    pub total: u64,
}

/// Leading causes across all cities and how each city contributes to them
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CauseComparison {
    /// Leading causes in ranking order
    pub causes: Vec<String>,
    /// Per-city totals, ordered by cause rank then city
    pub rows: Vec<CityCauseTotal>,
}

/// Sorted distinct cities
#[must_use]
pub fn cities(records: &[EventRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.city.as_str())
        .sorted_unstable()
        .dedup()
        .map(ToString::to_string)
        .collect()
}

/// Male and female totals per event type present in the data
#[must_use]
pub fn sex_by_event_type(records: &[EventRecord]) -> Vec<SexTotals> {
    let mut totals: FxHashMap<EventType, (u64, u64)> = FxHashMap::default();
    for record in records {
        let entry = totals.entry(record.event_type).or_insert((0, 0));
        entry.0 = entry.0.saturating_add(record.male_count);
        entry.1 = entry.1.saturating_add(record.female_count);
    }

    totals
        .into_iter()
        .map(|(event_type, (male, female))| SexTotals {
            event_type,
            male,
            female,
        })
        .sorted_by_key(|t| t.event_type)
        .collect()
}

/// Event totals per type with their share of all events
#[must_use]
pub fn event_type_shares(records: &[EventRecord]) -> Vec<EventShare> {
    let by_type = sex_by_event_type(records);
    let grand_total = by_type
        .iter()
        .map(SexTotals::total)
        .fold(0u64, u64::saturating_add);

    by_type
        .iter()
        .map(|t| EventShare {
            event_type: t.event_type,
            total: t.total(),
            share: if grand_total == 0 {
                0.0
            } else {
                t.total() as f64 / grand_total as f64
            },
        })
        .collect()
}

fn by_total_then_cause(a: &CauseTotal, b: &CauseTotal) -> Ordering {
    b.total.cmp(&a.total).then_with(|| a.cause.cmp(&b.cause))
}

/// The `n` causes with the most events of `event_type`
///
/// Ties are broken by cause label, ascending.
#[must_use]
pub fn top_causes(records: &[EventRecord], event_type: EventType, n: usize) -> Vec<CauseTotal> {
    let mut totals: FxHashMap<&str, (u64, u64)> = FxHashMap::default();
    for record in records.iter().filter(|r| r.event_type == event_type) {
        let entry = totals.entry(record.cause.as_str()).or_insert((0, 0));
        entry.0 = entry.0.saturating_add(record.male_count);
        entry.1 = entry.1.saturating_add(record.female_count);
    }

    totals
        .into_iter()
        .map(|(cause, (male, female))| CauseTotal {
            cause: cause.to_string(),
            male,
            female,
            total: male.saturating_add(female),
        })
        .sorted_by(by_total_then_cause)
        .take(n)
        .collect()
}

/// Rank the leading causes over all cities, then total them per city
///
/// Cities with no events for a leading cause get no row for it.
#[must_use]
pub fn compare_top_causes(
    records: &[EventRecord],
    event_type: EventType,
    n: usize,
) -> CauseComparison {
    let causes: Vec<String> = top_causes(records, event_type, n)
        .into_iter()
        .map(|c| c.cause)
        .collect();
    let rank: FxHashMap<&str, usize> = causes
        .iter()
        .enumerate()
        .map(|(idx, cause)| (cause.as_str(), idx))
        .collect();

    let mut totals: FxHashMap<(&str, &str), u64> = FxHashMap::default();
    for record in records
        .iter()
        .filter(|r| r.event_type == event_type && rank.contains_key(r.cause.as_str()))
    {
        let entry = totals
            .entry((record.city.as_str(), record.cause.as_str()))
            .or_insert(0);
        *entry = entry.saturating_add(record.total());
    }

    let rows = totals
        .into_iter()
        .sorted_by(|((city_a, cause_a), _), ((city_b, cause_b), _)| {
            rank[cause_a]
                .cmp(&rank[cause_b])
                .then_with(|| city_a.cmp(city_b))
        })
        .map(|((city, cause), total)| CityCauseTotal {
            city: city.to_string(),
            cause: cause.to_string(),
            total,
        })
        .collect();

    CauseComparison { causes, rows }
}

/// Totals for one scope plus cross-city comparisons over the whole dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub scope: Scope,
    pub sex: Vec<SexTotals>,
    pub shares: Vec<EventShare>,
    pub top_admissions: Vec<CauseTotal>,
    pub top_deaths: Vec<CauseTotal>,
    /// Leading admission causes over all cities, whatever the scope
    pub admission_comparison: CauseComparison,
    /// Leading death causes over all cities, whatever the scope
    pub death_comparison: CauseComparison,
}

impl DatasetSummary {
    /// Summarise `scope` with its `top` leading causes, and compare the
    /// `compare_top` leading causes of the whole dataset across cities
    #[must_use]
    pub fn new(records: &[EventRecord], scope: Scope, top: usize, compare_top: usize) -> Self {
        let in_scope = ScopeFilter::new(scope.clone()).apply(records);

        Self {
            sex: sex_by_event_type(&in_scope),
            shares: event_type_shares(&in_scope),
            top_admissions: top_causes(&in_scope, EventType::Admission, top),
            top_deaths: top_causes(&in_scope, EventType::Death, top),
            admission_comparison: compare_top_causes(records, EventType::Admission, compare_top),
            death_comparison: compare_top_causes(records, EventType::Death, compare_top),
            scope,
        }
    }
}
