//! Cause aggregation
//!
//! Groups event records by (cause, event type) and sums the sex counts.

use rustc_hash::FxHashMap;

use crate::models::{CauseAggregate, EventRecord, EventType};

/// Sum male and female counts per (cause, event type)
///
/// Returns one aggregate per distinct key. Callers must not rely on the
/// order, but it is sorted by cause then event type so repeated runs agree.
#[must_use]
pub fn aggregate_by_cause(records: &[EventRecord]) -> Vec<CauseAggregate> {
    let mut totals: FxHashMap<(&str, EventType), (u64, u64)> = FxHashMap::default();

    for record in records {
        let entry = totals
            .entry((record.cause.as_str(), record.event_type))
            .or_insert((0, 0));
        entry.0 = entry.0.saturating_add(record.male_count);
        entry.1 = entry.1.saturating_add(record.female_count);
    }

    let mut aggregates: Vec<CauseAggregate> = totals
        .into_iter()
        .map(|((cause, event_type), (male_total, female_total))| CauseAggregate {
            cause: cause.to_string(),
            event_type,
            male_total,
            female_total,
        })
        .collect();

    aggregates.sort_by(|a, b| {
        a.cause
            .cmp(&b.cause)
            .then_with(|| a.event_type.cmp(&b.event_type))
    });

    log::debug!(
        "Aggregated {} records into {} (cause, event type) rows",
        records.len(),
        aggregates.len()
    );

    aggregates
}
