//! Per-cause aggregates

use serde::{Deserialize, Serialize};

use super::event::EventType;

/// Summed sex counts for one (cause, event type) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CauseAggregate {
    pub cause: String,
    pub event_type: EventType,
    pub male_total: u64,
    pub female_total: u64,
}

impl CauseAggregate {
    /// Combined total for both sexes
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.male_total.saturating_add(self.female_total)
    }
}
