//! City scope filtering

use arrow::record_batch::RecordBatch;

use crate::config::Scope;
use crate::error::Result;
use crate::filter::core::{BatchFilter, filter_record_batch, string_mask};
use crate::models::EventRecord;
use crate::schema;

/// Keeps the records that fall inside a scope
#[derive(Debug, Clone)]
pub struct ScopeFilter {
    scope: Scope,
}

impl ScopeFilter {
    #[must_use]
    pub const fn new(scope: Scope) -> Self {
        Self { scope }
    }

    /// Records inside the scope
    #[must_use]
    pub fn apply(&self, records: &[EventRecord]) -> Vec<EventRecord> {
        match &self.scope {
            Scope::AllCities => records.to_vec(),
            Scope::City(_) => records
                .iter()
                .filter(|r| self.scope.contains(&r.city))
                .cloned()
                .collect(),
        }
    }
}

impl BatchFilter for ScopeFilter {
    fn filter(&self, batch: &RecordBatch) -> Result<RecordBatch> {
        if self.scope == Scope::AllCities {
            return Ok(batch.clone());
        }
        let mask = string_mask(batch, schema::CITY, |city| {
            city.is_some_and(|c| self.scope.contains(c))
        })?;
        filter_record_batch(batch, &mask)
    }
}
