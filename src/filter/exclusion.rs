//! Cause exclusion filtering
//!
//! Removes causes that are routine care rather than epidemiological risks
//! (childbirth, contraception, chromosomal anomalies) before aggregation.

use arrow::record_batch::RecordBatch;
use smallvec::SmallVec;

use crate::config::{DEFAULT_EXCLUSION_PATTERNS, RiskConfig};
use crate::error::Result;
use crate::filter::core::{BatchFilter, filter_record_batch, string_mask};
use crate::models::EventRecord;
use crate::schema;

/// Drops records whose cause contains any exclusion pattern, ignoring case
#[derive(Debug, Clone)]
pub struct ExclusionFilter {
    /// Lowercased patterns
    patterns: SmallVec<[String; 4]>,
}

impl Default for ExclusionFilter {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUSION_PATTERNS)
    }
}

impl ExclusionFilter {
    /// Create a filter from a list of substrings
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            patterns: patterns
                .into_iter()
                .map(|p| p.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Create a filter from the configured patterns
    #[must_use]
    pub fn from_config(config: &RiskConfig) -> Self {
        Self::new(&config.exclusion_patterns)
    }

    /// Whether a cause label matches any pattern
    #[must_use]
    pub fn is_excluded(&self, cause: &str) -> bool {
        if self.patterns.is_empty() {
            return false;
        }
        let cause = cause.to_lowercase();
        self.patterns.iter().any(|p| cause.contains(p.as_str()))
    }

    /// Keep the records whose cause is not excluded
    #[must_use]
    pub fn apply(&self, records: &[EventRecord]) -> Vec<EventRecord> {
        let kept: Vec<EventRecord> = records
            .iter()
            .filter(|r| !self.is_excluded(&r.cause))
            .cloned()
            .collect();

        log::debug!(
            "Exclusion filter kept {} of {} records",
            kept.len(),
            records.len()
        );

        kept
    }
}

impl BatchFilter for ExclusionFilter {
    fn filter(&self, batch: &RecordBatch) -> Result<RecordBatch> {
        // Null causes are kept here and rejected later as malformed rows
        let mask = string_mask(batch, schema::CAUSE, |cause| {
            cause.is_none_or(|c| !self.is_excluded(c))
        })?;
        filter_record_batch(batch, &mask)
    }
}
