//! End-to-end IRE pipeline
//!
//! A run takes the event records of one scope through exclusion, aggregation,
//! indicator calculation, normalisation, scoring and classification, and
//! returns the full risk table in ranking order.

use std::time::Instant;

use indicatif::{ParallelProgressIterator, ProgressBar};
use rayon::prelude::*;
use serde::Serialize;

use crate::algorithm::risk::{
    aggregate_by_cause, classify_all, compute_indicators, normalize, score,
};
use crate::algorithm::summary;
use crate::config::{RiskConfig, Scope};
use crate::error::Result;
use crate::filter::{ExclusionFilter, ScopeFilter};
use crate::models::{CauseRiskRecord, EventRecord, RiskTable};

/// Everything produced by one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineOutcome {
    /// Scope the table was computed over
    pub scope: Scope,
    /// Risk table in ranking order
    pub table: RiskTable,
    /// Causes with deaths but no admissions; they carry no score
    pub dropped_death_only: Vec<String>,
    /// Records inside the scope before exclusion
    pub records_in_scope: usize,
    /// Records removed by the exclusion filter
    pub records_excluded: usize,
    top_n: usize,
}

impl PipelineOutcome {
    /// The configured number of highest-ranked causes
    #[must_use]
    pub fn top(&self) -> &[CauseRiskRecord] {
        self.table.top(self.top_n)
    }

    #[must_use]
    pub const fn top_n(&self) -> usize {
        self.top_n
    }
}

/// Runs the IRE stages with a fixed configuration
#[derive(Debug, Clone)]
pub struct RiskPipeline {
    config: RiskConfig,
    exclusion: ExclusionFilter,
}

impl RiskPipeline {
    /// Create a pipeline, validating the configuration
    pub fn new(config: RiskConfig) -> Result<Self> {
        config.validate()?;
        let exclusion = ExclusionFilter::from_config(&config);
        Ok(Self { config, exclusion })
    }

    #[must_use]
    pub const fn config(&self) -> &RiskConfig {
        &self.config
    }

    /// Run over the configured scope
    #[must_use]
    pub fn run(&self, records: &[EventRecord]) -> PipelineOutcome {
        self.run_scope(records, &self.config.scope)
    }

    /// Run over an explicit scope, ignoring the configured one
    #[must_use]
    pub fn run_scope(&self, records: &[EventRecord], scope: &Scope) -> PipelineOutcome {
        let start = Instant::now();

        let in_scope = ScopeFilter::new(scope.clone()).apply(records);
        let kept = self.exclusion.apply(&in_scope);
        let records_excluded = in_scope.len() - kept.len();
        log::info!(
            "Scoring {}: {} records in scope, {} excluded",
            scope.name(),
            in_scope.len(),
            records_excluded
        );

        let aggregates = aggregate_by_cause(&kept);
        let joined = compute_indicators(&aggregates);
        log::debug!(
            "{}: {} aggregates, {} causes with indicators",
            scope.name(),
            aggregates.len(),
            joined.indicators.len()
        );

        let normalized = normalize(joined.indicators);
        let scored = score(normalized, &self.config.weights);
        let table = RiskTable::new(classify_all(scored, &self.config.thresholds));

        log::info!(
            "Scored {} causes for {} in {:?}",
            table.len(),
            scope.name(),
            start.elapsed()
        );

        PipelineOutcome {
            scope: scope.clone(),
            table,
            dropped_death_only: joined.dropped_death_only,
            records_in_scope: in_scope.len(),
            records_excluded,
            top_n: self.config.top_n,
        }
    }

    /// One run per city found in the records, in parallel, ordered by city
    #[must_use]
    pub fn score_all_scopes(&self, records: &[EventRecord]) -> Vec<PipelineOutcome> {
        self.score_all_scopes_with_progress(records, &ProgressBar::hidden())
    }

    /// [`Self::score_all_scopes`], advancing `progress` once per city
    #[must_use]
    pub fn score_all_scopes_with_progress(
        &self,
        records: &[EventRecord],
        progress: &ProgressBar,
    ) -> Vec<PipelineOutcome> {
        let cities = summary::cities(records);
        progress.set_length(cities.len() as u64);

        cities
            .into_par_iter()
            .progress_with(progress.clone())
            .map(|city| self.run_scope(records, &Scope::City(city)))
            .collect()
    }
}

/// Run the pipeline once with `config`
pub fn run_pipeline(records: &[EventRecord], config: RiskConfig) -> Result<PipelineOutcome> {
    Ok(RiskPipeline::new(config)?.run(records))
}
