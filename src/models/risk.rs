//! Per-cause risk indicators, scores and the output risk table

use std::cmp::Ordering;
use std::fmt;

use arrow::datatypes::FieldRef;
use arrow::record_batch::RecordBatch;
use serde::{Deserialize, Serialize};
use serde_arrow::schema::{SchemaLike, TracingOptions};

use crate::error::Result;

/// Ordinal risk classification derived from the IRE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low Risk",
            Self::Medium => "Medium Risk",
            Self::High => "High Risk",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw indicators for one cause, after joining admissions and deaths
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CauseIndicators {
    pub cause: String,
    pub admissions_total: u64,
    pub deaths_total: u64,
    /// Male admissions
    pub male_total: u64,
    /// Female admissions
    pub female_total: u64,
    /// Admissions plus deaths
    pub frequency: u64,
    pub lethality: f64,
    pub sex_disparity: f64,
    /// Set when frequency is zero and the ratios were zero-filled
    pub insufficient_data: bool,
}

/// Min-max normalised indicators, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct IndicatorNorms {
    pub freq_norm: f64,
    pub lethal_norm: f64,
    pub sex_norm: f64,
}

/// Indicators together with their normalised values
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedCause {
    pub indicators: CauseIndicators,
    pub norms: IndicatorNorms,
}

/// A normalised cause with its composite IRE score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCause {
    pub indicators: CauseIndicators,
    pub norms: IndicatorNorms,
    pub ire: f64,
}

/// Terminal pipeline row: everything known about one cause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CauseRiskRecord {
    pub cause: String,
    pub admissions_total: u64,
    pub deaths_total: u64,
    pub male_total: u64,
    pub female_total: u64,
    pub frequency: u64,
    pub lethality: f64,
    pub sex_disparity: f64,
    pub freq_norm: f64,
    pub lethal_norm: f64,
    pub sex_norm: f64,
    pub ire: f64,
    pub tier: RiskTier,
    pub insufficient_data: bool,
}

impl CauseRiskRecord {
    /// Build the terminal row from a scored cause and its tier
    #[must_use]
    pub fn from_scored(scored: ScoredCause, tier: RiskTier) -> Self {
        let ScoredCause {
            indicators,
            norms,
            ire,
        } = scored;

        Self {
            cause: indicators.cause,
            admissions_total: indicators.admissions_total,
            deaths_total: indicators.deaths_total,
            male_total: indicators.male_total,
            female_total: indicators.female_total,
            frequency: indicators.frequency,
            lethality: indicators.lethality,
            sex_disparity: indicators.sex_disparity,
            freq_norm: norms.freq_norm,
            lethal_norm: norms.lethal_norm,
            sex_norm: norms.sex_norm,
            ire,
            tier,
            insufficient_data: indicators.insufficient_data,
        }
    }
}

/// Ranking order: IRE descending, then cause ascending
#[must_use]
pub fn rank_order(a: &CauseRiskRecord, b: &CauseRiskRecord) -> Ordering {
    b.ire.total_cmp(&a.ire).then_with(|| a.cause.cmp(&b.cause))
}

/// Flat Arrow row; the tier is stored by label
#[derive(Debug, Serialize, Deserialize)]
struct RiskRow {
    cause: String,
    admissions_total: u64,
    deaths_total: u64,
    male_total: u64,
    female_total: u64,
    frequency: u64,
    lethality: f64,
    sex_disparity: f64,
    freq_norm: f64,
    lethal_norm: f64,
    sex_norm: f64,
    ire: f64,
    tier: String,
    insufficient_data: bool,
}

impl From<&CauseRiskRecord> for RiskRow {
    fn from(record: &CauseRiskRecord) -> Self {
        Self {
            cause: record.cause.clone(),
            admissions_total: record.admissions_total,
            deaths_total: record.deaths_total,
            male_total: record.male_total,
            female_total: record.female_total,
            frequency: record.frequency,
            lethality: record.lethality,
            sex_disparity: record.sex_disparity,
            freq_norm: record.freq_norm,
            lethal_norm: record.lethal_norm,
            sex_norm: record.sex_norm,
            ire: record.ire,
            tier: record.tier.label().to_string(),
            insufficient_data: record.insufficient_data,
        }
    }
}

/// The risk table for one scope, kept in ranking order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RiskTable {
    records: Vec<CauseRiskRecord>,
}

impl RiskTable {
    /// Create a table; rows are put into ranking order
    #[must_use]
    pub fn new(mut records: Vec<CauseRiskRecord>) -> Self {
        records.sort_by(rank_order);
        Self { records }
    }

    /// All rows, highest IRE first
    #[must_use]
    pub fn records(&self) -> &[CauseRiskRecord] {
        &self.records
    }

    /// The `n` highest-ranked causes
    #[must_use]
    pub fn top(&self, n: usize) -> &[CauseRiskRecord] {
        &self.records[..n.min(self.records.len())]
    }

    /// Look up a cause by its exact label
    #[must_use]
    pub fn get(&self, cause: &str) -> Option<&CauseRiskRecord> {
        self.records.iter().find(|r| r.cause == cause)
    }

    /// Rows in the given tier, in ranking order
    pub fn in_tier(&self, tier: RiskTier) -> impl Iterator<Item = &CauseRiskRecord> {
        self.records.iter().filter(move |r| r.tier == tier)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Convert the table to an Arrow record batch
    pub fn to_record_batch(&self) -> Result<RecordBatch> {
        let options = TracingOptions::default().strings_as_large_utf8(false);
        let fields = Vec::<FieldRef>::from_type::<RiskRow>(options)?;
        let rows: Vec<RiskRow> = self.records.iter().map(RiskRow::from).collect();
        Ok(serde_arrow::to_record_batch(&fields, &rows)?)
    }

    /// Serialize the rows as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.records)?)
    }
}
