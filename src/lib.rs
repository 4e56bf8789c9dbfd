//! Epidemiological Risk Index (IRE) scoring for public-health records.
//!
//! Reads admission and death counts per city, cause and sex from Parquet,
//! removes routine-care causes, and ranks the remaining causes by a weighted
//! index of frequency, lethality and sex disparity.

pub mod algorithm;
pub mod async_io;
pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod pipeline;
pub mod reader;
pub mod schema;
pub mod utils;
pub mod writer;

// Core types
pub use config::{MalformedRowPolicy, RiskConfig, Scope, ScoreWeights, TierThresholds};
pub use error::{Error, Result};
pub use models::{CauseRiskRecord, EventRecord, EventType, RiskTable, RiskTier};
pub use pipeline::{PipelineOutcome, RiskPipeline, run_pipeline};

// Arrow types
pub use arrow::record_batch::RecordBatch;

// Filtering
pub use filter::{BatchFilter, ExclusionFilter, ScopeFilter};

// I/O
pub use async_io::read_event_records_async;
pub use reader::{
    EventDataset, ReadReport, read_event_records, read_event_records_with_filter,
    records_from_batch, records_from_batches,
};
pub use writer::{write_risk_table_json, write_risk_table_parquet};
