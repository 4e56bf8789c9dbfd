//! Stages of the IRE computation
//!
//! Each stage is a pure function of its input table. The stages run in the
//! order aggregate, indicators, normalize, score, classify; filtering happens
//! before aggregation in the pipeline.

pub mod aggregate;
pub mod classify;
pub mod indicators;
pub mod normalize;
pub mod score;

pub use aggregate::aggregate_by_cause;
pub use classify::{classify, classify_all};
pub use indicators::{IndicatorTable, compute_indicators, indicators_for};
pub use normalize::{min_max_normalize, normalize};
pub use score::{ire, score};
