//! Domain models for the risk pipeline
//!
//! Input event records, the per-cause aggregates built from them, and the
//! indicator and risk rows produced by the later pipeline stages.

pub mod aggregate;
pub mod event;
pub mod risk;

// Re-export commonly used types
pub use aggregate::CauseAggregate;
pub use event::{EventRecord, EventType};
pub use risk::{
    CauseIndicators, CauseRiskRecord, IndicatorNorms, NormalizedCause, RiskTable, RiskTier,
    ScoredCause, rank_order,
};
