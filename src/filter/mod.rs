//! Filtering of event records and event tables
//!
//! Filters work on typed `EventRecord` slices and, through the `BatchFilter`
//! trait, on Arrow record batches read from disk.

pub mod core;
pub mod exclusion;
pub mod scope;

pub use self::core::{BatchFilter, filter_record_batch};
pub use exclusion::ExclusionFilter;
pub use scope::ScopeFilter;
