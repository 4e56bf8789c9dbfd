//! Algorithms over event records: the IRE stages and descriptive summaries

pub mod risk;
pub mod summary;
