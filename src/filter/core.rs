//! Core filtering functionality for event tables
//!
//! Defines the `BatchFilter` trait used to drop rows from Arrow record batches
//! before they are converted into typed event records.

use arrow::array::{ArrayRef, BooleanArray, StringArray};
use arrow::compute::filter as arrow_filter;
use arrow::datatypes::DataType;
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;

use crate::error::Result;
use crate::utils::arrow::{downcast_array, require_column};

/// Filter a record batch based on a boolean mask
///
/// # Arguments
/// * `batch` - The record batch to filter
/// * `mask` - The boolean mask indicating which rows to keep
///
/// # Returns
/// A new record batch with only rows where mask is true
pub fn filter_record_batch(batch: &RecordBatch, mask: &BooleanArray) -> Result<RecordBatch> {
    if batch.num_rows() != mask.len() {
        return Err(ArrowError::InvalidArgumentError(format!(
            "Mask length ({}) doesn't match batch row count ({})",
            mask.len(),
            batch.num_rows()
        ))
        .into());
    }

    let filtered_columns: Vec<ArrayRef> = batch
        .columns()
        .iter()
        .map(|col| arrow_filter(col, mask))
        .collect::<arrow::error::Result<_>>()?;

    Ok(RecordBatch::try_new(batch.schema(), filtered_columns)?)
}

/// Build a keep-mask from a string column and a per-value predicate
///
/// Null values are passed to the predicate as `None`.
pub fn string_mask<F>(batch: &RecordBatch, column: &str, keep: F) -> Result<BooleanArray>
where
    F: Fn(Option<&str>) -> bool,
{
    let array = require_column(batch, column, &DataType::Utf8)?;
    let strings = downcast_array::<StringArray>(&array, column, "string")?;

    Ok(strings.iter().map(|value| Some(keep(value))).collect())
}

/// Trait for objects that can filter record batches
pub trait BatchFilter: std::fmt::Debug {
    /// Filter a record batch
    fn filter(&self, batch: &RecordBatch) -> Result<RecordBatch>;
}
