//! Utilities for working with Arrow arrays.
//!
//! Safe column lookup with type casting, and downcasting with clear errors.

use arrow::array::{Array, ArrayRef};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use log::debug;

use crate::error::{Error, Result};

/// Get a column from a record batch, cast to the expected type
///
/// # Arguments
///
/// * `batch` - The record batch containing the column
/// * `column_name` - The name of the column to extract
/// * `expected_type` - The data type the caller will downcast to
/// * `required` - Whether a missing column is an error or `None`
///
/// # Returns
///
/// * `Ok(Some(ArrayRef))` - The column, converted if its type differed
/// * `Ok(None)` - The column is missing and not required
/// * `Err(Error)` - The column is missing and required, or the cast failed
pub fn get_column(
    batch: &RecordBatch,
    column_name: &str,
    expected_type: &DataType,
    required: bool,
) -> Result<Option<ArrayRef>> {
    let Ok(idx) = batch.schema().index_of(column_name) else {
        if required {
            return Err(Error::ColumnNotFound {
                column: column_name.to_string(),
            });
        }
        debug!("Optional column '{column_name}' not found in record batch");
        return Ok(None);
    };

    let column = batch.column(idx);
    let actual_type = column.data_type();

    if actual_type == expected_type {
        return Ok(Some(column.clone()));
    }

    debug!("Converting column '{column_name}' from {actual_type:?} to {expected_type:?}");

    cast(column, expected_type)
        .map(Some)
        .map_err(|_| Error::ColumnType {
            column: column_name.to_string(),
            expected: format!("{expected_type:?} (found {actual_type:?})"),
        })
}

/// Get a required column, cast to the expected type
pub fn require_column(
    batch: &RecordBatch,
    column_name: &str,
    expected_type: &DataType,
) -> Result<ArrayRef> {
    get_column(batch, column_name, expected_type, true)?.ok_or_else(|| Error::ColumnNotFound {
        column: column_name.to_string(),
    })
}

/// Downcast a column to a specific array type with clear error messages
///
/// # Type Parameters
///
/// * `T` - The concrete array type
///
/// # Arguments
///
/// * `array` - The array to downcast
/// * `column_name` - Column name for the error message
/// * `type_name` - Readable type name for the error message
pub fn downcast_array<'a, T: Array + 'static>(
    array: &'a ArrayRef,
    column_name: &str,
    type_name: &str,
) -> Result<&'a T> {
    array
        .as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| Error::ColumnType {
            column: column_name.to_string(),
            expected: type_name.to_string(),
        })
}
