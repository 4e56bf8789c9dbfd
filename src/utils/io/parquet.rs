//! Parquet helpers shared by the readers and writers

use std::fs::File;
use std::path::Path;

use arrow::datatypes::Schema;
use arrow::record_batch::RecordBatch;
use itertools::Itertools;
use parquet::arrow::{ArrowWriter, ProjectionMask};
use parquet::schema::types::SchemaDescriptor;

use crate::error::Result;
use crate::utils::logging::{log_operation_complete, log_operation_start, log_warning};

/// Projection mask selecting the columns of `schema` present in the file
///
/// Returns `None` when none of the requested fields exist, in which case the
/// caller reads every column.
#[must_use]
pub fn create_projection(
    schema: &Schema,
    file_schema: &Schema,
    parquet_schema: &SchemaDescriptor,
) -> Option<ProjectionMask> {
    let projection = schema
        .fields()
        .iter()
        .filter_map(|f| file_schema.index_of(f.name()).ok())
        .collect_vec();

    if projection.is_empty() {
        log_warning(
            "No matching fields found in schema projection, reading all columns",
            None,
        );
        None
    } else {
        Some(ProjectionMask::roots(parquet_schema, projection))
    }
}

/// Write record batches sharing one schema to a Parquet file
///
/// An empty slice writes nothing and returns `Ok`.
pub fn write_record_batches(path: &Path, batches: &[RecordBatch]) -> Result<()> {
    let Some(first) = batches.first() else {
        log_warning("No batches to write", Some(path));
        return Ok(());
    };

    log_operation_start("Writing parquet file", path);
    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, first.schema(), None)?;
    for batch in batches {
        writer.write(batch)?;
    }
    writer.close()?;

    log_operation_complete(
        "wrote",
        path,
        batches.iter().map(RecordBatch::num_rows).sum(),
        None,
    );
    Ok(())
}
