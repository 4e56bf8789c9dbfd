//! Async batch reading of event tables

use std::path::Path;

use arrow::record_batch::RecordBatch;
use futures::TryStreamExt;
use parquet::arrow::async_reader::ParquetRecordBatchStreamBuilder;

use super::file_ops::open_parquet_file_async;
use crate::config::MalformedRowPolicy;
use crate::error::Result;
use crate::reader::{EventDataset, finish_read};
use crate::schema;
use crate::utils::io::create_projection;
use crate::utils::{DEFAULT_BATCH_SIZE, get_batch_size, log_operation_complete, log_operation_start};

/// Stream a Parquet file into record batches
///
/// # Arguments
/// * `path` - Path to the Parquet file
/// * `batch_size` - Rows per batch; falls back to `PARQUET_BATCH_SIZE`, then the default
pub async fn read_event_batches_async(
    path: &Path,
    batch_size: Option<usize>,
) -> Result<Vec<RecordBatch>> {
    let start = std::time::Instant::now();
    log_operation_start("Reading event table asynchronously", path);

    let file = open_parquet_file_async(path).await?;

    let batch_size = batch_size
        .or_else(get_batch_size)
        .unwrap_or(DEFAULT_BATCH_SIZE);

    let builder = ParquetRecordBatchStreamBuilder::new(file)
        .await?
        .with_batch_size(batch_size);
    let projection = create_projection(
        &schema::event_schema(),
        builder.schema(),
        builder.parquet_schema(),
    );
    let stream = match projection {
        Some(mask) => builder.with_projection(mask),
        None => builder,
    }
    .build()?;

    let batches = stream.try_collect::<Vec<_>>().await?;

    log_operation_complete("read", path, batches.len(), Some(start.elapsed()));

    Ok(batches)
}

/// Read a Parquet event table into typed records without blocking the runtime
pub async fn read_event_records_async(
    path: &Path,
    policy: MalformedRowPolicy,
) -> Result<EventDataset> {
    let batches = read_event_batches_async(path, None).await?;
    finish_read(path, &batches, policy)
}
