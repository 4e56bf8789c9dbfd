use epi_risk::async_io::read_event_batches_async;
use epi_risk::{MalformedRowPolicy, read_event_records, read_event_records_async};

use crate::utils::{event_batch, sample_rows, write_parquet};

#[tokio::test]
async fn test_async_read_matches_sync_read() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_parquet(dir.path(), "events.parquet", &[event_batch(&sample_rows())]);

    let sync = read_event_records(&input, MalformedRowPolicy::Reject).unwrap();
    let async_read = read_event_records_async(&input, MalformedRowPolicy::Reject)
        .await
        .unwrap();

    assert_eq!(sync, async_read);
}

#[tokio::test]
async fn test_async_batch_size() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_parquet(dir.path(), "events.parquet", &[event_batch(&sample_rows())]);

    let batches = read_event_batches_async(&input, Some(4)).await.unwrap();
    assert_eq!(batches.len(), 3);
    assert_eq!(batches.iter().map(|b| b.num_rows()).sum::<usize>(), 10);
}

#[tokio::test]
async fn test_async_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result =
        read_event_records_async(&dir.path().join("nope.parquet"), MalformedRowPolicy::Drop).await;
    assert!(result.is_err());
}
