//! Async Parquet loading of event tables on tokio

pub mod batch_ops;
pub mod file_ops;

pub use batch_ops::{read_event_batches_async, read_event_records_async};
pub use file_ops::open_parquet_file_async;
