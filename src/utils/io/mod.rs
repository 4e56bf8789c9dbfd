//! File I/O helpers

pub mod parquet;

pub use self::parquet::{create_projection, write_record_batches};
