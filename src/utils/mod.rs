//! Shared helpers: Arrow column access, Parquet I/O, logging and progress

pub mod arrow;
pub mod io;
pub mod logging;

use std::path::Path;

use crate::error::Result;

pub use logging::{log_operation_complete, log_operation_start, log_warning};

/// Default batch size for Parquet reading
pub const DEFAULT_BATCH_SIZE: usize = 16384;

/// Batch size from the `PARQUET_BATCH_SIZE` environment variable, if set
#[must_use]
pub fn get_batch_size() -> Option<usize> {
    std::env::var("PARQUET_BATCH_SIZE")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
}

/// Validates that a path exists and is a regular file
///
/// # Errors
/// Returns an IO error if the file does not exist or is a directory
pub fn validate_file(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("File does not exist: {}", path.display()),
        )
        .into());
    }
    Ok(())
}
