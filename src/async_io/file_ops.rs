//! Async file handling for Parquet inputs

use std::path::Path;

use tokio::fs::{self, File};

use crate::error::Result;

/// Open a Parquet file for reading
///
/// # Errors
/// Returns an error if the path is not a regular file or cannot be opened
pub async fn open_parquet_file_async(path: &Path) -> Result<File> {
    let metadata = fs::metadata(path).await?;
    if !metadata.is_file() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("Not a file: {}", path.display()),
        )
        .into());
    }
    Ok(File::open(path).await?)
}
