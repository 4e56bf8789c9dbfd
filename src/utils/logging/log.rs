//! Standard log lines for file operations

use std::path::Path;
use std::time::Duration;

/// Log the start of an operation on a path
pub fn log_operation_start(operation: &str, path: &Path) {
    log::info!("{} {}", operation, path.display());
}

/// Log a completed operation with the number of items handled
///
/// # Arguments
/// * `operation` - Past-tense verb, e.g. "read" or "wrote"
/// * `path` - File the operation worked on
/// * `items` - Batches or rows handled
/// * `elapsed` - Optional elapsed time
pub fn log_operation_complete(
    operation: &str,
    path: &Path,
    items: usize,
    elapsed: Option<Duration>,
) {
    match elapsed {
        Some(duration) => log::info!(
            "Successfully {} {} items at {} in {:?}",
            operation,
            items,
            path.display(),
            duration
        ),
        None => log::info!(
            "Successfully {} {} items at {}",
            operation,
            items,
            path.display()
        ),
    }
}

/// Log a warning, optionally tied to a path
pub fn log_warning(message: &str, path: Option<&Path>) {
    match path {
        Some(path) => log::warn!("{}: {}", message, path.display()),
        None => log::warn!("{message}"),
    }
}
