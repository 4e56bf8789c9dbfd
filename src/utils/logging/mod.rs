//! Logging, progress tracking and terminal tables

pub mod console;
pub mod log;
pub mod progress;

pub use self::log::{log_operation_complete, log_operation_start, log_warning};
pub use progress::{create_main_progress_bar, create_spinner, finish_progress_bar};
