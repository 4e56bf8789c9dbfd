//! Arrow utilities

pub mod array_utils;

pub use array_utils::{downcast_array, get_column, require_column};
