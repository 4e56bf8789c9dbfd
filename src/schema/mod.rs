//! Column layout of the event dataset.
//!
//! Column names are the normalised dataset headers (lowercase, trimmed,
//! underscores for spaces).

use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema, SchemaRef};

/// City the events were recorded in
pub const CITY: &str = "cidade";
/// Cause of admission or death (CID morbidity list label)
pub const CAUSE: &str = "lista_morbidade_cid";
/// Event type label
pub const EVENT_TYPE: &str = "tipo_evento";
/// Male count
pub const MALE: &str = "masculino";
/// Female count
pub const FEMALE: &str = "feminino";
/// Reference year (optional)
pub const YEAR: &str = "ano";

/// Columns every event table must have
pub const REQUIRED_COLUMNS: [&str; 5] = [CITY, CAUSE, EVENT_TYPE, MALE, FEMALE];

/// Canonical Arrow schema of an event table
#[must_use]
pub fn event_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new(CITY, DataType::Utf8, true),
        Field::new(CAUSE, DataType::Utf8, true),
        Field::new(EVENT_TYPE, DataType::Utf8, true),
        Field::new(MALE, DataType::Int64, true),
        Field::new(FEMALE, DataType::Int64, true),
        Field::new(YEAR, DataType::Int32, true),
    ]))
}

/// Names of required columns absent from `schema`
#[must_use]
pub fn missing_columns(schema: &Schema) -> Vec<&'static str> {
    REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|name| schema.index_of(name).is_err())
        .collect()
}
