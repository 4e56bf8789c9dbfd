use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{ArrayRef, Int32Array, Int64Array, StringArray};
use arrow::record_batch::RecordBatch;
use epi_risk::schema::event_schema;
use epi_risk::utils::io::write_record_batches;
use epi_risk::{EventRecord, EventType};

/// One input row: city, cause, event label, male, female
pub type Row<'a> = (&'a str, &'a str, &'a str, i64, i64);

/// Build a typed event record
#[must_use]
pub fn record(city: &str, cause: &str, event_type: EventType, male: u64, female: u64) -> EventRecord {
    EventRecord::new(city, cause, event_type, male, female).expect("valid test record")
}

/// The two-cause example: A is frequent and mild, B is rare and lethal
#[must_use]
pub fn two_cause_records() -> Vec<EventRecord> {
    vec![
        record("Campo Grande", "A", EventType::Admission, 10, 10),
        record("Campo Grande", "A", EventType::Death, 1, 0),
        record("Campo Grande", "B", EventType::Admission, 2, 2),
        record("Campo Grande", "B", EventType::Death, 1, 1),
    ]
}

/// A small two-city dataset with an excluded cause and a death-only cause
#[must_use]
pub fn sample_rows() -> Vec<Row<'static>> {
    vec![
        ("Campo Grande", "Pneumonia", "Internação", 120, 95),
        ("Campo Grande", "Pneumonia", "Óbito", 14, 11),
        ("Campo Grande", "Septicemia", "Internação", 30, 28),
        ("Campo Grande", "Septicemia", "Óbito", 12, 10),
        ("Campo Grande", "Parto único espontâneo", "Internação", 0, 400),
        ("Campo Grande", "Infarto agudo do miocárdio", "Óbito", 9, 4),
        ("Dourados", "Pneumonia", "Internação", 40, 38),
        ("Dourados", "Pneumonia", "obito", 3, 5),
        ("Dourados", "Fratura do fêmur", "internacao", 10, 25),
        ("Ponta Porã", "Asma", "Internação", 7, 9),
    ]
}

/// Build an event batch with the canonical schema and a constant year
#[must_use]
pub fn event_batch(rows: &[Row<'_>]) -> RecordBatch {
    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.0))),
        Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.1))),
        Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.2))),
        Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.3))),
        Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.4))),
        Arc::new(Int32Array::from(vec![2024; rows.len()])),
    ];
    RecordBatch::try_new(event_schema(), columns).expect("valid event batch")
}

/// Write batches to `dir/name` and return the path
pub fn write_parquet(dir: &Path, name: &str, batches: &[RecordBatch]) -> PathBuf {
    let path = dir.join(name);
    write_record_batches(&path, batches).expect("write test parquet");
    path
}

/// Causes of a slice of risk rows, in order
#[must_use]
pub fn causes(records: &[epi_risk::CauseRiskRecord]) -> Vec<&str> {
    records.iter().map(|r| r.cause.as_str()).collect()
}
