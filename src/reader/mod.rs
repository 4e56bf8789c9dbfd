//! Reading event tables from Parquet into typed event records.
//!
//! Column presence and types are checked per batch: a missing required
//! column or a column that cannot be cast is a hard error. Row-level problems
//! are handled by the configured `MalformedRowPolicy`.

use std::fs::File;
use std::path::Path;
use std::time::Instant;

use arrow::array::{Array, ArrayRef, Float64Array, Int32Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::config::MalformedRowPolicy;
use crate::error::{Error, Result};
use crate::filter::BatchFilter;
use crate::models::{EventRecord, EventType};
use crate::schema;
use crate::utils::arrow::{downcast_array, get_column, require_column};
use crate::utils::io::create_projection;
use crate::utils::{
    DEFAULT_BATCH_SIZE, get_batch_size, log_operation_complete, log_operation_start, log_warning,
    validate_file,
};

/// Row counts from one read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReadReport {
    /// Rows seen in the input, after any batch filter
    pub rows_read: usize,
    /// Rows skipped as malformed
    pub rows_dropped: usize,
}

impl ReadReport {
    /// Rows converted to event records
    #[must_use]
    pub const fn rows_kept(&self) -> usize {
        self.rows_read - self.rows_dropped
    }

    fn merge(&mut self, other: Self) {
        self.rows_read += other.rows_read;
        self.rows_dropped += other.rows_dropped;
    }
}

/// Event records read from a table, with the read report
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventDataset {
    pub records: Vec<EventRecord>,
    pub report: ReadReport,
}

/// Typed views over the columns of one batch
struct EventColumns<'a> {
    city: &'a StringArray,
    cause: &'a StringArray,
    event_type: &'a StringArray,
    male: CountColumn<'a>,
    female: CountColumn<'a>,
    year: Option<&'a Int32Array>,
}

impl EventColumns<'_> {
    fn row(&self, idx: usize) -> std::result::Result<EventRecord, String> {
        let city = non_blank(self.city, idx, "city")?;
        let cause = non_blank(self.cause, idx, "cause")?;

        if self.event_type.is_null(idx) {
            return Err("event type is null".to_string());
        }
        let label = self.event_type.value(idx);
        let event_type = EventType::from_label(label)
            .ok_or_else(|| format!("unknown event type label '{label}'"))?;

        let male = self.male.value(idx, "male")?;
        let female = self.female.value(idx, "female")?;

        let record = EventRecord::new(city, cause, event_type, male, female)
            .map_err(|e| e.to_string())?;

        Ok(match self.year {
            Some(years) if years.is_valid(idx) => record.with_year(years.value(idx)),
            _ => record,
        })
    }
}

fn non_blank<'a>(
    array: &'a StringArray,
    idx: usize,
    field: &str,
) -> std::result::Result<&'a str, String> {
    if array.is_null(idx) {
        return Err(format!("{field} is null"));
    }
    let value = array.value(idx);
    if value.trim().is_empty() {
        return Err(format!("{field} is empty"));
    }
    Ok(value)
}

/// A count column, integral or floating
///
/// Floating columns are checked row by row so that fractional or negative
/// values go through the malformed-row policy instead of being truncated.
enum CountColumn<'a> {
    Integer(&'a Int64Array),
    Float(&'a Float64Array),
}

impl<'a> CountColumn<'a> {
    fn new(array: &'a ArrayRef, column: &str) -> Result<Self> {
        if array.data_type() == &DataType::Float64 {
            downcast_array::<Float64Array>(array, column, "float64").map(Self::Float)
        } else {
            downcast_array::<Int64Array>(array, column, "int64").map(Self::Integer)
        }
    }

    fn value(&self, idx: usize, field: &str) -> std::result::Result<u64, String> {
        match self {
            Self::Integer(array) => {
                if array.is_null(idx) {
                    return Err(format!("{field} count is null"));
                }
                let value = array.value(idx);
                u64::try_from(value).map_err(|_| format!("{field} count is negative ({value})"))
            }
            Self::Float(array) => {
                if array.is_null(idx) {
                    return Err(format!("{field} count is null"));
                }
                whole_count(array.value(idx), field)
            }
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn whole_count(value: f64, field: &str) -> std::result::Result<u64, String> {
    if !value.is_finite() {
        return Err(format!("{field} count is not finite ({value})"));
    }
    if value < 0.0 {
        return Err(format!("{field} count is negative ({value})"));
    }
    if value.fract() > 0.0 {
        return Err(format!("{field} count is not a whole number ({value})"));
    }
    if value >= u64::MAX as f64 {
        return Err(format!("{field} count is out of range ({value})"));
    }
    Ok(value as u64)
}

/// Read a count column as Int64, or as Float64 when the source is fractional
fn count_array(batch: &RecordBatch, column: &str) -> Result<ArrayRef> {
    let fractional = batch.schema().field_with_name(column).is_ok_and(|field| {
        field.data_type().is_floating()
            || matches!(
                field.data_type(),
                DataType::Decimal128(..) | DataType::Decimal256(..)
            )
    });
    let target = if fractional {
        DataType::Float64
    } else {
        DataType::Int64
    };
    require_column(batch, column, &target)
}

/// Convert one record batch into event records
///
/// `row_offset` is added to row numbers in warnings and errors so that they
/// refer to the position in the whole table.
pub fn records_from_batch(
    batch: &RecordBatch,
    policy: MalformedRowPolicy,
    row_offset: usize,
) -> Result<(Vec<EventRecord>, ReadReport)> {
    let missing = schema::missing_columns(&batch.schema());
    if !missing.is_empty() {
        return Err(Error::ColumnNotFound {
            column: missing.join(", "),
        });
    }

    let city = require_column(batch, schema::CITY, &DataType::Utf8)?;
    let cause = require_column(batch, schema::CAUSE, &DataType::Utf8)?;
    let event_type = require_column(batch, schema::EVENT_TYPE, &DataType::Utf8)?;
    let male = count_array(batch, schema::MALE)?;
    let female = count_array(batch, schema::FEMALE)?;
    let year = get_column(batch, schema::YEAR, &DataType::Int32, false)?;

    let columns = EventColumns {
        city: downcast_array::<StringArray>(&city, schema::CITY, "string")?,
        cause: downcast_array::<StringArray>(&cause, schema::CAUSE, "string")?,
        event_type: downcast_array::<StringArray>(&event_type, schema::EVENT_TYPE, "string")?,
        male: CountColumn::new(&male, schema::MALE)?,
        female: CountColumn::new(&female, schema::FEMALE)?,
        year: year
            .as_ref()
            .map(|y| downcast_array::<Int32Array>(y, schema::YEAR, "int32"))
            .transpose()?,
    };

    let mut records = Vec::with_capacity(batch.num_rows());
    let mut report = ReadReport {
        rows_read: batch.num_rows(),
        rows_dropped: 0,
    };

    for idx in 0..batch.num_rows() {
        match columns.row(idx) {
            Ok(record) => records.push(record),
            Err(reason) => match policy {
                MalformedRowPolicy::Reject => {
                    return Err(Error::malformed(row_offset + idx, reason));
                }
                MalformedRowPolicy::Drop => {
                    log::warn!("Dropping malformed row {}: {reason}", row_offset + idx);
                    report.rows_dropped += 1;
                }
            },
        }
    }

    Ok((records, report))
}

/// Convert a sequence of batches, numbering rows across batch boundaries
pub fn records_from_batches(
    batches: &[RecordBatch],
    policy: MalformedRowPolicy,
) -> Result<EventDataset> {
    let mut dataset = EventDataset::default();

    for batch in batches {
        let offset = dataset.report.rows_read;
        let (records, report) = records_from_batch(batch, policy, offset)?;
        dataset.records.extend(records);
        dataset.report.merge(report);
    }

    Ok(dataset)
}

/// Read all record batches of a Parquet file
pub fn read_event_batches(path: &Path, batch_size: Option<usize>) -> Result<Vec<RecordBatch>> {
    let start = Instant::now();
    log_operation_start("Reading event table", path);
    validate_file(path)?;

    let file = File::open(path)?;
    let batch_size = batch_size
        .or_else(get_batch_size)
        .unwrap_or(DEFAULT_BATCH_SIZE);
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?.with_batch_size(batch_size);
    let projection = create_projection(
        &schema::event_schema(),
        builder.schema(),
        builder.parquet_schema(),
    );
    let reader = match projection {
        Some(mask) => builder.with_projection(mask),
        None => builder,
    }
    .build()?;

    let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;

    log_operation_complete("read", path, batches.len(), Some(start.elapsed()));
    Ok(batches)
}

/// Read a Parquet event table into typed records
pub fn read_event_records(path: &Path, policy: MalformedRowPolicy) -> Result<EventDataset> {
    let batches = read_event_batches(path, None)?;
    finish_read(path, &batches, policy)
}

/// Read a Parquet event table, applying a batch filter before conversion
///
/// Rows removed by the filter are never validated and do not count as read.
pub fn read_event_records_with_filter(
    path: &Path,
    filter: &dyn BatchFilter,
    policy: MalformedRowPolicy,
) -> Result<EventDataset> {
    let batches = read_event_batches(path, None)?
        .iter()
        .map(|batch| filter.filter(batch))
        .collect::<Result<Vec<_>>>()?;
    finish_read(path, &batches, policy)
}

pub(crate) fn finish_read(
    path: &Path,
    batches: &[RecordBatch],
    policy: MalformedRowPolicy,
) -> Result<EventDataset> {
    let dataset = records_from_batches(batches, policy)?;

    if dataset.report.rows_dropped > 0 {
        log_warning(
            &format!(
                "Dropped {} of {} rows as malformed",
                dataset.report.rows_dropped, dataset.report.rows_read
            ),
            Some(path),
        );
    }
    log::info!(
        "Loaded {} event records from {}",
        dataset.records.len(),
        path.display()
    );

    Ok(dataset)
}
