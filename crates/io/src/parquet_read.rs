//! Low-level Parquet reading and column extraction.

use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray, RecordBatch};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Date32Type, Float64Type, Int64Type, TimeUnit};
use chrono::{DateTime, NaiveDateTime, TimeDelta};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::error::IoError;
use crate::time::parse_time;

/// Reads all record batches from a Parquet file.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if the file does not exist, or
/// [`IoError::Parquet`] if the file cannot be opened or read.
pub(crate) fn read_batches(path: &Path) -> Result<Vec<RecordBatch>, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let file = std::fs::File::open(path).map_err(|e| IoError::Parquet {
        reason: e.to_string(),
    })?;

    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let reader = builder.build()?;

    let batches: Vec<RecordBatch> = reader.collect::<Result<Vec<_>, _>>()?;
    Ok(batches)
}

/// Converts a time column to naive UTC timestamps.
///
/// Accepts `Timestamp` of any unit (timezone ignored, values are UTC),
/// `Date32`, `Date64` and `Utf8`. Nulls are rejected.
pub(crate) fn time_column(
    col: &ArrayRef,
    format: Option<&str>,
) -> Result<Vec<NaiveDateTime>, IoError> {
    let null_at = |i: usize| IoError::InvalidTime {
        reason: format!("row {i}: null or out-of-range time value"),
    };

    match col.data_type() {
        DataType::Timestamp(unit, _) => {
            let unit = *unit;
            let raw = cast(col, &DataType::Int64)?;
            raw.as_primitive::<Int64Type>()
                .iter()
                .enumerate()
                .map(|(i, v)| v.and_then(|v| from_epoch(v, &unit)).ok_or_else(|| null_at(i)))
                .collect()
        }
        DataType::Date32 => col
            .as_primitive::<Date32Type>()
            .iter()
            .enumerate()
            .map(|(i, v)| {
                v.and_then(|days| epoch().checked_add_signed(TimeDelta::try_days(i64::from(days))?))
                    .ok_or_else(|| null_at(i))
            })
            .collect(),
        DataType::Date64 => {
            let raw = cast(col, &DataType::Int64)?;
            raw.as_primitive::<Int64Type>()
                .iter()
                .enumerate()
                .map(|(i, v)| {
                    v.and_then(|ms| from_epoch(ms, &TimeUnit::Millisecond))
                        .ok_or_else(|| null_at(i))
                })
                .collect()
        }
        DataType::Utf8 => col
            .as_string::<i32>()
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let s = v.ok_or_else(|| null_at(i))?;
                parse_time(s, format).ok_or_else(|| IoError::InvalidTime {
                    reason: format!("row {i}: cannot parse '{s}'"),
                })
            })
            .collect(),
        other => Err(IoError::Validation {
            count: 1,
            details: format!("unsupported time column type {other}"),
        }),
    }
}

/// Casts a numeric (or numeric-string) column to `f64`; nulls become NaN.
pub(crate) fn value_column(col: &ArrayRef) -> Result<Vec<f64>, IoError> {
    let floats = cast(col, &DataType::Float64)?;
    let arr = floats.as_primitive::<Float64Type>();
    Ok((0..arr.len())
        .map(|i| if arr.is_null(i) { f64::NAN } else { arr.value(i) })
        .collect())
}

fn epoch() -> NaiveDateTime {
    DateTime::UNIX_EPOCH.naive_utc()
}

fn from_epoch(v: i64, unit: &TimeUnit) -> Option<NaiveDateTime> {
    let dt = match unit {
        TimeUnit::Second => DateTime::from_timestamp(v, 0),
        TimeUnit::Millisecond => DateTime::from_timestamp_millis(v),
        TimeUnit::Microsecond => DateTime::from_timestamp_micros(v),
        TimeUnit::Nanosecond => Some(DateTime::from_timestamp_nanos(v)),
    };
    dt.map(|d| d.naive_utc())
}
