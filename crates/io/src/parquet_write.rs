//! Low-level Parquet column building.

use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, RecordBatch, StringArray, TimestampMicrosecondArray};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use chrono::NaiveDateTime;
use kairos_timeseries::{ForecastFrame, TimeSeriesData};
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;

use crate::error::IoError;

fn time_type() -> DataType {
    DataType::Timestamp(TimeUnit::Microsecond, None)
}

fn micros(times: &[NaiveDateTime]) -> TimestampMicrosecondArray {
    TimestampMicrosecondArray::from(
        times
            .iter()
            .map(|t| t.and_utc().timestamp_micros())
            .collect::<Vec<_>>(),
    )
}

/// Builds the long-format Arrow schema for forecast output.
///
/// `fcst_lower` and `fcst_upper` are nullable; history rows carry nulls.
pub(crate) fn forecast_schema() -> Schema {
    Schema::new(vec![
        Field::new("series", DataType::Utf8, false),
        Field::new("time", time_type(), false),
        Field::new("fcst", DataType::Float64, false),
        Field::new("fcst_lower", DataType::Float64, true),
        Field::new("fcst_upper", DataType::Float64, true),
    ])
}

/// Converts one [`ForecastFrame`] into an Arrow [`RecordBatch`].
pub(crate) fn frame_to_record_batch(
    frame: &ForecastFrame,
    schema: &Schema,
) -> Result<RecordBatch, IoError> {
    let rows = frame.rows();
    let times: Vec<NaiveDateTime> = rows.iter().map(|r| r.time).collect();

    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(vec![frame.name(); rows.len()])),
        Arc::new(micros(&times)),
        Arc::new(Float64Array::from(
            rows.iter().map(|r| r.fcst).collect::<Vec<_>>(),
        )),
        Arc::new(Float64Array::from(
            rows.iter().map(|r| r.fcst_lower).collect::<Vec<_>>(),
        )),
        Arc::new(Float64Array::from(
            rows.iter().map(|r| r.fcst_upper).collect::<Vec<_>>(),
        )),
    ];

    Ok(RecordBatch::try_new(Arc::new(schema.clone()), columns)?)
}

/// Builds the wide Arrow schema for a [`TimeSeriesData`]: `time` then one
/// `Float64` column per series.
pub(crate) fn timeseries_schema(data: &TimeSeriesData) -> Schema {
    let mut fields = vec![Field::new("time", time_type(), false)];
    fields.extend(
        data.names()
            .iter()
            .map(|name| Field::new(name, DataType::Float64, false)),
    );
    Schema::new(fields)
}

/// Converts a [`TimeSeriesData`] into a single wide [`RecordBatch`].
pub(crate) fn timeseries_to_record_batch(
    data: &TimeSeriesData,
    schema: &Schema,
) -> Result<RecordBatch, IoError> {
    let mut columns: Vec<ArrayRef> = vec![Arc::new(micros(data.time()))];
    for col in data.values().columns() {
        columns.push(Arc::new(Float64Array::from(col.to_vec())));
    }
    Ok(RecordBatch::try_new(Arc::new(schema.clone()), columns)?)
}

/// Writes a sequence of [`RecordBatch`]es to a Parquet file at `path`.
///
/// # Errors
///
/// Returns [`IoError::Parquet`] if file creation, batch writing, or file
/// finalisation fails.
pub(crate) fn write_batches(
    path: &Path,
    batches: &[RecordBatch],
    schema: &Schema,
    props: WriterProperties,
) -> Result<(), IoError> {
    let file = std::fs::File::create(path).map_err(|e| IoError::Parquet {
        reason: format!("{}: {e}", path.display()),
    })?;
    let mut writer = ArrowWriter::try_new(file, Arc::new(schema.clone()), Some(props))?;

    for batch in batches {
        writer.write(batch)?;
    }

    writer.close()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use arrow::array::{Array, AsArray};
    use arrow::datatypes::Float64Type;
    use chrono::{NaiveDate, TimeDelta};
    use kairos_timeseries::ForecastRow;

    use super::*;

    fn t(day: i64) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            + TimeDelta::days(day)
    }

    #[test]
    fn schema_columns() {
        let schema = forecast_schema();
        let names: Vec<_> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        assert_eq!(names, vec!["series", "time", "fcst", "fcst_lower", "fcst_upper"]);
        assert!(!schema.field(2).is_nullable());
        assert!(schema.field(3).is_nullable());
    }

    #[test]
    fn history_rows_become_nulls() {
        let history = vec![ForecastRow {
            time: t(0),
            fcst: 1.0,
            fcst_lower: None,
            fcst_upper: None,
        }];
        let future = vec![ForecastRow {
            time: t(1),
            fcst: 2.0,
            fcst_lower: Some(1.5),
            fcst_upper: Some(2.5),
        }];
        let frame = ForecastFrame::with_history("flow", history, future);
        let schema = forecast_schema();
        let batch = frame_to_record_batch(&frame, &schema).unwrap();

        assert_eq!(batch.num_rows(), 2);
        let lower = batch.column(3).as_primitive::<Float64Type>();
        assert!(lower.is_null(0));
        assert_eq!(lower.value(1), 1.5);
        assert_eq!(batch.column(0).as_string::<i32>().value(1), "flow");
    }

    #[test]
    fn wide_batch_shape() {
        let data = TimeSeriesData::new(
            vec![t(0), t(1), t(2)],
            vec![("a".into(), vec![1.0, 2.0, 3.0]), ("b".into(), vec![4.0, 5.0, 6.0])],
        )
        .unwrap();
        let schema = timeseries_schema(&data);
        let batch = timeseries_to_record_batch(&data, &schema).unwrap();
        assert_eq!(batch.num_columns(), 3);
        assert_eq!(batch.num_rows(), 3);
        assert_eq!(schema.field(2).name(), "b");
    }
}
