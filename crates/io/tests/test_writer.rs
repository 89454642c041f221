//! Integration test: write forecast frames to Parquet and inspect the file.

use arrow::array::{Array, AsArray, RecordBatch};
use arrow::datatypes::{DataType, Float64Type, TimeUnit, TimestampMicrosecondType};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use kairos_io::{Compression, IoError, WriterConfig, write_forecast_parquet};
use kairos_timeseries::{ForecastFrame, ForecastRow};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

fn day(i: i64) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        + TimeDelta::days(i)
}

fn frame(name: &str, n_history: usize, steps: usize) -> ForecastFrame {
    let history = (0..n_history)
        .map(|i| ForecastRow {
            time: day(i as i64),
            fcst: i as f64,
            fcst_lower: None,
            fcst_upper: None,
        })
        .collect();
    let future = (0..steps)
        .map(|h| {
            let v = 100.0 + h as f64;
            ForecastRow {
                time: day((n_history + h) as i64),
                fcst: v,
                fcst_lower: Some(v - 1.0),
                fcst_upper: Some(v + 1.0),
            }
        })
        .collect();
    ForecastFrame::with_history(name, history, future)
}

fn read_all(path: &std::path::Path) -> Vec<RecordBatch> {
    let file = std::fs::File::open(path).expect("open parquet");
    ParquetRecordBatchReaderBuilder::try_new(file)
        .expect("reader builder")
        .build()
        .expect("reader")
        .collect::<Result<Vec<_>, _>>()
        .expect("batches")
}

#[test]
fn long_format_with_history() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("forecast.parquet");
    let frames = vec![frame("inflow", 3, 2), frame("outflow", 3, 2)];

    write_forecast_parquet(&path, &frames, &WriterConfig::default()).unwrap();
    let batches = read_all(&path);
    let total: usize = batches.iter().map(RecordBatch::num_rows).sum();
    assert_eq!(total, 10);

    let batch = &batches[0];
    assert_eq!(
        batch.schema().field(1).data_type(),
        &DataType::Timestamp(TimeUnit::Microsecond, None)
    );

    let series: Vec<&str> = batches
        .iter()
        .flat_map(|b| b.column(0).as_string::<i32>().iter().flatten().collect::<Vec<_>>())
        .collect();
    assert_eq!(series.iter().filter(|s| **s == "inflow").count(), 5);
    assert_eq!(series.iter().filter(|s| **s == "outflow").count(), 5);

    let lower = batch.column(3).as_primitive::<Float64Type>();
    let upper = batch.column(4).as_primitive::<Float64Type>();
    for i in 0..3 {
        assert!(lower.is_null(i), "history row {i} should have null lower");
        assert!(upper.is_null(i), "history row {i} should have null upper");
    }
    assert_eq!(lower.value(3), 99.0);
    assert_eq!(upper.value(4), 102.0);

    let times = batch.column(1).as_primitive::<TimestampMicrosecondType>();
    assert_eq!(times.value(0), day(0).and_utc().timestamp_micros());
    assert_eq!(times.value(4), day(4).and_utc().timestamp_micros());
}

#[test]
fn future_only_frames_have_no_nulls() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.parquet");
    write_forecast_parquet(&path, &[frame("a", 0, 4)], &WriterConfig::default()).unwrap();

    let batches = read_all(&path);
    let lower = batches[0].column(3).as_primitive::<Float64Type>();
    assert_eq!(lower.null_count(), 0);
    assert_eq!(lower.len(), 4);
}

#[test]
fn every_compression_writes_readable_file() {
    let dir = tempfile::tempdir().unwrap();
    for (i, c) in [Compression::None, Compression::Snappy, Compression::Zstd]
        .into_iter()
        .enumerate()
    {
        let path = dir.path().join(format!("c{i}.parquet"));
        let config = WriterConfig::default().with_compression(c);
        write_forecast_parquet(&path, &[frame("x", 2, 3)], &config).unwrap();
        let rows: usize = read_all(&path).iter().map(RecordBatch::num_rows).sum();
        assert_eq!(rows, 5, "row count with {c:?}");
    }
}

#[test]
fn invalid_config_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = WriterConfig::default().with_row_group_size(0);
    let err = write_forecast_parquet(&dir.path().join("x.parquet"), &[frame("x", 0, 1)], &config)
        .unwrap_err();
    assert!(matches!(err, IoError::Validation { .. }));
}

#[test]
fn unwritable_path_is_parquet_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no_such_dir").join("x.parquet");
    let err = write_forecast_parquet(&path, &[frame("x", 0, 1)], &WriterConfig::default())
        .unwrap_err();
    assert!(matches!(err, IoError::Parquet { .. }));
}
