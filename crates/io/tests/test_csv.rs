//! Integration tests for CSV loading.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use kairos_io::{CsvConfig, IoError, read_csv};
use kairos_timeseries::TimeSeriesError;
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut f = std::fs::File::create(&path).expect("create csv");
    f.write_all(body.as_bytes()).expect("write csv");
    path
}

fn read(path: &Path) -> Result<kairos_timeseries::TimeSeriesData, IoError> {
    read_csv(path, &CsvConfig::default())
}

#[test]
fn reads_wide_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "flows.csv",
        "time,inflow,outflow\n2024-01-01,1.0,2.0\n2024-01-02,1.5,2.5\n2024-01-03,2.0,3.0\n",
    );

    let data = read(&path).unwrap();
    assert_eq!(data.len(), 3);
    assert_eq!(data.names(), ["inflow", "outflow"]);
    assert_eq!(data.values()[[2, 1]], 3.0);
    assert_eq!(
        data.start(),
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0)
    );
}

#[test]
fn missing_markers_become_nan() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "gaps.csv", "time,a,b\n2024-01-01,NA,1\n2024-01-02,,2\n");

    let data = read(&path).unwrap();
    assert!(data.values()[[0, 0]].is_nan());
    assert!(data.values()[[1, 0]].is_nan());
    assert!(!data.all_finite());
}

#[test]
fn selected_columns_and_custom_time_column() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "sel.csv",
        "date;x;y;z\n01/01/2024;1;2;3\n02/01/2024;4;5;6\n",
    );
    let config = CsvConfig::default()
        .with_time_col("date")
        .with_time_format("%d/%m/%Y")
        .with_columns(vec!["z".to_string(), "x".to_string()])
        .with_delimiter(b';');

    let data = read_csv(&path, &config).unwrap();
    assert_eq!(data.names(), ["z", "x"]);
    assert_eq!(data.values()[[1, 0]], 6.0);
    assert_eq!(data.values()[[1, 1]], 4.0);
}

#[test]
fn missing_column_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "m.csv", "time,a\n2024-01-01,1\n");
    let config = CsvConfig::default().with_columns(vec!["b".to_string()]);

    match read_csv(&path, &config).unwrap_err() {
        IoError::MissingColumn { name, .. } => assert_eq!(name, "b"),
        other => panic!("expected MissingColumn, got {other:?}"),
    }
}

#[test]
fn missing_time_column_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "m.csv", "date,a\n2024-01-01,1\n");
    assert!(matches!(
        read(&path).unwrap_err(),
        IoError::MissingColumn { name, .. } if name == "time"
    ));
}

#[test]
fn bad_value_reports_line_and_column() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "bad.csv", "time,a\n2024-01-01,1\n2024-01-02,abc\n");

    match read(&path).unwrap_err() {
        IoError::InvalidValue {
            line,
            column,
            value,
        } => {
            assert_eq!(line, 3);
            assert_eq!(column, "a");
            assert_eq!(value, "abc");
        }
        other => panic!("expected InvalidValue, got {other:?}"),
    }
}

#[test]
fn bad_time_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "bad.csv", "time,a\nlast tuesday,1\n");
    assert!(matches!(read(&path).unwrap_err(), IoError::InvalidTime { .. }));
}

#[test]
fn unordered_time_surfaces_data_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "u.csv", "time,a\n2024-01-02,1\n2024-01-01,2\n");

    match read(&path).unwrap_err() {
        IoError::Data(TimeSeriesError::UnorderedTime { index }) => assert_eq!(index, 1),
        other => panic!("expected Data(UnorderedTime), got {other:?}"),
    }
}

#[test]
fn file_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = read(&dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, IoError::FileNotFound { .. }));
}

#[test]
fn invalid_config_rejected_before_io() {
    let config = CsvConfig::default().with_time_col("");
    let err = read_csv(Path::new("does-not-matter.csv"), &config).unwrap_err();
    assert!(matches!(err, IoError::Validation { .. }));
}
