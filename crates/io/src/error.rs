//! Error types for kairos-io.

use std::path::PathBuf;

use kairos_timeseries::TimeSeriesError;

/// Error type for all fallible operations in the kairos-io crate.
///
/// Covers missing files, format-specific failures from CSV, Arrow and
/// Parquet, unparseable cells, configuration problems, and tables that do
/// not form a valid time series.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an error originating from the CSV reader.
    #[error("csv error: {reason}")]
    Csv {
        /// Description of the underlying CSV failure.
        reason: String,
    },

    /// Wraps an error originating from the Parquet or Arrow libraries.
    #[error("parquet error: {reason}")]
    Parquet {
        /// Description of the underlying Parquet failure.
        reason: String,
    },

    /// Returned when a configured column is not present in a file.
    #[error("column '{name}' not found in {}", path.display())]
    MissingColumn {
        /// Name of the missing column.
        name: String,
        /// Path to the file that was inspected.
        path: PathBuf,
    },

    /// Returned when a value cell cannot be parsed as a number.
    #[error("line {line}, column '{column}': cannot parse '{value}' as a number")]
    InvalidValue {
        /// 1-based line number, header included.
        line: usize,
        /// Column name.
        column: String,
        /// Raw cell contents.
        value: String,
    },

    /// Returned when a time value cannot be parsed or is out of range.
    #[error("invalid time: {reason}")]
    InvalidTime {
        /// Description of the time parsing issue.
        reason: String,
    },

    /// Returned when one or more validation checks fail.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },

    /// Returned when the loaded table is not a valid time series.
    #[error("invalid time series: {0}")]
    Data(#[from] TimeSeriesError),
}

impl From<csv::Error> for IoError {
    fn from(e: csv::Error) -> Self {
        IoError::Csv {
            reason: e.to_string(),
        }
    }
}

impl From<parquet::errors::ParquetError> for IoError {
    fn from(e: parquet::errors::ParquetError) -> Self {
        IoError::Parquet {
            reason: e.to_string(),
        }
    }
}

impl From<arrow::error::ArrowError> for IoError {
    fn from(e: arrow::error::ArrowError) -> Self {
        IoError::Parquet {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_file_not_found() {
        let err = IoError::FileNotFound {
            path: PathBuf::from("/tmp/missing.csv"),
        };
        assert_eq!(err.to_string(), "file not found: /tmp/missing.csv");
    }

    #[test]
    fn display_csv() {
        let err = IoError::Csv {
            reason: "unequal lengths".to_string(),
        };
        assert_eq!(err.to_string(), "csv error: unequal lengths");
    }

    #[test]
    fn display_parquet() {
        let err = IoError::Parquet {
            reason: "bad magic".to_string(),
        };
        assert_eq!(err.to_string(), "parquet error: bad magic");
    }

    #[test]
    fn display_missing_column() {
        let err = IoError::MissingColumn {
            name: "time".to_string(),
            path: PathBuf::from("data.csv"),
        };
        assert_eq!(err.to_string(), "column 'time' not found in data.csv");
    }

    #[test]
    fn display_invalid_value() {
        let err = IoError::InvalidValue {
            line: 4,
            column: "flow".to_string(),
            value: "abc".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "line 4, column 'flow': cannot parse 'abc' as a number"
        );
    }

    #[test]
    fn display_invalid_time() {
        let err = IoError::InvalidTime {
            reason: "line 2: cannot parse 'yesterday'".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid time: line 2: cannot parse 'yesterday'"
        );
    }

    #[test]
    fn display_validation() {
        let err = IoError::Validation {
            count: 2,
            details: "a; b".to_string(),
        };
        assert_eq!(err.to_string(), "2 validation error(s): a; b");
    }

    #[test]
    fn from_timeseries_error() {
        let err: IoError = TimeSeriesError::UnorderedTime { index: 3 }.into();
        assert!(matches!(err, IoError::Data(_)));
        assert!(err.to_string().starts_with("invalid time series: "));
    }

    #[test]
    fn from_parquet_error() {
        let pq = parquet::errors::ParquetError::General("boom".to_string());
        let err: IoError = pq.into();
        assert!(matches!(err, IoError::Parquet { .. }));
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<IoError>();
    }
}
