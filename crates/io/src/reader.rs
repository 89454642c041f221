//! High-level reader configuration and orchestration.

use std::path::Path;

use kairos_timeseries::TimeSeriesData;
use tracing::{debug, info};

use crate::error::IoError;
use crate::parquet_read;
use crate::time::{parse_time, parse_value};

// ---------------------------------------------------------------------------
// CsvConfig
// ---------------------------------------------------------------------------

/// Configuration for reading a wide time-series table from CSV.
///
/// The file must have a header row. One column holds timestamps; the value
/// columns are either every other column or the ones listed with
/// [`CsvConfig::with_columns()`], in that order.
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Header of the timestamp column.
    time_col: String,
    /// Explicit chrono format for timestamps; `None` tries common formats.
    time_format: Option<String>,
    /// Value columns to load; `None` loads all non-time columns.
    columns: Option<Vec<String>>,
    /// Field delimiter.
    delimiter: u8,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            time_col: "time".into(),
            time_format: None,
            columns: None,
            delimiter: b',',
        }
    }
}

impl CsvConfig {
    /// Sets the timestamp column header.
    pub fn with_time_col(mut self, name: impl Into<String>) -> Self {
        self.time_col = name.into();
        self
    }

    /// Sets an explicit chrono format for timestamps.
    pub fn with_time_format(mut self, format: impl Into<String>) -> Self {
        self.time_format = Some(format.into());
        self
    }

    /// Restricts loading to `columns`, in the given order.
    pub fn with_columns(mut self, columns: Vec<String>) -> Self {
        self.columns = Some(columns);
        self
    }

    /// Sets the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Validates that the configuration is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] listing every problem found.
    pub fn validate(&self) -> Result<(), IoError> {
        validate_columns(&self.time_col, self.columns.as_deref())
    }
}

// ---------------------------------------------------------------------------
// ParquetConfig
// ---------------------------------------------------------------------------

/// Configuration for reading a wide time-series table from Parquet.
#[derive(Debug, Clone)]
pub struct ParquetConfig {
    /// Name of the timestamp column.
    time_col: String,
    /// Format for `Utf8` timestamp columns; `None` tries common formats.
    time_format: Option<String>,
    /// Value columns to load; `None` loads all non-time columns.
    columns: Option<Vec<String>>,
}

impl Default for ParquetConfig {
    fn default() -> Self {
        Self {
            time_col: "time".into(),
            time_format: None,
            columns: None,
        }
    }
}

impl ParquetConfig {
    /// Sets the timestamp column name.
    pub fn with_time_col(mut self, name: impl Into<String>) -> Self {
        self.time_col = name.into();
        self
    }

    /// Sets an explicit chrono format for string timestamps.
    pub fn with_time_format(mut self, format: impl Into<String>) -> Self {
        self.time_format = Some(format.into());
        self
    }

    /// Restricts loading to `columns`, in the given order.
    pub fn with_columns(mut self, columns: Vec<String>) -> Self {
        self.columns = Some(columns);
        self
    }

    /// Validates that the configuration is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] listing every problem found.
    pub fn validate(&self) -> Result<(), IoError> {
        validate_columns(&self.time_col, self.columns.as_deref())
    }
}

fn validate_columns(time_col: &str, columns: Option<&[String]>) -> Result<(), IoError> {
    let mut problems = Vec::new();
    if time_col.is_empty() {
        problems.push("time column name must not be empty".to_string());
    }
    if let Some(cols) = columns {
        if cols.is_empty() {
            problems.push("columns must not be empty when given".to_string());
        }
        if cols.iter().any(|c| c == time_col) {
            problems.push(format!("time column '{time_col}' cannot also be a value column"));
        }
    }
    if problems.is_empty() {
        Ok(())
    } else {
        Err(IoError::Validation {
            count: problems.len(),
            details: problems.join("; "),
        })
    }
}

/// Resolves `(index, name)` of every value column from the header.
fn select_columns(
    headers: &[&str],
    time_col: &str,
    wanted: Option<&[String]>,
    path: &Path,
) -> Result<(usize, Vec<(usize, String)>), IoError> {
    let missing = |name: &str| IoError::MissingColumn {
        name: name.to_string(),
        path: path.to_path_buf(),
    };
    let time_idx = headers
        .iter()
        .position(|h| *h == time_col)
        .ok_or_else(|| missing(time_col))?;

    let values = match wanted {
        Some(cols) => cols
            .iter()
            .map(|c| {
                headers
                    .iter()
                    .position(|h| *h == c.as_str())
                    .map(|i| (i, c.clone()))
                    .ok_or_else(|| missing(c))
            })
            .collect::<Result<Vec<_>, _>>()?,
        None => headers
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != time_idx)
            .map(|(i, h)| (i, h.to_string()))
            .collect(),
    };

    if values.is_empty() {
        return Err(IoError::Validation {
            count: 1,
            details: format!("{} has no value columns", path.display()),
        });
    }
    Ok((time_idx, values))
}

// ---------------------------------------------------------------------------
// read_csv
// ---------------------------------------------------------------------------

/// Read a wide time-series table from a CSV file.
///
/// Empty cells and `NA`/`NaN` markers load as NaN. Rows must already be in
/// strictly increasing time order.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`IoError::Validation`] | invalid config, or no value columns |
/// | [`IoError::FileNotFound`] | `path` does not exist |
/// | [`IoError::MissingColumn`] | time or requested column absent |
/// | [`IoError::Csv`] | malformed CSV |
/// | [`IoError::InvalidTime`] | unparseable timestamp |
/// | [`IoError::InvalidValue`] | unparseable number |
/// | [`IoError::Data`] | duplicate or unordered timestamps, duplicate names |
pub fn read_csv(path: &Path, config: &CsvConfig) -> Result<TimeSeriesData, IoError> {
    config.validate()?;
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter)
        .trim(csv::Trim::All)
        .from_path(path)?;
    let headers = reader.headers()?.clone();
    let header_names: Vec<&str> = headers.iter().collect();
    let (time_idx, value_cols) =
        select_columns(&header_names, &config.time_col, config.columns.as_deref(), path)?;

    let mut time = Vec::new();
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); value_cols.len()];
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let line = row + 2;

        let raw_time = record.get(time_idx).unwrap_or("");
        let t = parse_time(raw_time, config.time_format.as_deref()).ok_or_else(|| {
            IoError::InvalidTime {
                reason: format!("line {line}: cannot parse '{raw_time}'"),
            }
        })?;
        time.push(t);

        for (out, (idx, name)) in columns.iter_mut().zip(&value_cols) {
            let raw = record.get(*idx).unwrap_or("");
            let v = parse_value(raw).ok_or_else(|| IoError::InvalidValue {
                line,
                column: name.clone(),
                value: raw.to_string(),
            })?;
            out.push(v);
        }
    }

    debug!(
        path = %path.display(),
        rows = time.len(),
        series = value_cols.len(),
        "csv parsed"
    );

    let named = value_cols
        .into_iter()
        .map(|(_, name)| name)
        .zip(columns)
        .collect();
    let data = TimeSeriesData::new(time, named)?;
    info!(path = %path.display(), n_obs = data.len(), n_series = data.n_series(), "loaded csv");
    Ok(data)
}

// ---------------------------------------------------------------------------
// read_parquet
// ---------------------------------------------------------------------------

/// Read a wide time-series table from a Parquet file.
///
/// The time column may be `Timestamp` (any unit), `Date32`, `Date64` or
/// `Utf8`. Value columns are cast to `Float64`; nulls load as NaN.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`IoError::Validation`] | invalid config, unsupported time type, or no value columns |
/// | [`IoError::FileNotFound`] | `path` does not exist |
/// | [`IoError::MissingColumn`] | time or requested column absent |
/// | [`IoError::Parquet`] | unreadable file or failed cast |
/// | [`IoError::InvalidTime`] | null or unparseable timestamp |
/// | [`IoError::Data`] | duplicate or unordered timestamps |
pub fn read_parquet(path: &Path, config: &ParquetConfig) -> Result<TimeSeriesData, IoError> {
    config.validate()?;
    let batches = parquet_read::read_batches(path)?;

    let Some(first) = batches.first() else {
        return Err(IoError::Validation {
            count: 1,
            details: format!("{} contains no record batches", path.display()),
        });
    };
    let schema = first.schema();
    let field_names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
    let (time_idx, value_cols) = select_columns(
        &field_names,
        &config.time_col,
        config.columns.as_deref(),
        path,
    )?;

    let mut time = Vec::new();
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); value_cols.len()];
    for batch in &batches {
        time.extend(parquet_read::time_column(
            batch.column(time_idx),
            config.time_format.as_deref(),
        )?);
        for (out, (idx, _)) in columns.iter_mut().zip(&value_cols) {
            out.extend(parquet_read::value_column(batch.column(*idx))?);
        }
    }

    let named = value_cols
        .into_iter()
        .map(|(_, name)| name)
        .zip(columns)
        .collect();
    let data = TimeSeriesData::new(time, named)?;
    info!(
        path = %path.display(),
        batches = batches.len(),
        n_obs = data.len(),
        n_series = data.n_series(),
        "loaded parquet"
    );
    Ok(data)
}
