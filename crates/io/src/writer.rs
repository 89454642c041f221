//! High-level Parquet writer configuration and orchestration.

use std::path::Path;

use kairos_timeseries::{ForecastFrame, TimeSeriesData};
use parquet::file::properties::WriterProperties;
use tracing::info;

use crate::error::IoError;
use crate::parquet_write;

/// Compression algorithm for Parquet output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Compression {
    /// No compression.
    None,
    /// Snappy compression (fast, moderate ratio).
    #[default]
    Snappy,
    /// Zstd compression (slower, better ratio).
    Zstd,
}

impl Compression {
    /// Converts to the corresponding `parquet::basic::Compression` variant.
    fn to_parquet(self) -> Result<parquet::basic::Compression, IoError> {
        Ok(match self {
            Self::None => parquet::basic::Compression::UNCOMPRESSED,
            Self::Snappy => parquet::basic::Compression::SNAPPY,
            Self::Zstd => {
                let level = parquet::basic::ZstdLevel::try_new(3)?;
                parquet::basic::Compression::ZSTD(level)
            }
        })
    }
}

/// Configuration for writing Parquet output.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Compression algorithm to use.
    compression: Compression,
    /// Maximum number of rows per row group.
    row_group_size: usize,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            compression: Compression::default(),
            row_group_size: 1_000_000,
        }
    }
}

impl WriterConfig {
    /// Sets the compression algorithm.
    pub fn with_compression(mut self, comp: Compression) -> Self {
        self.compression = comp;
        self
    }

    /// Sets the maximum number of rows per row group.
    pub fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Returns the compression algorithm.
    pub fn compression(&self) -> Compression {
        self.compression
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if `row_group_size` is zero.
    pub fn validate(&self) -> Result<(), IoError> {
        if self.row_group_size == 0 {
            return Err(IoError::Validation {
                count: 1,
                details: "row_group_size must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    fn properties(&self) -> Result<WriterProperties, IoError> {
        Ok(WriterProperties::builder()
            .set_compression(self.compression.to_parquet()?)
            .set_max_row_group_size(self.row_group_size)
            .build())
    }
}

/// Write forecast tables to a Parquet file in long format.
///
/// Each [`ForecastFrame`] contributes one batch of rows tagged with its
/// series name. History rows have null bounds.
///
/// # Errors
///
/// Returns [`IoError::Validation`] if the configuration is invalid or
/// `frames` is empty, or [`IoError::Parquet`] if batch conversion or file
/// I/O fails.
pub fn write_forecast_parquet(
    path: &Path,
    frames: &[ForecastFrame],
    config: &WriterConfig,
) -> Result<(), IoError> {
    config.validate()?;
    if frames.is_empty() {
        return Err(IoError::Validation {
            count: 1,
            details: "no forecast frames to write".to_string(),
        });
    }

    let schema = parquet_write::forecast_schema();
    let batches: Vec<_> = frames
        .iter()
        .map(|f| parquet_write::frame_to_record_batch(f, &schema))
        .collect::<Result<Vec<_>, _>>()?;

    parquet_write::write_batches(path, &batches, &schema, config.properties()?)?;

    let rows: usize = frames.iter().map(ForecastFrame::len).sum();
    info!(path = %path.display(), series = frames.len(), rows, "wrote forecast parquet");
    Ok(())
}

/// Write a [`TimeSeriesData`] to a Parquet file in wide format.
///
/// The output has a `time` column (`Timestamp(Microsecond)`) followed by
/// one `Float64` column per series, and reads back with
/// [`read_parquet()`](crate::read_parquet).
///
/// # Errors
///
/// Returns [`IoError::Validation`] if the configuration is invalid, or
/// [`IoError::Parquet`] if batch conversion or file I/O fails.
pub fn write_timeseries_parquet(
    path: &Path,
    data: &TimeSeriesData,
    config: &WriterConfig,
) -> Result<(), IoError> {
    config.validate()?;

    let schema = parquet_write::timeseries_schema(data);
    let batch = parquet_write::timeseries_to_record_batch(data, &schema)?;
    parquet_write::write_batches(path, &[batch], &schema, config.properties()?)?;

    info!(path = %path.display(), n_obs = data.len(), n_series = data.n_series(), "wrote time series parquet");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = WriterConfig::default();
        assert_eq!(config.compression, Compression::Snappy);
        assert_eq!(config.row_group_size, 1_000_000);
    }

    #[test]
    fn builder_methods() {
        let config = WriterConfig::default()
            .with_compression(Compression::Zstd)
            .with_row_group_size(500);
        assert_eq!(config.compression(), Compression::Zstd);
        assert_eq!(config.row_group_size, 500);
    }

    #[test]
    fn validate_zero_row_group_size() {
        let config = WriterConfig::default().with_row_group_size(0);
        match config.validate().unwrap_err() {
            IoError::Validation { count, details } => {
                assert_eq!(count, 1);
                assert!(details.contains("row_group_size"));
            }
            other => panic!("expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn every_compression_builds_properties() {
        for c in [Compression::None, Compression::Snappy, Compression::Zstd] {
            assert!(WriterConfig::default().with_compression(c).properties().is_ok());
        }
    }

    #[test]
    fn empty_frames_rejected() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let err = write_forecast_parquet(&dir.path().join("x.parquet"), &[], &WriterConfig::default())
            .unwrap_err();
        assert!(matches!(err, IoError::Validation { .. }));
    }
}
