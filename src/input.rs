//! Input resolution shared by the subcommands.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tracing::info;

use kairos_io::{read_csv, read_parquet};
use kairos_timeseries::TimeSeriesData;

use crate::config::IoToml;
use crate::convert;

/// On-disk layout of the input table, decided by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Parquet,
}

impl InputFormat {
    /// `.parquet` and `.pq` read as Parquet, everything else as CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("parquet") || ext.eq_ignore_ascii_case("pq") => {
                Self::Parquet
            }
            _ => Self::Csv,
        }
    }
}

/// Picks the CLI override if given, otherwise `[io].input`.
pub fn resolve_input(cli: Option<PathBuf>, io: &IoToml) -> Result<PathBuf> {
    cli.or_else(|| io.input.clone())
        .ok_or_else(|| anyhow!("no input path: set [io].input in config or use --input"))
}

/// Loads the observed table at `path` using the `[io]` reader settings.
pub fn load_series(path: &Path, io: &IoToml) -> Result<TimeSeriesData> {
    let format = InputFormat::from_path(path);
    info!(path = %path.display(), ?format, "reading observed data");
    let data = match format {
        InputFormat::Csv => {
            let cfg = convert::build_csv_config(io)?;
            read_csv(path, &cfg)
                .with_context(|| format!("failed to read CSV: {}", path.display()))?
        }
        InputFormat::Parquet => {
            let cfg = convert::build_parquet_config(io)?;
            read_parquet(path, &cfg)
                .with_context(|| format!("failed to read Parquet: {}", path.display()))?
        }
    };
    info!(
        n_obs = data.len(),
        n_series = data.n_series(),
        "observed data loaded"
    );
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(InputFormat::from_path(Path::new("a.parquet")), InputFormat::Parquet);
        assert_eq!(InputFormat::from_path(Path::new("a.PQ")), InputFormat::Parquet);
        assert_eq!(InputFormat::from_path(Path::new("a.csv")), InputFormat::Csv);
        assert_eq!(InputFormat::from_path(Path::new("a")), InputFormat::Csv);
    }

    #[test]
    fn cli_input_wins() {
        let io = IoToml {
            input: Some(PathBuf::from("config.csv")),
            ..IoToml::default()
        };
        let p = resolve_input(Some(PathBuf::from("cli.csv")), &io).unwrap();
        assert_eq!(p, PathBuf::from("cli.csv"));
        assert_eq!(resolve_input(None, &io).unwrap(), PathBuf::from("config.csv"));
        assert!(resolve_input(None, &IoToml::default()).is_err());
    }

    #[test]
    fn loads_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.csv");
        std::fs::write(&path, "time,a,b\n2024-01-01,1,2\n2024-01-02,3,4\n").unwrap();
        let data = load_series(&path, &IoToml::default()).unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data.n_series(), 2);
    }
}
