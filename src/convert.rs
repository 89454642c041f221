//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result, anyhow, bail};

use crate::config::*;

use kairos_io::{Compression, CsvConfig, ParquetConfig, WriterConfig};
use kairos_timeseries::Frequency;
use kairos_var::{PredictConfig, VarParams};

/// Parses a compression algorithm name string into the corresponding enum variant.
pub fn parse_compression(s: &str) -> Result<Compression> {
    match s.to_lowercase().as_str() {
        "none" => Ok(Compression::None),
        "snappy" => Ok(Compression::Snappy),
        "zstd" => Ok(Compression::Zstd),
        other => bail!("unknown compression: {other:?}"),
    }
}

/// Converts a single-character delimiter into the byte the CSV reader wants.
pub fn parse_delimiter(c: char) -> Result<u8> {
    u8::try_from(c)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| anyhow!("delimiter must be a single ASCII character, got {c:?}"))
}

/// Builds [`VarParams`] from the TOML VAR configuration.
pub fn build_var_params(var: &VarToml) -> Result<VarParams> {
    let mut params = VarParams::default()
        .with_method(var.method)
        .with_trend(var.trend)
        .with_verbose(var.verbose);
    if let Some(m) = var.maxlags {
        params = params.with_maxlags(m);
    }
    if let Some(ic) = var.ic {
        params = params.with_ic(ic);
    }
    params.validate()?;
    Ok(params)
}

/// Builds a [`CsvConfig`] from the TOML I/O configuration.
pub fn build_csv_config(io: &IoToml) -> Result<CsvConfig> {
    let mut cfg = CsvConfig::default()
        .with_time_col(&io.time_col)
        .with_delimiter(parse_delimiter(io.delimiter)?);
    if let Some(ref fmt) = io.time_format {
        cfg = cfg.with_time_format(fmt);
    }
    if let Some(ref cols) = io.columns {
        cfg = cfg.with_columns(cols.clone());
    }
    cfg.validate()?;
    Ok(cfg)
}

/// Builds a [`ParquetConfig`] from the TOML I/O configuration.
pub fn build_parquet_config(io: &IoToml) -> Result<ParquetConfig> {
    let mut cfg = ParquetConfig::default().with_time_col(&io.time_col);
    if let Some(ref fmt) = io.time_format {
        cfg = cfg.with_time_format(fmt);
    }
    if let Some(ref cols) = io.columns {
        cfg = cfg.with_columns(cols.clone());
    }
    cfg.validate()?;
    Ok(cfg)
}

/// Builds a [`WriterConfig`] from the TOML I/O configuration.
pub fn build_writer_config(io: &IoToml) -> Result<WriterConfig> {
    let compression = parse_compression(&io.compression)?;
    let cfg = WriterConfig::default()
        .with_compression(compression)
        .with_row_group_size(io.row_group_size);
    cfg.validate()?;
    Ok(cfg)
}

/// Builds a [`PredictConfig`] from the TOML forecast configuration.
pub fn build_predict_config(forecast: &ForecastToml) -> Result<PredictConfig> {
    let mut cfg = PredictConfig::new(forecast.steps)
        .with_alpha(forecast.alpha)
        .with_include_history(forecast.include_history);
    if let Some(ref freq) = forecast.freq {
        let freq: Frequency = freq
            .parse()
            .map_err(|e: String| anyhow!(e))
            .with_context(|| format!("invalid [forecast].freq {freq:?}"))?;
        cfg = cfg.with_freq(freq);
    }
    cfg.validate()?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;
    use kairos_var::{InfoCriterion, Trend};

    use super::*;

    #[test]
    fn compression_names() {
        assert_eq!(parse_compression("ZSTD").unwrap(), Compression::Zstd);
        assert_eq!(parse_compression("none").unwrap(), Compression::None);
        assert!(parse_compression("lz4").is_err());
    }

    #[test]
    fn delimiter_must_be_ascii() {
        assert_eq!(parse_delimiter(';').unwrap(), b';');
        assert!(parse_delimiter('é').is_err());
    }

    #[test]
    fn default_var_params() {
        let params = build_var_params(&VarToml::default()).unwrap();
        assert_eq!(params, VarParams::default());
    }

    #[test]
    fn var_params_from_toml() {
        let var: VarToml = toml::from_str("maxlags = 6\nic = \"aic\"\ntrend = \"ct\"\n").unwrap();
        let params = build_var_params(&var).unwrap();
        assert_eq!(params.maxlags(), Some(6));
        assert_eq!(params.ic(), Some(InfoCriterion::Aic));
        assert_eq!(params.trend(), Trend::ConstantTrend);
    }

    #[test]
    fn ic_with_zero_maxlags_rejected() {
        let var = VarToml {
            maxlags: Some(0),
            ic: Some(InfoCriterion::Bic),
            ..VarToml::default()
        };
        assert!(build_var_params(&var).is_err());
    }

    #[test]
    fn predict_config_with_freq() {
        let forecast = ForecastToml {
            steps: 4,
            freq: Some("6h".into()),
            ..ForecastToml::default()
        };
        let cfg = build_predict_config(&forecast).unwrap();
        assert_eq!(cfg.steps(), 4);
        assert_eq!(cfg.freq(), Some(Frequency::Fixed(TimeDelta::hours(6))));
    }

    #[test]
    fn predict_config_rejects_bad_values() {
        let zero = ForecastToml {
            steps: 0,
            ..ForecastToml::default()
        };
        assert!(build_predict_config(&zero).is_err());

        let alpha = ForecastToml {
            alpha: 1.5,
            ..ForecastToml::default()
        };
        assert!(build_predict_config(&alpha).is_err());

        let freq = ForecastToml {
            freq: Some("fortnight".into()),
            ..ForecastToml::default()
        };
        assert!(build_predict_config(&freq).is_err());
    }

    #[test]
    fn writer_config_rejects_zero_row_groups() {
        let io = IoToml {
            row_group_size: 0,
            ..IoToml::default()
        };
        assert!(build_writer_config(&io).is_err());
    }

    #[test]
    fn reader_configs_carry_columns() {
        let io = IoToml {
            columns: Some(vec!["a".into(), "b".into()]),
            time_col: "date".into(),
            ..IoToml::default()
        };
        assert!(build_csv_config(&io).is_ok());
        assert!(build_parquet_config(&io).is_ok());

        let clash = IoToml {
            columns: Some(vec!["date".into()]),
            time_col: "date".into(),
            ..IoToml::default()
        };
        assert!(build_csv_config(&clash).is_err());
    }
}
