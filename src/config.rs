use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use kairos_var::{EstimationMethod, InfoCriterion, Trend};
use serde::Deserialize;

/// Top-level Kairos configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KairosConfig {
    /// I/O settings.
    #[serde(default)]
    pub io: IoToml,

    /// VAR estimation settings.
    #[serde(default)]
    pub var: VarToml,

    /// Forecast horizon and interval settings.
    #[serde(default)]
    pub forecast: ForecastToml,
}

impl KairosConfig {
    /// Reads and parses a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str).context("failed to parse TOML config")
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoToml {
    pub input: Option<PathBuf>,
    #[serde(default = "default_time_col")]
    pub time_col: String,
    #[serde(default)]
    pub time_format: Option<String>,
    #[serde(default)]
    pub columns: Option<Vec<String>>,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    pub output: Option<PathBuf>,
    pub plot: Option<PathBuf>,
    #[serde(default = "default_compression")]
    pub compression: String,
    #[serde(default = "default_row_group_size")]
    pub row_group_size: usize,
}

impl Default for IoToml {
    fn default() -> Self {
        Self {
            input: None,
            time_col: default_time_col(),
            time_format: None,
            columns: None,
            delimiter: default_delimiter(),
            output: None,
            plot: None,
            compression: default_compression(),
            row_group_size: default_row_group_size(),
        }
    }
}

fn default_time_col() -> String {
    "time".to_string()
}
fn default_delimiter() -> char {
    ','
}
fn default_compression() -> String {
    "snappy".to_string()
}
fn default_row_group_size() -> usize {
    1_000_000
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VarToml {
    #[serde(default)]
    pub maxlags: Option<usize>,
    #[serde(default)]
    pub method: EstimationMethod,
    #[serde(default)]
    pub ic: Option<InfoCriterion>,
    #[serde(default)]
    pub trend: Trend,
    #[serde(default)]
    pub verbose: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForecastToml {
    #[serde(default = "default_steps")]
    pub steps: usize,
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    #[serde(default)]
    pub include_history: bool,
    #[serde(default)]
    pub freq: Option<String>,
}

impl Default for ForecastToml {
    fn default() -> Self {
        Self {
            steps: default_steps(),
            alpha: default_alpha(),
            include_history: false,
            freq: None,
        }
    }
}

fn default_steps() -> usize {
    10
}
fn default_alpha() -> f64 {
    0.05
}
