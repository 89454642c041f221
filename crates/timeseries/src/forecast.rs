//! Per-series forecast tables.

use chrono::NaiveDateTime;
use serde::Serialize;

/// One row of a forecast table.
///
/// In-sample (history) rows carry no interval, so `fcst_lower` and
/// `fcst_upper` are `None` there.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ForecastRow {
    pub time: NaiveDateTime,
    pub fcst: f64,
    pub fcst_lower: Option<f64>,
    pub fcst_upper: Option<f64>,
}

/// Forecast table for a single named series.
///
/// Rows are ordered by time. The first [`ForecastFrame::n_history()`] rows
/// are in-sample fitted values, the remainder are out-of-sample forecasts.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ForecastFrame {
    name: String,
    rows: Vec<ForecastRow>,
    n_history: usize,
}

impl ForecastFrame {
    /// Builds a frame holding only out-of-sample rows.
    pub fn new(name: impl Into<String>, rows: Vec<ForecastRow>) -> Self {
        Self {
            name: name.into(),
            rows,
            n_history: 0,
        }
    }

    /// Builds a frame by placing `history` rows ahead of `future` rows.
    pub fn with_history(
        name: impl Into<String>,
        history: Vec<ForecastRow>,
        future: Vec<ForecastRow>,
    ) -> Self {
        let n_history = history.len();
        let mut rows = history;
        rows.extend(future);
        Self {
            name: name.into(),
            rows,
            n_history,
        }
    }

    /// Series name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All rows, history first.
    pub fn rows(&self) -> &[ForecastRow] {
        &self.rows
    }

    /// Total number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` when the frame has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of leading in-sample rows.
    pub fn n_history(&self) -> usize {
        self.n_history
    }

    /// Returns `true` when the frame carries in-sample rows.
    pub fn includes_history(&self) -> bool {
        self.n_history > 0
    }

    /// In-sample rows.
    pub fn history(&self) -> &[ForecastRow] {
        &self.rows[..self.n_history]
    }

    /// Out-of-sample rows.
    pub fn future(&self) -> &[ForecastRow] {
        &self.rows[self.n_history..]
    }

    /// Timestamps of all rows.
    pub fn times(&self) -> Vec<NaiveDateTime> {
        self.rows.iter().map(|r| r.time).collect()
    }

    /// Point forecasts of all rows.
    pub fn fcst(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.fcst).collect()
    }
}
