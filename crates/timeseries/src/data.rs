//! The multivariate time-series container.

use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use ndarray::{Array2, ArrayView1};

use crate::error::TimeSeriesError;
use crate::freq::Frequency;

/// An ordered table of timestamps and one or more named `f64` columns.
///
/// Values are stored row-major as an [`Array2<f64>`] with shape
/// `(len, n_series)`. The container is immutable once built: models borrow
/// it and never copy or mutate it.
///
/// Invariants enforced by [`TimeSeriesData::new()`]:
/// - every column has the same length as the time index
/// - timestamps are strictly increasing (so no duplicates)
/// - column names are non-empty and unique
///
/// An empty container (no rows, no columns) is representable through
/// [`TimeSeriesData::empty()`]. Models reject it when fitting.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeSeriesData {
    time: Vec<NaiveDateTime>,
    names: Vec<String>,
    values: Array2<f64>,
}

impl TimeSeriesData {
    /// Builds a container from a time index and named value columns.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`TimeSeriesError::NoValueColumns`] | `time` is non-empty but `columns` is empty |
    /// | [`TimeSeriesError::EmptyColumnName`] | a column name is `""` |
    /// | [`TimeSeriesError::DuplicateColumn`] | two columns share a name |
    /// | [`TimeSeriesError::LengthMismatch`] | a column length differs from `time.len()` |
    /// | [`TimeSeriesError::UnorderedTime`] | `time[i] <= time[i - 1]` for some `i` |
    pub fn new(
        time: Vec<NaiveDateTime>,
        columns: Vec<(String, Vec<f64>)>,
    ) -> Result<Self, TimeSeriesError> {
        let n = time.len();
        if n > 0 && columns.is_empty() {
            return Err(TimeSeriesError::NoValueColumns { n });
        }

        let mut seen = BTreeSet::new();
        for (name, col) in &columns {
            if name.is_empty() {
                return Err(TimeSeriesError::EmptyColumnName);
            }
            if !seen.insert(name.as_str()) {
                return Err(TimeSeriesError::DuplicateColumn { name: name.clone() });
            }
            if col.len() != n {
                return Err(TimeSeriesError::LengthMismatch {
                    name: name.clone(),
                    expected: n,
                    got: col.len(),
                });
            }
        }

        if let Some(index) = (1..n).find(|&i| time[i] <= time[i - 1]) {
            return Err(TimeSeriesError::UnorderedTime { index });
        }

        let k = columns.len();
        let values = Array2::from_shape_fn((n, k), |(i, j)| columns[j].1[i]);
        let names = columns.into_iter().map(|(name, _)| name).collect();

        Ok(Self {
            time,
            names,
            values,
        })
    }

    /// Returns a container with no rows and no columns.
    pub fn empty() -> Self {
        Self {
            time: Vec::new(),
            names: Vec::new(),
            values: Array2::zeros((0, 0)),
        }
    }

    /// Number of timestamps.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Returns `true` when there are no rows or no value columns.
    pub fn is_empty(&self) -> bool {
        self.time.is_empty() || self.names.is_empty()
    }

    /// Number of value columns.
    pub fn n_series(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` when there is exactly one value column.
    pub fn is_univariate(&self) -> bool {
        self.names.len() == 1
    }

    /// Column names in storage order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The time index.
    pub fn time(&self) -> &[NaiveDateTime] {
        &self.time
    }

    /// All values, shape `(len, n_series)`.
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// First timestamp, if any.
    pub fn start(&self) -> Option<NaiveDateTime> {
        self.time.first().copied()
    }

    /// Last timestamp, if any.
    pub fn end(&self) -> Option<NaiveDateTime> {
        self.time.last().copied()
    }

    /// Returns the values of the column called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`TimeSeriesError::UnknownColumn`] if no column has that name.
    pub fn column(&self, name: &str) -> Result<ArrayView1<'_, f64>, TimeSeriesError> {
        let j = self
            .names
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| TimeSeriesError::UnknownColumn {
                name: name.to_string(),
            })?;
        Ok(self.values.column(j))
    }

    /// Returns `true` when every value is finite.
    pub fn all_finite(&self) -> bool {
        self.values.iter().all(|v| v.is_finite())
    }

    /// Infers the sampling frequency of the time index.
    ///
    /// See [`Frequency::infer()`] for the rules.
    pub fn infer_freq(&self) -> Option<Frequency> {
        Frequency::infer(&self.time)
    }
}
