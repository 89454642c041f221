//! Error types for the kairos-timeseries crate.

/// Error type for all fallible operations in the kairos-timeseries crate.
///
/// Every variant describes a structural problem with the table handed to
/// [`TimeSeriesData::new()`](crate::TimeSeriesData::new) or a lookup against it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TimeSeriesError {
    /// Returned when a value column has a different length than the time index.
    #[error("column '{name}' has {got} values, time index has {expected}")]
    LengthMismatch {
        /// Name of the offending column.
        name: String,
        /// Length of the time index.
        expected: usize,
        /// Length of the column.
        got: usize,
    },

    /// Returned when timestamps are not strictly increasing.
    #[error("timestamps must be strictly increasing (violation at row {index})")]
    UnorderedTime {
        /// Row index of the first timestamp that is not after its predecessor.
        index: usize,
    },

    /// Returned when two value columns share a name.
    #[error("duplicate column name '{name}'")]
    DuplicateColumn {
        /// The repeated name.
        name: String,
    },

    /// Returned when a value column has an empty name.
    #[error("column names must not be empty")]
    EmptyColumnName,

    /// Returned when rows are present but no value column is.
    #[error("time index has {n} rows but no value columns")]
    NoValueColumns {
        /// Number of timestamps supplied.
        n: usize,
    },

    /// Returned when a column lookup fails.
    #[error("unknown column '{name}'")]
    UnknownColumn {
        /// The requested name.
        name: String,
    },
}
