//! Error types for the kairos-var crate.

use kairos_plot::PlotError;

/// Prefix of every in-sample reconstruction failure message.
pub const IN_SAMPLE_FAILURE: &str = "Failed to generate in-sample forecasts for historical data";

/// Broad classification of a [`VarError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad data, bad arguments, or an operation called in the wrong state.
    InvalidInput,
    /// The operation is deliberately unsupported.
    NotImplemented,
    /// A failure raised by a collaborator (estimator, renderer) and wrapped.
    Upstream,
}

/// Error type for all fallible operations in the kairos-var crate.
///
/// Use [`VarError::kind()`] to branch on the category instead of matching
/// every variant.
#[derive(Debug, Clone, thiserror::Error)]
pub enum VarError {
    /// Returned when the input data has no rows or no columns.
    #[error("input data is empty")]
    EmptyData,

    /// Returned when fewer than two series are supplied.
    #[error("VAR requires at least two series, got {n_series}")]
    Univariate {
        /// Number of series supplied.
        n_series: usize,
    },

    /// Returned when the input data contains NaN or infinity.
    #[error("input data contains non-finite values")]
    NonFiniteData,

    /// Returned when there are too few observations for the requested lags.
    #[error("insufficient data: got {n} observations, need at least {min}")]
    InsufficientData {
        /// Number of observations provided.
        n: usize,
        /// Minimum number of observations required.
        min: usize,
    },

    /// Returned when an explicit `maxlags` cannot be estimated.
    #[error("maxlags={maxlags} is too large; at most {max_estimable} lags can be estimated")]
    MaxLagsTooLarge {
        /// Requested maximum lag.
        maxlags: usize,
        /// Largest estimable lag for this data.
        max_estimable: usize,
    },

    /// Returned when the least-squares solve yields no finite solution.
    #[error("least-squares solve failed; the design matrix is degenerate")]
    SingularDesign,

    /// Returned by [`VarParams::validate()`](crate::VarParams::validate) and
    /// when parsing parameter codes.
    #[error("invalid VAR parameters: {reason}")]
    InvalidParams {
        /// What is wrong.
        reason: String,
    },

    /// Returned when `predict` is called before a successful `fit`.
    #[error("model must be fit before predict")]
    NotFitted,

    /// Returned when `plot` is called before a successful `predict`.
    #[error("predict() must be called before plot()")]
    NotPredicted,

    /// Returned when `plot` receives caller-supplied axes.
    #[error("VAR plot() does not support external axes")]
    AxesNotSupported,

    /// Returned when `plot` is asked to draw a forecast that includes history.
    #[error("VAR plot() cannot draw a forecast that includes history")]
    HistoryPlotNotSupported,

    /// Returned when the forecast horizon is zero.
    #[error("steps must be >= 1, got {steps}")]
    InvalidSteps {
        /// The rejected horizon.
        steps: usize,
    },

    /// Returned when the interval significance level is outside (0, 1).
    #[error("alpha must be in (0, 1), got {alpha}")]
    InvalidAlpha {
        /// The rejected significance level.
        alpha: f64,
    },

    /// Returned when no frequency is given and none can be inferred.
    #[error("cannot infer the frequency of the time index; set one explicitly")]
    UnknownFrequency,

    /// Returned when future timestamps overflow the calendar.
    #[error("future timestamps overflow the calendar")]
    TimeOverflow,

    /// Returned for deliberately unsupported features.
    #[error("{feature} is not implemented for VAR")]
    NotImplemented {
        /// The unsupported feature.
        feature: &'static str,
    },

    /// Returned by an estimator backend that fails for its own reasons.
    #[error("estimator failure: {reason}")]
    Estimator {
        /// Description of the backend failure.
        reason: String,
    },

    /// Wraps any failure while reconstructing in-sample forecasts.
    #[error("Failed to generate in-sample forecasts for historical data: {source}")]
    InSampleForecast {
        /// The original failure.
        #[source]
        source: Box<VarError>,
    },

    /// Wraps a rendering failure.
    #[error("plot error: {0}")]
    Plot(#[from] PlotError),
}

impl VarError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotImplemented { .. } => ErrorKind::NotImplemented,
            Self::Estimator { .. } | Self::InSampleForecast { .. } | Self::Plot(_) => {
                ErrorKind::Upstream
            }
            _ => ErrorKind::InvalidInput,
        }
    }

    /// Wraps `source` as an in-sample reconstruction failure.
    pub(crate) fn in_sample(source: VarError) -> Self {
        Self::InSampleForecast {
            source: Box::new(source),
        }
    }
}
