//! Forecast requests and results.

use kairos_timeseries::{ForecastFrame, Frequency};

use crate::error::VarError;

/// Arguments for [`VarModel::predict_with()`](crate::VarModel::predict_with).
///
/// # Example
///
/// ```
/// use kairos_var::PredictConfig;
///
/// let config = PredictConfig::new(12).with_alpha(0.1).with_include_history(true);
/// assert!(config.validate().is_ok());
/// assert!(PredictConfig::new(0).validate().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PredictConfig {
    steps: usize,
    include_history: bool,
    alpha: f64,
    freq: Option<Frequency>,
}

impl PredictConfig {
    /// Default significance level of the prediction interval.
    pub const DEFAULT_ALPHA: f64 = 0.05;

    /// Forecast `steps` periods ahead with a 95% interval and no history.
    pub fn new(steps: usize) -> Self {
        Self {
            steps,
            include_history: false,
            alpha: Self::DEFAULT_ALPHA,
            freq: None,
        }
    }

    /// Prepends in-sample predictions to every series.
    pub fn with_include_history(mut self, include_history: bool) -> Self {
        self.include_history = include_history;
        self
    }

    /// Sets the interval significance level; the interval covers `1 - alpha`.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Uses `freq` for future timestamps instead of inferring it.
    pub fn with_freq(mut self, freq: Frequency) -> Self {
        self.freq = Some(freq);
        self
    }

    /// Forecast horizon.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Whether history rows are included.
    pub fn include_history(&self) -> bool {
        self.include_history
    }

    /// Interval significance level.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Explicit frequency, if any.
    pub fn freq(&self) -> Option<Frequency> {
        self.freq
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`VarError::InvalidSteps`] | `steps == 0` |
    /// | [`VarError::InvalidAlpha`] | `alpha` not strictly inside (0, 1) |
    pub fn validate(&self) -> Result<(), VarError> {
        if self.steps == 0 {
            return Err(VarError::InvalidSteps { steps: self.steps });
        }
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(VarError::InvalidAlpha { alpha: self.alpha });
        }
        Ok(())
    }
}

/// The result of a successful predict: one [`ForecastFrame`] per series.
///
/// Frames keep the column order of the input data.
#[derive(Clone, Debug, PartialEq)]
pub struct VarForecast {
    pub(crate) frames: Vec<ForecastFrame>,
    pub(crate) steps: usize,
    pub(crate) alpha: f64,
    pub(crate) freq: Frequency,
    pub(crate) include_history: bool,
}

impl VarForecast {
    /// Frames in series order.
    pub fn frames(&self) -> &[ForecastFrame] {
        &self.frames
    }

    /// Frame for series `name`.
    pub fn get(&self, name: &str) -> Option<&ForecastFrame> {
        self.frames.iter().find(|f| f.name() == name)
    }

    /// Series names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.frames.iter().map(|f| f.name())
    }

    /// Number of series.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns `true` when there are no series.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Forecast horizon.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Interval significance level.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Frequency used for the future timestamps.
    pub fn freq(&self) -> Frequency {
        self.freq
    }

    /// Whether frames start with in-sample rows.
    pub fn include_history(&self) -> bool {
        self.include_history
    }

    /// Consumes the forecast, returning its frames.
    pub fn into_frames(self) -> Vec<ForecastFrame> {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use super::*;

    #[test]
    fn config_defaults() {
        let c = PredictConfig::new(5);
        assert_eq!(c.steps(), 5);
        assert!(!c.include_history());
        assert_eq!(c.alpha(), 0.05);
        assert_eq!(c.freq(), None);
    }

    #[test]
    fn config_builder() {
        let c = PredictConfig::new(2)
            .with_alpha(0.2)
            .with_include_history(true)
            .with_freq(Frequency::Fixed(TimeDelta::hours(1)));
        assert_eq!(c.alpha(), 0.2);
        assert!(c.include_history());
        assert_eq!(c.freq(), Some(Frequency::Fixed(TimeDelta::hours(1))));
    }

    #[test]
    fn config_rejects_zero_steps() {
        assert!(matches!(
            PredictConfig::new(0).validate(),
            Err(VarError::InvalidSteps { steps: 0 })
        ));
    }

    #[test]
    fn config_rejects_bad_alpha() {
        for alpha in [0.0, 1.0, -0.1, f64::NAN] {
            assert!(
                matches!(
                    PredictConfig::new(1).with_alpha(alpha).validate(),
                    Err(VarError::InvalidAlpha { .. })
                ),
                "alpha = {alpha}"
            );
        }
    }

    #[test]
    fn forecast_lookup_by_name() {
        let fc = VarForecast {
            frames: vec![ForecastFrame::new("a", vec![]), ForecastFrame::new("b", vec![])],
            steps: 1,
            alpha: 0.05,
            freq: Frequency::Months(1),
            include_history: false,
        };
        assert_eq!(fc.len(), 2);
        assert_eq!(fc.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert!(fc.get("b").is_some());
        assert!(fc.get("c").is_none());
    }
}
