//! The VAR model lifecycle: fit, predict, plot.

use std::fmt;

use kairos_plot::{Axes, Figure};
use kairos_timeseries::{ForecastFrame, ForecastRow, TimeSeriesData};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::error::VarError;
use crate::estimator::{OlsEstimator, VarEstimator};
use crate::fit::VarFit;
use crate::forecast::{PredictConfig, VarForecast};
use crate::params::VarParams;
use crate::plot;

/// One entry of a hyperparameter search space.
pub type SearchSpaceEntry = Map<String, Value>;

#[derive(Clone, Debug, Default)]
enum ModelState {
    #[default]
    Unfit,
    Fitted(VarFit),
    Predicted { fit: VarFit, forecast: VarForecast },
}

/// A vector autoregression over a borrowed [`TimeSeriesData`].
///
/// ```mermaid
/// graph LR
///     A["VarModel::new(&data, params)"] -->|".fit()?"| B["Fitted"]
///     B -->|".predict(steps, include_history)?"| C["Predicted"]
///     C -->|".predict(..)?"| C
///     C -->|".plot(None)?"| D["Figure"]
///     C -->|".fit()?"| B
/// ```
///
/// # Example
///
/// ```
/// use chrono::{NaiveDate, TimeDelta};
/// use kairos_timeseries::TimeSeriesData;
/// use kairos_var::{VarModel, VarParams};
///
/// let t0 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let time: Vec<_> = (0..40).map(|i| t0 + TimeDelta::days(i)).collect();
/// let a: Vec<f64> = (0..40).map(|i| (i as f64 * 0.7).sin()).collect();
/// let b: Vec<f64> = (0..40).map(|i| (i as f64 * 0.3).cos()).collect();
/// let data = TimeSeriesData::new(time, vec![("a".into(), a), ("b".into(), b)]).unwrap();
///
/// let mut model = VarModel::new(&data, VarParams::default());
/// model.fit().unwrap();
/// let forecast = model.predict(5, false).unwrap();
/// assert_eq!(forecast.frames()[0].len(), 5);
/// assert_eq!(model.to_string(), "VAR");
/// ```
#[derive(Debug)]
pub struct VarModel<'a, E = OlsEstimator> {
    data: &'a TimeSeriesData,
    params: VarParams,
    estimator: E,
    state: ModelState,
}

impl<'a> VarModel<'a, OlsEstimator> {
    /// Creates an unfitted model using ordinary least squares.
    pub fn new(data: &'a TimeSeriesData, params: VarParams) -> Self {
        Self::with_estimator(data, params, OlsEstimator)
    }

    /// Hyperparameter search space for VAR.
    ///
    /// # Errors
    ///
    /// Always returns [`VarError::NotImplemented`].
    pub fn get_parameter_search_space() -> Result<Vec<SearchSpaceEntry>, VarError> {
        Err(VarError::NotImplemented {
            feature: "parameter search space",
        })
    }
}

impl<'a, E: VarEstimator> VarModel<'a, E> {
    /// Creates an unfitted model backed by `estimator`.
    pub fn with_estimator(data: &'a TimeSeriesData, params: VarParams, estimator: E) -> Self {
        Self {
            data,
            params,
            estimator,
            state: ModelState::Unfit,
        }
    }

    /// Returns the parameters.
    pub fn params(&self) -> &VarParams {
        &self.params
    }

    /// Returns the borrowed data.
    pub fn data(&self) -> &'a TimeSeriesData {
        self.data
    }

    /// Returns `true` once `fit()` has succeeded.
    pub fn is_fitted(&self) -> bool {
        self.fitted().is_some()
    }

    /// Returns the fitted results, if any.
    pub fn fitted(&self) -> Option<&VarFit> {
        match &self.state {
            ModelState::Unfit => None,
            ModelState::Fitted(fit) | ModelState::Predicted { fit, .. } => Some(fit),
        }
    }

    /// Returns the stored forecast, if `predict` has succeeded since the last fit.
    pub fn forecast(&self) -> Option<&VarForecast> {
        match &self.state {
            ModelState::Predicted { forecast, .. } => Some(forecast),
            _ => None,
        }
    }

    /// Fits the model, replacing any earlier fit and forecast.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`VarError::EmptyData`] | no rows or no columns |
    /// | [`VarError::Univariate`] | fewer than two series |
    /// | [`VarError::NonFiniteData`] | NaN or infinite values |
    /// | [`VarError::InsufficientData`] | too few rows for the lag order |
    /// | [`VarError::InvalidParams`] | `params.validate()` fails |
    /// | [`VarError::SingularDesign`] | the least-squares solve has no finite solution |
    ///
    /// The state is left unchanged on error.
    pub fn fit(&mut self) -> Result<(), VarError> {
        debug!(
            n_obs = self.data.len(),
            n_series = self.data.n_series(),
            trend = %self.params.trend(),
            "fitting VAR"
        );
        let fit = self.estimator.fit(self.data, &self.params)?;
        info!(lags = fit.k_ar(), nobs = fit.nobs(), aic = fit.aic(), "VAR fitted");
        self.state = ModelState::Fitted(fit);
        Ok(())
    }

    /// Forecasts `steps` periods with a 95% interval.
    ///
    /// Shorthand for [`predict_with()`](Self::predict_with) with
    /// [`PredictConfig::new(steps)`](PredictConfig::new).
    ///
    /// # Errors
    ///
    /// See [`predict_with()`](Self::predict_with).
    pub fn predict(
        &mut self,
        steps: usize,
        include_history: bool,
    ) -> Result<&VarForecast, VarError> {
        self.predict_with(&PredictConfig::new(steps).with_include_history(include_history))
    }

    /// Forecasts according to `config` and stores the result.
    ///
    /// Each series gets `steps` future rows with a point forecast and a
    /// `1 - alpha` normal interval. With `include_history`, the in-sample
    /// predictions for observations `k_ar..n` come first, with no bounds.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`VarError::NotFitted`] | `fit()` has not succeeded |
    /// | [`VarError::InvalidSteps`] | `steps == 0` |
    /// | [`VarError::InvalidAlpha`] | `alpha` outside (0, 1) |
    /// | [`VarError::UnknownFrequency`] | no override and none inferable |
    /// | [`VarError::TimeOverflow`] | future timestamps out of range |
    /// | [`VarError::InSampleForecast`] | the in-sample step failed (any cause) |
    pub fn predict_with(&mut self, config: &PredictConfig) -> Result<&VarForecast, VarError> {
        let fit = self.fitted().ok_or(VarError::NotFitted)?;
        config.validate()?;
        let forecast = self.build_forecast(fit, config)?;

        self.state = match std::mem::take(&mut self.state) {
            ModelState::Fitted(fit) | ModelState::Predicted { fit, .. } => {
                ModelState::Predicted { fit, forecast }
            }
            ModelState::Unfit => return Err(VarError::NotFitted),
        };
        self.forecast().ok_or(VarError::NotPredicted)
    }

    /// Draws the stored forecast, one panel per series.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`VarError::AxesNotSupported`] | `ax` is `Some` |
    /// | [`VarError::NotPredicted`] | no forecast stored |
    /// | [`VarError::HistoryPlotNotSupported`] | the forecast includes history |
    /// | [`VarError::Plot`] | figure construction failed |
    pub fn plot(&self, ax: Option<&mut Axes>) -> Result<Figure, VarError> {
        if ax.is_some() {
            return Err(VarError::AxesNotSupported);
        }
        let forecast = self.forecast().ok_or(VarError::NotPredicted)?;
        if forecast.include_history() {
            return Err(VarError::HistoryPlotNotSupported);
        }
        plot::forecast_figure(self.data, forecast)
    }

    fn build_forecast(&self, fit: &VarFit, config: &PredictConfig) -> Result<VarForecast, VarError> {
        let steps = config.steps();
        let inferred = self.data.infer_freq();
        let freq = match (config.freq(), inferred) {
            (Some(given), Some(found)) if given != found => {
                warn!(given = %given, inferred = %found, "frequency override differs from data");
                given
            }
            (Some(given), _) => given,
            (None, Some(found)) => found,
            (None, None) => return Err(VarError::UnknownFrequency),
        };
        let last = self.data.end().ok_or(VarError::EmptyData)?;
        let times = freq
            .future_times(last, steps)
            .ok_or(VarError::TimeOverflow)?;

        debug!(steps, alpha = config.alpha(), freq = %freq, include_history = config.include_history(), "forecasting");
        let interval = self
            .estimator
            .forecast_interval(fit, steps, config.alpha())?;
        let k = fit.neqs();
        if interval.point.dim() != (steps, k) {
            return Err(VarError::Estimator {
                reason: format!(
                    "forecast has shape {:?}, expected ({steps}, {k})",
                    interval.point.dim()
                ),
            });
        }

        let mut history = if config.include_history() {
            self.in_sample_rows(fit).map_err(VarError::in_sample)?
        } else {
            Vec::new()
        };

        let frames = fit
            .names()
            .iter()
            .enumerate()
            .map(|(j, name)| {
                let future = times
                    .iter()
                    .enumerate()
                    .map(|(h, &time)| ForecastRow {
                        time,
                        fcst: interval.point[[h, j]],
                        fcst_lower: Some(interval.lower[[h, j]]),
                        fcst_upper: Some(interval.upper[[h, j]]),
                    })
                    .collect();
                match history.get_mut(j) {
                    Some(rows) => ForecastFrame::with_history(name, std::mem::take(rows), future),
                    None => ForecastFrame::new(name, future),
                }
            })
            .collect();

        Ok(VarForecast {
            frames,
            steps,
            alpha: config.alpha(),
            freq,
            include_history: config.include_history(),
        })
    }

    /// In-sample rows per series, aligned with observations `k_ar..n`.
    fn in_sample_rows(&self, fit: &VarFit) -> Result<Vec<Vec<ForecastRow>>, VarError> {
        let values = self.estimator.in_sample(fit)?;
        let times = self
            .data
            .time()
            .get(fit.k_ar()..)
            .ok_or_else(|| VarError::Estimator {
                reason: format!(
                    "lag order {} exceeds history length {}",
                    fit.k_ar(),
                    self.data.len()
                ),
            })?;
        if values.dim() != (times.len(), fit.neqs()) {
            return Err(VarError::Estimator {
                reason: format!(
                    "in-sample values have shape {:?}, history needs ({}, {})",
                    values.dim(),
                    times.len(),
                    fit.neqs()
                ),
            });
        }

        Ok(values
            .columns()
            .into_iter()
            .map(|col| {
                times
                    .iter()
                    .zip(col.iter())
                    .map(|(&time, &fcst)| ForecastRow {
                        time,
                        fcst,
                        fcst_lower: None,
                        fcst_upper: None,
                    })
                    .collect()
            })
            .collect())
    }
}

impl<E> fmt::Display for VarModel<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VAR")
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeDelta};
    use kairos_timeseries::Frequency;

    use super::*;
    use crate::error::ErrorKind;

    fn small_data() -> TimeSeriesData {
        let t0 = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let time: Vec<_> = (0..30).map(|i| t0 + TimeDelta::days(i)).collect();
        let a: Vec<f64> = (0..30).map(|i| (i as f64 * 0.9).sin() + 0.1 * i as f64).collect();
        let b: Vec<f64> = (0..30).map(|i| (i as f64 * 0.4).cos()).collect();
        TimeSeriesData::new(time, vec![("a".into(), a), ("b".into(), b)]).unwrap()
    }

    #[test]
    fn display_in_every_state() {
        let data = small_data();
        let mut model = VarModel::new(&data, VarParams::default());
        assert_eq!(model.to_string(), "VAR");
        model.fit().unwrap();
        assert_eq!(model.to_string(), "VAR");
        model.predict(2, false).unwrap();
        assert_eq!(format!("{model}"), "VAR");
    }

    #[test]
    fn state_transitions() {
        let data = small_data();
        let mut model = VarModel::new(&data, VarParams::default());
        assert!(!model.is_fitted());
        assert!(model.forecast().is_none());

        model.fit().unwrap();
        assert!(model.is_fitted());
        assert!(model.forecast().is_none());

        model.predict(3, false).unwrap();
        assert_eq!(model.forecast().unwrap().steps(), 3);

        model.predict(4, false).unwrap();
        assert_eq!(model.forecast().unwrap().steps(), 4);

        model.fit().unwrap();
        assert!(model.is_fitted());
        assert!(model.forecast().is_none());
    }

    #[test]
    fn failed_fit_keeps_state() {
        let data = small_data();
        let mut model = VarModel::new(&data, VarParams::default());
        model.fit().unwrap();
        model.predict(2, false).unwrap();

        let mut bad = VarModel::new(&data, VarParams::default().with_maxlags(20));
        assert!(bad.fit().is_err());
        assert!(!bad.is_fitted());
        assert!(model.forecast().is_some());
    }

    #[test]
    fn predict_validates_after_fit_check() {
        let data = small_data();
        let mut model = VarModel::new(&data, VarParams::default());
        assert!(matches!(model.predict(0, false), Err(VarError::NotFitted)));
        model.fit().unwrap();
        assert!(matches!(
            model.predict(0, false),
            Err(VarError::InvalidSteps { steps: 0 })
        ));
    }

    #[test]
    fn frequency_override() {
        let data = small_data();
        let mut model = VarModel::new(&data, VarParams::default());
        model.fit().unwrap();
        let fc = model
            .predict_with(&PredictConfig::new(2).with_freq(Frequency::Fixed(TimeDelta::hours(6))))
            .unwrap();
        let times = fc.frames()[0].times();
        assert_eq!(times[1] - times[0], TimeDelta::hours(6));
        assert_eq!(times[0] - data.end().unwrap(), TimeDelta::hours(6));
    }

    #[test]
    fn plot_checks_axes_first() {
        let data = small_data();
        let model = VarModel::new(&data, VarParams::default());
        let mut ax = Axes::new();
        assert!(matches!(
            model.plot(Some(&mut ax)),
            Err(VarError::AxesNotSupported)
        ));
        assert!(matches!(model.plot(None), Err(VarError::NotPredicted)));
    }

    #[test]
    fn search_space_not_implemented() {
        let err = VarModel::get_parameter_search_space().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotImplemented);
    }
}
