//! Estimation backends.
//!
//! [`VarModel`](crate::VarModel) does not solve anything itself: fitting,
//! interval forecasting and in-sample reconstruction go through a
//! [`VarEstimator`]. [`OlsEstimator`] is the default.

use kairos_timeseries::TimeSeriesData;
use ndarray::Array2;
use statrs::distribution::{ContinuousCDF, Normal};
use tracing::{debug, info};

use crate::error::VarError;
use crate::estimate;
use crate::fit::VarFit;
use crate::params::VarParams;
use crate::selection::select_order;

/// Point forecasts with symmetric Gaussian bounds, each `(steps, k)`.
#[derive(Clone, Debug, PartialEq)]
pub struct ForecastInterval {
    /// Point forecasts.
    pub point: Array2<f64>,
    /// Lower bounds.
    pub lower: Array2<f64>,
    /// Upper bounds.
    pub upper: Array2<f64>,
}

/// A VAR estimation backend.
pub trait VarEstimator {
    /// Fits a VAR to `data` according to `params`.
    ///
    /// # Errors
    ///
    /// Returns a [`VarError`] for invalid data or parameters, or when the
    /// backend fails.
    fn fit(&self, data: &TimeSeriesData, params: &VarParams) -> Result<VarFit, VarError>;

    /// Forecasts `steps` periods with `1 - alpha` intervals.
    ///
    /// # Errors
    ///
    /// Returns a [`VarError`] when the backend cannot produce the interval.
    fn forecast_interval(
        &self,
        fit: &VarFit,
        steps: usize,
        alpha: f64,
    ) -> Result<ForecastInterval, VarError>;

    /// In-sample predicted values, one row per observation after the first
    /// `k_ar`, shape `(n - k_ar, k)`.
    ///
    /// # Errors
    ///
    /// Returns a [`VarError`] when the backend cannot reconstruct them.
    fn in_sample(&self, fit: &VarFit) -> Result<Array2<f64>, VarError>;
}

/// Ordinary least squares, equation by equation.
#[derive(Clone, Copy, Debug, Default)]
pub struct OlsEstimator;

impl VarEstimator for OlsEstimator {
    fn fit(&self, data: &TimeSeriesData, params: &VarParams) -> Result<VarFit, VarError> {
        params.validate()?;
        estimate::check_data(data)?;

        let lags = match params.ic() {
            Some(ic) => {
                let selection = select_order(data, params.maxlags(), params.trend())?;
                let lags = selection.selected(ic);
                if params.verbose() {
                    info!(
                        ic = %ic,
                        lags,
                        value = selection.criteria()[lags].value(ic),
                        "selected lag order"
                    );
                } else {
                    debug!(ic = %ic, lags, "selected lag order");
                }
                lags
            }
            None => params.maxlags().unwrap_or(1),
        };

        estimate::estimate(data, lags, params.trend())
    }

    fn forecast_interval(
        &self,
        fit: &VarFit,
        steps: usize,
        alpha: f64,
    ) -> Result<ForecastInterval, VarError> {
        let z = normal_quantile(1.0 - alpha / 2.0)?;
        let point = fit.forecast(steps);
        let mse = fit.forecast_mse(steps);

        let mut half = Array2::<f64>::zeros(point.dim());
        for (h, cov) in mse.iter().enumerate() {
            for (j, v) in cov.diag().iter().enumerate() {
                half[[h, j]] = z * v.max(0.0).sqrt();
            }
        }

        Ok(ForecastInterval {
            lower: &point - &half,
            upper: &point + &half,
            point,
        })
    }

    fn in_sample(&self, fit: &VarFit) -> Result<Array2<f64>, VarError> {
        Ok(fit.fitted_values().clone())
    }
}

/// Standard normal quantile.
fn normal_quantile(p: f64) -> Result<f64, VarError> {
    let normal = Normal::new(0.0, 1.0).map_err(|e| VarError::Estimator {
        reason: e.to_string(),
    })?;
    Ok(normal.inverse_cdf(p))
}
