//! Least-squares estimation of VAR(p) coefficients.
//!
//! The regression for observation `t` is
//!
//! ```text
//! y_t = d(tt) · C + y_{t-1} A_1ᵀ + … + y_{t-p} A_pᵀ + u_t
//! ```
//!
//! where `d(tt)` holds the deterministic terms evaluated at the 1-based
//! position `tt` within the estimation sample.
//!
//! **Not part of the public API.**

use kairos_timeseries::TimeSeriesData;
use ndarray::{Array1, Array2, s};
use tracing::trace;

use crate::error::VarError;
use crate::fit::VarFit;
use crate::linalg;
use crate::params::Trend;

/// Regressor and response matrices for one lag order.
pub(crate) struct Design {
    /// Shape `(nobs, n_trend + k * lags)`.
    pub(crate) z: Array2<f64>,
    /// Shape `(nobs, k)`.
    pub(crate) y: Array2<f64>,
}

/// Builds the design for `lags` lags, using rows `offset..n` as responses.
///
/// `offset >= lags` must hold; lag selection passes a common `offset` so
/// every candidate is fitted on the same sample.
pub(crate) fn design(values: &Array2<f64>, lags: usize, trend: Trend, offset: usize) -> Design {
    let (n, k) = values.dim();
    let nobs = n - offset;
    let n_trend = trend.n_terms();
    let mut z = Array2::<f64>::zeros((nobs, n_trend + k * lags));
    let mut y = Array2::<f64>::zeros((nobs, k));

    for r in 0..nobs {
        let t = offset + r;
        for (c, term) in trend.terms((r + 1) as f64).enumerate() {
            z[[r, c]] = term;
        }
        for lag in 1..=lags {
            let start = n_trend + (lag - 1) * k;
            z.slice_mut(s![r, start..start + k])
                .assign(&values.row(t - lag));
        }
        y.row_mut(r).assign(&values.row(t));
    }

    Design { z, y }
}

/// Coefficients, fitted values and residuals of one least-squares solve.
pub(crate) struct OlsOutput {
    /// Shape `(n_trend + k * lags, k)`; column `j` is equation `j`.
    pub(crate) params: Array2<f64>,
    pub(crate) fitted: Array2<f64>,
    pub(crate) resid: Array2<f64>,
}

/// Least-squares solve of `Z B ≈ Y` by SVD of `Z`.
///
/// Collinear regressors get the minimum-norm solution, so the fitted
/// values stay well defined.
pub(crate) fn ols(design: &Design) -> Result<OlsOutput, VarError> {
    let Design { z, y } = design;
    let params = if z.ncols() == 0 {
        Array2::zeros((0, y.ncols()))
    } else {
        linalg::lstsq(z, y).ok_or(VarError::SingularDesign)?
    };
    let fitted = z.dot(&params);
    let resid = y - &fitted;
    Ok(OlsOutput {
        params,
        fitted,
        resid,
    })
}

/// Information criteria for one fitted lag order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Criteria {
    pub(crate) aic: f64,
    pub(crate) bic: f64,
    pub(crate) hqic: f64,
    pub(crate) fpe: f64,
}

/// Computes AIC, BIC, HQIC and FPE from the MLE residual covariance.
///
/// The penalty counts `lags·k² + k·n_trend` free parameters.
pub(crate) fn criteria(
    nobs: usize,
    k: usize,
    lags: usize,
    n_trend: usize,
    sigma_u_mle: &Array2<f64>,
) -> Criteria {
    let nobs_f = nobs as f64;
    let df_model = (n_trend + k * lags) as f64;
    let df_resid = nobs_f - df_model;
    let free_params = (lags * k * k + k * n_trend) as f64;
    let ld = if df_resid > 0.0 {
        linalg::logdet_spd(sigma_u_mle)
    } else {
        f64::NEG_INFINITY
    };
    Criteria {
        aic: ld + 2.0 / nobs_f * free_params,
        bic: ld + nobs_f.ln() / nobs_f * free_params,
        hqic: ld + 2.0 * nobs_f.ln().ln() / nobs_f * free_params,
        fpe: ((nobs_f + df_model) / df_resid).powi(k as i32) * ld.exp(),
    }
}

/// Residual covariance `UᵀU / denom`.
pub(crate) fn covariance(resid: &Array2<f64>, denom: f64) -> Array2<f64> {
    resid.t().dot(resid) / denom
}

/// Rejects data a VAR cannot be fitted to.
pub(crate) fn check_data(data: &TimeSeriesData) -> Result<(), VarError> {
    if data.is_empty() {
        return Err(VarError::EmptyData);
    }
    if data.n_series() < 2 {
        return Err(VarError::Univariate {
            n_series: data.n_series(),
        });
    }
    if !data.all_finite() {
        return Err(VarError::NonFiniteData);
    }
    Ok(())
}

/// Fits a VAR(`lags`) on all available observations.
pub(crate) fn estimate(
    data: &TimeSeriesData,
    lags: usize,
    trend: Trend,
) -> Result<VarFit, VarError> {
    check_data(data)?;
    let values = data.values();
    let (n, k) = values.dim();
    let n_trend = trend.n_terms();
    let min = lags + n_trend + k * lags + 1;
    if n < min {
        return Err(VarError::InsufficientData { n, min });
    }

    let d = design(values, lags, trend, lags);
    let out = ols(&d)?;
    let nobs = n - lags;
    let df_resid = (nobs - (n_trend + k * lags)) as f64;
    let sigma_u = covariance(&out.resid, df_resid);
    let sigma_u_mle = covariance(&out.resid, nobs as f64);
    let ic = criteria(nobs, k, lags, n_trend, &sigma_u_mle);
    trace!(lags, nobs, aic = ic.aic, "OLS solve complete");

    let coefs = (0..lags)
        .map(|i| {
            let start = n_trend + i * k;
            out.params.slice(s![start..start + k, ..]).t().to_owned()
        })
        .collect();
    let trend_coefs = out.params.slice(s![..n_trend, ..]).t().to_owned();
    let tail = values.slice(s![n - lags.., ..]).to_owned();

    Ok(VarFit {
        names: data.names().to_vec(),
        trend,
        k_ar: lags,
        nobs,
        coefs,
        trend_coefs,
        sigma_u,
        sigma_u_mle,
        resid: out.resid,
        fitted: out.fitted,
        tail,
        criteria: ic,
    })
}

/// Deterministic contribution `C d(tt)` for every equation.
pub(crate) fn deterministic(trend: Trend, trend_coefs: &Array2<f64>, tt: f64) -> Array1<f64> {
    let mut out = Array1::<f64>::zeros(trend_coefs.nrows());
    for (c, term) in trend.terms(tt).enumerate() {
        out.scaled_add(term, &trend_coefs.column(c));
    }
    out
}
