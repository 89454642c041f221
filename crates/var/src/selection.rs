//! Lag order selection by information criteria.

use std::fmt;

use kairos_timeseries::TimeSeriesData;
use rayon::prelude::*;
use tracing::debug;

use crate::error::VarError;
use crate::estimate::{self, Criteria};
use crate::params::{InfoCriterion, Trend};

/// Information criteria for one candidate lag order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LagCriteria {
    lag: usize,
    criteria: Criteria,
}

impl LagCriteria {
    /// The candidate lag order.
    pub fn lag(&self) -> usize {
        self.lag
    }

    /// Value of `ic` at this lag.
    pub fn value(&self, ic: InfoCriterion) -> f64 {
        match ic {
            InfoCriterion::Aic => self.criteria.aic,
            InfoCriterion::Bic => self.criteria.bic,
            InfoCriterion::Hqic => self.criteria.hqic,
            InfoCriterion::Fpe => self.criteria.fpe,
        }
    }
}

/// Result of [`select_order()`]: criteria for every lag `0..=maxlags`.
///
/// All candidates are fitted on the same sample, which starts `maxlags`
/// observations into the data, so their criteria are comparable.
#[derive(Clone, Debug)]
pub struct LagOrderSelection {
    maxlags: usize,
    nobs: usize,
    table: Vec<LagCriteria>,
}

impl LagOrderSelection {
    /// Largest lag considered.
    pub fn maxlags(&self) -> usize {
        self.maxlags
    }

    /// Number of observations in the common estimation sample.
    pub fn nobs(&self) -> usize {
        self.nobs
    }

    /// Criteria for lags `0..=maxlags`, indexed by lag.
    pub fn criteria(&self) -> &[LagCriteria] {
        &self.table
    }

    /// Lag minimising `ic`. Ties go to the smaller lag; NaN never wins.
    pub fn selected(&self, ic: InfoCriterion) -> usize {
        let mut best = 0;
        let mut best_value = f64::INFINITY;
        for row in &self.table {
            let v = row.value(ic);
            if v < best_value {
                best = row.lag;
                best_value = v;
            }
        }
        best
    }
}

impl fmt::Display for LagOrderSelection {
    /// Renders the criteria table with the minimum of each column starred.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>4}", "lag")?;
        for ic in InfoCriterion::ALL {
            write!(f, " {:>12}", ic.code())?;
        }
        writeln!(f)?;
        for row in &self.table {
            write!(f, "{:>4}", row.lag)?;
            for ic in InfoCriterion::ALL {
                let mark = if self.selected(ic) == row.lag { "*" } else { " " };
                write!(f, " {:>11.4}{mark}", row.value(ic))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Largest lag order the data can estimate with `trend`.
pub(crate) fn max_estimable(n: usize, k: usize, trend: Trend) -> usize {
    n.saturating_sub(k + trend.n_terms()) / (1 + k)
}

/// Default search bound `round(12 · (n/100)^¼)`.
pub(crate) fn default_maxlags(n: usize) -> usize {
    (12.0 * (n as f64 / 100.0).powf(0.25)).round() as usize
}

/// Computes AIC, BIC, HQIC and FPE for every lag `0..=maxlags`.
///
/// When `maxlags` is `None` the bound is `round(12 · (n/100)^¼)`, capped
/// at the largest estimable order. Candidates are fitted in parallel.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`VarError::EmptyData`] | no rows or no columns |
/// | [`VarError::Univariate`] | fewer than two series |
/// | [`VarError::NonFiniteData`] | NaN or infinite values |
/// | [`VarError::MaxLagsTooLarge`] | explicit `maxlags` above the estimable bound |
/// | [`VarError::InsufficientData`] | not even one lag is estimable |
/// | [`VarError::SingularDesign`] | a candidate's least-squares solve has no finite solution |
pub fn select_order(
    data: &TimeSeriesData,
    maxlags: Option<usize>,
    trend: Trend,
) -> Result<LagOrderSelection, VarError> {
    estimate::check_data(data)?;
    let values = data.values();
    let (n, k) = values.dim();
    let n_trend = trend.n_terms();
    let bound = max_estimable(n, k, trend);

    let maxlags = match maxlags {
        Some(m) if m > bound => {
            return Err(VarError::MaxLagsTooLarge {
                maxlags: m,
                max_estimable: bound,
            });
        }
        Some(m) => m,
        None => default_maxlags(n).min(bound),
    };
    if maxlags == 0 {
        return Err(VarError::InsufficientData {
            n,
            min: k + n_trend + 1 + k,
        });
    }

    let nobs = n - maxlags;
    let table = (0..=maxlags)
        .into_par_iter()
        .map(|lag| {
            let d = estimate::design(values, lag, trend, maxlags);
            let out = estimate::ols(&d)?;
            let sigma_mle = estimate::covariance(&out.resid, nobs as f64);
            Ok(LagCriteria {
                lag,
                criteria: estimate::criteria(nobs, k, lag, n_trend, &sigma_mle),
            })
        })
        .collect::<Result<Vec<_>, VarError>>()?;

    debug!(maxlags, nobs, "lag order criteria computed");
    Ok(LagOrderSelection {
        maxlags,
        nobs,
        table,
    })
}
