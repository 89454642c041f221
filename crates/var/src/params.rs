//! VAR estimation parameters.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::VarError;

/// Deterministic regressors included in every equation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub enum Trend {
    /// No deterministic terms (`"n"`).
    #[serde(rename = "n")]
    None,
    /// Intercept only (`"c"`).
    #[default]
    #[serde(rename = "c")]
    Constant,
    /// Intercept and linear time trend (`"ct"`).
    #[serde(rename = "ct")]
    ConstantTrend,
    /// Intercept, linear and quadratic time trend (`"ctt"`).
    #[serde(rename = "ctt")]
    ConstantQuadratic,
}

impl Trend {
    /// Number of deterministic regressors.
    pub fn n_terms(self) -> usize {
        match self {
            Self::None => 0,
            Self::Constant => 1,
            Self::ConstantTrend => 2,
            Self::ConstantQuadratic => 3,
        }
    }

    /// Deterministic regressor values at 1-based time index `tt`.
    pub(crate) fn terms(self, tt: f64) -> impl Iterator<Item = f64> {
        [1.0, tt, tt * tt].into_iter().take(self.n_terms())
    }

    /// Short code as accepted by [`Trend::from_str()`].
    pub fn code(self) -> &'static str {
        match self {
            Self::None => "n",
            Self::Constant => "c",
            Self::ConstantTrend => "ct",
            Self::ConstantQuadratic => "ctt",
        }
    }
}

impl FromStr for Trend {
    type Err = VarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "n" => Ok(Self::None),
            "c" => Ok(Self::Constant),
            "ct" => Ok(Self::ConstantTrend),
            "ctt" => Ok(Self::ConstantQuadratic),
            _ => Err(VarError::InvalidParams {
                reason: format!("trend '{s}' not supported, must be one of n, c, ct, ctt"),
            }),
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Information criterion used to pick the lag order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InfoCriterion {
    /// Akaike.
    Aic,
    /// Schwarz (Bayesian).
    Bic,
    /// Hannan-Quinn.
    Hqic,
    /// Final prediction error.
    Fpe,
}

impl InfoCriterion {
    /// All criteria in reporting order.
    pub const ALL: [InfoCriterion; 4] = [Self::Aic, Self::Bic, Self::Hqic, Self::Fpe];

    /// Short code as accepted by [`InfoCriterion::from_str()`].
    pub fn code(self) -> &'static str {
        match self {
            Self::Aic => "aic",
            Self::Bic => "bic",
            Self::Hqic => "hqic",
            Self::Fpe => "fpe",
        }
    }
}

impl FromStr for InfoCriterion {
    type Err = VarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "aic" => Ok(Self::Aic),
            "bic" => Ok(Self::Bic),
            "hqic" => Ok(Self::Hqic),
            "fpe" => Ok(Self::Fpe),
            _ => Err(VarError::InvalidParams {
                reason: format!("{s} not recognized, must be among aic, bic, fpe, hqic"),
            }),
        }
    }
}

impl fmt::Display for InfoCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Estimation method for the VAR coefficients.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstimationMethod {
    /// Equation-by-equation ordinary least squares.
    #[default]
    Ols,
}

impl FromStr for EstimationMethod {
    type Err = VarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ols" => Ok(Self::Ols),
            _ => Err(VarError::InvalidParams {
                reason: format!("method '{s}' not supported, only ols is available"),
            }),
        }
    }
}

/// Parameters for fitting a [`VarModel`](crate::VarModel).
///
/// # Lag order
///
/// | `ic` | `maxlags` | Lag order used |
/// |------|-----------|----------------|
/// | `None` | `None` | 1 |
/// | `None` | `Some(p)` | `p` |
/// | `Some(c)` | `None` | argmin of `c` over `0..=round(12·(n/100)^¼)` (capped) |
/// | `Some(c)` | `Some(m)` | argmin of `c` over `0..=m` |
///
/// # Example
///
/// ```
/// use kairos_var::{InfoCriterion, Trend, VarParams};
///
/// let params = VarParams::default()
///     .with_maxlags(4)
///     .with_ic(InfoCriterion::Aic)
///     .with_trend(Trend::Constant);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VarParams {
    maxlags: Option<usize>,
    method: EstimationMethod,
    ic: Option<InfoCriterion>,
    trend: Trend,
    verbose: bool,
}

impl VarParams {
    /// Sets the lag order, or the search bound when an `ic` is set.
    pub fn with_maxlags(mut self, maxlags: usize) -> Self {
        self.maxlags = Some(maxlags);
        self
    }

    /// Sets the estimation method.
    pub fn with_method(mut self, method: EstimationMethod) -> Self {
        self.method = method;
        self
    }

    /// Selects the lag order with an information criterion.
    pub fn with_ic(mut self, ic: InfoCriterion) -> Self {
        self.ic = Some(ic);
        self
    }

    /// Sets the deterministic terms.
    pub fn with_trend(mut self, trend: Trend) -> Self {
        self.trend = trend;
        self
    }

    /// Logs the chosen lag order at `info` level.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Returns the configured maximum lag.
    pub fn maxlags(&self) -> Option<usize> {
        self.maxlags
    }

    /// Returns the estimation method.
    pub fn method(&self) -> EstimationMethod {
        self.method
    }

    /// Returns the lag selection criterion.
    pub fn ic(&self) -> Option<InfoCriterion> {
        self.ic
    }

    /// Returns the deterministic terms.
    pub fn trend(&self) -> Trend {
        self.trend
    }

    /// Returns whether lag selection is logged at `info` level.
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`VarError::InvalidParams`] when an information criterion is
    /// requested with `maxlags = 0`, which leaves nothing to select.
    pub fn validate(&self) -> Result<(), VarError> {
        if self.ic.is_some() && self.maxlags == Some(0) {
            return Err(VarError::InvalidParams {
                reason: "maxlags must be >= 1 when an information criterion is set".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let p = VarParams::default();
        assert_eq!(p.maxlags(), None);
        assert_eq!(p.method(), EstimationMethod::Ols);
        assert_eq!(p.ic(), None);
        assert_eq!(p.trend(), Trend::Constant);
        assert!(!p.verbose());
        assert!(p.validate().is_ok());
    }

    #[test]
    fn builder_chaining() {
        let p = VarParams::default()
            .with_maxlags(3)
            .with_ic(InfoCriterion::Bic)
            .with_trend(Trend::ConstantTrend)
            .with_verbose(true);
        assert_eq!(p.maxlags(), Some(3));
        assert_eq!(p.ic(), Some(InfoCriterion::Bic));
        assert_eq!(p.trend(), Trend::ConstantTrend);
        assert!(p.verbose());
    }

    #[test]
    fn validate_zero_maxlags_with_ic() {
        let p = VarParams::default()
            .with_maxlags(0)
            .with_ic(InfoCriterion::Aic);
        assert!(matches!(p.validate(), Err(VarError::InvalidParams { .. })));
    }

    #[test]
    fn validate_zero_maxlags_without_ic() {
        assert!(VarParams::default().with_maxlags(0).validate().is_ok());
    }

    #[test]
    fn trend_terms() {
        assert_eq!(Trend::None.terms(2.0).count(), 0);
        assert_eq!(Trend::Constant.terms(2.0).collect::<Vec<_>>(), vec![1.0]);
        assert_eq!(
            Trend::ConstantQuadratic.terms(3.0).collect::<Vec<_>>(),
            vec![1.0, 3.0, 9.0]
        );
    }

    #[test]
    fn trend_codes_round_trip() {
        for trend in [
            Trend::None,
            Trend::Constant,
            Trend::ConstantTrend,
            Trend::ConstantQuadratic,
        ] {
            assert_eq!(trend.code().parse::<Trend>().unwrap(), trend);
        }
        assert!("cttt".parse::<Trend>().is_err());
    }

    #[test]
    fn ic_codes_round_trip() {
        for ic in InfoCriterion::ALL {
            assert_eq!(ic.to_string().parse::<InfoCriterion>().unwrap(), ic);
        }
        let err = "aicc".parse::<InfoCriterion>().unwrap_err();
        assert!(err.to_string().contains("aicc not recognized"));
    }

    #[test]
    fn method_parse() {
        assert_eq!("ols".parse::<EstimationMethod>().unwrap(), EstimationMethod::Ols);
        assert!("mle".parse::<EstimationMethod>().is_err());
    }
}
