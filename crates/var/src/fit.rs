//! Fitted VAR model results.

use ndarray::{Array1, Array2, s};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use crate::estimate::{self, Criteria};
use crate::linalg;
use crate::params::{InfoCriterion, Trend};

/// A fitted VAR(p) model.
///
/// Produced by a [`VarEstimator`](crate::VarEstimator) and held by
/// [`VarModel`](crate::VarModel) after `fit()`. Coefficient matrices use
/// the equation-by-row convention: `coefs()[i][[r, c]]` is the effect of
/// series `c` at lag `i + 1` on series `r`.
///
/// ```mermaid
/// graph LR
///     B["VarFit"] --> C[".coefs(): A_1..A_p"]
///     B --> D[".sigma_u(): residual covariance"]
///     B --> E[".aic() / .bic() / .hqic() / .fpe()"]
///     B --> F[".forecast(steps)"]
///     B --> G[".forecast_mse(steps)"]
///     B --> H[".simulate(n, n_sim, &mut rng)"]
/// ```
#[derive(Clone, Debug)]
pub struct VarFit {
    pub(crate) names: Vec<String>,
    pub(crate) trend: Trend,
    pub(crate) k_ar: usize,
    pub(crate) nobs: usize,
    pub(crate) coefs: Vec<Array2<f64>>,
    /// Shape `(k, n_trend)`.
    pub(crate) trend_coefs: Array2<f64>,
    pub(crate) sigma_u: Array2<f64>,
    pub(crate) sigma_u_mle: Array2<f64>,
    pub(crate) resid: Array2<f64>,
    pub(crate) fitted: Array2<f64>,
    /// Last `k_ar` observations, oldest first.
    pub(crate) tail: Array2<f64>,
    pub(crate) criteria: Criteria,
}

impl VarFit {
    /// Returns the lag order `p`.
    pub fn k_ar(&self) -> usize {
        self.k_ar
    }

    /// Returns the number of equations (series).
    pub fn neqs(&self) -> usize {
        self.names.len()
    }

    /// Returns the number of observations used in estimation.
    pub fn nobs(&self) -> usize {
        self.nobs
    }

    /// Returns the series names in equation order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns the deterministic terms.
    pub fn trend(&self) -> Trend {
        self.trend
    }

    /// Returns the lag coefficient matrices `A_1..A_p`, each `k × k`.
    pub fn coefs(&self) -> &[Array2<f64>] {
        &self.coefs
    }

    /// Returns the deterministic coefficients, shape `(k, n_trend)`.
    ///
    /// Column 0 is the intercept when the trend includes one.
    pub fn trend_coefs(&self) -> &Array2<f64> {
        &self.trend_coefs
    }

    /// Returns the residual covariance, degrees-of-freedom adjusted.
    pub fn sigma_u(&self) -> &Array2<f64> {
        &self.sigma_u
    }

    /// Returns the maximum-likelihood residual covariance `UᵀU / nobs`.
    pub fn sigma_u_mle(&self) -> &Array2<f64> {
        &self.sigma_u_mle
    }

    /// Returns the residuals, shape `(nobs, k)`.
    pub fn residuals(&self) -> &Array2<f64> {
        &self.resid
    }

    /// Returns the in-sample one-step fitted values, shape `(nobs, k)`.
    ///
    /// Row `i` corresponds to observation `k_ar + i` of the input.
    pub fn fitted_values(&self) -> &Array2<f64> {
        &self.fitted
    }

    /// Akaike information criterion.
    pub fn aic(&self) -> f64 {
        self.criteria.aic
    }

    /// Schwarz (Bayesian) information criterion.
    pub fn bic(&self) -> f64 {
        self.criteria.bic
    }

    /// Hannan-Quinn information criterion.
    pub fn hqic(&self) -> f64 {
        self.criteria.hqic
    }

    /// Final prediction error.
    pub fn fpe(&self) -> f64 {
        self.criteria.fpe
    }

    /// Returns the value of `ic` for this fit.
    pub fn info_criterion(&self, ic: InfoCriterion) -> f64 {
        match ic {
            InfoCriterion::Aic => self.aic(),
            InfoCriterion::Bic => self.bic(),
            InfoCriterion::Hqic => self.hqic(),
            InfoCriterion::Fpe => self.fpe(),
        }
    }

    /// Point forecasts for `steps` periods after the sample, shape `(steps, k)`.
    ///
    /// The trend index continues from the estimation sample, so step `h`
    /// uses `tt = nobs + h`.
    pub fn forecast(&self, steps: usize) -> Array2<f64> {
        let k = self.neqs();
        let p = self.k_ar;
        let mut path = Array2::<f64>::zeros((p + steps, k));
        path.slice_mut(s![..p, ..]).assign(&self.tail);

        for h in 0..steps {
            let row = p + h;
            let tt = (self.nobs + h + 1) as f64;
            let mut y = estimate::deterministic(self.trend, &self.trend_coefs, tt);
            for (i, a) in self.coefs.iter().enumerate() {
                y += &a.dot(&path.row(row - 1 - i));
            }
            path.row_mut(row).assign(&y);
        }

        path.slice(s![p.., ..]).to_owned()
    }

    /// Moving-average coefficient matrices `Φ_0..Φ_{maxn}`.
    ///
    /// `Φ_0 = I` and `Φ_i = Σ_{j=1}^{min(i,p)} A_j Φ_{i-j}`.
    pub fn ma_rep(&self, maxn: usize) -> Vec<Array2<f64>> {
        let k = self.neqs();
        let mut phis: Vec<Array2<f64>> = Vec::with_capacity(maxn + 1);
        phis.push(Array2::eye(k));
        for i in 1..=maxn {
            let mut phi = Array2::<f64>::zeros((k, k));
            for j in 1..=i.min(self.k_ar) {
                phi += &self.coefs[j - 1].dot(&phis[i - j]);
            }
            phis.push(phi);
        }
        phis
    }

    /// Forecast error covariance for horizons `1..=steps`.
    ///
    /// `MSE(h) = Σ_{i=0}^{h-1} Φ_i Σ_u Φ_iᵀ`, ignoring parameter uncertainty.
    pub fn forecast_mse(&self, steps: usize) -> Vec<Array2<f64>> {
        let k = self.neqs();
        let phis = self.ma_rep(steps.saturating_sub(1));
        let mut acc = Array2::<f64>::zeros((k, k));
        let mut out = Vec::with_capacity(steps);
        for phi in phis.iter().take(steps) {
            acc += &phi.dot(&self.sigma_u).dot(&phi.t());
            out.push(acc.clone());
        }
        out
    }

    /// Generates synthetic realisations from this fitted model.
    ///
    /// Draws `n_sim` independent paths of length `n` driven by Gaussian
    /// innovations with covariance [`sigma_u()`](Self::sigma_u). Each path
    /// has shape `(n, k)`. The first 100 simulated steps are discarded as
    /// burn-in, and the trend index counts from the start of the burn-in.
    ///
    /// Returns zero paths when `sigma_u` is not positive definite.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use rand::SeedableRng;
    /// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    /// let paths = fit.simulate(365, 100, &mut rng);
    /// assert_eq!(paths.len(), 100);
    /// assert_eq!(paths[0].nrows(), 365);
    /// ```
    pub fn simulate<R: Rng>(&self, n: usize, n_sim: usize, rng: &mut R) -> Vec<Array2<f64>> {
        const BURN_IN: usize = 100;

        let k = self.neqs();
        if n == 0 || n_sim == 0 {
            return vec![Array2::zeros((n, k)); n_sim];
        }
        let Some(chol) = linalg::cholesky(&self.sigma_u) else {
            return vec![Array2::zeros((n, k)); n_sim];
        };

        let p = self.k_ar;
        let n_tot = BURN_IN + n;

        (0..n_sim)
            .map(|_| {
                let mut y = Array2::<f64>::zeros((n_tot, k));
                for t in 0..n_tot {
                    let z: Array1<f64> = (0..k).map(|_| StandardNormal.sample(rng)).collect();
                    let mut val =
                        estimate::deterministic(self.trend, &self.trend_coefs, (t + 1) as f64);
                    val += &chol.dot(&z);
                    for (i, a) in self.coefs.iter().enumerate().take(p.min(t)) {
                        val += &a.dot(&y.row(t - 1 - i));
                    }
                    y.row_mut(t).assign(&val);
                }
                y.slice(s![BURN_IN.., ..]).to_owned()
            })
            .collect()
    }
}
