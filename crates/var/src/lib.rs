//! # kairos-var
//!
//! Vector autoregression: fit by least squares, forecast with normal
//! prediction intervals, draw the result.
//!
//! ## Lifecycle
//!
//! ```mermaid
//! graph LR
//!     P["VarParams::default().with_*()"] --> A
//!     A["VarModel::new(&data, params)"] -->|".fit()?"| B["Fitted(VarFit)"]
//!     B -->|".predict(steps, include_history)?"| C["Predicted(VarForecast)"]
//!     C -->|".plot(None)?"| D["kairos_plot::Figure"]
//!     S["select_order(&data, maxlags, trend)?"] -->|"argmin per criterion"| L["LagOrderSelection"]
//! ```
//!
//! ## Two Ways to Choose the Lag Order
//!
//! **Fixed order**:
//! ```ignore
//! let params = VarParams::default().with_maxlags(2);
//! ```
//!
//! **Information criterion** over `0..=maxlags`:
//! ```ignore
//! let params = VarParams::default().with_maxlags(8).with_ic(InfoCriterion::Bic);
//! ```
//!
//! ## Mathematical Glossary
//!
//! | Symbol | Accessor | Meaning |
//! |--------|----------|---------|
//! | A_i | [`VarFit::coefs()`] | Lag-`i` coefficient matrix, `k × k` |
//! | Σ_u | [`VarFit::sigma_u()`] | Residual covariance, degrees-of-freedom adjusted |
//! | Φ_i | [`VarFit::ma_rep()`] | Moving-average coefficients |
//! | MSE(h) | [`VarFit::forecast_mse()`] | `h`-step forecast error covariance |
//! | AIC, BIC, HQIC, FPE | [`VarFit::info_criterion()`] | Penalised fit measures (lower = better) |
//!
//! ## Estimation Backends
//!
//! [`VarModel`] delegates all numerics to a [`VarEstimator`].
//! [`OlsEstimator`] is the default; custom backends plug in through
//! [`VarModel::with_estimator()`].

mod error;
mod estimator;
mod fit;
mod forecast;
mod model;
mod params;
mod plot;
mod selection;

pub(crate) mod estimate;
pub(crate) mod linalg;

pub use error::{ErrorKind, IN_SAMPLE_FAILURE, VarError};
pub use estimator::{ForecastInterval, OlsEstimator, VarEstimator};
pub use fit::VarFit;
pub use forecast::{PredictConfig, VarForecast};
pub use model::{SearchSpaceEntry, VarModel};
pub use params::{EstimationMethod, InfoCriterion, Trend, VarParams};
pub use selection::{LagCriteria, LagOrderSelection, select_order};
