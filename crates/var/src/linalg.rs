//! Dense linear algebra on `ndarray` matrices, backed by `nalgebra`.
//!
//! Least squares goes through an SVD of the design matrix itself, so the
//! condition number is never squared by forming `ZᵀZ`. Rank-deficient
//! designs get the minimum-norm (pseudo-inverse) solution.
//!
//! **Not part of the public API.**

use nalgebra::{Cholesky, DMatrix};
use ndarray::Array2;

/// Copies an `ndarray` matrix into a column-major `DMatrix`.
fn to_dmatrix(a: &Array2<f64>) -> DMatrix<f64> {
    DMatrix::from_fn(a.nrows(), a.ncols(), |i, j| a[[i, j]])
}

/// Copies a `DMatrix` back into an `ndarray` matrix.
fn from_dmatrix(m: &DMatrix<f64>) -> Array2<f64> {
    Array2::from_shape_fn(m.shape(), |(i, j)| m[(i, j)])
}

/// Least-squares solution `B` minimising `‖Z B − Y‖`.
///
/// Singular values at or below `σ_max · max(rows, cols) · ε` are treated
/// as zero. Returns `None` if the SVD cannot produce a finite solution.
pub(crate) fn lstsq(z: &Array2<f64>, y: &Array2<f64>) -> Option<Array2<f64>> {
    let svd = to_dmatrix(z).svd(true, true);
    let sigma_max = svd.singular_values.iter().copied().fold(0.0_f64, f64::max);
    let cutoff = sigma_max * z.nrows().max(z.ncols()) as f64 * f64::EPSILON;
    let b = svd.solve(&to_dmatrix(y), cutoff).ok()?;
    b.iter().all(|v| v.is_finite()).then(|| from_dmatrix(&b))
}

/// Lower-triangular Cholesky factor `L` with `a = L Lᵀ`.
///
/// Returns `None` if `a` is not square or not numerically positive definite.
pub(crate) fn cholesky(a: &Array2<f64>) -> Option<Array2<f64>> {
    if a.nrows() != a.ncols() {
        return None;
    }
    if a.is_empty() {
        return Some(Array2::zeros((0, 0)));
    }
    let l = Cholesky::new(to_dmatrix(a))?.l();
    l.diagonal()
        .iter()
        .all(|d| d.is_finite() && *d > 0.0)
        .then(|| from_dmatrix(&l))
}

/// `ln |a|` for a symmetric positive-definite matrix, `-inf` otherwise.
pub(crate) fn logdet_spd(a: &Array2<f64>) -> f64 {
    match cholesky(a) {
        Some(l) => 2.0 * l.diag().iter().map(|d| d.ln()).sum::<f64>(),
        None => f64::NEG_INFINITY,
    }
}
