//! Linear algebra operations for the Johansen procedure
//!
//! This module provides the numerical kernels the test is built on: a
//! Householder QR least-squares solver that returns regression residuals for
//! many right-hand sides at once, and Cholesky-based helpers for the
//! symmetric positive-definite moment matrices.

use crate::errors::{CointResult, CointegrationError};
use nalgebra::{Cholesky, DMatrix, Dyn};

/// Validates that a matrix contains no NaN or Inf values
fn ensure_finite_matrix(a: &DMatrix<f64>, operation: &str) -> CointResult<()> {
    for j in 0..a.ncols() {
        for i in 0..a.nrows() {
            let val = a[(i, j)];
            if !val.is_finite() {
                return Err(CointegrationError::NumericalError {
                    reason: format!("Non-finite value ({}) at position [{},{}]", val, i, j),
                    operation: Some(operation.to_string()),
                });
            }
        }
    }
    Ok(())
}

/// Apply the reflector `I - 2vvᵀ` (acting on rows `k..`) to the given columns.
fn apply_householder(
    mat: &mut DMatrix<f64>,
    v: &[f64],
    k: usize,
    columns: std::ops::Range<usize>,
) {
    let m = mat.nrows();
    for j in columns {
        let mut dot = 0.0;
        for i in k..m {
            dot += v[i - k] * mat[(i, j)];
        }
        for i in k..m {
            mat[(i, j)] -= 2.0 * v[i - k] * dot;
        }
    }
}

/// Least-squares residuals of every column of `y` on the columns of `x`.
///
/// Factorizes `x` (m×n) with Householder reflections and applies the same
/// reflections to `y` (m×q), so all q regressions share one factorization.
/// An empty regressor set (n = 0) returns `y` unchanged.
///
/// # Errors
/// * `SingularRegressor` when a column of `x` is numerically dependent on
///   the preceding ones.
/// * `InsufficientObservations` when `x` has no more rows than columns.
pub fn qr_regression_residuals(y: &DMatrix<f64>, x: &DMatrix<f64>) -> CointResult<DMatrix<f64>> {
    let (m, n) = x.shape();
    let q = y.ncols();

    if y.nrows() != m {
        return Err(CointegrationError::NumericalError {
            reason: format!(
                "Dimension mismatch: {} dependent rows vs {} regressor rows",
                y.nrows(),
                m
            ),
            operation: Some("qr_regression_residuals".to_string()),
        });
    }
    ensure_finite_matrix(x, "qr_regression_residuals")?;
    ensure_finite_matrix(y, "qr_regression_residuals")?;

    if n == 0 {
        return Ok(y.clone());
    }
    if m <= n {
        return Err(CointegrationError::InsufficientObservations {
            required: n + 1,
            actual: m,
        });
    }

    // Per-column tolerance: rescaling one regressor must not change the rank
    let column_tol: Vec<f64> = x
        .column_iter()
        .map(|column| 100.0 * f64::EPSILON * m as f64 * column.norm())
        .collect();

    let mut r = x.clone();
    let mut qty = y.clone();
    let mut deficient = 0;

    for k in 0..n {
        let mut v: Vec<f64> = (k..m).map(|i| r[(i, k)]).collect();
        let norm_v = v.iter().map(|vi| vi * vi).sum::<f64>().sqrt();

        if norm_v <= column_tol[k] {
            deficient += 1;
            continue;
        }

        let sign = if v[0] >= 0.0 { 1.0 } else { -1.0 };
        v[0] += sign * norm_v;

        let norm_v2 = v.iter().map(|vi| vi * vi).sum::<f64>().sqrt();
        for vi in &mut v {
            *vi /= norm_v2;
        }

        apply_householder(&mut r, &v, k, k..n);
        apply_householder(&mut qty, &v, k, 0..q);
    }

    if deficient > 0 {
        return Err(CointegrationError::SingularRegressor {
            rank: n - deficient,
            columns: n,
        });
    }

    // Back substitution R β = (Qᵀy)[..n]
    let mut beta = DMatrix::zeros(n, q);
    for col in 0..q {
        for i in (0..n).rev() {
            let mut acc = qty[(i, col)];
            for j in i + 1..n {
                acc -= r[(i, j)] * beta[(j, col)];
            }
            beta[(i, col)] = acc / r[(i, i)];
        }
    }

    Ok(y - x * beta)
}

/// Cholesky factor of a symmetric positive-definite matrix.
///
/// Each squared pivot `l_jj²` is compared with its own diagonal entry `a_jj`,
/// so the singularity check is unaffected by rescaling individual series.
/// `name` identifies the matrix in the `SingularMoment` error.
pub fn spd_cholesky(a: &DMatrix<f64>, name: &str) -> CointResult<Cholesky<f64, Dyn>> {
    ensure_finite_matrix(a, name)?;
    let singular = || CointegrationError::SingularMoment {
        matrix: name.to_string(),
    };

    let diagonal = a.diagonal();
    if diagonal.iter().any(|&d| d <= 0.0) {
        return Err(singular());
    }

    let chol = Cholesky::new(symmetrize(a)).ok_or_else(singular)?;

    // l_jj² / a_jj is the share of variable j not explained by the earlier ones
    let pivot_tol = 1e3 * f64::EPSILON * a.nrows() as f64;
    let pivots = chol.l_dirty().diagonal();
    if pivots
        .iter()
        .zip(diagonal.iter())
        .any(|(&l, &d)| l * l <= pivot_tol * d)
    {
        return Err(singular());
    }

    Ok(chol)
}

/// Largest ratio `a_jj / l_jj²` over the Cholesky pivots of `a`.
///
/// Invariant under rescaling rows and columns of `a` by a positive diagonal.
pub fn pivot_conditioning(a: &DMatrix<f64>, chol: &Cholesky<f64, Dyn>) -> f64 {
    chol.l_dirty()
        .diagonal()
        .iter()
        .zip(a.diagonal().iter())
        .map(|(&l, &d)| d / (l * l))
        .fold(1.0, f64::max)
}

/// Symmetric part `(A + Aᵀ)/2`.
pub fn symmetrize(a: &DMatrix<f64>) -> DMatrix<f64> {
    (a + a.transpose()) * 0.5
}
