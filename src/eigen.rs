//! Generalized eigenvalue problem of the Johansen procedure.
//!
//! Solves `λ S11 v = S10 S00⁻¹ S01 v`. With the Cholesky factor `S11 = L Lᵀ`
//! the problem reduces to the symmetric eigenproblem of
//! `C = L⁻¹ S10 S00⁻¹ S01 L⁻ᵀ`; eigenvectors map back as `V = L⁻ᵀ W`, which
//! makes `Vᵀ S11 V = I` hold by construction.
//!
//! The returned eigenvalues are sorted in descending order with ties kept in
//! solver column order, and each eigenvector is signed so that its
//! largest-magnitude entry is positive. Together these make the output
//! reproducible run to run.

use crate::errors::{CointResult, CointegrationError};
use crate::linear_algebra::{pivot_conditioning, spd_cholesky, symmetrize};
use crate::moments::MomentMatrices;
use nalgebra::{DMatrix, SymmetricEigen};

/// Magnitude below which a negative eigenvalue is treated as rounding noise.
const NEGATIVE_EIGENVALUE_TOLERANCE: f64 = 1e-8;

/// Diagonal-to-squared-pivot ratio above which S11 is reported as ill-conditioned.
const ILL_CONDITIONED_RATIO: f64 = 1e10;

/// Ordered eigenvalues with their S11-normalized eigenvectors.
#[derive(Debug, Clone, PartialEq)]
pub struct EigenResult {
    eigenvalues: Vec<f64>,
    eigenvectors: DMatrix<f64>,
}

impl EigenResult {
    /// Eigenvalues in [0, 1), descending.
    pub fn eigenvalues(&self) -> &[f64] {
        &self.eigenvalues
    }

    /// N×N matrix, column i pairs with eigenvalue i.
    pub fn eigenvectors(&self) -> &DMatrix<f64> {
        &self.eigenvectors
    }

    /// Consume into `(eigenvalues, eigenvectors)`.
    pub fn into_parts(self) -> (Vec<f64>, DMatrix<f64>) {
        (self.eigenvalues, self.eigenvectors)
    }

    #[cfg(test)]
    pub(crate) fn from_parts(eigenvalues: Vec<f64>, eigenvectors: DMatrix<f64>) -> Self {
        Self {
            eigenvalues,
            eigenvectors,
        }
    }
}

fn singular_s11() -> CointegrationError {
    CointegrationError::SingularMoment {
        matrix: "S11".to_string(),
    }
}

/// Flip each column so its largest-magnitude entry is positive.
fn normalize_signs(vectors: &mut DMatrix<f64>) {
    for mut column in vectors.column_iter_mut() {
        let mut pivot = 0.0_f64;
        for &value in column.iter() {
            if value.abs() > pivot.abs() {
                pivot = value;
            }
        }
        if pivot < 0.0 {
            column.neg_mut();
        }
    }
}

/// Solve the generalized eigenproblem over the moment matrices.
///
/// # Errors
/// * `SingularMoment` if S00 or S11 is not positive definite.
/// * `NumericalError` if an eigenvalue reaches 1 (a perfect fit, for which
///   the likelihood-ratio statistics are undefined).
pub fn solve_generalized_eigen(moments: &MomentMatrices) -> CointResult<EigenResult> {
    let n = moments.s11.nrows();
    let s00 = spd_cholesky(&moments.s00, "S00")?;
    let s11 = spd_cholesky(&moments.s11, "S11")?;

    let conditioning = pivot_conditioning(&moments.s11, &s11);
    if conditioning > ILL_CONDITIONED_RATIO {
        log::warn!(
            "S11 is badly conditioned (pivot ratio {:.3e}); eigenvectors may be inaccurate",
            conditioning
        );
    }

    let a = symmetrize(&(&moments.s10 * s00.solve(&moments.s01)));
    let l = s11.l();
    let l_inv_a = l.solve_lower_triangular(&a).ok_or_else(singular_s11)?;
    let c = l
        .solve_lower_triangular(&l_inv_a.transpose())
        .ok_or_else(singular_s11)?;

    let decomposition = SymmetricEigen::new(symmetrize(&c));
    let w = decomposition.eigenvectors;
    let raw = decomposition.eigenvalues;

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| raw[j].total_cmp(&raw[i]));

    let mut eigenvalues = Vec::with_capacity(n);
    for (rank, &idx) in order.iter().enumerate() {
        let mut lambda = raw[idx];
        if !lambda.is_finite() || lambda >= 1.0 {
            return Err(CointegrationError::NumericalError {
                reason: format!(
                    "eigenvalue {} at rank {} is outside [0, 1); the system fits perfectly",
                    lambda, rank
                ),
                operation: Some("solve_generalized_eigen".to_string()),
            });
        }
        if lambda < 0.0 {
            if lambda < -NEGATIVE_EIGENVALUE_TOLERANCE {
                log::warn!("Clamping negative eigenvalue {} at rank {} to zero", lambda, rank);
            }
            lambda = 0.0;
        }
        eigenvalues.push(lambda);
    }

    let sorted_w = DMatrix::from_fn(n, n, |i, j| w[(i, order[j])]);
    let mut eigenvectors = l
        .transpose()
        .solve_upper_triangular(&sorted_w)
        .ok_or_else(singular_s11)?;
    normalize_signs(&mut eigenvectors);

    log::trace!("Johansen eigenvalues: {:?}", eigenvalues);

    Ok(EigenResult {
        eigenvalues,
        eigenvectors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn moments(s00: DMatrix<f64>, s01: DMatrix<f64>, s11: DMatrix<f64>) -> MomentMatrices {
        let s10 = s01.transpose();
        MomentMatrices {
            s00,
            s01,
            s10,
            s11,
            observations: 100,
        }
    }

    #[test]
    fn test_diagonal_problem() {
        // A = diag(1.44, 0.25), S11 = diag(4, 1) → λ = 0.36, 0.25
        let m = moments(
            DMatrix::identity(2, 2),
            DMatrix::from_diagonal(&nalgebra::DVector::from_vec(vec![1.2, 0.5])),
            DMatrix::from_diagonal(&nalgebra::DVector::from_vec(vec![4.0, 1.0])),
        );
        let result = solve_generalized_eigen(&m).unwrap();

        assert_approx_eq!(result.eigenvalues()[0], 0.36, 1e-12);
        assert_approx_eq!(result.eigenvalues()[1], 0.25, 1e-12);

        let v = result.eigenvectors();
        assert_approx_eq!(v[(0, 0)], 0.5, 1e-12);
        assert_approx_eq!(v[(1, 0)], 0.0, 1e-12);
        assert_approx_eq!(v[(0, 1)], 0.0, 1e-12);
        assert_approx_eq!(v[(1, 1)], 1.0, 1e-12);
    }

    #[test]
    fn test_normalization_and_eigen_equation() {
        let s00 = DMatrix::from_row_slice(3, 3, &[2.0, 0.3, 0.1, 0.3, 1.5, -0.2, 0.1, -0.2, 1.0]);
        let s11 = DMatrix::from_row_slice(3, 3, &[3.0, 0.5, 0.2, 0.5, 2.0, 0.4, 0.2, 0.4, 1.2]);
        let s01 = DMatrix::from_row_slice(3, 3, &[0.8, 0.1, -0.3, 0.2, 0.6, 0.1, -0.1, 0.2, 0.3]);
        let m = moments(s00.clone(), s01.clone(), s11.clone());
        let result = solve_generalized_eigen(&m).unwrap();

        let v = result.eigenvectors();
        let gram = v.transpose() * &s11 * v;
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((gram[(i, j)] - expected).abs() < 1e-10, "VᵀS11V[{},{}] = {}", i, j, gram[(i, j)]);
            }
        }

        // λ S11 v = S10 S00⁻¹ S01 v
        let a = s01.transpose() * s00.clone().try_inverse().unwrap() * &s01;
        for (i, &lambda) in result.eigenvalues().iter().enumerate() {
            let col = v.column(i);
            let lhs = &s11 * &col * lambda;
            let rhs = &a * &col;
            for k in 0..3 {
                assert_approx_eq!(lhs[k], rhs[k], 1e-10);
            }
        }

        let values = result.eigenvalues();
        assert!(values.windows(2).all(|w| w[0] >= w[1]));
        assert!(values.iter().all(|&l| (0.0..1.0).contains(&l)));
    }

    #[test]
    fn test_largest_entry_is_positive() {
        let m = moments(
            DMatrix::from_row_slice(2, 2, &[1.0, 0.2, 0.2, 1.0]),
            DMatrix::from_row_slice(2, 2, &[-0.5, 0.3, 0.1, -0.4]),
            DMatrix::from_row_slice(2, 2, &[1.0, -0.3, -0.3, 2.0]),
        );
        let result = solve_generalized_eigen(&m).unwrap();

        for column in result.eigenvectors().column_iter() {
            let pivot = column.iter().fold(0.0_f64, |acc, &x| if x.abs() > acc.abs() { x } else { acc });
            assert!(pivot > 0.0);
        }
        // Bit-identical on repeat
        assert_eq!(result, solve_generalized_eigen(&m).unwrap());
    }

    #[test]
    fn test_tied_eigenvalues_keep_column_order() {
        // S00 = S11 = I, S01 = 0.5·I: every eigenvalue is 0.25
        let m = moments(
            DMatrix::identity(3, 3),
            DMatrix::identity(3, 3) * 0.5,
            DMatrix::identity(3, 3),
        );
        let first = solve_generalized_eigen(&m).unwrap();
        for &lambda in first.eigenvalues() {
            assert_eq!(lambda.to_bits(), 0.25_f64.to_bits());
        }
        assert_eq!(first.eigenvectors(), &DMatrix::identity(3, 3));

        for _ in 0..5 {
            let again = solve_generalized_eigen(&m).unwrap();
            for (a, b) in first.eigenvalues().iter().zip(again.eigenvalues()) {
                assert_eq!(a.to_bits(), b.to_bits());
            }
            for (a, b) in first.eigenvectors().iter().zip(again.eigenvectors().iter()) {
                assert_eq!(a.to_bits(), b.to_bits());
            }
        }
    }

    #[test]
    fn test_tie_below_distinct_leader_keeps_column_order() {
        // λ = 0.36 for series 1, a tie at 0.25 for series 0 and 2
        let m = moments(
            DMatrix::identity(3, 3),
            DMatrix::from_diagonal(&nalgebra::DVector::from_vec(vec![0.5, 0.6, 0.5])),
            DMatrix::identity(3, 3),
        );
        let result = solve_generalized_eigen(&m).unwrap();
        let values = result.eigenvalues();

        assert_approx_eq!(values[0], 0.36, 1e-12);
        assert_approx_eq!(values[1], 0.25, 1e-12);
        assert_eq!(values[1].to_bits(), values[2].to_bits());

        let v = result.eigenvectors();
        let expected = DMatrix::from_row_slice(3, 3, &[0.0, 1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0]);
        for (a, b) in v.iter().zip(expected.iter()) {
            assert_approx_eq!(a, b, 1e-12);
        }
    }

    #[test]
    fn test_sign_tie_break_uses_first_largest_entry() {
        let mut vectors = DMatrix::from_column_slice(
            3,
            4,
            &[
                -1.0, 1.0, 0.0, // first of two equal magnitudes is negative
                1.0, -1.0, 0.0, // first of two equal magnitudes is positive
                0.5, -2.0, 2.0, // leading largest entry is negative
                -3.0, 3.0, -3.0, // three-way tie
            ],
        );
        normalize_signs(&mut vectors);

        let expected = DMatrix::from_column_slice(
            3,
            4,
            &[1.0, -1.0, 0.0, 1.0, -1.0, 0.0, -0.5, 2.0, -2.0, 3.0, -3.0, 3.0],
        );
        assert_eq!(vectors, expected);

        // Already normalized columns are left alone
        let mut again = expected.clone();
        normalize_signs(&mut again);
        assert_eq!(again, expected);
    }

    #[test]
    fn test_singular_moment_matrices() {
        let singular = DMatrix::from_row_slice(2, 2, &[1.0, 1.0, 1.0, 1.0]);
        let m = moments(singular.clone(), DMatrix::identity(2, 2) * 0.1, DMatrix::identity(2, 2));
        match solve_generalized_eigen(&m) {
            Err(CointegrationError::SingularMoment { matrix }) => assert_eq!(matrix, "S00"),
            other => panic!("Expected SingularMoment, got {:?}", other),
        }

        let m = moments(DMatrix::identity(2, 2), DMatrix::identity(2, 2) * 0.1, singular);
        match solve_generalized_eigen(&m) {
            Err(CointegrationError::SingularMoment { matrix }) => assert_eq!(matrix, "S11"),
            other => panic!("Expected SingularMoment, got {:?}", other),
        }
    }

    #[test]
    fn test_unit_eigenvalue_is_rejected() {
        let m = moments(
            DMatrix::identity(1, 1),
            DMatrix::from_element(1, 1, 1.5),
            DMatrix::identity(1, 1),
        );
        assert!(matches!(
            solve_generalized_eigen(&m),
            Err(CointegrationError::NumericalError { .. })
        ));
    }
}
