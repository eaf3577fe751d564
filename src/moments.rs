//! Product moment matrices of the concentrated residuals.

use crate::residuals::ResidualPair;
use nalgebra::DMatrix;

/// Scaled cross-products `Sij = RiᵀRj / (T-p)`.
#[derive(Debug, Clone, PartialEq)]
pub struct MomentMatrices {
    /// R0ᵀR0 / (T-p)
    pub s00: DMatrix<f64>,
    /// R0ᵀR1 / (T-p)
    pub s01: DMatrix<f64>,
    /// S01ᵀ
    pub s10: DMatrix<f64>,
    /// R1ᵀR1 / (T-p)
    pub s11: DMatrix<f64>,
    /// Effective sample size T - p used for scaling
    pub observations: usize,
}

impl MomentMatrices {
    /// Reduce a residual pair to its moment matrices.
    pub fn from_residuals(residuals: &ResidualPair) -> Self {
        let observations = residuals.observations();
        let scale = 1.0 / observations as f64;
        let r0t = residuals.r0.transpose();

        let s00 = &r0t * &residuals.r0 * scale;
        let s01 = &r0t * &residuals.r1 * scale;
        let s11 = residuals.r1.transpose() * &residuals.r1 * scale;
        let s10 = s01.transpose();

        Self {
            s00,
            s01,
            s10,
            s11,
            observations,
        }
    }
}
