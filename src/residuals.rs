//! Concentration of short-run dynamics out of the Johansen system.
//!
//! Both dependent blocks of a [`RegressorSet`] are regressed on the shared
//! regressor matrix; the residuals R0 (differences) and R1 (lagged levels)
//! carry only the long-run information the eigenproblem needs.

use crate::errors::CointResult;
use crate::linear_algebra::qr_regression_residuals;
use crate::regressors::RegressorSet;
use nalgebra::DMatrix;

/// Residuals of the two auxiliary regressions, both (T-p)×N.
#[derive(Debug, Clone)]
pub struct ResidualPair {
    /// Residuals of ΔX_t
    pub r0: DMatrix<f64>,
    /// Residuals of X_{t-1}
    pub r1: DMatrix<f64>,
}

impl ResidualPair {
    /// Shared row count T - p.
    pub fn observations(&self) -> usize {
        self.r0.nrows()
    }
}

/// Run both auxiliary regressions.
///
/// The regressions are independent, so they run on the rayon pool; each
/// side owns its output and the result does not depend on scheduling.
pub fn concentrate(set: &RegressorSet) -> CointResult<ResidualPair> {
    let (r0, r1) = rayon::join(
        || qr_regression_residuals(&set.delta, &set.regressors),
        || qr_regression_residuals(&set.lagged_levels, &set.regressors),
    );
    let pair = ResidualPair { r0: r0?, r1: r1? };

    log::debug!(
        "Concentrated residuals: {}x{}",
        pair.observations(),
        pair.r0.ncols()
    );
    Ok(pair)
}
