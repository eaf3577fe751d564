//! Regressor construction for the Johansen auxiliary regressions.
//!
//! From the level series X (T×N) and lag order k this builds, on the common
//! sample t = p..T-1 with p = k + 1:
//!
//! - `delta`: the first differences ΔX_t,
//! - `lagged_levels`: the levels X_{t-1},
//! - `regressors`: ΔX_{t-1}, …, ΔX_{t-k} followed by the deterministic
//!   columns of the chosen [`DeterministicOrder`].
//!
//! For [`DeterministicOrder::ConstantAndTrend`] a full-sample linear trend is
//! removed from each level series first and a constant enters the regressors.

use crate::config::{DeterministicOrder, JohansenConfig};
use crate::errors::{validate_data_length, CointResult, CointegrationError};
use crate::linear_algebra::qr_regression_residuals;
use crate::series::SeriesMatrix;
use nalgebra::DMatrix;

/// Dependent blocks and shared regressors for the two auxiliary regressions.
#[derive(Debug, Clone)]
pub struct RegressorSet {
    /// ΔX_t, (T-p)×N
    pub delta: DMatrix<f64>,
    /// X_{t-1}, (T-p)×N
    pub lagged_levels: DMatrix<f64>,
    /// Lagged differences and deterministic terms, (T-p)×(N·k + d)
    pub regressors: DMatrix<f64>,
}

impl RegressorSet {
    /// Effective sample size T - p.
    pub fn effective_observations(&self) -> usize {
        self.delta.nrows()
    }

    /// Number of regressor columns.
    pub fn width(&self) -> usize {
        self.regressors.ncols()
    }
}

/// Minimum number of observations for `n` series under `config`.
///
/// The effective sample T - p must exceed the regressor width, and T ≥ p + 2.
/// Saturates at `usize::MAX` for lag orders no sample can satisfy.
pub fn minimum_observations(n: usize, config: &JohansenConfig) -> usize {
    let p = config.var_order();
    let width = n
        .saturating_mul(config.lag_order)
        .saturating_add(config.deterministic_order.regressor_columns());
    p.saturating_add(width)
        .saturating_add(1)
        .max(p.saturating_add(2))
}

/// Remove a per-column linear trend fitted on t = 1..T.
fn remove_linear_trend(levels: &DMatrix<f64>) -> CointResult<DMatrix<f64>> {
    let t = levels.nrows();
    let trend = DMatrix::from_fn(t, 2, |i, j| if j == 0 { 1.0 } else { (i + 1) as f64 });
    qr_regression_residuals(levels, &trend)
}

/// Reject series that detrending reduced to rounding noise relative to their
/// own magnitude; their level and difference moments are singular.
fn ensure_not_pure_trend(levels: &DMatrix<f64>, detrended: &DMatrix<f64>) -> CointResult<()> {
    let tol = 100.0 * f64::EPSILON * levels.nrows() as f64;
    for (j, (raw, rest)) in levels.column_iter().zip(detrended.column_iter()).enumerate() {
        if rest.norm() <= tol * raw.norm() {
            log::debug!("Series {} is an exact linear trend", j);
            return Err(CointegrationError::SingularMoment {
                matrix: "S11".to_string(),
            });
        }
    }
    Ok(())
}

/// Build the regressor set for `series` under `config`.
pub fn build_regressors(series: &SeriesMatrix, config: &JohansenConfig) -> CointResult<RegressorSet> {
    config.validate()?;

    let t = series.observations();
    let n = series.dimension();
    let k = config.lag_order;
    let p = config.var_order();
    let order = config.deterministic_order;

    validate_data_length(t, minimum_observations(n, config))?;

    let levels = if order.detrends_levels() {
        let detrended = remove_linear_trend(series.data())?;
        ensure_not_pure_trend(series.data(), &detrended)?;
        detrended
    } else {
        series.data().clone()
    };

    // dx row i holds x[i + 1] - x[i]
    let dx = DMatrix::from_fn(t - 1, n, |i, j| levels[(i + 1, j)] - levels[(i, j)]);

    let rows = t - p;
    let delta = dx.rows(p - 1, rows).clone_owned();
    let lagged_levels = levels.rows(p - 1, rows).clone_owned();

    let width = n * k + order.regressor_columns();
    let mut regressors = DMatrix::zeros(rows, width);
    for lag in 1..=k {
        let block = dx.rows(p - 1 - lag, rows);
        regressors
            .view_mut((0, (lag - 1) * n), (rows, n))
            .copy_from(&block);
    }
    match order {
        DeterministicOrder::NoConstant => {}
        DeterministicOrder::Constant | DeterministicOrder::ConstantAndTrend => {
            regressors.column_mut(n * k).fill(1.0);
        }
    }

    log::debug!(
        "Built regressors: {} effective observations, {} series, width {} ({})",
        rows,
        n,
        width,
        order
    );
    if rows < 3 * width.max(1) {
        log::warn!(
            "Effective sample ({}) is small relative to regressor width ({}); critical values may be unreliable",
            rows,
            width
        );
    }

    Ok(RegressorSet {
        delta,
        lagged_levels,
        regressors,
    })
}
