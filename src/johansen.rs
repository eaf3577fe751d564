//! Johansen cointegration test pipeline.
//!
//! Stages run strictly in sequence, each consuming the output of the one
//! before it:
//!
//! 1. critical-value lookup (fails fast on unsupported dimensions)
//! 2. regressor construction
//! 3. residual concentration
//! 4. moment matrices
//! 5. generalized eigenproblem
//! 6. trace and max-eigenvalue statistics
//!
//! The result is a pure function of the series and the configuration.

use crate::config::JohansenConfig;
use crate::critical_values::critical_values;
use crate::eigen::solve_generalized_eigen;
use crate::errors::CointResult;
use crate::moments::MomentMatrices;
use crate::regressors::build_regressors;
use crate::report::TestReport;
use crate::residuals::concentrate;
use crate::series::SeriesMatrix;
use crate::statistics::TestStatistics;

/// Run the Johansen cointegration test on `series`.
///
/// # Errors
/// * `InvalidParameter` for a lag order of 0.
/// * `UnsupportedDimension` when no critical values exist for N series.
/// * `InsufficientObservations` when the sample is too short for the
///   auxiliary regressions.
/// * `SingularRegressor` / `SingularMoment` on degenerate inputs.
/// * `NumericalError` when the system fits perfectly.
///
/// # Example
/// ```rust
/// use cointegration_analysis::{
///     generate_cointegrated_pair, johansen_test, CointegratedPairConfig, ConfidenceLevel,
///     JohansenConfig, SeriesMatrix,
/// };
///
/// let pair = generate_cointegrated_pair(&CointegratedPairConfig::default()).unwrap();
/// let series = SeriesMatrix::from_columns(vec![
///     ("series1".to_string(), pair.series1),
///     ("series2".to_string(), pair.series2),
/// ])
/// .unwrap();
///
/// let report = johansen_test(&series, &JohansenConfig::default()).unwrap();
/// assert_eq!(report.eigenvalues().len(), 2);
/// assert!(report.rejects_no_cointegration(ConfidenceLevel::P95));
/// ```
pub fn johansen_test(series: &SeriesMatrix, config: &JohansenConfig) -> CointResult<TestReport> {
    config.validate()?;

    let n = series.dimension();
    let critical = critical_values(n, config.deterministic_order)?;

    log::debug!(
        "Johansen test: {} series, {} observations, lag order {}, deterministic order {}",
        n,
        series.observations(),
        config.lag_order,
        config.deterministic_order
    );

    let regressors = build_regressors(series, config)?;
    let residuals = concentrate(&regressors)?;
    let moments = MomentMatrices::from_residuals(&residuals);
    let eigen = solve_generalized_eigen(&moments)?;
    let statistics = TestStatistics::from_eigenvalues(eigen.eigenvalues(), moments.observations);

    log::debug!(
        "Johansen statistics: trace {:?}, max-eigen {:?}",
        statistics.trace,
        statistics.max_eigen
    );

    Ok(TestReport::new(
        series.names().to_vec(),
        config.lag_order,
        config.deterministic_order,
        moments.observations,
        eigen,
        statistics,
        critical,
    ))
}
