//! Johansen test report and rank decisions.

use crate::config::DeterministicOrder;
use crate::critical_values::{ConfidenceLevel, CriticalValueRow, CriticalValues};
use crate::eigen::EigenResult;
use crate::statistics::{StatisticKind, TestStatistics};
use nalgebra::{DMatrix, DVector};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// Complete, internally consistent result of one Johansen test.
///
/// Eigenvector column i is the candidate cointegrating vector paired with
/// eigenvalue i; coefficient j applies to series j.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TestReport {
    series_names: Vec<String>,
    lag_order: usize,
    deterministic_order: DeterministicOrder,
    effective_observations: usize,
    eigenvalues: Vec<f64>,
    eigenvectors: DMatrix<f64>,
    statistics: TestStatistics,
    critical_values: CriticalValues,
}

impl TestReport {
    pub(crate) fn new(
        series_names: Vec<String>,
        lag_order: usize,
        deterministic_order: DeterministicOrder,
        effective_observations: usize,
        eigen: EigenResult,
        statistics: TestStatistics,
        critical_values: CriticalValues,
    ) -> Self {
        let (eigenvalues, eigenvectors) = eigen.into_parts();
        Self {
            series_names,
            lag_order,
            deterministic_order,
            effective_observations,
            eigenvalues,
            eigenvectors,
            statistics,
            critical_values,
        }
    }

    /// Names of the input series in column order.
    pub fn series_names(&self) -> &[String] {
        &self.series_names
    }

    /// Number of series N.
    pub fn dimension(&self) -> usize {
        self.eigenvalues.len()
    }

    /// Lagged differences used as short-run regressors.
    pub fn lag_order(&self) -> usize {
        self.lag_order
    }

    /// Deterministic-trend assumption of the run.
    pub fn deterministic_order(&self) -> DeterministicOrder {
        self.deterministic_order
    }

    /// Effective sample size T - p.
    pub fn effective_observations(&self) -> usize {
        self.effective_observations
    }

    /// Eigenvalues, descending.
    pub fn eigenvalues(&self) -> &[f64] {
        &self.eigenvalues
    }

    /// Candidate cointegrating vectors, one per column.
    pub fn eigenvectors(&self) -> &DMatrix<f64> {
        &self.eigenvectors
    }

    /// Cointegrating vector paired with eigenvalue `index`.
    pub fn cointegrating_vector(&self, index: usize) -> Option<DVector<f64>> {
        (index < self.eigenvectors.ncols()).then(|| self.eigenvectors.column(index).into_owned())
    }

    /// Trace statistics by rank.
    pub fn trace_statistics(&self) -> &[f64] {
        &self.statistics.trace
    }

    /// Max-eigenvalue statistics by rank.
    pub fn max_eigen_statistics(&self) -> &[f64] {
        &self.statistics.max_eigen
    }

    /// Both statistic sequences.
    pub fn statistics(&self) -> &TestStatistics {
        &self.statistics
    }

    /// Trace critical values by rank.
    pub fn trace_critical_values(&self) -> &[CriticalValueRow] {
        &self.critical_values.trace
    }

    /// Max-eigenvalue critical values by rank.
    pub fn max_eigen_critical_values(&self) -> &[CriticalValueRow] {
        &self.critical_values.max_eigen
    }

    /// Whether H0 "rank ≤ r" (trace) or "rank = r" (max-eigen) is rejected.
    pub fn rejects(&self, kind: StatisticKind, rank: usize, level: ConfidenceLevel) -> bool {
        let stats = self.statistics.get(kind);
        let critical = self.critical_values.get(kind);
        rank < stats.len() && stats[rank] > critical[rank].at(level)
    }

    /// Whether the trace test rejects "no cointegration" (rank 0).
    pub fn rejects_no_cointegration(&self, level: ConfidenceLevel) -> bool {
        self.rejects(StatisticKind::Trace, 0, level)
    }

    /// Sequential rank selection: the first r whose null is not rejected.
    ///
    /// Returns N when every hypothesis r < N is rejected (a stationary
    /// system).
    pub fn select_rank(&self, kind: StatisticKind, level: ConfidenceLevel) -> usize {
        (0..self.dimension())
            .find(|&r| !self.rejects(kind, r, level))
            .unwrap_or(self.dimension())
    }

    /// Conservative rank: the smaller of the trace and max-eigen selections.
    pub fn cointegration_rank(&self, level: ConfidenceLevel) -> usize {
        self.select_rank(StatisticKind::Trace, level)
            .min(self.select_rank(StatisticKind::MaxEigen, level))
    }
}

fn write_rows(f: &mut fmt::Formatter<'_>, label: &str, stats: &[f64], rows: &[CriticalValueRow]) -> fmt::Result {
    writeln!(f, "{}", label)?;
    writeln!(
        f,
        "  {:>4}  {:>14}  {:>10}  {:>10}  {:>10}",
        "r", "statistic", "90%", "95%", "99%"
    )?;
    for (r, (stat, row)) in stats.iter().zip(rows).enumerate() {
        writeln!(
            f,
            "  {:>4}  {:>14.6}  {:>10.4}  {:>10.4}  {:>10.4}",
            r, stat, row.p90, row.p95, row.p99
        )?;
    }
    Ok(())
}

impl fmt::Display for TestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Johansen cointegration test")?;
        writeln!(f, "  series:               {}", self.series_names.join(", "))?;
        writeln!(f, "  lagged differences:   {}", self.lag_order)?;
        writeln!(f, "  deterministic order:  {}", self.deterministic_order)?;
        writeln!(f, "  effective sample:     {}", self.effective_observations)?;
        writeln!(f)?;

        writeln!(f, "Eigenvalues")?;
        for (i, lambda) in self.eigenvalues.iter().enumerate() {
            writeln!(f, "  {:>4}  {:.15}", i, lambda)?;
        }
        writeln!(f)?;

        write_rows(f, "Trace statistic", &self.statistics.trace, &self.critical_values.trace)?;
        writeln!(f)?;
        write_rows(
            f,
            "Max-eigenvalue statistic",
            &self.statistics.max_eigen,
            &self.critical_values.max_eigen,
        )?;
        writeln!(f)?;

        writeln!(f, "Cointegrating vectors (one per column)")?;
        for (j, name) in self.series_names.iter().enumerate() {
            write!(f, "  {:>12}", name)?;
            for value in self.eigenvectors.row(j).iter() {
                write!(f, "  {:>12.6}", value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
