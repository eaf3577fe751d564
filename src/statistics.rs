//! Likelihood-ratio statistics for the cointegration rank.
//!
//! For rank hypothesis r and effective sample size T_eff:
//!
//! - max-eigenvalue: `-T_eff · ln(1 - λ_r)`
//! - trace: `-T_eff · Σ_{i ≥ r} ln(1 - λ_i)`
//!
//! The trace sequence is accumulated from the max-eigenvalue terms, so
//! `trace[r] = Σ_{i ≥ r} max_eigen[i]` holds by construction.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Trace and max-eigenvalue statistics indexed by rank r = 0..N-1.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TestStatistics {
    /// Trace statistic per rank hypothesis
    pub trace: Vec<f64>,
    /// Max-eigenvalue statistic per rank hypothesis
    pub max_eigen: Vec<f64>,
}

/// Which likelihood-ratio statistic a lookup or decision refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StatisticKind {
    /// H0: rank ≤ r against H1: rank = N
    Trace,
    /// H0: rank = r against H1: rank = r + 1
    MaxEigen,
}

impl TestStatistics {
    /// Compute both statistics from descending eigenvalues in [0, 1).
    pub fn from_eigenvalues(eigenvalues: &[f64], effective_observations: usize) -> Self {
        let t_eff = effective_observations as f64;
        let max_eigen: Vec<f64> = eigenvalues
            .iter()
            .map(|&lambda| -t_eff * (-lambda).ln_1p())
            .collect();

        let mut trace = vec![0.0; max_eigen.len()];
        let mut cumulative = 0.0;
        for r in (0..max_eigen.len()).rev() {
            cumulative += max_eigen[r];
            trace[r] = cumulative;
        }

        Self { trace, max_eigen }
    }

    /// Statistic sequence of the given kind.
    pub fn get(&self, kind: StatisticKind) -> &[f64] {
        match kind {
            StatisticKind::Trace => &self.trace,
            StatisticKind::MaxEigen => &self.max_eigen,
        }
    }

    /// Number of rank hypotheses (= N).
    pub fn len(&self) -> usize {
        self.trace.len()
    }

    /// True when no statistics were computed.
    pub fn is_empty(&self) -> bool {
        self.trace.is_empty()
    }
}
