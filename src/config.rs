//! # Test Configuration
//!
//! This module contains the parameters of a Johansen test run: the number of
//! lagged differences used as short-run regressors and the deterministic-trend
//! assumption.

use crate::errors::{CointResult, CointegrationError};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// Deterministic terms entering both auxiliary regressions.
///
/// The integer flags match the `det_order` convention of the reference
/// implementation and the command-line interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DeterministicOrder {
    /// No deterministic terms (flag -1)
    NoConstant,
    /// Unrestricted constant (flag 0)
    #[default]
    Constant,
    /// Linear trend removed from the levels plus a constant (flag 1)
    ConstantAndTrend,
}

impl DeterministicOrder {
    /// All supported orders, in flag order.
    pub const ALL: [DeterministicOrder; 3] = [
        DeterministicOrder::NoConstant,
        DeterministicOrder::Constant,
        DeterministicOrder::ConstantAndTrend,
    ];

    /// Integer flag (-1, 0 or 1).
    pub fn as_flag(self) -> i32 {
        match self {
            DeterministicOrder::NoConstant => -1,
            DeterministicOrder::Constant => 0,
            DeterministicOrder::ConstantAndTrend => 1,
        }
    }

    /// Number of deterministic columns appended to the regressor matrix.
    pub fn regressor_columns(self) -> usize {
        match self {
            DeterministicOrder::NoConstant => 0,
            DeterministicOrder::Constant | DeterministicOrder::ConstantAndTrend => 1,
        }
    }

    /// Whether a linear trend is removed from the levels before differencing.
    pub fn detrends_levels(self) -> bool {
        matches!(self, DeterministicOrder::ConstantAndTrend)
    }
}

impl TryFrom<i32> for DeterministicOrder {
    type Error = CointegrationError;

    fn try_from(flag: i32) -> Result<Self, Self::Error> {
        match flag {
            -1 => Ok(DeterministicOrder::NoConstant),
            0 => Ok(DeterministicOrder::Constant),
            1 => Ok(DeterministicOrder::ConstantAndTrend),
            other => Err(CointegrationError::InvalidParameter {
                parameter: "deterministic_order".to_string(),
                value: other as f64,
                constraint: "one of -1, 0, 1".to_string(),
            }),
        }
    }
}

impl fmt::Display for DeterministicOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DeterministicOrder::NoConstant => "no constant",
            DeterministicOrder::Constant => "constant",
            DeterministicOrder::ConstantAndTrend => "constant and trend",
        };
        write!(f, "{} ({})", self.as_flag(), label)
    }
}

/// Configuration for a single Johansen test run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JohansenConfig {
    /// Number of lagged first differences used as short-run regressors (k ≥ 1)
    pub lag_order: usize,
    /// Deterministic-trend assumption
    pub deterministic_order: DeterministicOrder,
}

impl Default for JohansenConfig {
    fn default() -> Self {
        Self {
            lag_order: 1,
            deterministic_order: DeterministicOrder::Constant,
        }
    }
}

impl JohansenConfig {
    /// Configuration with the given lag order and deterministic order.
    pub fn new(lag_order: usize, deterministic_order: DeterministicOrder) -> Self {
        Self {
            lag_order,
            deterministic_order,
        }
    }

    /// Random-walk levels without drift: no deterministic terms.
    pub fn no_constant(lag_order: usize) -> Self {
        Self::new(lag_order, DeterministicOrder::NoConstant)
    }

    /// Levels with drift: a constant in the short-run regressors.
    pub fn constant(lag_order: usize) -> Self {
        Self::new(lag_order, DeterministicOrder::Constant)
    }

    /// Trending levels: detrended series plus a constant.
    pub fn constant_and_trend(lag_order: usize) -> Self {
        Self::new(lag_order, DeterministicOrder::ConstantAndTrend)
    }

    /// Replace the lag order.
    pub fn with_lag_order(mut self, lag_order: usize) -> Self {
        self.lag_order = lag_order;
        self
    }

    /// Replace the deterministic order.
    pub fn with_deterministic_order(mut self, order: DeterministicOrder) -> Self {
        self.deterministic_order = order;
        self
    }

    /// VAR order in levels, `p = k + 1`, saturating at `usize::MAX`.
    pub fn var_order(&self) -> usize {
        self.lag_order.saturating_add(1)
    }

    /// Check parameter constraints.
    pub fn validate(&self) -> CointResult<()> {
        if self.lag_order == 0 {
            return Err(CointegrationError::InvalidParameter {
                parameter: "lag_order".to_string(),
                value: 0.0,
                constraint: "must be a positive integer".to_string(),
            });
        }
        Ok(())
    }
}
