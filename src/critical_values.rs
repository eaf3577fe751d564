//! Asymptotic critical values for the Johansen statistics.
//!
//! Tables from Osterwald-Lenum (1992) / MacKinnon, Haug and Michelis (1999),
//! as distributed with statsmodels. Each table is indexed by `N - r`, the
//! number of non-cointegrating directions under the null, from 1 to 12;
//! each entry holds the 90%, 95% and 99% quantiles.

use crate::config::DeterministicOrder;
use crate::errors::{CointResult, CointegrationError};
use crate::statistics::StatisticKind;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest system dimension with tabulated critical values.
pub const MAX_TABULATED_DIMENSION: usize = 12;

type Table = [[f64; 3]; MAX_TABULATED_DIMENSION];

const TRACE_NO_CONSTANT: Table = [
    [2.9762, 4.1296, 6.9406],
    [10.4741, 12.3212, 16.3640],
    [21.7781, 24.2761, 29.5147],
    [37.0339, 40.1749, 46.5716],
    [56.2839, 60.0627, 67.6367],
    [79.5329, 83.9383, 92.7136],
    [106.7351, 111.7797, 121.7375],
    [137.9954, 143.6691, 154.7977],
    [173.2292, 179.5199, 191.8122],
    [212.4721, 219.4051, 232.8291],
    [255.6732, 263.2603, 277.9962],
    [302.9054, 311.1288, 326.9716],
];

const TRACE_CONSTANT: Table = [
    [2.7055, 3.8415, 6.6349],
    [13.4294, 15.4943, 19.9349],
    [27.0669, 29.7961, 35.4628],
    [44.4929, 47.8545, 54.6815],
    [65.8202, 69.8189, 77.8202],
    [91.1090, 95.7542, 104.9637],
    [120.3673, 125.6185, 135.9825],
    [153.6341, 159.5290, 171.0905],
    [190.8714, 197.3772, 210.0366],
    [232.1030, 239.2468, 253.2526],
    [277.3740, 285.1402, 300.2821],
    [326.5354, 334.9795, 351.2150],
];

const TRACE_CONSTANT_AND_TREND: Table = [
    [2.7055, 3.8415, 6.6349],
    [16.1619, 18.3985, 23.1485],
    [32.2609, 35.0116, 40.9250],
    [51.6528, 54.6803, 61.2823],
    [75.1027, 78.8753, 86.6096],
    [102.4674, 106.7444, 115.5415],
    [133.7852, 138.7588, 148.7977],
    [169.0618, 174.6108, 185.6130],
    [208.3582, 214.5270, 226.7546],
    [251.6293, 258.5858, 272.0595],
    [298.8836, 306.4735, 321.2578],
    [350.1276, 358.4875, 374.7271],
];

const MAX_EIGEN_NO_CONSTANT: Table = [
    [2.9762, 4.1296, 6.9406],
    [9.4748, 11.2246, 15.0923],
    [15.7175, 17.7961, 22.2519],
    [21.8370, 24.1592, 29.0609],
    [27.9160, 30.4428, 35.7359],
    [33.9271, 36.6301, 42.2333],
    [39.9085, 42.7679, 48.6606],
    [45.8930, 48.8795, 55.0335],
    [51.8528, 54.9629, 61.3449],
    [57.7954, 61.0404, 67.6415],
    [63.7248, 67.0756, 73.8856],
    [69.6513, 73.0946, 80.0937],
];

const MAX_EIGEN_CONSTANT: Table = [
    [2.7055, 3.8415, 6.6349],
    [12.2971, 14.2639, 18.5200],
    [18.8928, 21.1314, 25.8650],
    [25.1236, 27.5858, 32.7172],
    [31.2379, 33.8777, 39.3693],
    [37.2786, 40.0763, 45.8662],
    [43.2947, 46.2299, 52.3069],
    [49.2855, 52.3622, 58.6634],
    [55.2412, 58.4332, 64.9960],
    [61.2041, 64.5040, 71.2525],
    [67.1307, 70.5392, 77.4877],
    [73.0563, 76.5734, 83.7105],
];

const MAX_EIGEN_CONSTANT_AND_TREND: Table = [
    [2.7055, 3.8415, 6.6349],
    [15.0006, 17.1481, 21.7465],
    [21.8731, 24.2522, 29.2631],
    [28.2398, 30.8151, 36.1930],
    [34.4202, 37.1646, 42.8612],
    [40.5244, 43.4183, 49.4095],
    [46.5583, 49.5875, 55.8171],
    [52.5858, 55.7302, 62.1741],
    [58.5316, 61.8051, 68.5030],
    [64.5292, 67.9040, 74.7434],
    [70.4630, 73.9355, 81.0678],
    [76.4081, 79.9878, 87.2395],
];

/// Confidence level of a critical value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ConfidenceLevel {
    /// 90% (10% significance)
    P90,
    /// 95% (5% significance)
    #[default]
    P95,
    /// 99% (1% significance)
    P99,
}

impl ConfidenceLevel {
    /// Parse a percentage: 90, 95 or 99.
    pub fn from_percent(percent: u8) -> CointResult<Self> {
        match percent {
            90 => Ok(ConfidenceLevel::P90),
            95 => Ok(ConfidenceLevel::P95),
            99 => Ok(ConfidenceLevel::P99),
            other => Err(CointegrationError::InvalidParameter {
                parameter: "confidence".to_string(),
                value: f64::from(other),
                constraint: "one of 90, 95, 99".to_string(),
            }),
        }
    }

    /// Level as a percentage.
    pub fn percent(self) -> u8 {
        match self {
            ConfidenceLevel::P90 => 90,
            ConfidenceLevel::P95 => 95,
            ConfidenceLevel::P99 => 99,
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

/// Critical values of one rank hypothesis.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CriticalValueRow {
    /// 90% quantile
    pub p90: f64,
    /// 95% quantile
    pub p95: f64,
    /// 99% quantile
    pub p99: f64,
}

impl CriticalValueRow {
    fn from_entry(entry: &[f64; 3]) -> Self {
        Self {
            p90: entry[0],
            p95: entry[1],
            p99: entry[2],
        }
    }

    /// Critical value at the given confidence level.
    pub fn at(&self, level: ConfidenceLevel) -> f64 {
        match level {
            ConfidenceLevel::P90 => self.p90,
            ConfidenceLevel::P95 => self.p95,
            ConfidenceLevel::P99 => self.p99,
        }
    }
}

/// Critical values for every rank of an N-dimensional system.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CriticalValues {
    /// Trace critical values, row r for H0: rank ≤ r
    pub trace: Vec<CriticalValueRow>,
    /// Max-eigenvalue critical values, row r for H0: rank = r
    pub max_eigen: Vec<CriticalValueRow>,
}

impl CriticalValues {
    /// Rows for the given statistic kind.
    pub fn get(&self, kind: StatisticKind) -> &[CriticalValueRow] {
        match kind {
            StatisticKind::Trace => &self.trace,
            StatisticKind::MaxEigen => &self.max_eigen,
        }
    }
}

fn table(kind: StatisticKind, order: DeterministicOrder) -> &'static Table {
    match (kind, order) {
        (StatisticKind::Trace, DeterministicOrder::NoConstant) => &TRACE_NO_CONSTANT,
        (StatisticKind::Trace, DeterministicOrder::Constant) => &TRACE_CONSTANT,
        (StatisticKind::Trace, DeterministicOrder::ConstantAndTrend) => &TRACE_CONSTANT_AND_TREND,
        (StatisticKind::MaxEigen, DeterministicOrder::NoConstant) => &MAX_EIGEN_NO_CONSTANT,
        (StatisticKind::MaxEigen, DeterministicOrder::Constant) => &MAX_EIGEN_CONSTANT,
        (StatisticKind::MaxEigen, DeterministicOrder::ConstantAndTrend) => {
            &MAX_EIGEN_CONSTANT_AND_TREND
        }
    }
}

/// Resolve critical values for `series` series under `order`.
///
/// Row r holds the table entry for `N - r`. Dimensions outside
/// `1..=MAX_TABULATED_DIMENSION` fail with `UnsupportedDimension`.
pub fn critical_values(series: usize, order: DeterministicOrder) -> CointResult<CriticalValues> {
    if series == 0 || series > MAX_TABULATED_DIMENSION {
        return Err(CointegrationError::UnsupportedDimension {
            series,
            order: order.as_flag(),
        });
    }

    let rows = |kind: StatisticKind| -> Vec<CriticalValueRow> {
        let entries = table(kind, order);
        (0..series)
            .map(|r| CriticalValueRow::from_entry(&entries[series - r - 1]))
            .collect()
    };

    Ok(CriticalValues {
        trace: rows(StatisticKind::Trace),
        max_eigen: rows(StatisticKind::MaxEigen),
    })
}
