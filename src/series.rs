//! Aligned multivariate level series.

use crate::errors::{validate_all_finite, CointResult, CointegrationError};
use nalgebra::DMatrix;

/// T×N matrix of observations: one column per series, one row per period.
///
/// Columns keep their insertion order and carry a name so that reports can
/// label cointegrating-vector coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesMatrix {
    data: DMatrix<f64>,
    names: Vec<String>,
}

impl SeriesMatrix {
    /// Build from named columns of equal length.
    ///
    /// Fails with `MalformedInput` when no columns are given, a column is
    /// empty, lengths differ, or any value is non-finite.
    pub fn from_columns(columns: Vec<(String, Vec<f64>)>) -> CointResult<Self> {
        let first = columns.first().ok_or_else(|| CointegrationError::MalformedInput {
            input: "series matrix".to_string(),
            reason: "no series supplied".to_string(),
        })?;
        let rows = first.1.len();

        for (name, values) in &columns {
            if values.is_empty() {
                return Err(CointegrationError::MalformedInput {
                    input: name.clone(),
                    reason: "series is empty".to_string(),
                });
            }
            if values.len() != rows {
                return Err(CointegrationError::MalformedInput {
                    input: name.clone(),
                    reason: format!(
                        "series has {} observations, expected {} to match '{}'",
                        values.len(),
                        rows,
                        first.0
                    ),
                });
            }
            validate_all_finite(values, name)?;
        }

        let data = DMatrix::from_fn(rows, columns.len(), |i, j| columns[j].1[i]);
        let names = columns.into_iter().map(|(name, _)| name).collect();
        Ok(Self { data, names })
    }

    /// Build from a T×N matrix, naming columns `series1..seriesN`.
    pub fn from_matrix(data: DMatrix<f64>) -> CointResult<Self> {
        if data.ncols() == 0 || data.nrows() == 0 {
            return Err(CointegrationError::MalformedInput {
                input: "series matrix".to_string(),
                reason: format!("empty {}x{} matrix", data.nrows(), data.ncols()),
            });
        }
        validate_all_finite(data.as_slice(), "series matrix")?;
        let names = (1..=data.ncols()).map(|i| format!("series{}", i)).collect();
        Ok(Self { data, names })
    }

    /// Number of observations T.
    pub fn observations(&self) -> usize {
        self.data.nrows()
    }

    /// Number of series N.
    pub fn dimension(&self) -> usize {
        self.data.ncols()
    }

    /// Series names in column order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Underlying T×N matrix.
    pub fn data(&self) -> &DMatrix<f64> {
        &self.data
    }
}
