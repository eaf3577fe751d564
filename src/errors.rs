//! Error types and validation functions for cointegration testing.
//!
//! Every stage of the Johansen pipeline reports failures through
//! [`CointegrationError`]. The variants identify the stage that failed so a
//! caller can tell a degenerate input apart from a short sample or an
//! unsupported system dimension.

use std::sync::Arc;
use thiserror::Error;

/// Error types for cointegration analysis operations.
#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum CointegrationError {
    /// The effective sample is too short for the auxiliary regressions.
    #[error("Insufficient observations: need at least {required}, got {actual}")]
    InsufficientObservations {
        /// Minimum number of observations required
        required: usize,
        /// Number of observations available
        actual: usize,
    },

    /// The short-run regressor matrix is rank-deficient.
    #[error("Singular regressor matrix: numerical rank {rank} of {columns} columns")]
    SingularRegressor {
        /// Numerical rank detected by the QR factorization
        rank: usize,
        /// Number of regressor columns
        columns: usize,
    },

    /// A moment matrix is not positive definite.
    #[error("Singular moment matrix: {matrix} is not positive definite")]
    SingularMoment {
        /// Name of the offending moment matrix (S00 or S11)
        matrix: String,
    },

    /// No critical-value table entry exists for the requested system.
    #[error("Unsupported dimension: no critical values for {series} series with deterministic order {order}")]
    UnsupportedDimension {
        /// Number of series in the system
        series: usize,
        /// Deterministic-trend order flag (-1, 0 or 1)
        order: i32,
    },

    /// Input data failed validation at the loading boundary.
    #[error("Malformed input in {input}: {reason}")]
    MalformedInput {
        /// File path or series name the problem was found in
        input: String,
        /// Description of the problem
        reason: String,
    },

    /// Invalid parameter value for test or generator configuration.
    #[error("Invalid parameter: {parameter} = {value}, expected {constraint}")]
    InvalidParameter {
        /// Parameter name
        parameter: String,
        /// Invalid value provided
        value: f64,
        /// Valid range or constraint description
        constraint: String,
    },

    /// Numerical computation error due to instability.
    #[error("Numerical computation failed: {reason}")]
    NumericalError {
        /// Detailed reason for numerical failure
        reason: String,
        /// Operation that failed
        operation: Option<String>,
    },

    /// I/O operation error.
    #[error("I/O operation failed: {operation}")]
    Io {
        /// I/O operation that failed
        operation: String,
        /// Underlying error if available
        #[source]
        source: Option<Arc<std::io::Error>>,
    },
}

/// Result type for cointegration operations.
pub type CointResult<T> = Result<T, CointegrationError>;

/// Validates that a sample has at least `min_required` observations.
///
/// # Example
/// ```rust
/// use cointegration_analysis::errors::validate_data_length;
///
/// assert!(validate_data_length(10, 4).is_ok());
/// assert!(validate_data_length(3, 4).is_err());
/// ```
pub fn validate_data_length(actual: usize, min_required: usize) -> CointResult<()> {
    if actual < min_required {
        Err(CointegrationError::InsufficientObservations {
            required: min_required,
            actual,
        })
    } else {
        Ok(())
    }
}

/// Validates that a parameter is within expected bounds (inclusive).
///
/// # Example
/// ```rust
/// use cointegration_analysis::errors::validate_parameter;
///
/// assert!(validate_parameter(0.5, 0.0, 1.0, "noise_std").is_ok());
/// assert!(validate_parameter(-1.0, 0.0, 1.0, "noise_std").is_err());
/// ```
pub fn validate_parameter(value: f64, min: f64, max: f64, name: &str) -> CointResult<()> {
    if value.is_nan() {
        return Err(CointegrationError::InvalidParameter {
            parameter: name.to_string(),
            value,
            constraint: "must not be NaN".to_string(),
        });
    }

    if min.is_nan() || max.is_nan() || min > max {
        return Err(CointegrationError::NumericalError {
            reason: format!(
                "Invalid bounds for parameter {}: min={}, max={}",
                name, min, max
            ),
            operation: None,
        });
    }

    if value < min || value > max {
        Err(CointegrationError::InvalidParameter {
            parameter: name.to_string(),
            value,
            constraint: format!("[{}, {}]", min, max),
        })
    } else {
        Ok(())
    }
}

/// Validates that all values in a slice are finite.
///
/// Returns `MalformedInput` naming `input` and the first offending index.
pub fn validate_all_finite(data: &[f64], input: &str) -> CointResult<()> {
    if let Some((i, &value)) = data.iter().enumerate().find(|(_, &v)| !v.is_finite()) {
        let value_desc = if value.is_nan() {
            "NaN".to_string()
        } else if value.is_sign_positive() {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        };

        return Err(CointegrationError::MalformedInput {
            input: input.to_string(),
            reason: format!("non-finite value at index {}: {}", i, value_desc),
        });
    }

    Ok(())
}
