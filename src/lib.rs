//! # Cointegration Analysis
//!
//! Johansen maximum-likelihood test for cointegration among multivariate
//! price series.
//!
//! Given T aligned observations of N non-stationary series, the test
//! estimates how many independent stationary linear combinations (the
//! cointegration rank) the system admits, and returns the candidate
//! cointegrating vectors together with trace and max-eigenvalue statistics
//! and their asymptotic critical values.
//!
//! ## Key Features
//!
//! - **Full Johansen procedure**: regressor construction, residual
//!   concentration, moment matrices and the generalized eigenproblem
//! - **Three deterministic specifications**: no constant, constant, and
//!   constant with linear trend
//! - **Tabulated critical values**: 90/95/99% for systems of up to 12 series
//! - **Rank decisions**: sequential trace and max-eigenvalue selection
//! - **Reproducible synthetic data**: seeded generator for cointegrated pairs
//! - **CSV boundary**: loader and writer for single-column price files
//!
//! ## Quick Start
//!
//! ```rust
//! use cointegration_analysis::{
//!     generate_cointegrated_pair, johansen_test, CointegratedPairConfig, ConfidenceLevel,
//!     JohansenConfig, SeriesMatrix,
//! };
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pair = generate_cointegrated_pair(&CointegratedPairConfig::default())?;
//!     let series = SeriesMatrix::from_columns(vec![
//!         ("series1".to_string(), pair.series1),
//!         ("series2".to_string(), pair.series2),
//!     ])?;
//!
//!     let report = johansen_test(&series, &JohansenConfig::default())?;
//!     println!("{}", report);
//!     println!("rank at 95%: {}", report.cointegration_rank(ConfidenceLevel::P95));
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! [`johansen_test`] chains the stages, each of which is usable on its own:
//! [`regressors`] → [`residuals`] → [`moments`] → [`eigen`] →
//! [`statistics`], with [`critical_values`](mod@critical_values) resolved up front and everything
//! collected into a [`TestReport`].

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
pub mod config;
pub mod errors;
pub mod linear_algebra;
pub mod rng;
pub mod series;

// Johansen stages
pub mod critical_values;
pub mod eigen;
pub mod johansen;
pub mod moments;
pub mod regressors;
pub mod report;
pub mod residuals;
pub mod statistics;

// Data boundary
pub mod data_loader;
pub mod generators;

// Re-exports for convenience - main public API
pub use config::{DeterministicOrder, JohansenConfig};
pub use errors::{CointResult, CointegrationError};
pub use johansen::johansen_test;
pub use report::TestReport;
pub use series::SeriesMatrix;

pub use critical_values::{
    critical_values, ConfidenceLevel, CriticalValueRow, CriticalValues, MAX_TABULATED_DIMENSION,
};
pub use eigen::{solve_generalized_eigen, EigenResult};
pub use moments::MomentMatrices;
pub use regressors::{build_regressors, RegressorSet};
pub use residuals::{concentrate, ResidualPair};
pub use statistics::{StatisticKind, TestStatistics};

// Data generation and loading exports
pub use data_loader::{load_series_csv, load_series_matrix, write_series_csv, SERIES_COLUMN};
pub use generators::{
    generate_cointegrated_pair, generate_random_walk, CointegratedPair, CointegratedPairConfig,
};
pub use rng::SeededRng;
