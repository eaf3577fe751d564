//! Synthetic series generators for testing and validation.
//!
//! - **Cointegrated pair**: a random walk with drift and a second series that
//!   tracks a fixed multiple of it plus stationary noise. The pair has
//!   cointegration rank 1 by construction.
//! - **Random walk**: an integrated series with no cointegrating partner,
//!   useful as a rank-0 benchmark.

use crate::errors::{validate_parameter, CointResult, CointegrationError};
use crate::rng::SeededRng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters of [`generate_cointegrated_pair`].
///
/// `series1[t] = Σ_{s ≤ t} (drift + ε1[s])`, `ε1 ~ N(0, noise_std²)`;
/// `series2[t] = loading · series1[t] + ε2[t]`, `ε2 ~ N(0, cointegration_noise_std²)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CointegratedPairConfig {
    /// Seed of the ChaCha20 stream
    pub seed: u64,
    /// Length of each series
    pub observations: usize,
    /// Per-step drift of the random walk
    pub drift: f64,
    /// Standard deviation of the random-walk innovations
    pub noise_std: f64,
    /// Standard deviation of the stationary deviation from the long-run relation
    pub cointegration_noise_std: f64,
    /// Long-run multiplier linking series2 to series1
    pub loading: f64,
}

impl Default for CointegratedPairConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            observations: 1000,
            drift: 0.05,
            noise_std: 1.0,
            cointegration_noise_std: 0.5,
            loading: 2.0,
        }
    }
}

impl CointegratedPairConfig {
    /// Check every parameter.
    pub fn validate(&self) -> CointResult<()> {
        if self.observations < 2 {
            return Err(CointegrationError::InvalidParameter {
                parameter: "observations".to_string(),
                value: self.observations as f64,
                constraint: "must be at least 2".to_string(),
            });
        }
        validate_parameter(self.drift, f64::MIN, f64::MAX, "drift")?;
        validate_parameter(self.loading, f64::MIN, f64::MAX, "loading")?;
        validate_parameter(self.noise_std, f64::MIN_POSITIVE, f64::MAX, "noise_std")?;
        validate_parameter(
            self.cointegration_noise_std,
            f64::MIN_POSITIVE,
            f64::MAX,
            "cointegration_noise_std",
        )?;
        Ok(())
    }
}

/// Two series sharing one stochastic trend.
#[derive(Debug, Clone, PartialEq)]
pub struct CointegratedPair {
    /// Integrated driver series
    pub series1: Vec<f64>,
    /// `loading · series1` plus stationary noise
    pub series2: Vec<f64>,
}

fn accumulate(rng: &mut SeededRng, observations: usize, drift: f64, noise_std: f64) -> Vec<f64> {
    let mut walk = Vec::with_capacity(observations);
    let mut position = 0.0;
    for _ in 0..observations {
        position += drift + rng.normal(0.0, noise_std);
        walk.push(position);
    }
    walk
}

/// Generate a cointegrated pair.
///
/// All random-walk innovations are drawn before the deviation noise, so the
/// first series depends only on the seed, drift and `noise_std`.
///
/// # Example
/// ```rust
/// use cointegration_analysis::{generate_cointegrated_pair, CointegratedPairConfig};
///
/// let pair = generate_cointegrated_pair(&CointegratedPairConfig {
///     observations: 250,
///     ..Default::default()
/// })
/// .unwrap();
/// assert_eq!(pair.series1.len(), 250);
/// assert_eq!(pair.series2.len(), 250);
/// ```
pub fn generate_cointegrated_pair(config: &CointegratedPairConfig) -> CointResult<CointegratedPair> {
    config.validate()?;

    let mut rng = SeededRng::with_seed(config.seed);
    let series1 = accumulate(&mut rng, config.observations, config.drift, config.noise_std);
    let series2 = series1
        .iter()
        .map(|&x| config.loading * x + rng.normal(0.0, config.cointegration_noise_std))
        .collect();

    log::debug!(
        "Generated cointegrated pair: {} observations, seed {}",
        config.observations,
        config.seed
    );

    Ok(CointegratedPair { series1, series2 })
}

/// Generate a Gaussian random walk with drift.
pub fn generate_random_walk(
    seed: u64,
    observations: usize,
    drift: f64,
    noise_std: f64,
) -> CointResult<Vec<f64>> {
    if observations == 0 {
        return Err(CointegrationError::InvalidParameter {
            parameter: "observations".to_string(),
            value: 0.0,
            constraint: "must be positive".to_string(),
        });
    }
    validate_parameter(drift, f64::MIN, f64::MAX, "drift")?;
    validate_parameter(noise_std, f64::MIN_POSITIVE, f64::MAX, "noise_std")?;

    let mut rng = SeededRng::with_seed(seed);
    Ok(accumulate(&mut rng, observations, drift, noise_std))
}
