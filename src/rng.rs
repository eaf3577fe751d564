//! Seeded random number generation for synthetic series.
//!
//! Every generator owns its own ChaCha20 stream; there is no process-wide
//! random state, so two calls with the same seed always produce the same
//! output regardless of what else runs concurrently.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::f64::consts::PI;

/// ChaCha20 generator with a Box-Muller normal sampler.
#[derive(Debug, Clone)]
pub struct SeededRng {
    rng: ChaCha20Rng,
    /// Second Box-Muller variate of the last pair, if not yet consumed
    spare: Option<f64>,
    seed: u64,
}

impl SeededRng {
    /// Create a generator from a 64-bit seed.
    ///
    /// The seed is expanded to the full 256-bit ChaCha key by
    /// `SeedableRng::seed_from_u64`.
    pub fn with_seed(seed: u64) -> Self {
        log::trace!("Seeding ChaCha20 generator with {}", seed);
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
            spare: None,
            seed,
        }
    }

    /// Seed this generator was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform f64 in [0, 1).
    pub fn f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Standard normal variate via the Box-Muller transform.
    ///
    /// Variates are produced in pairs; the sine branch is cached and returned
    /// by the next call.
    pub fn standard_normal(&mut self) -> f64 {
        if let Some(spare) = self.spare.take() {
            return spare;
        }

        // 1 - u lies in (0, 1], keeping the logarithm finite
        let u = 1.0 - self.f64();
        let v = self.f64();

        let mag = (-2.0 * u.ln()).sqrt();
        let angle = 2.0 * PI * v;

        self.spare = Some(mag * angle.sin());
        mag * angle.cos()
    }

    /// Normal variate with the given mean and standard deviation.
    pub fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        mean + std_dev * self.standard_normal()
    }
}
