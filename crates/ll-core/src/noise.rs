//! Injectable noise sources.
//!
//! The plant model takes its stochastic disturbance from a caller-supplied
//! [`NoiseSource`] instead of a process-global RNG, so runs can be seeded
//! for reproducibility and instances never share hidden state.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// Source of standard-normal (mean 0, variance 1) samples.
pub trait NoiseSource {
    fn next_standard_normal(&mut self) -> f64;
}

/// Gaussian noise backed by a seedable RNG.
#[derive(Debug, Clone)]
pub struct GaussianNoise {
    rng: StdRng,
}

impl GaussianNoise {
    /// Deterministic source: the same seed yields the same sample stream.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// OS-entropy seeded source for non-reproducible runs.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl NoiseSource for GaussianNoise {
    fn next_standard_normal(&mut self) -> f64 {
        self.rng.sample(StandardNormal)
    }
}

/// Always returns 0. Stands in for "no disturbance" in deterministic runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroNoise;

impl NoiseSource for ZeroNoise {
    fn next_standard_normal(&mut self) -> f64 {
        0.0
    }
}
