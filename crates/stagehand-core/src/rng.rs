//! Random number generator abstraction for determinism.
//!
//! In production, this wraps a real RNG. In tests and replays,
//! a seeded or scripted implementation is injected.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Abstraction over random number generation.
pub trait DeterministicRng: Send + Sync {
    /// Generate a random `i64` in the range `[min, max]` inclusive.
    /// Callers guarantee `min <= max`.
    fn next_i64_range(&mut self, min: i64, max: i64) -> i64;

    /// Generate a random `f64` in `[0.0, 1.0)`.
    fn next_f64(&mut self) -> f64;
}

/// A `DeterministicRng` backed by `StdRng`.
///
/// Two instances built from the same seed yield the same stream.
#[derive(Debug, Clone)]
pub struct SeededRng {
    inner: StdRng,
}

impl SeededRng {
    /// Creates a reproducible RNG from a 64-bit seed.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates an RNG seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            inner: StdRng::from_os_rng(),
        }
    }
}

impl DeterministicRng for SeededRng {
    fn next_i64_range(&mut self, min: i64, max: i64) -> i64 {
        self.inner.random_range(min..=max)
    }

    fn next_f64(&mut self) -> f64 {
        self.inner.random::<f64>()
    }
}
