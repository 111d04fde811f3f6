//! Test RNG — deterministic `DeterministicRng` implementations for tests.

use stagehand_core::rng::DeterministicRng;

/// A no-op RNG that always returns `min` from the range methods and `0.0`
/// from `next_f64`. Suitable for tests that do not depend on specific random
/// values.
#[derive(Debug)]
pub struct MockRng;

impl DeterministicRng for MockRng {
    fn next_i64_range(&mut self, min: i64, _max: i64) -> i64 {
        min
    }

    fn next_f64(&mut self) -> f64 {
        0.0
    }
}

/// An RNG that returns values from a predetermined sequence, ignoring the
/// requested range. Panics if the sequence is exhausted. Used in tests that
/// need specific, repeatable draws (e.g., an exact chance boundary).
#[derive(Debug)]
pub struct SequenceRng {
    values: Vec<i64>,
    index: usize,
}

impl SequenceRng {
    /// Create a new `SequenceRng` with the given values.
    #[must_use]
    pub fn new(values: Vec<i64>) -> Self {
        Self { values, index: 0 }
    }

    /// Number of values drawn so far.
    #[must_use]
    pub fn drawn(&self) -> usize {
        self.index
    }

    fn next_value(&mut self) -> i64 {
        let val = self.values[self.index];
        self.index += 1;
        val
    }
}

impl DeterministicRng for SequenceRng {
    fn next_i64_range(&mut self, _min: i64, _max: i64) -> i64 {
        self.next_value()
    }

    fn next_f64(&mut self) -> f64 {
        0.0
    }
}
