//! Seeded bounded random source for procedural placement

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::tuning::IntRange;

#[derive(Debug, Clone)]
pub struct RandomGenerator {
    rng: Pcg32,
}

impl RandomGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Uniform integer in `[min, max]`.
    ///
    /// An inverted range collapses to `min`; this only happens when the
    /// viewport is too short for the platform band.
    pub fn int_inclusive(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        self.rng.random_range(min..=max)
    }

    pub fn in_range(&mut self, range: IntRange) -> f32 {
        self.int_inclusive(range.min, range.max) as f32
    }
}
