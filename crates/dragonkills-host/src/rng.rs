//! Seeded `DeterministicRng` backed by `rand`.

use dragonkills_core::rng::DeterministicRng;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A reproducible RNG for battle rolls.
#[derive(Debug)]
pub struct SeededRng(StdRng);

impl SeededRng {
    /// Creates an RNG from a fixed seed.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl DeterministicRng for SeededRng {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        self.0.random_range(min..=max)
    }
}
