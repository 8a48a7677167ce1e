//! Random number generator abstraction for determinism.
//!
//! Hosts resolving battles inject a seeded implementation; tests inject a
//! scripted one.

/// Abstraction over random number generation.
pub trait DeterministicRng: Send + Sync {
    /// Generate a random `u32` in the range `[min, max]` inclusive.
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32;
}
