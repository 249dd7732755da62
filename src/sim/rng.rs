//! Seeded random source for piece progression
//!
//! One stream per session. Every consumer draws from the same stream, so
//! replaying the same seed with the same call order reproduces a run exactly.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Deterministic random source backing the progression selector
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: Pcg32,
    seed: u64,
}

impl GameRng {
    /// Create a source from an explicit seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a source seeded from ambient entropy. The stream is still
    /// deterministic once seeded; only the seed itself is unpredictable.
    pub fn from_entropy() -> Self {
        Self::seeded(rand::random())
    }

    /// Reseed the stream. `None` self-seeds from ambient entropy.
    pub fn reset(&mut self, seed: Option<u64>) {
        let seed = seed.unwrap_or_else(rand::random);
        self.rng = Pcg32::seed_from_u64(seed);
        self.seed = seed;
    }

    /// The seed the current stream was started from
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Next uniform value in [0, 1). Advances the stream exactly once.
    pub fn next_f32(&mut self) -> f32 {
        self.rng.random()
    }

    /// Uniform index in [0, len). `len` must be non-zero.
    pub fn next_index(&mut self, len: usize) -> usize {
        ((self.next_f32() * len as f32) as usize).min(len - 1)
    }
}
