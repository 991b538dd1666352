//! Seeded random number generation.
//!
//! Randomness is an explicit, injectable dependency: genes and selection
//! strategies take `&mut dyn RngCore`, and the engine builds its generator
//! here from an optional seed. Two runs with the same seed and
//! configuration produce identical populations.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a deterministic generator from a seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
