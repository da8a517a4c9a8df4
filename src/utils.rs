//! Seed handling for the per-trial random streams.
//!
//! Every trial owns a `StdRng` seeded from `(base_seed, trial_index)`, so the
//! outcome of a run depends only on the base seed and the input, never on
//! how trials are spread across worker threads.

use rand::rngs::StdRng;
use rand::SeedableRng;

const GOLDEN_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;

/// SplitMix64 finalizer.
fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Derive the seed of trial `index` from the run's base seed.
///
/// Neighbouring indices map to well-separated seeds, so the resulting
/// streams are independent for practical purposes.
pub fn trial_seed(base_seed: u64, index: usize) -> u64 {
    mix64(base_seed.wrapping_add(GOLDEN_GAMMA.wrapping_mul(index as u64 + 1)))
}

/// Random generator for trial `index`.
pub fn trial_rng(base_seed: u64, index: usize) -> StdRng {
    StdRng::seed_from_u64(trial_seed(base_seed, index))
}

/// Fresh base seed from the thread-local entropy source.
pub fn entropy_seed() -> u64 {
    rand::random()
}
