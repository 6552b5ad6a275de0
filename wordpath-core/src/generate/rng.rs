//! Seed derivation for batch workers.

use rand::{SeedableRng, rngs::SmallRng};

/// SplitMix64 increment (the 64-bit golden ratio) used to space worker seeds.
const WORKER_SEED_SPACING: u64 = 0x9E37_79B9_7F4A_7C15;
const SPLITMIX_MULT_A: u64 = 0xBF58_476D_1CE4_E5B9;
const SPLITMIX_MULT_B: u64 = 0x94D0_49BB_1331_11EB;

#[inline]
const fn mix_worker_seed(base_seed: u64, worker_index: usize) -> u64 {
    splitmix64(base_seed ^ ((worker_index as u64 + 1).wrapping_mul(WORKER_SEED_SPACING)))
}

#[inline]
const fn splitmix64(mut state: u64) -> u64 {
    state = state.wrapping_add(WORKER_SEED_SPACING);
    state = (state ^ (state >> 30)).wrapping_mul(SPLITMIX_MULT_A);
    state = (state ^ (state >> 27)).wrapping_mul(SPLITMIX_MULT_B);
    state ^ (state >> 31)
}

/// Seed for `worker` in `round`; independent of thread scheduling.
#[inline]
pub(super) const fn mix_round_seed(base_seed: u64, round: usize, worker: usize) -> u64 {
    mix_worker_seed(splitmix64(base_seed ^ round as u64), worker)
}

pub(super) fn worker_rng(base_seed: u64, round: usize, worker: usize) -> SmallRng {
    SmallRng::seed_from_u64(mix_round_seed(base_seed, round, worker))
}
