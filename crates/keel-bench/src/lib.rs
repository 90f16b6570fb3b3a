//! Workload generators for keel benchmarks.
//!
//! - [`seeded_values`]: deterministic element values via seed
//! - [`seeded_positions`]: deterministic in-bounds insertion/removal points
//!
//! Both use ChaCha8 so runs are reproducible across platforms.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// `count` pseudo-random `u64` values from `seed`.
pub fn seeded_values(count: usize, seed: u64) -> Vec<u64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count).map(|_| rng.next_u64()).collect()
}

/// `count` positions for a sequence that starts at `start_len` elements
/// and grows by one after every operation.
///
/// Position `i` lies in `0..=start_len + i`, so it is valid for an insert
/// performed after `i` earlier inserts.
pub fn seeded_positions(count: usize, start_len: usize, seed: u64) -> Vec<usize> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let bound = (start_len + i + 1) as u64;
            (rng.next_u64() % bound) as usize
        })
        .collect()
}
