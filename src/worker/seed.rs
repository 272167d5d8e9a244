//! Seed bookkeeping for batches and lanes.

use rand::RngCore;

use crate::crypto::KEY_LEN;

/// Seed for one lane: the batch base seed with the lane index added
/// (wrapping, little-endian) into its first 8 bytes.
#[inline]
pub fn lane_seed(base: &[u8; KEY_LEN], lane: u64) -> [u8; KEY_LEN] {
    let mut seed = *base;
    let mut head = [0u8; 8];
    head.copy_from_slice(&seed[..8]);
    let counter = u64::from_le_bytes(head).wrapping_add(lane);
    seed[..8].copy_from_slice(&counter.to_le_bytes());
    seed
}

/// Where batch base seeds come from.
#[derive(Debug, Clone)]
pub enum SeedSource {
    /// A fresh random base seed for every batch
    Random,
    /// Consecutive lane ranges starting at a fixed seed; reproducible
    Sequential { next: [u8; KEY_LEN] },
}

impl SeedSource {
    pub fn sequential(start: [u8; KEY_LEN]) -> Self {
        SeedSource::Sequential { next: start }
    }

    /// Returns the base seed for a batch of `lanes` lanes.
    pub fn next_base(&mut self, lanes: u64) -> [u8; KEY_LEN] {
        match self {
            SeedSource::Random => {
                let mut seed = [0u8; KEY_LEN];
                rand::thread_rng().fill_bytes(&mut seed);
                seed
            }
            SeedSource::Sequential { next } => {
                let base = *next;
                *next = lane_seed(&base, lanes);
                base
            }
        }
    }
}
