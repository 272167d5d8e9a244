//! Data-parallel batch launch.
//!
//! A batch evaluates the lane index range `0..lanes` in parallel on the
//! current rayon pool. Lanes share only the read-only spec and derivation.

use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;

use crate::crypto::{KeyDerivation, KEY_LEN};
use crate::matcher::PatternSpec;

use super::lane::{evaluate, Candidate};
use super::seed::lane_seed;

/// Matches kept per batch; any further matches in the same batch are dropped.
pub const MAX_MATCHES_PER_BATCH: usize = 256;

/// What one batch produced.
#[derive(Debug)]
pub struct BatchOutcome {
    /// Number of candidates evaluated
    pub lanes: u64,
    /// Accepted candidates, in lane order when under the cap
    pub matches: Vec<Candidate>,
    /// Matches discarded past `MAX_MATCHES_PER_BATCH`
    pub dropped: usize,
}

/// Runs one batch of `lanes` candidates seeded from `base_seed`.
pub fn run_batch<D>(
    derivation: &D,
    spec: &PatternSpec,
    base_seed: &[u8; KEY_LEN],
    lanes: u64,
) -> BatchOutcome
where
    D: KeyDerivation + ?Sized,
{
    // Slots are claimed in completion order, so a capped batch keeps whichever
    // matches finished first.
    let accepted = AtomicUsize::new(0);
    let matches: Vec<Candidate> = (0..lanes)
        .into_par_iter()
        .filter_map(|lane| {
            let candidate = evaluate(derivation, &lane_seed(base_seed, lane), spec).into_candidate()?;
            (accepted.fetch_add(1, Ordering::Relaxed) < MAX_MATCHES_PER_BATCH).then_some(candidate)
        })
        .collect();

    let dropped = accepted.into_inner().saturating_sub(MAX_MATCHES_PER_BATCH);

    BatchOutcome {
        lanes,
        matches,
        dropped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{Address, Ed25519, Keypair};

    struct Identity;

    impl KeyDerivation for Identity {
        fn derive_keypair(&self, seed: &[u8; KEY_LEN]) -> Keypair {
            Keypair::from_parts(*seed, *seed)
        }
    }

    #[test]
    fn test_single_matching_lane() {
        // Only lane 0 leaves the seed all zero, i.e. 32 leading '1's.
        let spec = PatternSpec::builder(false)
            .with_repeat_prefix(32)
            .unwrap()
            .build()
            .unwrap();
        let outcome = run_batch(&Identity, &spec, &[0u8; KEY_LEN], 300);

        assert_eq!(outcome.lanes, 300);
        assert_eq!(outcome.dropped, 0);
        assert_eq!(outcome.matches.len(), 1);
        assert_eq!(outcome.matches[0].keypair.seed(), &[0u8; KEY_LEN]);
    }

    /// Maps every seed to the all-zero public key.
    struct ZeroKey;

    impl KeyDerivation for ZeroKey {
        fn derive_keypair(&self, seed: &[u8; KEY_LEN]) -> Keypair {
            Keypair::from_parts(*seed, [0u8; KEY_LEN])
        }
    }

    #[test]
    fn test_match_cap() {
        let spec = PatternSpec::builder(false)
            .with_repeat_prefix(32)
            .unwrap()
            .build()
            .unwrap();
        let base = [9u8; KEY_LEN];
        let outcome = run_batch(&ZeroKey, &spec, &base, 300);

        assert_eq!(outcome.lanes, 300);
        assert_eq!(outcome.matches.len(), MAX_MATCHES_PER_BATCH);
        assert_eq!(outcome.dropped, 300 - MAX_MATCHES_PER_BATCH);

        let lane_seeds: Vec<[u8; KEY_LEN]> = (0..300).map(|lane| lane_seed(&base, lane)).collect();
        let mut kept: Vec<[u8; KEY_LEN]> = outcome.matches.iter().map(|c| *c.keypair.seed()).collect();
        assert!(kept.iter().all(|seed| lane_seeds.contains(seed)));
        kept.sort();
        kept.dedup();
        assert_eq!(kept.len(), MAX_MATCHES_PER_BATCH);
    }

    #[test]
    fn test_match_cap_not_reached() {
        let spec = PatternSpec::builder(false)
            .with_repeat_prefix(32)
            .unwrap()
            .build()
            .unwrap();
        let outcome = run_batch(&ZeroKey, &spec, &[1u8; KEY_LEN], 100);

        assert_eq!(outcome.dropped, 0);
        for (lane, candidate) in outcome.matches.iter().enumerate() {
            assert_eq!(candidate.keypair.seed(), &lane_seed(&[1u8; KEY_LEN], lane as u64));
        }
    }

    #[test]
    fn test_batch_agrees_with_sequential_scan() {
        let spec = PatternSpec::builder(true).with_prefix("a").unwrap().build().unwrap();
        let base = [0x5au8; KEY_LEN];
        let outcome = run_batch(&Ed25519, &spec, &base, 512);

        let expected: Vec<[u8; KEY_LEN]> = (0..512)
            .map(|lane| lane_seed(&base, lane))
            .filter(|seed| {
                let keypair = Ed25519.derive_keypair(seed);
                spec.matches(Address::encode(keypair.public_key()).as_bytes())
            })
            .collect();
        let found: Vec<[u8; KEY_LEN]> = outcome.matches.iter().map(|c| *c.keypair.seed()).collect();

        assert_eq!(found, expected);
    }
}
