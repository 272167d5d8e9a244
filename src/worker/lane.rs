//! Per-lane candidate evaluation.
//!
//! One call handles one candidate: derive the keypair, encode the public key,
//! test the text. Nothing is kept between calls and nothing is allocated.

use crate::crypto::{Address, KeyDerivation, Keypair, KEY_LEN};
use crate::matcher::PatternSpec;

/// A keypair whose address satisfied the pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub address: Address,
    pub keypair: Keypair,
}

/// Verdict for one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    Accept(Candidate),
    Reject,
}

impl MatchResult {
    #[inline]
    pub fn is_match(&self) -> bool {
        matches!(self, MatchResult::Accept(_))
    }

    #[inline]
    pub fn into_candidate(self) -> Option<Candidate> {
        match self {
            MatchResult::Accept(candidate) => Some(candidate),
            MatchResult::Reject => None,
        }
    }
}

/// Evaluates the candidate produced by `seed`.
#[inline]
pub fn evaluate<D>(derivation: &D, seed: &[u8; KEY_LEN], spec: &PatternSpec) -> MatchResult
where
    D: KeyDerivation + ?Sized,
{
    let keypair = derivation.derive_keypair(seed);
    let address = Address::encode(keypair.public_key());

    if spec.matches(address.as_bytes()) {
        MatchResult::Accept(Candidate { address, keypair })
    } else {
        MatchResult::Reject
    }
}
