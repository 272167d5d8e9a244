//! # sol_vanity
//!
//! High-performance Solana vanity address grinder.
//!
//! ## Architecture
//!
//! - `crypto`: Base58 alphabet and fixed-width encoder, ed25519 key derivation
//! - `matcher`: Allocation-free address predicates and pattern specifications
//! - `worker`: Per-lane evaluation, parallel batches and the worker pool
//! - `output`: Key file persistence
//! - `config`: Runtime configuration

pub mod config;
pub mod crypto;
pub mod matcher;
pub mod output;
pub mod worker;

pub use config::{Config, ConfigError};
pub use crypto::{Address, Ed25519, KeyDerivation, Keypair};
pub use matcher::{CharClass, Join, MatchMode, PatternError, PatternSpec};
pub use output::{KeyWriter, OutputError};
pub use worker::{Candidate, MatchResult, SeedSource, VanityResult, WorkerError, WorkerPool};

/// Encodes a 32-byte public key as a base58 address.
#[inline]
pub fn encode_address(public_key: &[u8; crypto::KEY_LEN]) -> Address {
    Address::encode(public_key)
}
