//! Key derivation and address encoding.
//!
//! This module provides:
//! - The base58 alphabet table and a fixed-width 32-byte encoder/decoder
//! - The `Address` type produced for every candidate
//! - Ed25519 keypair derivation behind the `KeyDerivation` trait

pub mod alphabet;
pub mod base58;

mod address;
mod keypair;

pub use address::Address;
pub use base58::{DecodeError, KEY_LEN, MAX_ADDRESS_LEN, MIN_ADDRESS_LEN};
pub use keypair::{Ed25519, KeyDerivation, Keypair, SECRET_KEY_LEN};
