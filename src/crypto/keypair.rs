//! Ed25519 keypair derivation.

use ed25519_dalek::SigningKey;

use super::base58::KEY_LEN;

/// Length of the private key encoding: 32-byte seed followed by the public key.
pub const SECRET_KEY_LEN: usize = 64;

/// Turns a 32-byte seed into a keypair.
///
/// Implementations must be deterministic and total: the same seed always
/// yields the same keypair, and every seed is valid.
pub trait KeyDerivation: Send + Sync {
    fn derive_keypair(&self, seed: &[u8; KEY_LEN]) -> Keypair;
}

/// Standard ed25519 derivation (the scheme used by Solana wallets).
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519;

impl KeyDerivation for Ed25519 {
    #[inline]
    fn derive_keypair(&self, seed: &[u8; KEY_LEN]) -> Keypair {
        let signing_key = SigningKey::from_bytes(seed);
        Keypair::from_bytes(&signing_key.to_keypair_bytes())
    }
}

/// An ed25519 keypair: the 32-byte seed and the public key derived from it.
#[derive(Clone, PartialEq, Eq)]
pub struct Keypair {
    seed: [u8; KEY_LEN],
    public_key: [u8; KEY_LEN],
}

impl Keypair {
    /// Splits a 64-byte `seed || public_key` encoding.
    pub fn from_bytes(bytes: &[u8; SECRET_KEY_LEN]) -> Self {
        let mut seed = [0u8; KEY_LEN];
        let mut public_key = [0u8; KEY_LEN];
        seed.copy_from_slice(&bytes[..KEY_LEN]);
        public_key.copy_from_slice(&bytes[KEY_LEN..]);
        Self { seed, public_key }
    }

    /// Builds a keypair from its two halves.
    pub const fn from_parts(seed: [u8; KEY_LEN], public_key: [u8; KEY_LEN]) -> Self {
        Self { seed, public_key }
    }

    /// Returns the public key.
    #[inline]
    pub fn public_key(&self) -> &[u8; KEY_LEN] {
        &self.public_key
    }

    /// Returns the seed.
    pub fn seed(&self) -> &[u8; KEY_LEN] {
        &self.seed
    }

    /// Returns the 64-byte private key encoding, `seed || public_key`.
    pub fn secret_bytes(&self) -> [u8; SECRET_KEY_LEN] {
        let mut bytes = [0u8; SECRET_KEY_LEN];
        bytes[..KEY_LEN].copy_from_slice(&self.seed);
        bytes[KEY_LEN..].copy_from_slice(&self.public_key);
        bytes
    }
}

impl std::fmt::Debug for Keypair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the secret half.
        write!(f, "Keypair(public: {})", hex::encode(self.public_key()))
    }
}
