//! Solana-style address representation.

use std::fmt;

use super::base58::{self, DecodeError, KEY_LEN, MAX_ADDRESS_LEN};

/// A base58-encoded 32-byte public key.
///
/// Stored inline in a fixed 44-byte buffer with an explicit length, so an
/// address can be produced per candidate without touching the heap.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address {
    text: [u8; MAX_ADDRESS_LEN],
    len: u8,
}

impl Address {
    /// Encodes a public key.
    #[inline]
    pub fn encode(public_key: &[u8; KEY_LEN]) -> Self {
        let mut text = [0u8; MAX_ADDRESS_LEN];
        let len = base58::encode_into(public_key, &mut text);
        Self {
            text,
            len: len as u8,
        }
    }

    /// Returns the encoded characters (exactly `len()` bytes, no terminator).
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.text[..self.len as usize]
    }

    /// Returns the number of characters, between 32 and 44.
    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Returns true if the address has no characters.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Decodes the address back into the public key bytes.
    pub fn to_public_key(&self) -> Result<[u8; KEY_LEN], DecodeError> {
        base58::decode(self.as_bytes())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Every byte is an alphabet symbol, so it is plain ASCII.
        self.as_bytes()
            .iter()
            .try_for_each(|&c| fmt::Write::write_char(f, c as char))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_length() {
        let addr = Address::encode(&[0u8; KEY_LEN]);
        assert_eq!(addr.to_string(), "11111111111111111111111111111111");
        assert_eq!(addr.len(), 32);
        assert!(!addr.is_empty());
        assert_eq!(format!("{:?}", addr), format!("Address({})", addr));
    }

    #[test]
    fn test_public_key_round_trip() {
        let key: [u8; KEY_LEN] = core::array::from_fn(|i| (i as u8).wrapping_mul(37).wrapping_add(11));
        let addr = Address::encode(&key);
        assert_eq!(addr.to_public_key(), Ok(key));
        assert_eq!(addr.to_string(), bs58::encode(key).into_string());
    }
}
