//! Fixed-width base58 encoding of 32-byte keys.
//!
//! The encoder never allocates: digits are accumulated in place inside the
//! caller's output buffer, then reversed and mapped through the alphabet.
//! Cost is quadratic in the input length, which is fine for a fixed 32 bytes.

use super::alphabet::{self, BASE, ZERO_SYMBOL};

/// Length of every key accepted by the encoder.
pub const KEY_LEN: usize = 32;

/// Shortest possible address (all-zero key).
pub const MIN_ADDRESS_LEN: usize = 32;

/// Longest possible address: 32 bytes never need more than 44 base58 digits.
pub const MAX_ADDRESS_LEN: usize = 44;

/// Errors returned when decoding text back into a key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("Invalid base58 character {ch:?} at index {index}")]
    InvalidCharacter { ch: char, index: usize },

    #[error("Decoded value does not fit in 32 bytes")]
    Overflow,

    #[error("Decoded length {actual} does not match key length 32")]
    Length { actual: usize },
}

/// Encodes `input` into `out` and returns the number of bytes written.
///
/// The output is not terminated; only `out[..len]` is meaningful. One `1` is
/// emitted per leading zero byte, followed by the base58 digits of the rest of
/// the value, most significant first.
#[inline]
pub fn encode_into(input: &[u8; KEY_LEN], out: &mut [u8; MAX_ADDRESS_LEN]) -> usize {
    let zeros = input.iter().take_while(|&&b| b == 0).count();
    out[..zeros].fill(ZERO_SYMBOL);

    // Little-endian digit buffer living in the tail of `out`.
    let digits = &mut out[zeros..];
    let mut len = 0;

    for &byte in &input[zeros..] {
        let mut carry = u32::from(byte);
        for digit in digits[..len].iter_mut() {
            carry += u32::from(*digit) << 8;
            *digit = (carry % BASE) as u8;
            carry /= BASE;
        }
        while carry > 0 {
            debug_assert!(len < digits.len(), "base58 digit buffer overflow");
            digits[len] = (carry % BASE) as u8;
            len += 1;
            carry /= BASE;
        }
    }

    // The first processed byte is nonzero, so the top digit is never zero and
    // nothing needs trimming after the reversal.
    let digits = &mut digits[..len];
    digits.reverse();
    for digit in digits.iter_mut() {
        *digit = alphabet::symbol(*digit);
    }

    zeros + len
}

/// Decodes base58 text into a 32-byte key.
///
/// This is the exact inverse of [`encode_into`]: the text must decode to
/// exactly [`KEY_LEN`] bytes, counting one zero byte per leading `1`.
pub fn decode(text: &[u8]) -> Result<[u8; KEY_LEN], DecodeError> {
    let zeros = text.iter().take_while(|&&c| c == ZERO_SYMBOL).count();
    if zeros > KEY_LEN {
        return Err(DecodeError::Length { actual: zeros });
    }

    // Little-endian byte accumulator.
    let mut bytes = [0u8; KEY_LEN];
    let mut len = 0;

    for (index, &c) in text.iter().enumerate().skip(zeros) {
        let value = alphabet::digit(c).ok_or(DecodeError::InvalidCharacter {
            ch: c as char,
            index,
        })?;

        let mut carry = u32::from(value);
        for byte in bytes[..len].iter_mut() {
            carry += u32::from(*byte) * BASE;
            *byte = carry as u8;
            carry >>= 8;
        }
        while carry > 0 {
            if len == KEY_LEN {
                return Err(DecodeError::Overflow);
            }
            bytes[len] = carry as u8;
            len += 1;
            carry >>= 8;
        }
    }

    if zeros + len != KEY_LEN {
        return Err(DecodeError::Length { actual: zeros + len });
    }

    let mut key = [0u8; KEY_LEN];
    for (dst, src) in key[zeros..].iter_mut().zip(bytes[..len].iter().rev()) {
        *dst = *src;
    }
    Ok(key)
}
