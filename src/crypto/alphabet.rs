//! The base58 alphabet and its inverse digit map.
//!
//! Both tables are compile-time constants shared read-only by every lane.

/// The 58 symbols in digit order. `0`, `O`, `I` and `l` are excluded.
pub const ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Number of symbols in the alphabet.
pub const BASE: u32 = 58;

/// The symbol for digit value 0; one is emitted per leading zero byte.
pub const ZERO_SYMBOL: u8 = ALPHABET[0];

const INVALID: u8 = 0xff;

/// ASCII byte -> digit value, `INVALID` for bytes outside the alphabet.
const INVERSE: [u8; 128] = {
    let mut map = [INVALID; 128];
    let mut i = 0;
    while i < ALPHABET.len() {
        map[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    map
};

// Build-time check that the table is a bijection over allowed symbols.
const _: () = {
    let mut i = 0;
    while i < ALPHABET.len() {
        let c = ALPHABET[i];
        assert!(c.is_ascii_alphanumeric());
        assert!(c != b'0' && c != b'O' && c != b'I' && c != b'l');
        assert!(INVERSE[c as usize] as usize == i, "alphabet symbols must be distinct");
        i += 1;
    }
};

/// Returns the symbol for a digit value in `0..58`.
#[inline(always)]
pub fn symbol(digit: u8) -> u8 {
    debug_assert!(u32::from(digit) < BASE);
    ALPHABET[digit as usize]
}

/// Returns the digit value of an alphabet symbol.
#[inline]
pub fn digit(symbol: u8) -> Option<u8> {
    match INVERSE.get(symbol as usize) {
        Some(&d) if d != INVALID => Some(d),
        _ => None,
    }
}

/// Returns true if `c` is one of the 58 symbols.
#[inline]
pub fn contains(c: u8) -> bool {
    digit(c).is_some()
}

/// ASCII case fold used by every case-insensitive comparison: `A`-`Z` map to
/// `a`-`z`, everything else is left alone.
#[inline(always)]
pub const fn fold(c: u8) -> u8 {
    if c >= b'A' && c <= b'Z' {
        c + 32
    } else {
        c
    }
}

/// Returns true if some alphabet symbol folds to the same byte as `c`.
pub fn contains_folded(c: u8) -> bool {
    let c = fold(c);
    ALPHABET.iter().any(|&s| fold(s) == c)
}

/// Number of alphabet symbols that fold to the same byte as `c` (0, 1 or 2).
pub fn folded_count(c: u8) -> u32 {
    let c = fold(c);
    ALPHABET.iter().filter(|&&s| fold(s) == c).count() as u32
}
