//! Allocation-free predicates over encoded address text.
//!
//! Every function is total for its documented preconditions and only reads
//! its inputs. Lengths are carried by the slices themselves. Pattern lengths
//! above the text length violate the caller's contract and are caught by
//! debug assertions only.

use crate::crypto::alphabet::fold;

#[inline(always)]
fn eq(a: u8, b: u8, ignore_case: bool) -> bool {
    if ignore_case {
        fold(a) == fold(b)
    } else {
        a == b
    }
}

/// True if `text` starts with `pattern`.
#[inline]
pub fn has_prefix(text: &[u8], pattern: &[u8], ignore_case: bool) -> bool {
    debug_assert!(pattern.len() <= text.len(), "prefix longer than address");
    text.iter()
        .zip(pattern)
        .all(|(&t, &p)| eq(t, p, ignore_case))
}

/// True if `text` ends with `pattern`.
#[inline]
pub fn has_suffix(text: &[u8], pattern: &[u8], ignore_case: bool) -> bool {
    debug_assert!(pattern.len() <= text.len(), "suffix longer than address");
    text.iter()
        .rev()
        .zip(pattern.iter().rev())
        .all(|(&t, &p)| eq(t, p, ignore_case))
}

/// True if the first `len` characters all equal the first one.
#[inline]
pub fn has_repeating_prefix(text: &[u8], len: usize, ignore_case: bool) -> bool {
    debug_assert!(len <= text.len(), "repeating prefix longer than address");
    match text[..len].split_first() {
        Some((&first, rest)) => rest.iter().all(|&c| eq(c, first, ignore_case)),
        None => true,
    }
}

/// True if the last `len` characters all equal the last one.
#[inline]
pub fn has_repeating_suffix(text: &[u8], len: usize, ignore_case: bool) -> bool {
    debug_assert!(len <= text.len(), "repeating suffix longer than address");
    match text[text.len() - len..].split_last() {
        Some((&last, rest)) => rest.iter().all(|&c| eq(c, last, ignore_case)),
        None => true,
    }
}

pub fn only_uppercase(text: &[u8]) -> bool {
    text.iter().all(u8::is_ascii_uppercase)
}

pub fn only_lowercase(text: &[u8]) -> bool {
    text.iter().all(u8::is_ascii_lowercase)
}

pub fn only_digits(text: &[u8]) -> bool {
    text.iter().all(u8::is_ascii_digit)
}

/// Digits and uppercase letters.
pub fn only_digits_upper(text: &[u8]) -> bool {
    text.iter().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
}

/// Digits and lowercase letters.
pub fn only_digits_lower(text: &[u8]) -> bool {
    text.iter().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
}

pub fn only_letters(text: &[u8]) -> bool {
    text.iter().all(u8::is_ascii_alphabetic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_case_handling() {
        let text = b"ABCdef";
        assert!(has_prefix(text, b"abc", true));
        assert!(!has_prefix(text, b"abc", false));
        assert!(has_prefix(text, b"ABC", false));
        assert!(has_prefix(text, b"aBcDeF", true));
    }

    #[test]
    fn test_suffix_case_handling() {
        let text = b"ABCdef";
        assert!(has_suffix(text, b"DEF", true));
        assert!(!has_suffix(text, b"DEF", false));
        assert!(has_suffix(text, b"def", false));
        assert!(!has_suffix(text, b"cdf", true));
    }

    #[test]
    fn test_case_fold_symmetry() {
        let text = b"SoLVaniTy9";
        let upper = text.to_ascii_uppercase();
        let lower = text.to_ascii_lowercase();
        for pattern in [&b"sol"[..], b"SOL", b"sOl", b"xyz", b"SoLV"] {
            let expected = has_prefix(text, pattern, true);
            assert_eq!(has_prefix(&upper, pattern, true), expected);
            assert_eq!(has_prefix(&lower, pattern, true), expected);
        }
    }

    #[test]
    fn test_fold_ignores_non_letters() {
        // '[' is 'Z' + 1 and '{' is 'z' + 1; neither may be folded.
        assert!(!has_prefix(b"[", b"{", true));
        assert!(!has_suffix(b"@", b"`", true));
    }

    #[test]
    fn test_vacuous_lengths() {
        for text in [&b""[..], b"x", b"abcdef"] {
            assert!(has_prefix(text, b"", false));
            assert!(has_suffix(text, b"", true));
            assert!(has_repeating_prefix(text, 0, false));
            assert!(has_repeating_suffix(text, 0, true));
        }
        assert!(has_repeating_prefix(b"ab", 1, false));
        assert!(has_repeating_suffix(b"ab", 1, false));
    }

    #[test]
    fn test_repeating_prefix() {
        let text = b"aaaXYZ";
        assert!(has_repeating_prefix(text, 3, false));
        assert!(!has_repeating_prefix(text, 4, false));
        assert!(has_repeating_prefix(b"aAaB", 3, true));
        assert!(!has_repeating_prefix(b"aAaB", 3, false));
    }

    #[test]
    fn test_repeating_suffix() {
        let text = b"XYZzzz";
        assert!(has_repeating_suffix(text, 3, false));
        assert!(!has_repeating_suffix(text, 4, false));
        assert!(has_repeating_suffix(text, 4, true));
        assert!(!has_repeating_suffix(text, 6, false));
    }

    #[test]
    fn test_character_classes() {
        assert!(only_digits(b"12345"));
        assert!(!only_digits(b"1234a"));

        assert!(only_digits_lower(b"abc123"));
        assert!(!only_uppercase(b"abc123"));

        assert!(only_uppercase(b"ABCXYZ"));
        assert!(only_lowercase(b"abcxyz"));
        assert!(!only_lowercase(b"abcxyZ"));
        assert!(only_digits_upper(b"AB12"));
        assert!(!only_digits_upper(b"Ab12"));
        assert!(only_letters(b"AbCd"));
        assert!(!only_letters(b"AbC1"));
    }

    #[test]
    fn test_character_classes_accept_empty() {
        let empty: &[u8] = b"";
        assert!(only_uppercase(empty));
        assert!(only_lowercase(empty));
        assert!(only_digits(empty));
        assert!(only_digits_upper(empty));
        assert!(only_digits_lower(empty));
        assert!(only_letters(empty));
    }
}
