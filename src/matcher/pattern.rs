//! Pattern specification and composition.

use std::fmt;
use std::str::FromStr;

use crate::crypto::alphabet::{self, ALPHABET};
use crate::crypto::{MAX_ADDRESS_LEN, MIN_ADDRESS_LEN};

use super::predicates;

/// Longest prefix, suffix or repeating run accepted. Every address has at
/// least this many characters, so a validated spec never reads out of bounds.
pub const MAX_PATTERN_LEN: usize = MIN_ADDRESS_LEN;

/// Shortest repeating run accepted. A run of one character holds for every
/// address.
pub const MIN_RUN_LEN: usize = 2;

/// Errors raised while building a pattern, before any search starts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("Invalid character {ch:?} in {field}: not in the base58 alphabet")]
    InvalidCharacter { field: &'static str, ch: char },

    #[error("{field} is {len} characters long, the maximum is {max}")]
    TooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("{field} is {len} characters long, the minimum is {min}")]
    TooShort {
        field: &'static str,
        len: usize,
        min: usize,
    },

    #[error("{0} cannot be empty")]
    EmptyText(&'static str),

    #[error("Pattern has no constraints")]
    Empty,
}

/// Fixed-capacity pattern text.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PatternText {
    bytes: [u8; MAX_ADDRESS_LEN],
    len: u8,
}

impl PatternText {
    /// Validates `text` against the alphabet. With `ignore_case`, characters
    /// only need to match some alphabet symbol after case folding.
    pub fn new(field: &'static str, text: &str, ignore_case: bool) -> Result<Self, PatternError> {
        if text.is_empty() {
            return Err(PatternError::EmptyText(field));
        }
        if text.len() > MAX_PATTERN_LEN {
            return Err(PatternError::TooLong {
                field,
                len: text.len(),
                max: MAX_PATTERN_LEN,
            });
        }
        if let Some(ch) = text.chars().find(|&c| {
            !c.is_ascii()
                || if ignore_case {
                    !alphabet::contains_folded(c as u8)
                } else {
                    !alphabet::contains(c as u8)
                }
        }) {
            return Err(PatternError::InvalidCharacter { field, ch });
        }

        let mut bytes = [0u8; MAX_ADDRESS_LEN];
        bytes[..text.len()].copy_from_slice(text.as_bytes());
        Ok(Self {
            bytes,
            len: text.len() as u8,
        })
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl fmt::Debug for PatternText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PatternText({:?})", String::from_utf8_lossy(self.as_bytes()))
    }
}

impl fmt::Display for PatternText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(self.as_bytes()))
    }
}

/// Character class every character of the address must belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Uppercase,
    Lowercase,
    Digits,
    DigitsUpper,
    DigitsLower,
    Letters,
}

impl CharClass {
    /// Tests a whole address.
    #[inline]
    pub fn matches(self, text: &[u8]) -> bool {
        match self {
            CharClass::Uppercase => predicates::only_uppercase(text),
            CharClass::Lowercase => predicates::only_lowercase(text),
            CharClass::Digits => predicates::only_digits(text),
            CharClass::DigitsUpper => predicates::only_digits_upper(text),
            CharClass::DigitsLower => predicates::only_digits_lower(text),
            CharClass::Letters => predicates::only_letters(text),
        }
    }

    /// Tests a single character.
    fn contains(self, c: u8) -> bool {
        self.matches(&[c])
    }
}

impl FromStr for CharClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "upper" | "uppercase" => Ok(CharClass::Uppercase),
            "lower" | "lowercase" => Ok(CharClass::Lowercase),
            "digits" | "digit" | "numeric" => Ok(CharClass::Digits),
            "upper-digits" | "digits-upper" => Ok(CharClass::DigitsUpper),
            "lower-digits" | "digits-lower" => Ok(CharClass::DigitsLower),
            "letters" | "alpha" => Ok(CharClass::Letters),
            _ => Err(format!("Unknown character class: {}", s)),
        }
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharClass::Uppercase => write!(f, "uppercase letters only"),
            CharClass::Lowercase => write!(f, "lowercase letters only"),
            CharClass::Digits => write!(f, "digits only"),
            CharClass::DigitsUpper => write!(f, "uppercase + digits only"),
            CharClass::DigitsLower => write!(f, "lowercase + digits only"),
            CharClass::Letters => write!(f, "uppercase + lowercase only"),
        }
    }
}

/// How start-side and end-side constraints combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Join {
    /// Both sides must match
    #[default]
    All,
    /// Either side may match
    Any,
}

/// A validated, read-only pattern shared by every lane of a search.
///
/// Start-side constraints are the prefix text and the repeating-prefix run;
/// end-side constraints are the suffix text and the repeating-suffix run. A
/// repeat length of 0 means "no constraint". The class constraint always has
/// to hold, regardless of `join`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PatternSpec {
    prefix: Option<PatternText>,
    suffix: Option<PatternText>,
    repeat_prefix: usize,
    repeat_suffix: usize,
    join: Join,
    ignore_case: bool,
    class: Option<CharClass>,
}

impl PatternSpec {
    /// Starts an empty spec; add constraints with the `with_*` methods.
    pub fn builder(ignore_case: bool) -> PatternSpecBuilder {
        PatternSpecBuilder {
            spec: PatternSpec {
                ignore_case,
                ..Default::default()
            },
        }
    }

    pub fn prefix(&self) -> Option<&PatternText> {
        self.prefix.as_ref()
    }

    pub fn suffix(&self) -> Option<&PatternText> {
        self.suffix.as_ref()
    }

    pub fn repeat_prefix(&self) -> usize {
        self.repeat_prefix
    }

    pub fn repeat_suffix(&self) -> usize {
        self.repeat_suffix
    }

    pub fn join(&self) -> Join {
        self.join
    }

    pub fn ignore_case(&self) -> bool {
        self.ignore_case
    }

    pub fn class(&self) -> Option<CharClass> {
        self.class
    }

    fn has_start(&self) -> bool {
        self.prefix.is_some() || self.repeat_prefix > 0
    }

    fn has_end(&self) -> bool {
        self.suffix.is_some() || self.repeat_suffix > 0
    }

    #[inline]
    fn start_matches(&self, text: &[u8]) -> bool {
        self.prefix
            .as_ref()
            .map_or(true, |p| predicates::has_prefix(text, p.as_bytes(), self.ignore_case))
            && predicates::has_repeating_prefix(text, self.repeat_prefix, self.ignore_case)
    }

    #[inline]
    fn end_matches(&self, text: &[u8]) -> bool {
        self.suffix
            .as_ref()
            .map_or(true, |s| predicates::has_suffix(text, s.as_bytes(), self.ignore_case))
            && predicates::has_repeating_suffix(text, self.repeat_suffix, self.ignore_case)
    }

    /// Tests an encoded address. Pure; cheapest checks run first.
    #[inline]
    pub fn matches(&self, text: &[u8]) -> bool {
        let anchored = match self.join {
            Join::All => self.start_matches(text) && self.end_matches(text),
            Join::Any => match (self.has_start(), self.has_end()) {
                (true, true) => self.start_matches(text) || self.end_matches(text),
                (true, false) => self.start_matches(text),
                (false, true) => self.end_matches(text),
                (false, false) => true,
            },
        };

        anchored && self.class.map_or(true, |class| class.matches(text))
    }

    /// Rough expected number of candidates per match, assuming uniformly
    /// distributed symbols.
    pub fn estimated_attempts(&self) -> f64 {
        let start = if self.has_start() {
            self.text_probability(self.prefix.as_ref())
                * self.run_probability(self.repeat_prefix)
        } else {
            1.0
        };
        let end = if self.has_end() {
            self.text_probability(self.suffix.as_ref())
                * self.run_probability(self.repeat_suffix)
        } else {
            1.0
        };

        let anchored = match (self.join, self.has_start(), self.has_end()) {
            (Join::Any, true, true) => start + end - start * end,
            _ => start * end,
        };

        let class = self.class.map_or(1.0, |class| {
            let members = ALPHABET.iter().filter(|&&c| class.contains(c)).count() as f64;
            (members / ALPHABET.len() as f64).powi(MAX_ADDRESS_LEN as i32)
        });

        let p = anchored * class;
        if p > 0.0 {
            1.0 / p
        } else {
            f64::INFINITY
        }
    }

    /// Returns a human-readable difficulty estimate.
    pub fn difficulty_description(&self) -> String {
        let attempts = self.estimated_attempts();
        if attempts <= 1e3 {
            "Very Easy (< 1 second)".into()
        } else if attempts <= 1e6 {
            "Easy (seconds)".into()
        } else if attempts <= 1e9 {
            "Medium (minutes)".into()
        } else if attempts <= 1e12 {
            "Hard (hours)".into()
        } else {
            "Very Hard (days or more)".into()
        }
    }

    fn text_probability(&self, text: Option<&PatternText>) -> f64 {
        let base = ALPHABET.len() as f64;
        text.map_or(1.0, |t| {
            t.as_bytes()
                .iter()
                .map(|&c| {
                    let hits = if self.ignore_case {
                        alphabet::folded_count(c)
                    } else {
                        1
                    };
                    f64::from(hits) / base
                })
                .product()
        })
    }

    fn run_probability(&self, len: usize) -> f64 {
        if len <= 1 {
            return 1.0;
        }
        let base = ALPHABET.len() as f64;
        ALPHABET
            .iter()
            .map(|&c| {
                let hits = if self.ignore_case {
                    alphabet::folded_count(c)
                } else {
                    1
                };
                (1.0 / base) * (f64::from(hits) / base).powi(len as i32 - 1)
            })
            .sum()
    }
}

impl fmt::Display for PatternSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(prefix) = &self.prefix {
            parts.push(format!("starting with '{}'", prefix));
        }
        if self.repeat_prefix > 0 {
            parts.push(format!("starting with {} repeating characters", self.repeat_prefix));
        }
        if let Some(suffix) = &self.suffix {
            parts.push(format!("ending with '{}'", suffix));
        }
        if self.repeat_suffix > 0 {
            parts.push(format!("ending with {} repeating characters", self.repeat_suffix));
        }

        let sep = match self.join {
            Join::All => " and ",
            Join::Any => " or ",
        };
        let mut out = parts.join(sep);
        if let Some(class) = self.class {
            if !out.is_empty() {
                out.push_str(", ");
            }
            out.push_str(&format!("with {}", class));
        }
        if self.ignore_case {
            out.push_str(" (case insensitive)");
        }
        f.write_str(&out)
    }
}

/// Builds a [`PatternSpec`], validating each constraint as it is added.
#[derive(Debug, Clone)]
pub struct PatternSpecBuilder {
    spec: PatternSpec,
}

impl PatternSpecBuilder {
    pub fn with_prefix(mut self, prefix: &str) -> Result<Self, PatternError> {
        self.spec.prefix = Some(PatternText::new("prefix", prefix, self.spec.ignore_case)?);
        Ok(self)
    }

    pub fn with_suffix(mut self, suffix: &str) -> Result<Self, PatternError> {
        self.spec.suffix = Some(PatternText::new("suffix", suffix, self.spec.ignore_case)?);
        Ok(self)
    }

    pub fn with_repeat_prefix(mut self, len: usize) -> Result<Self, PatternError> {
        self.spec.repeat_prefix = check_run("repeating prefix", len)?;
        Ok(self)
    }

    pub fn with_repeat_suffix(mut self, len: usize) -> Result<Self, PatternError> {
        self.spec.repeat_suffix = check_run("repeating suffix", len)?;
        Ok(self)
    }

    pub fn with_class(mut self, class: CharClass) -> Self {
        self.spec.class = Some(class);
        self
    }

    pub fn with_join(mut self, join: Join) -> Self {
        self.spec.join = join;
        self
    }

    /// Finishes the spec. A spec without any constraint is rejected since it
    /// would accept every candidate.
    pub fn build(self) -> Result<PatternSpec, PatternError> {
        let spec = self.spec;
        if !spec.has_start() && !spec.has_end() && spec.class.is_none() {
            return Err(PatternError::Empty);
        }
        Ok(spec)
    }
}

fn check_run(field: &'static str, len: usize) -> Result<usize, PatternError> {
    if len < MIN_RUN_LEN {
        return Err(PatternError::TooShort {
            field,
            len,
            min: MIN_RUN_LEN,
        });
    }
    if len > MAX_PATTERN_LEN {
        return Err(PatternError::TooLong {
            field,
            len,
            max: MAX_PATTERN_LEN,
        });
    }
    Ok(len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_match() {
        let spec = PatternSpec::builder(false).with_prefix("Sol").unwrap().build().unwrap();
        assert!(!spec.matches(b"SoLxyz"));
        assert!(spec.matches(b"Solxyz"));
        assert!(!spec.matches(b"xSolyz"));
    }

    #[test]
    fn test_prefix_and_suffix_all() {
        let spec = PatternSpec::builder(true)
            .with_prefix("ab")
            .unwrap()
            .with_suffix("yz")
            .unwrap()
            .build()
            .unwrap();
        assert!(spec.matches(b"ABcdeYZ"));
        assert!(!spec.matches(b"ABcdeYX"));
        assert!(!spec.matches(b"XBcdeYZ"));
    }

    #[test]
    fn test_prefix_or_suffix_any() {
        let spec = PatternSpec::builder(false)
            .with_prefix("ab")
            .unwrap()
            .with_suffix("ab")
            .unwrap()
            .with_join(Join::Any)
            .build()
            .unwrap();
        assert!(spec.matches(b"abxxxx"));
        assert!(spec.matches(b"xxxxab"));
        assert!(!spec.matches(b"xxabxx"));
    }

    #[test]
    fn test_any_with_one_side_requires_that_side() {
        let spec = PatternSpec::builder(false)
            .with_suffix("zz")
            .unwrap()
            .with_join(Join::Any)
            .build()
            .unwrap();
        assert!(spec.matches(b"abczz"));
        assert!(!spec.matches(b"zzabc"));
    }

    #[test]
    fn test_repeating_runs() {
        let spec = PatternSpec::builder(true)
            .with_repeat_prefix(3)
            .unwrap()
            .with_repeat_suffix(2)
            .unwrap()
            .build()
            .unwrap();
        assert!(spec.matches(b"aAaxyzQq"));
        assert!(!spec.matches(b"aAbxyzQq"));
        assert!(!spec.matches(b"aAaxyzQr"));

        let either = PatternSpec::builder(false)
            .with_repeat_prefix(3)
            .unwrap()
            .with_repeat_suffix(3)
            .unwrap()
            .with_join(Join::Any)
            .build()
            .unwrap();
        assert!(either.matches(b"kkkabc"));
        assert!(either.matches(b"abckkk"));
        assert!(!either.matches(b"kkabcc"));
    }

    #[test]
    fn test_class_is_always_required() {
        let spec = PatternSpec::builder(false)
            .with_prefix("AB")
            .unwrap()
            .with_class(CharClass::DigitsUpper)
            .with_join(Join::Any)
            .build()
            .unwrap();
        assert!(spec.matches(b"AB12CD"));
        assert!(!spec.matches(b"AB12Cd"));
        assert!(!spec.matches(b"XB12CD"));
    }

    #[test]
    fn test_class_only() {
        let spec = PatternSpec::builder(false)
            .with_class(CharClass::Lowercase)
            .build()
            .unwrap();
        assert!(spec.matches(b"abcdef"));
        assert!(!spec.matches(b"abcdeF"));
    }

    #[test]
    fn test_validation() {
        assert_eq!(
            PatternSpec::builder(false).with_prefix("S0l").unwrap_err(),
            PatternError::InvalidCharacter {
                field: "prefix",
                ch: '0'
            }
        );
        assert!(PatternSpec::builder(false).with_prefix("lol").is_err());
        assert!(PatternSpec::builder(true).with_prefix("lol").is_ok());
        assert!(PatternSpec::builder(true).with_suffix("O").is_ok());
        assert!(PatternSpec::builder(false).with_prefix("sölana").is_err());
        assert_eq!(
            PatternSpec::builder(false).with_suffix("").unwrap_err(),
            PatternError::EmptyText("suffix")
        );
        assert!(matches!(
            PatternSpec::builder(false).with_prefix(&"a".repeat(33)),
            Err(PatternError::TooLong { len: 33, .. })
        ));
        assert!(PatternSpec::builder(false).with_repeat_suffix(33).is_err());
        assert!(PatternSpec::builder(false).with_repeat_suffix(32).is_ok());
        assert_eq!(PatternSpec::builder(false).build(), Err(PatternError::Empty));
    }

    #[test]
    fn test_difficulty() {
        let spec = PatternSpec::builder(false).with_prefix("abc").unwrap().build().unwrap();
        assert!((spec.estimated_attempts() - 58f64.powi(3)).abs() < 1e-3);

        // 'a' has two case variants, '7' has one
        let folded = PatternSpec::builder(true).with_prefix("a7").unwrap().build().unwrap();
        assert!((folded.estimated_attempts() - 58.0 * 58.0 / 2.0).abs() < 1e-6);

        let run = PatternSpec::builder(false).with_repeat_prefix(3).unwrap().build().unwrap();
        assert!((run.estimated_attempts() - 58f64.powi(2)).abs() < 1e-6);

        assert_eq!(spec.difficulty_description(), "Easy (seconds)");
    }

    #[test]
    fn test_run_length_bounds() {
        for len in [0, 1] {
            assert_eq!(
                PatternSpec::builder(false).with_repeat_prefix(len).unwrap_err(),
                PatternError::TooShort {
                    field: "repeating prefix",
                    len,
                    min: MIN_RUN_LEN
                }
            );
            assert!(matches!(
                PatternSpec::builder(true).with_repeat_suffix(len),
                Err(PatternError::TooShort { .. })
            ));
        }
        let spec = PatternSpec::builder(false)
            .with_repeat_prefix(MIN_RUN_LEN)
            .unwrap()
            .build()
            .unwrap();
        assert!(spec.matches(b"11abc"));
        assert!(!spec.matches(b"1abc1"));
    }

    #[test]
    fn test_display() {
        let spec = PatternSpec::builder(true)
            .with_prefix("abc")
            .unwrap()
            .with_suffix("xyz")
            .unwrap()
            .with_join(Join::Any)
            .build()
            .unwrap();
        assert_eq!(
            spec.to_string(),
            "starting with 'abc' or ending with 'xyz' (case insensitive)"
        );
    }

    #[test]
    fn test_char_class_from_str() {
        assert_eq!("upper".parse::<CharClass>(), Ok(CharClass::Uppercase));
        assert_eq!("Lower-Digits".parse::<CharClass>(), Ok(CharClass::DigitsLower));
        assert!("hex".parse::<CharClass>().is_err());
    }
}
