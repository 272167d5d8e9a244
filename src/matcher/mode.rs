//! Numbered match modes.
//!
//! Codes 0-17 are a compact shorthand for the most common patterns: a mode
//! plus a word (or a run length) expands into a full [`PatternSpec`].

use super::pattern::{CharClass, Join, PatternError, PatternSpec};

/// Where a word or repeating run has to appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    End,
    Either,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Codes 0-5
    Word { anchor: Anchor, ignore_case: bool },
    /// Codes 6-11
    Class(CharClass),
    /// Codes 12-17
    Repeat { anchor: Anchor, ignore_case: bool },
}

impl MatchMode {
    pub const MAX_CODE: u8 = 17;

    pub fn from_code(code: u8) -> Option<Self> {
        let anchor = |n: u8| match n {
            0 => Anchor::Start,
            1 => Anchor::End,
            _ => Anchor::Either,
        };

        let mode = match code {
            0..=5 => MatchMode::Word {
                anchor: anchor(code / 2),
                ignore_case: code % 2 == 1,
            },
            6 => MatchMode::Class(CharClass::Uppercase),
            7 => MatchMode::Class(CharClass::Lowercase),
            8 => MatchMode::Class(CharClass::Digits),
            9 => MatchMode::Class(CharClass::DigitsUpper),
            10 => MatchMode::Class(CharClass::DigitsLower),
            11 => MatchMode::Class(CharClass::Letters),
            12..=17 => MatchMode::Repeat {
                anchor: anchor((code - 12) / 2),
                ignore_case: code % 2 == 1,
            },
            _ => return None,
        };
        Some(mode)
    }

    /// Returns true if this mode needs `--word`.
    pub fn needs_word(self) -> bool {
        matches!(self, MatchMode::Word { .. })
    }

    /// Returns true if this mode needs `--length`.
    pub fn needs_length(self) -> bool {
        matches!(self, MatchMode::Repeat { .. })
    }

    /// Expands the mode into a spec. `word` is used by word modes, `length`
    /// by repeat modes; the other argument is ignored.
    pub fn to_spec(self, word: &str, length: usize) -> Result<PatternSpec, PatternError> {
        match self {
            MatchMode::Word {
                anchor,
                ignore_case,
            } => {
                let builder = PatternSpec::builder(ignore_case);
                let builder = match anchor {
                    Anchor::Start => builder.with_prefix(word)?,
                    Anchor::End => builder.with_suffix(word)?,
                    Anchor::Either => builder
                        .with_prefix(word)?
                        .with_suffix(word)?
                        .with_join(Join::Any),
                };
                builder.build()
            }
            MatchMode::Class(class) => PatternSpec::builder(false).with_class(class).build(),
            MatchMode::Repeat {
                anchor,
                ignore_case,
            } => {
                let builder = PatternSpec::builder(ignore_case);
                let builder = match anchor {
                    Anchor::Start => builder.with_repeat_prefix(length)?,
                    Anchor::End => builder.with_repeat_suffix(length)?,
                    Anchor::Either => builder
                        .with_repeat_prefix(length)?
                        .with_repeat_suffix(length)?
                        .with_join(Join::Any),
                };
                builder.build()
            }
        }
    }
}
