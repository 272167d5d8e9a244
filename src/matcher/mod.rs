//! Pattern matching for base58 addresses.
//!
//! Supports:
//! - Prefix / suffix text, optionally case insensitive
//! - Character-class constraints over the whole address
//! - Repeating runs at the start and/or end
//! - Numbered shorthand modes

pub mod predicates;

mod mode;
mod pattern;

pub use mode::{Anchor, MatchMode};
pub use pattern::{
    CharClass, Join, PatternError, PatternSpec, PatternSpecBuilder, PatternText, MAX_PATTERN_LEN, MIN_RUN_LEN,
};
