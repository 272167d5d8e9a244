//! Runtime configuration for the vanity address grinder.

use std::path::PathBuf;

use clap::Parser;

use crate::crypto::KEY_LEN;
use crate::matcher::{CharClass, Join, MatchMode, PatternError, PatternSpec};
use crate::worker::SeedSource;

/// Solana Vanity Address Grinder
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Prefix the address must start with (base58 characters)
    #[arg(short, long, conflicts_with = "mode")]
    pub prefix: Option<String>,

    /// Suffix the address must end with (base58 characters)
    #[arg(short, long, conflicts_with = "mode")]
    pub suffix: Option<String>,

    /// Accept a match on either end instead of requiring both
    #[arg(long, conflicts_with = "mode")]
    pub any: bool,

    /// Case insensitive prefix/suffix matching
    #[arg(short, long, conflicts_with = "mode")]
    pub ignore_case: bool,

    /// Character class for the whole address: upper, lower, digits,
    /// upper-digits, lower-digits or letters
    #[arg(short, long, conflicts_with = "mode")]
    pub class: Option<CharClass>,

    /// Number of identical characters the address must start with
    #[arg(long, conflicts_with = "mode")]
    pub repeat_prefix: Option<usize>,

    /// Number of identical characters the address must end with
    #[arg(long, conflicts_with = "mode")]
    pub repeat_suffix: Option<usize>,

    /// Numbered match mode (0-17), used together with --word or --length
    #[arg(short, long)]
    pub mode: Option<u8>,

    /// Word for match modes 0-5
    #[arg(long, requires = "mode")]
    pub word: Option<String>,

    /// Run length for match modes 12-17
    #[arg(short, long, requires = "mode")]
    pub length: Option<usize>,

    /// Stop after finding N addresses (0 = run forever)
    #[arg(short = 'n', long, default_value = "1")]
    pub count: usize,

    /// Directory that receives the key files
    #[arg(short, long, default_value = "./keys")]
    pub output_dir: PathBuf,

    /// Number of lane threads (default: number of CPU cores)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Candidates per batch (power of two)
    #[arg(short, long, default_value = "65536")]
    pub batch_size: u64,

    /// Progress report interval in seconds
    #[arg(short, long, default_value = "5")]
    pub report_interval: u64,

    /// Hex-encoded 32-byte starting seed; makes the search reproducible
    #[arg(long)]
    pub seed: Option<String>,
}

impl Config {
    /// Returns the number of workers, defaulting to CPU count
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(num_cpus::get)
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.pattern_spec()?;
        self.seed_source()?;

        if self.workers == Some(0) {
            return Err(ConfigError::InvalidWorkers);
        }

        if !self.batch_size.is_power_of_two() {
            return Err(ConfigError::InvalidBatchSize(self.batch_size));
        }

        if self.report_interval == 0 {
            return Err(ConfigError::InvalidReportInterval);
        }

        Ok(())
    }

    /// Builds the pattern from either the numbered mode or the explicit flags.
    pub fn pattern_spec(&self) -> Result<PatternSpec, ConfigError> {
        if let Some(code) = self.mode {
            let mode = MatchMode::from_code(code).ok_or(ConfigError::InvalidMode(code))?;
            if mode.needs_word() && self.word.is_none() {
                return Err(ConfigError::MissingWord(code));
            }
            if mode.needs_length() && self.length.is_none() {
                return Err(ConfigError::MissingLength(code));
            }
            let word = self.word.as_deref().unwrap_or_default();
            return Ok(mode.to_spec(word, self.length.unwrap_or_default())?);
        }

        let mut builder = PatternSpec::builder(self.ignore_case);
        if let Some(prefix) = &self.prefix {
            builder = builder.with_prefix(prefix)?;
        }
        if let Some(suffix) = &self.suffix {
            builder = builder.with_suffix(suffix)?;
        }
        if let Some(len) = self.repeat_prefix {
            builder = builder.with_repeat_prefix(len)?;
        }
        if let Some(len) = self.repeat_suffix {
            builder = builder.with_repeat_suffix(len)?;
        }
        if let Some(class) = self.class {
            builder = builder.with_class(class);
        }
        if self.any {
            builder = builder.with_join(Join::Any);
        }

        Ok(builder.build()?)
    }

    /// Returns where batch base seeds come from.
    pub fn seed_source(&self) -> Result<SeedSource, ConfigError> {
        let Some(seed) = &self.seed else {
            return Ok(SeedSource::Random);
        };

        let bytes = hex::decode(seed).map_err(|_| ConfigError::InvalidSeed)?;
        let start: [u8; KEY_LEN] = bytes.try_into().map_err(|_| ConfigError::InvalidSeed)?;
        Ok(SeedSource::sequential(start))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] PatternError),

    #[error("Invalid --mode {0}, must be between 0 and 17")]
    InvalidMode(u8),

    #[error("Match mode {0} needs --word")]
    MissingWord(u8),

    #[error("Match mode {0} needs --length")]
    MissingLength(u8),

    #[error("Invalid --workers, must be at least 1")]
    InvalidWorkers,

    #[error("Invalid --batch-size {0}, must be a power of 2")]
    InvalidBatchSize(u64),

    #[error("Invalid --report-interval, must be at least 1 second")]
    InvalidReportInterval,

    #[error("Invalid --seed, expected 64 hex characters")]
    InvalidSeed,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        Config::try_parse_from(std::iter::once("sol_vanity").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_valid_prefix() {
        let config = parse(&["-p", "So1"]);
        assert!(config.validate().is_ok());
        assert_eq!(config.count, 1);
        assert_eq!(config.batch_size, 65536);
    }

    #[test]
    fn test_invalid_pattern() {
        let config = parse(&["-p", "S0l"]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPattern(PatternError::InvalidCharacter { ch: '0', .. }))
        ));
    }

    #[test]
    fn test_no_constraints() {
        let config = parse(&[]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPattern(PatternError::Empty))
        ));
    }

    #[test]
    fn test_combined_flags() {
        let config = parse(&["-p", "ab", "-s", "yz", "--any", "-i", "-c", "letters"]);
        let spec = config.pattern_spec().unwrap();
        assert_eq!(spec.join(), Join::Any);
        assert!(spec.ignore_case());
        assert_eq!(spec.class(), Some(CharClass::Letters));
        assert!(spec.matches(b"ABcdefgh"));
    }

    #[test]
    fn test_short_runs_rejected() {
        let cases: [&[&str]; 3] = [
            &["--repeat-prefix", "1"],
            &["--repeat-suffix", "0"],
            &["-m", "12", "-l", "1"],
        ];
        for args in cases {
            assert!(matches!(
                parse(args).pattern_spec(),
                Err(ConfigError::InvalidPattern(PatternError::TooShort { .. }))
            ));
        }
    }

    #[test]
    fn test_mode_route() {
        let config = parse(&["-m", "13", "-l", "4"]);
        let spec = config.pattern_spec().unwrap();
        assert_eq!(spec.repeat_prefix(), 4);
        assert!(spec.ignore_case());

        assert!(matches!(
            parse(&["-m", "0"]).validate(),
            Err(ConfigError::MissingWord(0))
        ));
        assert!(matches!(
            parse(&["-m", "14"]).validate(),
            Err(ConfigError::MissingLength(14))
        ));
        assert!(matches!(
            parse(&["-m", "18"]).validate(),
            Err(ConfigError::InvalidMode(18))
        ));
    }

    #[test]
    fn test_mode_conflicts_with_explicit_flags() {
        let args = ["sol_vanity", "-m", "0", "--word", "ab", "-p", "cd"];
        assert!(Config::try_parse_from(args).is_err());
    }

    #[test]
    fn test_batch_size_must_be_power_of_two() {
        let config = parse(&["-p", "a", "-b", "1000"]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBatchSize(1000))
        ));
    }

    #[test]
    fn test_seed() {
        let hex_seed = "00".repeat(31) + "2a";
        let config = parse(&["-p", "a", "--seed", &hex_seed]);
        match config.seed_source().unwrap() {
            SeedSource::Sequential { next } => assert_eq!(next[31], 0x2a),
            SeedSource::Random => panic!("expected sequential seeds"),
        }

        let config = parse(&["-p", "a", "--seed", "abcd"]);
        assert!(matches!(config.validate(), Err(ConfigError::InvalidSeed)));

        assert!(matches!(parse(&["-p", "a"]).seed_source(), Ok(SeedSource::Random)));
    }
}
