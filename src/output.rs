//! Persists found keys.
//!
//! Each match produces two files named after the address:
//! - `key_<address>.json`: the 64 private key bytes as a JSON array, the
//!   keypair file format read by the Solana CLI
//! - `key_<address>.txt`: the same 64 bytes as base58 text

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;

use crate::crypto::{Address, Keypair};

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("Failed to create output directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("Failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("Failed to serialize keypair: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Writes keypair files into a directory, creating it on first use.
#[derive(Debug, Clone)]
pub struct KeyWriter {
    dir: PathBuf,
}

impl KeyWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes both files for one match and returns the JSON file path.
    pub fn write(&self, address: &Address, keypair: &Keypair) -> Result<PathBuf, OutputError> {
        fs::create_dir_all(&self.dir).map_err(|source| OutputError::CreateDir {
            path: self.dir.clone(),
            source,
        })?;

        let secret = keypair.secret_bytes();

        let json_path = self.dir.join(format!("key_{}.json", address));
        let json = serde_json::to_string(&secret.as_slice())?;
        write_file(&json_path, json.as_bytes())?;

        let txt_path = self.dir.join(format!("key_{}.txt", address));
        write_file(&txt_path, bs58::encode(secret).into_string().as_bytes())?;

        debug!("Wrote {} and {}", json_path.display(), txt_path.display());
        Ok(json_path)
    }
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), OutputError> {
    fs::write(path, contents).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })
}
