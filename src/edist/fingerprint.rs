//! Content fingerprints for change detection.
//!
//! A fingerprint only answers "did the bytes change?" between two reads of
//! the same file. It is not used for anything security related.

use crate::error::{EdistError, Result};
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    pub fn of_bytes(bytes: &[u8]) -> Self {
        Self(Sha256::digest(bytes).into())
    }

    pub fn of_file(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|source| EdistError::ReadResource {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::of_bytes(&bytes))
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Short form is enough for logs
        for byte in &self.0[..6] {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}
