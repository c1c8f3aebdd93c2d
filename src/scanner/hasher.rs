//! BLAKE3 file hasher with streaming support.
//!
//! # Overview
//! This module provides the [`Hasher`] struct for computing BLAKE3 digests
//! of whole file contents. Files are read through a fixed-size buffer, so
//! memory use does not grow with file size. Each call opens, reads to EOF
//! and closes the file; no handle outlives the call.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use super::HashError;

/// 256-bit BLAKE3 digest.
pub type Hash = [u8; 32];

/// Default read buffer size (64 KiB).
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Render a digest as lowercase hex.
#[must_use]
pub fn hash_to_hex(hash: &Hash) -> String {
    blake3::Hash::from(*hash).to_hex().to_string()
}

/// Streaming content hasher.
#[derive(Debug, Clone)]
pub struct Hasher {
    buffer_size: usize,
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher {
    /// Create a hasher with the default buffer size.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    /// Use a custom read buffer size (minimum 1 byte).
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size.max(1);
        self
    }

    /// Hash the entire content of the file at `path`.
    ///
    /// # Errors
    ///
    /// - `PermissionDenied` if the file cannot be opened or read
    /// - `NotFound` if the file disappeared since it was enumerated
    /// - `Io` for any other read failure
    pub fn full_hash(&self, path: &Path) -> Result<Hash, HashError> {
        let mut file = File::open(path).map_err(|e| HashError::from_io(path, e))?;
        self.hash_reader(&mut file)
            .map_err(|e| HashError::from_io(path, e))
    }

    /// Hash everything readable from `reader`.
    ///
    /// # Errors
    ///
    /// Returns the first non-interrupt I/O error from the reader.
    pub fn hash_reader<R: Read>(&self, reader: &mut R) -> io::Result<Hash> {
        let mut hasher = blake3::Hasher::new();
        let mut buffer = vec![0u8; self.buffer_size];
        loop {
            match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => {
                    hasher.update(&buffer[..n]);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(*hasher.finalize().as_bytes())
    }
}
