//! Scanner module for directory traversal and file hashing.
//!
//! This module provides functionality for:
//! - Deterministic directory walking using jwalk
//! - Extension allowlist filtering
//! - Content hashing with BLAKE3
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Directory traversal and file discovery
//! - [`filter`]: Extension allowlist handling
//! - [`hasher`]: BLAKE3 file hashing (streaming)
//!
//! # Example
//!
//! ```no_run
//! use dupehunter::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("."), WalkerConfig::default());
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(file) => println!("{}: {} bytes", file.path.display(), file.size),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

pub mod filter;
pub mod hasher;
pub mod walker;

use std::io;
use std::path::{Path, PathBuf};

// Re-export main types
pub use filter::ExtensionFilter;
pub use hasher::{hash_to_hex, Hash, Hasher};
pub use walker::Walker;

/// A discovered file and its size.
///
/// Created once per successfully stat-able regular file and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Path to the file as discovered under its root
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
}

impl FileRecord {
    /// Create a new FileRecord.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }
}

/// Configuration for directory walking.
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Follow symbolic links during traversal.
    /// When disabled, links are neither traversed nor recorded.
    pub follow_symlinks: bool,

    /// Skip hidden files and directories (names starting with `.`).
    pub skip_hidden: bool,

    /// Extension allowlist. Empty accepts every file.
    pub extensions: ExtensionFilter,
}

impl WalkerConfig {
    /// Create a new configuration.
    ///
    /// # Arguments
    ///
    /// * `follow_symlinks` - Whether to follow symbolic links
    /// * `skip_hidden` - Whether to skip hidden files
    /// * `extensions` - Extension allowlist
    #[must_use]
    pub fn new(follow_symlinks: bool, skip_hidden: bool, extensions: ExtensionFilter) -> Self {
        Self {
            follow_symlinks,
            skip_hidden,
            extensions,
        }
    }
}

/// Errors that can occur while enumerating files.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when accessing a file or directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The path vanished or never existed.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// An I/O error occurred while accessing a file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl ScanError {
    /// Classify an I/O error for `path`.
    #[must_use]
    pub fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }

    /// Path the error refers to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::PermissionDenied(p) | Self::NotFound(p) | Self::Io { path: p, .. } => p,
        }
    }
}

/// Errors that can occur during file hashing.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The specified file was not found.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl HashError {
    /// Classify an I/O error for `path`.
    #[must_use]
    pub fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }

    /// Path the error refers to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::PermissionDenied(p) | Self::NotFound(p) | Self::Io { path: p, .. } => p,
        }
    }
}
