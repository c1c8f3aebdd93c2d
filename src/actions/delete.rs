//! Single-file deletion.
//!
//! # Overview
//!
//! This module deletes exactly one file at a time, either permanently or by
//! moving it to the system trash. [`delete_verified`] re-checks the file's
//! size against the value recorded during the scan before touching it, so a
//! file that changed after hashing is never removed on stale evidence.
//!
//! # Example
//!
//! ```no_run
//! use dupehunter::actions::delete::{delete_verified, DeleteMethod};
//! use std::path::Path;
//!
//! match delete_verified(Path::new("/path/to/copy.txt"), 1024, DeleteMethod::Remove) {
//!     Ok(result) => println!("Deleted: {}", result.path.display()),
//!     Err(e) => eprintln!("Failed: {}", e),
//! }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for deletion operations.
#[derive(Debug, Error)]
pub enum DeleteError {
    /// File was not found (may have been deleted or moved).
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// Permission denied when attempting to delete.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// File size differs from the scanned size.
    #[error("file modified since scan: {path} (expected {expected} bytes, found {actual})")]
    Modified {
        path: PathBuf,
        expected: u64,
        actual: u64,
    },

    /// Trash operation failed.
    #[error("trash operation failed for {path}: {message}")]
    TrashFailed { path: PathBuf, message: String },

    /// General I/O error.
    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DeleteError {
    /// Get the path associated with this error.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(p)
            | Self::PermissionDenied(p)
            | Self::Modified { path: p, .. }
            | Self::TrashFailed { path: p, .. }
            | Self::Io { path: p, .. } => p,
        }
    }

    fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }
}

/// How a selected file is removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeleteMethod {
    /// Unlink the file permanently.
    #[default]
    Remove,
    /// Move the file to the system trash.
    Trash,
}

/// Result of a successful deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteResult {
    /// Path that was deleted.
    pub path: PathBuf,
    /// Size of the deleted file in bytes.
    pub size: u64,
    /// How the file was removed.
    pub method: DeleteMethod,
}

/// Size the scan would have recorded for `path`.
///
/// A followed link is recorded with its target's size, so a link is measured
/// through to the target. Removal still unlinks the link itself.
fn current_size(path: &Path) -> Result<u64, DeleteError> {
    let metadata = fs::symlink_metadata(path).map_err(|e| DeleteError::from_io(path, e))?;
    if !metadata.file_type().is_symlink() {
        return Ok(metadata.len());
    }
    fs::metadata(path)
        .map(|m| m.len())
        .map_err(|e| DeleteError::from_io(path, e))
}

/// Permanently delete a single file.
///
/// # Errors
///
/// - `NotFound` if the file doesn't exist
/// - `PermissionDenied` if deletion is not allowed
/// - `Io` for any other failure
pub fn permanent_delete(path: &Path) -> Result<DeleteResult, DeleteError> {
    let size = current_size(path)?;

    fs::remove_file(path).map_err(|e| {
        log::error!("Permanent delete failed for {}: {}", path.display(), e);
        DeleteError::from_io(path, e)
    })?;

    log::debug!("Permanently deleted: {} ({} bytes)", path.display(), size);
    Ok(DeleteResult {
        path: path.to_path_buf(),
        size,
        method: DeleteMethod::Remove,
    })
}

/// Move a single file to the system trash.
///
/// # Errors
///
/// - `NotFound` if the file doesn't exist
/// - `TrashFailed` if the trash operation fails
pub fn delete_to_trash(path: &Path) -> Result<DeleteResult, DeleteError> {
    let size = current_size(path)?;

    trash::delete(path).map_err(|e| {
        log::error!("Trash operation failed for {}: {}", path.display(), e);
        DeleteError::TrashFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    })?;

    log::debug!("Moved to trash: {} ({} bytes)", path.display(), size);
    Ok(DeleteResult {
        path: path.to_path_buf(),
        size,
        method: DeleteMethod::Trash,
    })
}

/// Delete a single file after checking it still has the scanned size.
///
/// # Errors
///
/// - `Modified` if the current size differs from `expected_size`
/// - Other errors from [`permanent_delete`] or [`delete_to_trash`]
pub fn delete_verified(
    path: &Path,
    expected_size: u64,
    method: DeleteMethod,
) -> Result<DeleteResult, DeleteError> {
    let actual = current_size(path)?;
    if actual != expected_size {
        log::warn!(
            "File modified since scan: {} (size changed from {} to {})",
            path.display(),
            expected_size,
            actual
        );
        return Err(DeleteError::Modified {
            path: path.to_path_buf(),
            expected: expected_size,
            actual,
        });
    }

    match method {
        DeleteMethod::Remove => permanent_delete(path),
        DeleteMethod::Trash => delete_to_trash(path),
    }
}
