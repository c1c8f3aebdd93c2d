//! Directory walker implementation using jwalk.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for traversing a root path and
//! yielding a [`FileRecord`] for every regular file that passes the extension
//! allowlist. Children are sorted by name inside every directory, so the
//! output order is stable for a given filesystem snapshot.
//!
//! Failures on individual entries are yielded as [`ScanError`] values and the
//! walk carries on.
//!
//! # Symbolic links
//!
//! Links are skipped unless [`WalkerConfig::follow_symlinks`] is set. When
//! following, directory links are traversed and file links are recorded with
//! the size of their target.
//!
//! # Example
//!
//! ```no_run
//! use dupehunter::scanner::{ExtensionFilter, Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let config = WalkerConfig {
//!     extensions: ExtensionFilter::new(["jpg", "png"]),
//!     ..Default::default()
//! };
//!
//! let walker = Walker::new(Path::new("/home/user/Pictures"), config);
//! let files: Vec<_> = walker.walk().filter_map(Result::ok).collect();
//! println!("Found {} images", files.len());
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use jwalk::WalkDir;

use super::{FileRecord, ScanError, WalkerConfig};
use crate::progress::ProgressCallback;

/// Directory walker for file discovery.
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Walker configuration
    config: WalkerConfig,
    /// Optional progress reporting
    progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for Walker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Walker")
            .field("root", &self.root)
            .field("config", &self.config)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl Walker {
    /// Create a new walker for the given path.
    ///
    /// # Arguments
    ///
    /// * `path` - Root directory (or single file) to scan
    /// * `config` - Walker configuration options
    #[must_use]
    pub fn new(path: &Path, config: WalkerConfig) -> Self {
        Self {
            root: path.to_path_buf(),
            config,
            progress_callback: None,
        }
    }

    /// Report each discovered file to a progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Root path being walked.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the tree, yielding file records.
    ///
    /// Errors are yielded as [`ScanError`] values rather than stopping
    /// iteration. A root that cannot be stat'ed yields exactly one error.
    pub fn walk(&self) -> Box<dyn Iterator<Item = Result<FileRecord, ScanError>> + '_> {
        let root_metadata = if self.config.follow_symlinks {
            fs::metadata(&self.root)
        } else {
            fs::symlink_metadata(&self.root)
        };
        if let Err(e) = root_metadata {
            return Box::new(std::iter::once(Err(self.handle_io_error(&self.root, e))));
        }

        let walk_dir = WalkDir::new(&self.root)
            .follow_links(self.config.follow_symlinks)
            .skip_hidden(self.config.skip_hidden)
            .process_read_dir(|_depth, _path, _read_dir_state, children| {
                // Sort children for deterministic output
                children.sort_by(|a, b| match (a, b) {
                    (Ok(a), Ok(b)) => a.file_name().cmp(b.file_name()),
                    (Ok(_), Err(_)) => std::cmp::Ordering::Less,
                    (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
                    (Err(_), Err(_)) => std::cmp::Ordering::Equal,
                });
            });

        let mut discovered = 0usize;
        Box::new(
            walk_dir
                .into_iter()
                .filter_map(move |entry_result| match entry_result {
                    Ok(mut entry) => {
                        let file_type = entry.file_type();
                        if file_type.is_dir() {
                            // A directory whose listing failed carries the error itself
                            let error = entry.read_children_error.take()?;
                            return Some(Err(self.handle_jwalk_error(entry.path(), error)));
                        }

                        let path = entry.path();
                        if file_type.is_symlink() && !self.config.follow_symlinks {
                            log::trace!("Skipping symlink: {}", path.display());
                            return None;
                        }

                        if !self.config.extensions.matches(&path) {
                            log::trace!("Skipping by extension: {}", path.display());
                            return None;
                        }

                        let record = self.stat(path);
                        if let Ok(Some(ref file)) = record {
                            discovered += 1;
                            if let Some(ref callback) = self.progress_callback {
                                callback.on_progress(discovered, &file.path.to_string_lossy());
                            }
                        }
                        record.transpose()
                    }
                    Err(e) => {
                        let path = e
                            .path()
                            .map_or_else(|| self.root.clone(), std::borrow::ToOwned::to_owned);
                        Some(Err(self.handle_jwalk_error(path, e)))
                    }
                }),
        )
    }

    /// Read the size of a candidate entry. `Ok(None)` means "not a regular file".
    fn stat(&self, path: PathBuf) -> Result<Option<FileRecord>, ScanError> {
        let metadata = if self.config.follow_symlinks {
            fs::metadata(&path)
        } else {
            fs::symlink_metadata(&path)
        };

        match metadata {
            Ok(m) if m.is_file() => {
                log::debug!("Checking file size on: {}.. {}", path.display(), m.len());
                Ok(Some(FileRecord::new(path, m.len())))
            }
            Ok(_) => {
                log::trace!("Skipping special file: {}", path.display());
                Ok(None)
            }
            Err(e) => Err(self.handle_io_error(&path, e)),
        }
    }

    /// Handle I/O errors during file access.
    fn handle_io_error(&self, path: &Path, error: std::io::Error) -> ScanError {
        let err = ScanError::from_io(path, error);
        match err {
            ScanError::NotFound(_) => {
                log::debug!("File not found (may have been deleted): {}", path.display());
            }
            _ => log::warn!("Unable to get file size: {}", err),
        }
        err
    }

    /// Handle jwalk errors, keeping the underlying I/O error kind when there is one.
    fn handle_jwalk_error(&self, path: PathBuf, error: jwalk::Error) -> ScanError {
        let message = error.to_string();
        let err = match error.into_io_error() {
            Some(io_error) => ScanError::from_io(&path, io_error),
            None => ScanError::Io {
                path,
                source: std::io::Error::other(message.clone()),
            },
        };
        match err {
            ScanError::NotFound(ref p) => {
                log::debug!("Directory not found (may have been deleted): {}", p.display());
            }
            _ => log::warn!("Walker error for {}: {}", err.path().display(), message),
        }
        err
    }
}
