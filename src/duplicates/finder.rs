//! Duplicate finder implementation.
//!
//! # Overview
//!
//! This module orchestrates the detection pipeline:
//! 1. **Walk**: enumerate `(path, size)` records under every root
//! 2. **Size stage**: keep only records whose size collides ([`classify_by_size`])
//! 3. **Hash stage**: hash every candidate's full content ([`compute_hashes`])
//! 4. **Digest stage**: keep digests shared by 2+ files ([`classify_by_hash`])
//!
//! Every stage drains its input completely before the next one starts.
//! Per-file failures are logged here, collected into [`ScanSummary`], and the
//! file is dropped from the rest of the run.
//!
//! # Example
//!
//! ```no_run
//! use dupehunter::duplicates::{classify_by_size, compute_hashes, HashConfig};
//! use dupehunter::scanner::{Hasher, Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("."), WalkerConfig::default());
//! let files: Vec<_> = walker.walk().filter_map(Result::ok).collect();
//! let (buckets, _) = classify_by_size(files);
//!
//! let (hashed, errors) = compute_hashes(&buckets, &Hasher::new(), &HashConfig::default());
//! println!("{} hashed, {} failed", hashed.len(), errors.len());
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;

use super::groups::{classify_by_hash, classify_by_size, DuplicateGroup, HashedRecord, SizeBucket};
use crate::progress::{ProgressCallback, PHASE_HASHING, PHASE_WALKING};
use crate::scanner::{FileRecord, HashError, Hasher, ScanError, Walker, WalkerConfig};

/// Configuration for the hash stage.
#[derive(Clone)]
pub struct HashConfig {
    /// Number of I/O threads for parallel hashing.
    /// Default is 4 to prevent disk thrashing.
    pub io_threads: usize,
    /// Optional progress callback.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for HashConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashConfig")
            .field("io_threads", &self.io_threads)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            io_threads: 4,
            progress_callback: None,
        }
    }
}

impl HashConfig {
    /// Set the I/O thread count (minimum 1).
    #[must_use]
    pub fn with_io_threads(mut self, threads: usize) -> Self {
        self.io_threads = threads.max(1);
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }
}

/// Hash every candidate in `buckets` (HashComputer).
///
/// Candidates are hashed on a bounded rayon pool; results come back in
/// candidate order regardless of scheduling. Files that cannot be read are
/// returned as errors and produce no [`HashedRecord`].
#[must_use]
pub fn compute_hashes(
    buckets: &[SizeBucket],
    hasher: &Hasher,
    config: &HashConfig,
) -> (Vec<HashedRecord>, Vec<HashError>) {
    let candidates: Vec<&FileRecord> = buckets.iter().flat_map(|b| b.files.iter()).collect();
    if candidates.is_empty() {
        log::debug!("Hash stage: no candidates");
        return (Vec::new(), Vec::new());
    }

    log::info!("Computing content hashes for {} files", candidates.len());
    if let Some(ref callback) = config.progress_callback {
        callback.on_phase_start(PHASE_HASHING, candidates.len());
    }

    let hash_one = |(idx, record): (usize, &&FileRecord)| {
        if let Some(ref callback) = config.progress_callback {
            callback.on_progress(idx + 1, record.path.to_string_lossy().as_ref());
        }
        hasher
            .full_hash(&record.path)
            .map(|digest| HashedRecord {
                path: record.path.clone(),
                size: record.size,
                digest,
            })
    };

    let results: Vec<Result<HashedRecord, HashError>> = match rayon::ThreadPoolBuilder::new()
        .num_threads(config.io_threads.max(1))
        .build()
    {
        Ok(pool) => pool.install(|| candidates.par_iter().enumerate().map(hash_one).collect()),
        Err(e) => {
            log::warn!("Failed to create hashing thread pool, hashing sequentially: {}", e);
            candidates.iter().enumerate().map(hash_one).collect()
        }
    };

    if let Some(ref callback) = config.progress_callback {
        callback.on_phase_end(PHASE_HASHING);
    }

    let mut hashed = Vec::with_capacity(results.len());
    let mut errors = Vec::new();
    for result in results {
        match result {
            Ok(record) => {
                log::trace!(
                    "Getting file hash for: {}.. {}",
                    record.path.display(),
                    crate::scanner::hash_to_hex(&record.digest)
                );
                hashed.push(record);
            }
            Err(e) => {
                match e {
                    HashError::PermissionDenied(_) => log::log!(
                        hash_error_level(&e),
                        "Could not open file, permissions error: {}",
                        e.path().display()
                    ),
                    HashError::NotFound(_) => log::log!(
                        hash_error_level(&e),
                        "File not found (may have been deleted): {}",
                        e.path().display()
                    ),
                    HashError::Io { .. } => log::log!(
                        hash_error_level(&e),
                        "Failed to hash {}: {}",
                        e.path().display(),
                        e
                    ),
                }
                errors.push(e);
            }
        }
    }

    (hashed, errors)
}

/// Log level for a candidate that could not be hashed.
///
/// A file that vanished between the walk and the hash stage is an expected
/// race and only shows up at debug level.
fn hash_error_level(error: &HashError) -> log::Level {
    match error {
        HashError::NotFound(_) => log::Level::Debug,
        HashError::PermissionDenied(_) | HashError::Io { .. } => log::Level::Warn,
    }
}

/// Configuration for the duplicate finder.
#[derive(Clone, Default)]
pub struct FinderConfig {
    /// Walker configuration (symlinks, hidden files, extensions).
    pub walker_config: WalkerConfig,
    /// Hash stage configuration.
    pub hash_config: HashConfig,
}

impl std::fmt::Debug for FinderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinderConfig")
            .field("walker_config", &self.walker_config)
            .field("hash_config", &self.hash_config)
            .finish()
    }
}

impl FinderConfig {
    /// Set the walker configuration.
    #[must_use]
    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker_config = config;
        self
    }

    /// Set the I/O thread count for hashing.
    #[must_use]
    pub fn with_io_threads(mut self, threads: usize) -> Self {
        self.hash_config = self.hash_config.with_io_threads(threads);
        self
    }

    /// Set the progress callback for walking and hashing.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.hash_config = self.hash_config.with_progress_callback(callback);
        self
    }
}

/// Summary of a detection run.
#[derive(Debug, Default)]
pub struct ScanSummary {
    /// Number of files enumerated
    pub total_files: usize,
    /// Total size of enumerated files in bytes
    pub total_size: u64,
    /// Number of files whose size collided (hashed)
    pub candidates: usize,
    /// Number of candidates hashed successfully
    pub hashed_files: usize,
    /// Number of confirmed duplicate groups
    pub duplicate_groups: usize,
    /// Number of copies beyond the first across all groups
    pub duplicate_files: usize,
    /// Bytes held by those copies
    pub reclaimable_space: u64,
    /// Wall-clock duration of the run
    pub scan_duration: Duration,
    /// Enumeration failures
    pub scan_errors: Vec<ScanError>,
    /// Hash failures
    pub hash_errors: Vec<HashError>,
}

impl ScanSummary {
    /// Total number of per-file errors encountered.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.scan_errors.len() + self.hash_errors.len()
    }

    /// Reclaimable space as a human-readable string.
    #[must_use]
    pub fn reclaimable_display(&self) -> String {
        bytesize::ByteSize::b(self.reclaimable_space).to_string()
    }
}

/// Errors that abort a detection run.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// No root paths were supplied.
    #[error("no paths to scan")]
    NoPaths,
}

/// Duplicate finder that runs the complete detection pipeline.
///
/// # Example
///
/// ```no_run
/// use dupehunter::duplicates::{DuplicateFinder, FinderConfig};
/// use std::path::PathBuf;
///
/// let finder = DuplicateFinder::new(FinderConfig::default().with_io_threads(4));
/// let (groups, summary) = finder.find_duplicates_in_paths(&[PathBuf::from(".")]).unwrap();
///
/// println!("Found {} duplicate groups", groups.len());
/// println!("Reclaimable space: {}", summary.reclaimable_display());
/// ```
pub struct DuplicateFinder {
    config: FinderConfig,
    hasher: Hasher,
}

impl DuplicateFinder {
    /// Create a new duplicate finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        Self {
            config,
            hasher: Hasher::new(),
        }
    }

    /// Create a new duplicate finder with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FinderConfig::default())
    }

    /// Find duplicates under a single root.
    ///
    /// # Errors
    ///
    /// Never fails for a single root; the `Result` mirrors
    /// [`find_duplicates_in_paths`](Self::find_duplicates_in_paths).
    pub fn find_duplicates(
        &self,
        path: &Path,
    ) -> Result<(Vec<DuplicateGroup>, ScanSummary), FinderError> {
        self.find_duplicates_in_paths(&[path.to_path_buf()])
    }

    /// Find duplicates across every root in `paths`.
    ///
    /// Roots are walked in order. A physical file reachable from more than one
    /// root, or through a followed link, is recorded once.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::NoPaths`] if `paths` is empty. Unreadable roots
    /// and files are reported in the summary instead.
    pub fn find_duplicates_in_paths(
        &self,
        paths: &[PathBuf],
    ) -> Result<(Vec<DuplicateGroup>, ScanSummary), FinderError> {
        if paths.is_empty() {
            return Err(FinderError::NoPaths);
        }

        let start_time = Instant::now();
        let progress = self.config.hash_config.progress_callback.clone();

        if let Some(ref callback) = progress {
            callback.on_phase_start(PHASE_WALKING, 0);
        }

        let mut records = Vec::new();
        let mut scan_errors = Vec::new();
        let mut seen: HashSet<PathBuf> = HashSet::new();

        for root in paths {
            log::info!("Scanning {}", root.display());
            let mut walker = Walker::new(root, self.config.walker_config.clone());
            if let Some(ref callback) = progress {
                walker = walker.with_progress_callback(Arc::clone(callback));
            }

            for result in walker.walk() {
                match result {
                    Ok(record) => {
                        let key = record
                            .path
                            .canonicalize()
                            .unwrap_or_else(|_| record.path.clone());
                        if seen.insert(key) {
                            records.push(record);
                        } else {
                            log::debug!("Already recorded: {}", record.path.display());
                        }
                    }
                    Err(e) => scan_errors.push(e),
                }
            }
        }

        if let Some(ref callback) = progress {
            callback.on_phase_end(PHASE_WALKING);
        }

        let (groups, mut summary) = self.find_duplicates_from_records(records);
        summary.scan_errors = scan_errors;
        summary.scan_duration = start_time.elapsed();

        Ok((groups, summary))
    }

    /// Run the size, hash and digest stages over already-enumerated records.
    #[must_use]
    pub fn find_duplicates_from_records(
        &self,
        records: Vec<FileRecord>,
    ) -> (Vec<DuplicateGroup>, ScanSummary) {
        let start_time = Instant::now();
        let total_size = records.iter().map(|r| r.size).sum();

        log::info!(
            "Looking for duplicate file sizes in {} items..",
            records.len()
        );
        let (buckets, size_stats) = classify_by_size(records);
        if size_stats.candidates > 0 {
            log::info!(
                "Found {} files with identical file sizes",
                size_stats.candidates
            );
        }

        let (hashed, hash_errors) =
            compute_hashes(&buckets, &self.hasher, &self.config.hash_config);
        drop(buckets);

        log::info!("Looking for duplicate file hashes in {} items..", hashed.len());
        let (groups, hash_stats) = classify_by_hash(hashed);

        let summary = ScanSummary {
            total_files: size_stats.total_files,
            total_size,
            candidates: size_stats.candidates,
            hashed_files: hash_stats.hashed_files,
            duplicate_groups: hash_stats.duplicate_groups,
            duplicate_files: hash_stats.duplicate_files,
            reclaimable_space: hash_stats.wasted_space,
            scan_duration: start_time.elapsed(),
            scan_errors: Vec::new(),
            hash_errors,
        };

        log::info!(
            "Detection complete: {} groups, {} duplicates, {} reclaimable",
            summary.duplicate_groups,
            summary.duplicate_files,
            summary.reclaimable_display()
        );

        (groups, summary)
    }
}
