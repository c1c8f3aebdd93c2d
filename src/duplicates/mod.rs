//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Size-based candidate selection (size stage)
//! - Full content hashing of candidates (hash stage)
//! - Digest grouping into confirmed duplicate groups (digest stage)

pub mod finder;
pub mod groups;

pub use finder::{
    compute_hashes, DuplicateFinder, FinderConfig, FinderError, HashConfig, ScanSummary,
};
pub use groups::{
    classify_by_hash, classify_by_size, DuplicateGroup, GroupingStats, HashStats, HashedRecord,
    SizeBucket,
};
