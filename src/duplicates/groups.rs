//! Size bucketing and digest grouping.
//!
//! # Overview
//!
//! The two classification stages of the detection pipeline live here:
//!
//! - [`classify_by_size`] keeps only files whose size collides with at least
//!   one other file. Files with a unique size cannot have a duplicate and are
//!   never hashed.
//! - [`classify_by_hash`] groups hashed candidates by digest and keeps digests
//!   shared by two or more files. A digest seen once is a size-stage false
//!   positive and is dropped.
//!
//! Both stages take the previous stage's full output and return a new
//! collection. Output order follows first appearance in the input, for sizes,
//! for digests, and for members within a group.
//!
//! # Example
//!
//! ```
//! use dupehunter::scanner::FileRecord;
//! use dupehunter::duplicates::classify_by_size;
//!
//! let files = vec![
//!     FileRecord::new("/file1.txt", 1024),
//!     FileRecord::new("/file2.txt", 1024),
//!     FileRecord::new("/file3.txt", 2048),
//! ];
//!
//! let (buckets, stats) = classify_by_size(files);
//!
//! assert_eq!(stats.total_files, 3);
//! assert_eq!(stats.candidates, 2);
//! assert_eq!(buckets.len(), 1);
//! ```

use std::collections::HashMap;
use std::path::PathBuf;

use crate::scanner::{hash_to_hex, FileRecord, Hash};

/// Files sharing one exact size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeBucket {
    /// File size in bytes (shared by all files in this bucket)
    pub size: u64,
    /// Files with this size, in encounter order
    pub files: Vec<FileRecord>,
}

impl SizeBucket {
    /// Number of files in this bucket.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if this bucket is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// A candidate whose content digest has been computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashedRecord {
    /// Path to the file
    pub path: PathBuf,
    /// File size in bytes at enumeration time
    pub size: u64,
    /// BLAKE3 digest of the full content
    pub digest: Hash,
}

/// Confirmed set of files with identical content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    /// BLAKE3 digest shared by every member
    pub digest: Hash,
    /// File size in bytes, shared by every member
    pub size: u64,
    /// Member paths in encounter order (always 2 or more)
    pub members: Vec<PathBuf>,
}

impl DuplicateGroup {
    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if this group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Digest as hexadecimal string.
    #[must_use]
    pub fn digest_hex(&self) -> String {
        hash_to_hex(&self.digest)
    }

    /// Total size of all files in this group.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.size * self.members.len() as u64
    }

    /// Space held by the copies beyond the first.
    #[must_use]
    pub fn wasted_space(&self) -> u64 {
        self.size * self.duplicate_count() as u64
    }

    /// Number of duplicate copies (total - 1 original).
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.members.len().saturating_sub(1)
    }
}

/// Statistics from the size stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupingStats {
    /// Total number of records processed
    pub total_files: usize,
    /// Number of distinct sizes
    pub unique_sizes: usize,
    /// Number of records in buckets of 2+ (eligible for hashing)
    pub candidates: usize,
    /// Number of records eliminated because their size is unique
    pub eliminated_unique: usize,
    /// Number of buckets with 2+ records
    pub buckets: usize,
}

impl GroupingStats {
    /// Percentage of files eliminated by size grouping.
    #[must_use]
    pub fn elimination_rate(&self) -> f64 {
        if self.total_files == 0 {
            0.0
        } else {
            (self.eliminated_unique as f64 / self.total_files as f64) * 100.0
        }
    }
}

/// Statistics from the digest stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HashStats {
    /// Number of hashed records processed
    pub hashed_files: usize,
    /// Number of digests seen exactly once (size-stage false positives)
    pub unique_digests: usize,
    /// Number of confirmed duplicate groups
    pub duplicate_groups: usize,
    /// Number of copies beyond the first across all groups
    pub duplicate_files: usize,
    /// Bytes held by those copies
    pub wasted_space: u64,
}

/// Group records by size (SizeClassifier).
///
/// Returns buckets containing 2+ records, ordered by first appearance of
/// each size, with records kept in input order.
///
/// # Performance
///
/// - Time complexity: O(n)
/// - Space complexity: O(n)
/// - No file I/O is performed
#[must_use]
pub fn classify_by_size<I>(files: I) -> (Vec<SizeBucket>, GroupingStats)
where
    I: IntoIterator<Item = FileRecord>,
{
    let mut index: HashMap<u64, usize> = HashMap::new();
    let mut buckets: Vec<SizeBucket> = Vec::new();

    for file in files {
        let slot = *index.entry(file.size).or_insert_with(|| {
            buckets.push(SizeBucket {
                size: file.size,
                files: Vec::new(),
            });
            buckets.len() - 1
        });
        buckets[slot].files.push(file);
    }

    let total_files = buckets.iter().map(SizeBucket::len).sum();
    let unique_sizes = buckets.len();
    buckets.retain(|bucket| bucket.len() > 1);

    let candidates: usize = buckets.iter().map(SizeBucket::len).sum();
    let stats = GroupingStats {
        total_files,
        unique_sizes,
        candidates,
        eliminated_unique: total_files - candidates,
        buckets: buckets.len(),
    };

    log::debug!(
        "Size stage: {} files, {} candidates in {} buckets ({:.1}% eliminated)",
        stats.total_files,
        stats.candidates,
        stats.buckets,
        stats.elimination_rate()
    );

    (buckets, stats)
}

/// Group hashed records by digest (HashClassifier).
///
/// Returns one [`DuplicateGroup`] per digest shared by 2+ records, ordered by
/// first appearance of each digest, with members in input order.
#[must_use]
pub fn classify_by_hash<I>(records: I) -> (Vec<DuplicateGroup>, HashStats)
where
    I: IntoIterator<Item = HashedRecord>,
{
    let mut index: HashMap<Hash, usize> = HashMap::new();
    let mut groups: Vec<DuplicateGroup> = Vec::new();
    let mut hashed_files = 0usize;

    for record in records {
        hashed_files += 1;
        let slot = *index.entry(record.digest).or_insert_with(|| {
            groups.push(DuplicateGroup {
                digest: record.digest,
                size: record.size,
                members: Vec::new(),
            });
            groups.len() - 1
        });
        debug_assert_eq!(
            groups[slot].size, record.size,
            "digest {} shared by files of different sizes",
            hash_to_hex(&record.digest)
        );
        groups[slot].members.push(record.path);
    }

    let distinct = groups.len();
    groups.retain(|group| group.len() > 1);

    let stats = HashStats {
        hashed_files,
        unique_digests: distinct - groups.len(),
        duplicate_groups: groups.len(),
        duplicate_files: groups.iter().map(DuplicateGroup::duplicate_count).sum(),
        wasted_space: groups.iter().map(DuplicateGroup::wasted_space).sum(),
    };

    for group in &groups {
        log::debug!(
            "Duplicate group {}: {} files, {} bytes each",
            group.digest_hex(),
            group.len(),
            group.size
        );
    }

    (groups, stats)
}
