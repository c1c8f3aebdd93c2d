//! JSON output formatter for duplicate scan results.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "summary": {
//!     "total_files": 100,
//!     "total_size": 1048576,
//!     "candidates": 12,
//!     "hashed_files": 12,
//!     "duplicate_groups": 2,
//!     "duplicate_files": 3,
//!     "reclaimable_space": 51200,
//!     "errors": 0,
//!     "scan_duration_ms": 1234
//!   },
//!   "groups": [
//!     {
//!       "digest": "abc123...",
//!       "size": 1024,
//!       "members": ["/path/to/file1.txt", "/path/to/file2.txt"]
//!     }
//!   ]
//! }
//! ```

use std::io::Write;

use serde::Serialize;

use crate::duplicates::{DuplicateGroup, ScanSummary};

/// A single duplicate group in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonGroup {
    /// BLAKE3 digest as hexadecimal string (64 characters)
    pub digest: String,
    /// File size in bytes
    pub size: u64,
    /// Member paths in encounter order
    pub members: Vec<String>,
}

impl From<&DuplicateGroup> for JsonGroup {
    fn from(group: &DuplicateGroup) -> Self {
        Self {
            digest: group.digest_hex(),
            size: group.size,
            members: group
                .members
                .iter()
                .map(|p| p.to_string_lossy().into_owned())
                .collect(),
        }
    }
}

/// Summary statistics in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    pub total_files: usize,
    pub total_size: u64,
    pub candidates: usize,
    pub hashed_files: usize,
    pub duplicate_groups: usize,
    pub duplicate_files: usize,
    pub reclaimable_space: u64,
    /// Files that could not be enumerated or hashed
    pub errors: usize,
    pub scan_duration_ms: u64,
}

impl From<&ScanSummary> for JsonSummary {
    fn from(summary: &ScanSummary) -> Self {
        Self {
            total_files: summary.total_files,
            total_size: summary.total_size,
            candidates: summary.candidates,
            hashed_files: summary.hashed_files,
            duplicate_groups: summary.duplicate_groups,
            duplicate_files: summary.duplicate_files,
            reclaimable_space: summary.reclaimable_space,
            errors: summary.error_count(),
            scan_duration_ms: summary.scan_duration.as_millis() as u64,
        }
    }
}

/// Complete JSON report.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    pub summary: JsonSummary,
    pub groups: Vec<JsonGroup>,
}

impl JsonOutput {
    /// Build the report from detection results.
    ///
    /// # Example
    ///
    /// ```
    /// use dupehunter::duplicates::{DuplicateGroup, ScanSummary};
    /// use dupehunter::output::json::JsonOutput;
    /// use std::path::PathBuf;
    ///
    /// let groups = vec![DuplicateGroup {
    ///     digest: [0u8; 32],
    ///     size: 3,
    ///     members: vec![PathBuf::from("/a"), PathBuf::from("/b")],
    /// }];
    /// let output = JsonOutput::new(&groups, &ScanSummary::default());
    /// assert_eq!(output.groups[0].members.len(), 2);
    /// ```
    #[must_use]
    pub fn new(groups: &[DuplicateGroup], summary: &ScanSummary) -> Self {
        Self {
            summary: JsonSummary::from(summary),
            groups: groups.iter().map(JsonGroup::from).collect(),
        }
    }

    /// Serialize to compact JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write JSON followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W, pretty: bool) -> Result<(), JsonOutputError> {
        let json = if pretty {
            self.to_json_pretty()?
        } else {
            self.to_json()?
        };
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

/// Errors that can occur during JSON output.
#[derive(thiserror::Error, Debug)]
pub enum JsonOutputError {
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error during JSON generation: {0}")]
    Io(#[from] std::io::Error),
}
