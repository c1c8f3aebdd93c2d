//! Extension allowlist filtering.
//!
//! Extensions are compared lowercase and without a leading dot. A file name's
//! extension is the text after its last `.`; names without a dot are compared
//! whole, so an allowlist entry `makefile` matches a file named `Makefile`.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::Path;

/// Set of accepted file extensions. Empty accepts everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionFilter {
    extensions: BTreeSet<String>,
}

impl ExtensionFilter {
    /// Build a filter from literal extension strings.
    ///
    /// Entries are trimmed, stripped of one leading `.`, and lowercased.
    /// Blank entries are dropped.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filter = Self::default();
        filter.extend(extensions);
        filter
    }

    /// Add more extensions to the allowlist.
    pub fn extend<I, S>(&mut self, extensions: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions
            .extend(extensions.into_iter().filter_map(|e| normalize(e.as_ref())));
    }

    /// Read an extension list file: one extension per line.
    ///
    /// Blank lines and lines starting with `#` are ignored.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the file cannot be read.
    pub fn from_list_file(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        let filter = Self::new(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.starts_with('#')),
        );
        log::debug!(
            "Loaded {} extension(s) from {}",
            filter.len(),
            path.display()
        );
        Ok(filter)
    }

    /// Whether the allowlist is empty (no filtering).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Number of accepted extensions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    /// Iterate the accepted extensions in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }

    /// Check whether a path's file name passes the filter.
    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        let Some(name) = path.file_name() else {
            return false;
        };
        let name = name.to_string_lossy();
        let extension = name.rsplit('.').next().unwrap_or_default().to_lowercase();
        self.extensions.contains(&extension)
    }
}

fn normalize(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('.').unwrap_or(trimmed);
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}
