//! Human-readable report.
//!
//! ```text
//! Found the following duplicate files:
//!   #  Digest        Size      Path
//!   1  3b18e512dba7  1.2 KiB   ./a/report.txt
//!   1  3b18e512dba7  1.2 KiB   ./b/report-copy.txt
//!
//! 1 group(s), 1 duplicate copy(ies), 1.2 KiB reclaimable
//! ```

use std::io::{self, Write};
use std::path::PathBuf;

use bytesize::ByteSize;
use yansi::Paint;

use crate::duplicates::{DuplicateGroup, ScanSummary};
use crate::scanner::ExtensionFilter;

/// Number of digest hex characters shown in the table.
const DIGEST_PREFIX_LEN: usize = 12;

/// Message printed when no group was confirmed.
pub const NO_DUPLICATES: &str = "No duplicate files found!";

/// Writes banners, the result table and the summary line.
pub struct TextOutput<'a> {
    groups: &'a [DuplicateGroup],
    summary: &'a ScanSummary,
}

impl<'a> TextOutput<'a> {
    #[must_use]
    pub fn new(groups: &'a [DuplicateGroup], summary: &'a ScanSummary) -> Self {
        Self { groups, summary }
    }

    /// Write the result table, or [`NO_DUPLICATES`].
    ///
    /// # Errors
    ///
    /// Returns any error from `writer`.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        if self.groups.is_empty() {
            writeln!(writer, "{}", NO_DUPLICATES.green())?;
            return self.write_errors(writer);
        }

        writeln!(writer, "{}", "Found the following duplicate files:".bold())?;
        let size_width = self
            .groups
            .iter()
            .map(|g| ByteSize::b(g.size).to_string().len())
            .max()
            .unwrap_or(4)
            .max(4);
        let index_width = self.groups.len().to_string().len().max(1);

        writeln!(
            writer,
            "  {:>iw$}  {:<dw$}  {:<sw$}  {}",
            "#".dim(),
            "Digest".dim(),
            "Size".dim(),
            "Path".dim(),
            iw = index_width,
            dw = DIGEST_PREFIX_LEN,
            sw = size_width,
        )?;

        for (index, group) in self.groups.iter().enumerate() {
            let hex = group.digest_hex();
            let prefix = &hex[..DIGEST_PREFIX_LEN];
            let size = ByteSize::b(group.size).to_string();
            for member in &group.members {
                writeln!(
                    writer,
                    "  {:>iw$}  {}  {:<sw$}  {}",
                    index + 1,
                    prefix.cyan(),
                    size,
                    member.display(),
                    iw = index_width,
                    sw = size_width,
                )?;
            }
        }

        writeln!(writer)?;
        writeln!(
            writer,
            "{} group(s), {} duplicate copy(ies), {} reclaimable",
            self.summary.duplicate_groups,
            self.summary.duplicate_files,
            self.summary.reclaimable_display().yellow()
        )?;
        self.write_errors(writer)
    }

    fn write_errors<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let errors = self.summary.error_count();
        if errors > 0 {
            writeln!(
                writer,
                "{}",
                format!("{} file(s) could not be read, run with -v for details", errors).red()
            )?;
        }
        Ok(())
    }
}

/// Opening lines naming what is about to be scanned.
///
/// # Errors
///
/// Returns any error from `writer`.
pub fn write_banner<W: Write>(
    writer: &mut W,
    roots: &[PathBuf],
    extensions: &ExtensionFilter,
) -> io::Result<()> {
    writeln!(writer, "{}", "Started dupehunter".bold())?;
    let roots = roots
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    if extensions.is_empty() {
        writeln!(writer, "Checking for duplicate files in {}", roots)
    } else {
        let list = extensions.iter().collect::<Vec<_>>().join(", ");
        writeln!(
            writer,
            "Checking for duplicate files (with extensions {}) in {}",
            list, roots
        )
    }
}
