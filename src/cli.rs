//! Command-line interface definitions.
//!
//! # Example
//!
//! ```bash
//! # Report duplicates under the current directory
//! dupehunter
//!
//! # Only photos, across two roots, then choose copies to delete
//! dupehunter -p ~/Pictures /mnt/backup -e jpg,png -d
//!
//! # Extension list from a file, JSON report for scripting
//! dupehunter -p ~/Music -s exts.txt -o json
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

/// Find duplicate files by size and content, and optionally delete copies.
///
/// Files are first bucketed by size; only files sharing a size are hashed
/// (BLAKE3), and files sharing a digest are reported as duplicates.
#[derive(Debug, Parser)]
#[command(name = "dupehunter")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directories to scan for duplicates
    #[arg(short, long = "path", value_name = "PATH", num_args = 1.., default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// File listing extensions to check, one per line
    #[arg(short, long, value_name = "FILE")]
    pub scanlist: Option<PathBuf>,

    /// Extensions to check (comma separated, e.g. jpg,png)
    #[arg(short, long = "ext", value_name = "EXT", value_delimiter = ',')]
    pub extensions: Vec<String>,

    /// Prompt to delete one copy from each duplicate group
    #[arg(short, long)]
    pub delete: bool,

    /// Move deleted files to the system trash instead of removing them
    #[arg(long, requires = "delete")]
    pub trash: bool,

    /// Follow symbolic links during scan
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Skip hidden files and directories (starting with .)
    #[arg(long)]
    pub skip_hidden: bool,

    /// Number of I/O threads for hashing (default: 4)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    pub io_threads: Option<u16>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Configuration file to use instead of the default location
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,
}

/// Output format for scan results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Text,
    /// JSON report for scripting
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
