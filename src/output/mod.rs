//! Output formatters for duplicate scan results.
//!
//! - [`text`]: colored table for people at a terminal
//! - [`json`]: machine-readable report for scripting
//!
//! # Example
//!
//! ```no_run
//! use dupehunter::duplicates::DuplicateFinder;
//! use dupehunter::output::json::JsonOutput;
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::with_defaults();
//! let (groups, summary) = finder.find_duplicates(Path::new(".")).unwrap();
//!
//! let output = JsonOutput::new(&groups, &summary);
//! println!("{}", output.to_json_pretty().unwrap());
//! ```

pub mod json;
pub mod text;

pub use json::{JsonOutput, JsonOutputError};
pub use text::{write_banner, TextOutput, NO_DUPLICATES};
