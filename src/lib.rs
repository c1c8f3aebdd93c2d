//! dupehunter - duplicate file finder
//!
//! Files under one or more roots are bucketed by size, only files sharing a
//! size are hashed with BLAKE3, and files sharing a digest are reported as
//! duplicate groups. Optionally the operator then picks one copy per group to
//! delete.
//!
//! ```no_run
//! use dupehunter::duplicates::{DuplicateFinder, FinderConfig};
//! use std::path::PathBuf;
//!
//! let finder = DuplicateFinder::new(FinderConfig::default());
//! let (groups, summary) = finder.find_duplicates_in_paths(&[PathBuf::from(".")]).unwrap();
//! for group in &groups {
//!     println!("{} ({} copies)", group.digest_hex(), group.len());
//! }
//! println!("{} reclaimable", summary.reclaimable_display());
//! ```

pub mod actions;
pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod prompt;
pub mod scanner;
pub mod signal;

use std::io::{self, IsTerminal, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::actions::{DeleteMethod, ResolutionReport, Resolver};
use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::duplicates::{DuplicateFinder, DuplicateGroup, FinderConfig};
use crate::error::ExitCode;
use crate::output::{write_banner, JsonOutput, TextOutput};
use crate::progress::Progress;
use crate::prompt::{LineSelector, TerminalSelector};
use crate::scanner::{ExtensionFilter, WalkerConfig};

/// Run one detection (and optional resolution) pass for parsed arguments.
///
/// # Errors
///
/// Fails on an unusable `--config` or `--scanlist` file, on output errors,
/// and when a deletion prompt is interrupted or loses its input. Per-file
/// problems during the scan are logged and never fail the run.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    if cli.no_color || !io::stdout().is_terminal() {
        yansi::disable();
    }

    let mut config = match cli.config.as_deref() {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load(),
    };
    config.merge_cli(&cli);
    log::debug!("Effective configuration: {:?}", config);

    let extensions = build_extension_filter(&config.extensions, cli.scanlist.as_deref())?;
    let text_mode = config.output == OutputFormat::Text;

    let stdout = io::stdout();
    if text_mode && !cli.quiet {
        write_banner(&mut stdout.lock(), &cli.paths, &extensions)?;
    }

    let walker_config =
        WalkerConfig::new(config.follow_symlinks, config.skip_hidden, extensions);
    let progress = Arc::new(Progress::new(cli.quiet || !text_mode));
    let finder = DuplicateFinder::new(
        FinderConfig::default()
            .with_walker_config(walker_config)
            .with_io_threads(config.io_threads)
            .with_progress_callback(progress),
    );

    let (groups, summary) = finder.find_duplicates_in_paths(&cli.paths)?;

    {
        let mut out = stdout.lock();
        match config.output {
            OutputFormat::Text => TextOutput::new(&groups, &summary).write_to(&mut out)?,
            OutputFormat::Json => JsonOutput::new(&groups, &summary).write_to(&mut out, true)?,
        }
        out.flush()?;
    }

    if cli.delete {
        if !text_mode {
            log::warn!("Deletion prompts are only available with text output");
        } else if !groups.is_empty() {
            let report = resolve_groups(&groups, config.delete_method())?;
            println!("{}", report.summary());
        }
    }

    Ok(ExitCode::Success)
}

/// Combine configured extensions with an optional extension list file.
///
/// # Errors
///
/// Fails if `scanlist` is given but cannot be read.
pub fn build_extension_filter(
    extensions: &[String],
    scanlist: Option<&Path>,
) -> Result<ExtensionFilter> {
    let mut filter = ExtensionFilter::new(extensions);
    if let Some(path) = scanlist {
        let listed = ExtensionFilter::from_list_file(path)
            .with_context(|| format!("Failed to read scanlist {}", path.display()))?;
        filter.extend(listed.iter());
    }
    Ok(filter)
}

/// Prompt for every group on the terminal, or line by line when stdin is piped.
fn resolve_groups(groups: &[DuplicateGroup], method: DeleteMethod) -> Result<ResolutionReport> {
    println!();
    let mut resolver = Resolver::new(method);
    let report = if io::stdin().is_terminal() && io::stdout().is_terminal() {
        resolver.resolve_all(groups, &mut TerminalSelector::new())?
    } else {
        resolver.resolve_all(groups, &mut LineSelector::stdio())?
    };
    Ok(report)
}
