//! Logging setup.
//!
//! Diagnostics go through the `log` facade to an `env_logger` backend on
//! stderr, so they never interleave with the report on stdout. The level is
//! chosen by, in priority order:
//!
//! 1. `RUST_LOG`, if set
//! 2. `-q` (errors only) or `-v`/`-vv` (debug/trace)
//! 3. info
//!
//! Per-file problems (unreadable sizes, failed hashes, failed deletions) are
//! logged at warn level and the run carries on.

use std::env;
use std::io::Write;

use env_logger::Builder;
use log::LevelFilter;

/// Initialize the logger from the CLI verbosity flags.
///
/// Calling this more than once keeps the first logger.
///
/// ```rust,no_run
/// use dupehunter::logging::init_logging;
///
/// init_logging(1, false);
/// log::debug!("visible with -v");
/// ```
pub fn init_logging(verbose: u8, quiet: bool) {
    let mut builder = Builder::new();

    let from_env = env::var_os("RUST_LOG").is_some();
    if from_env {
        builder.parse_default_env();
    } else {
        builder.filter_level(determine_level(verbose, quiet));
    }

    configure_format(&mut builder, verbose);

    if builder.try_init().is_ok() {
        log::debug!(
            "Logging initialized at {:?}{}",
            log::max_level(),
            if from_env { " from RUST_LOG" } else { "" }
        );
    }
}

/// Debug builds: timestamp and level, plus the module path with `-v`.
/// Release builds: level and message only.
fn configure_format(builder: &mut Builder, verbose: u8) {
    #[cfg(debug_assertions)]
    {
        builder.format(move |buf, record| {
            let timestamp = buf.timestamp_seconds();
            let level = record.level();
            let style = buf.default_level_style(level);
            if verbose >= 1 {
                writeln!(
                    buf,
                    "{} {style}{:<5}{style:#} [{}] {}",
                    timestamp,
                    level,
                    record.module_path().unwrap_or("unknown"),
                    record.args()
                )
            } else {
                writeln!(
                    buf,
                    "{} {style}{:<5}{style:#} {}",
                    timestamp,
                    level,
                    record.args()
                )
            }
        });
    }

    #[cfg(not(debug_assertions))]
    {
        let _ = verbose;
        builder.format(|buf, record| {
            let style = buf.default_level_style(record.level());
            writeln!(buf, "{style}{:<5}{style:#} {}", record.level(), record.args())
        });
    }
}

/// Level implied by `-v` count and `-q`.
fn determine_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
