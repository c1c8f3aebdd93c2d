//! Ctrl+C handling.
//!
//! An interrupt ends the run immediately: `Quitting..` is printed, the
//! terminal is put back into cooked mode in case a selection prompt had it
//! in raw mode, and the process exits with [`EXIT_CODE_INTERRUPTED`]. No
//! partial report is written.
//!
//! While a prompt is in raw mode the terminal delivers Ctrl+C as a key press
//! instead of a signal; the prompt reports that as
//! [`PromptError::Interrupted`](crate::prompt::PromptError::Interrupted) and
//! `main` exits the same way.

use std::io::Write;
use std::sync::OnceLock;

/// Exit status after an interrupt.
pub const EXIT_CODE_INTERRUPTED: i32 = 1;

/// Message printed when the run is interrupted.
pub const QUIT_MESSAGE: &str = "Quitting..";

/// Error type for signal handler installation.
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    /// Failed to install the Ctrl+C handler.
    #[error("Failed to install signal handler: {0}")]
    InstallFailed(#[from] ctrlc::Error),
}

static INSTALLED: OnceLock<()> = OnceLock::new();

/// Print [`QUIT_MESSAGE`] and restore the terminal.
pub fn announce_quit() {
    let _ = crossterm::terminal::disable_raw_mode();
    let mut stderr = std::io::stderr();
    let _ = writeln!(stderr, "\n{}", QUIT_MESSAGE);
    let _ = stderr.flush();
}

/// Install the process-wide interrupt handler.
///
/// Safe to call more than once; later calls do nothing.
///
/// # Errors
///
/// Returns [`SignalError`] if the handler cannot be registered.
pub fn install_handler() -> Result<(), SignalError> {
    if INSTALLED.get().is_some() {
        return Ok(());
    }

    ctrlc::set_handler(|| {
        log::debug!("Interrupt received");
        announce_quit();
        std::process::exit(EXIT_CODE_INTERRUPTED);
    })?;

    let _ = INSTALLED.set(());
    Ok(())
}
