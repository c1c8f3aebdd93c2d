//! Process exit codes.

/// Exit status of a run.
///
/// - 0: the run completed, whether or not duplicates were found
/// - 1: interrupted by the operator, or a fatal startup error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Detection (and resolution, if requested) completed.
    Success,
    /// Ctrl+C during the scan or at a prompt.
    Interrupted,
    /// Configuration, argument or terminal failure before or outside the scan.
    GeneralError,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::Interrupted => crate::signal::EXIT_CODE_INTERRUPTED,
            Self::GeneralError => 1,
        }
    }

    /// Classify an application error.
    #[must_use]
    pub fn from_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<crate::prompt::PromptError>() {
            Some(crate::prompt::PromptError::Interrupted) => Self::Interrupted,
            _ => Self::GeneralError,
        }
    }
}
