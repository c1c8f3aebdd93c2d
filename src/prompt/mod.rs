//! Operator selection prompts.
//!
//! The resolver never touches the terminal directly. It asks a [`Selector`]
//! for one choice out of a list and blocks until it gets an answer:
//!
//! - [`TerminalSelector`]: arrow-key list drawn with crossterm in raw mode
//! - [`LineSelector`]: numbered list answered by typing a number, over any
//!   reader/writer pair (pipes, scripted input, tests)

pub mod line;
pub mod terminal;

use std::io;

pub use line::LineSelector;
pub use terminal::TerminalSelector;

/// Errors raised while asking the operator for a choice.
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    /// The operator pressed Ctrl+C.
    #[error("interrupted by user")]
    Interrupted,

    /// Input ended before a choice was made.
    #[error("input closed before a selection was made")]
    InputClosed,

    /// The selector returned an index outside the choice list.
    #[error("selection {index} is out of range (0..{len})")]
    InvalidSelection { index: usize, len: usize },

    /// Terminal or stream I/O failed.
    #[error("prompt I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Synchronous one-of-many selection.
pub trait Selector {
    /// Present `choices` under `message` and return the chosen index.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError`] if no choice could be obtained.
    fn select(&mut self, message: &str, choices: &[String]) -> Result<usize, PromptError>;
}

impl<S: Selector + ?Sized> Selector for &mut S {
    fn select(&mut self, message: &str, choices: &[String]) -> Result<usize, PromptError> {
        (**self).select(message, choices)
    }
}

impl<S: Selector + ?Sized> Selector for Box<S> {
    fn select(&mut self, message: &str, choices: &[String]) -> Result<usize, PromptError> {
        (**self).select(message, choices)
    }
}
