//! Line-oriented selection prompt.

use std::io::{self, BufRead, Write};

use super::{PromptError, Selector};

/// Numbered-list prompt over a reader/writer pair.
///
/// Choices are printed as `[0] Skip!`, `[1] /path/a`, ... and the operator
/// answers with a number. Anything else re-prompts.
///
/// # Example
///
/// ```
/// use dupehunter::prompt::{LineSelector, Selector};
/// use std::io::Cursor;
///
/// let mut out = Vec::new();
/// let mut selector = LineSelector::new(Cursor::new("oops\n1\n"), &mut out);
/// let choices = vec!["Skip!".to_string(), "/tmp/a".to_string()];
/// assert_eq!(selector.select("Pick one", &choices).unwrap(), 1);
/// ```
pub struct LineSelector<R, W> {
    input: R,
    output: W,
}

impl LineSelector<io::StdinLock<'static>, io::Stdout> {
    /// Prompt on the process's stdin/stdout.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> LineSelector<R, W> {
    /// Create a selector reading answers from `input` and writing prompts to `output`.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consume the selector and return its output sink.
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Selector for LineSelector<R, W> {
    fn select(&mut self, message: &str, choices: &[String]) -> Result<usize, PromptError> {
        writeln!(self.output, "? {}", message)?;
        for (index, choice) in choices.iter().enumerate() {
            writeln!(self.output, "  [{}] {}", index, choice)?;
        }

        let mut line = String::new();
        loop {
            write!(self.output, "Enter a number (0-{}): ", choices.len().saturating_sub(1))?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                return Err(PromptError::InputClosed);
            }

            match line.trim().parse::<usize>() {
                Ok(index) if index < choices.len() => return Ok(index),
                _ => writeln!(self.output, "Invalid selection: {:?}", line.trim())?,
            }
        }
    }
}
