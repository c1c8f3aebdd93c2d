//! Arrow-key selection list drawn with crossterm.
//!
//! # Terminal Management
//!
//! The list runs in raw mode so single key presses are seen immediately.
//! Raw mode is switched off again by a drop guard on every exit path,
//! including errors. Ctrl+C arrives as a key event in raw mode and is
//! reported as [`PromptError::Interrupted`].
//!
//! Keys: Up/`k` and Down/`j` move (wrapping), Enter chooses.

use std::io::{self, Write};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    queue,
    style::{Print, Stylize},
    terminal::{self, ClearType},
};

use super::{PromptError, Selector};

/// Interactive list on the controlling terminal.
#[derive(Debug)]
pub struct TerminalSelector<W: Write = io::Stdout> {
    out: W,
}

impl TerminalSelector<io::Stdout> {
    /// Draw on stdout.
    #[must_use]
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for TerminalSelector<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

/// Restores cooked mode when dropped.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// What a key press does to the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyAction {
    Up,
    Down,
    Choose,
    Interrupt,
    Ignore,
}

fn key_action(key: &KeyEvent) -> KeyAction {
    if key.kind != KeyEventKind::Press {
        return KeyAction::Ignore;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            KeyAction::Interrupt
        }
        KeyCode::Up | KeyCode::Char('k') => KeyAction::Up,
        KeyCode::Down | KeyCode::Char('j') => KeyAction::Down,
        KeyCode::Enter => KeyAction::Choose,
        _ => KeyAction::Ignore,
    }
}

fn move_cursor(current: usize, len: usize, action: KeyAction) -> usize {
    match action {
        KeyAction::Up => current.checked_sub(1).unwrap_or(len - 1),
        KeyAction::Down => (current + 1) % len,
        _ => current,
    }
}

impl<W: Write> TerminalSelector<W> {
    fn draw(&mut self, message: &str, choices: &[String], selected: usize) -> io::Result<()> {
        queue!(
            self.out,
            cursor::MoveToColumn(0),
            terminal::Clear(ClearType::FromCursorDown),
            Print("? ".green()),
            Print(message.bold()),
            Print(" (Use arrow keys)".dark_grey()),
            Print("\r\n"),
        )?;
        for (index, choice) in choices.iter().enumerate() {
            if index == selected {
                queue!(self.out, Print(format!(" » {}", choice).cyan()), Print("\r\n"))?;
            } else {
                queue!(self.out, Print(format!("   {}", choice)), Print("\r\n"))?;
            }
        }
        self.out.flush()
    }

    fn rewind(&mut self, lines: usize) -> io::Result<()> {
        queue!(self.out, cursor::MoveUp(lines as u16))
    }

    fn finish(&mut self, message: &str, answer: &str) -> io::Result<()> {
        queue!(
            self.out,
            cursor::MoveToColumn(0),
            terminal::Clear(ClearType::FromCursorDown),
            Print("? ".green()),
            Print(message.bold()),
            Print(" "),
            Print(answer.cyan()),
            Print("\r\n"),
        )?;
        self.out.flush()
    }
}

impl<W: Write> Selector for TerminalSelector<W> {
    fn select(&mut self, message: &str, choices: &[String]) -> Result<usize, PromptError> {
        if choices.is_empty() {
            return Err(PromptError::InvalidSelection { index: 0, len: 0 });
        }

        let _guard = RawModeGuard::enable()?;
        let mut selected = 0;
        let height = choices.len() + 1;

        self.draw(message, choices, selected)?;
        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            match key_action(&key) {
                KeyAction::Interrupt => {
                    self.rewind(height)?;
                    self.finish(message, "")?;
                    return Err(PromptError::Interrupted);
                }
                KeyAction::Choose => {
                    self.rewind(height)?;
                    self.finish(message, &choices[selected])?;
                    return Ok(selected);
                }
                KeyAction::Ignore => {}
                action => {
                    selected = move_cursor(selected, choices.len(), action);
                    self.rewind(height)?;
                    self.draw(message, choices, selected)?;
                }
            }
        }
    }
}
