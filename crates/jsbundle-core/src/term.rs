//! Colored terminal output.
//!
//! Whether output is colored is decided once at process start and carried
//! in an explicit [`ColorConfig`] value rather than process-wide globals.

use std::io::{self, IsTerminal, Write};

/// ANSI escape prefixes for the recognized colors.
pub const GREEN: &str = "\x1b[32m";
pub const RED: &str = "\x1b[31m";
pub const YELLOW: &str = "\x1b[33m";
/// Resets the terminal to its default color.
pub const RESET: &str = "\x1b[0m";

/// Color selector for [`ColorConfig::cprint`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Style {
    Green,
    Red,
    Yellow,
    /// A literal ANSI escape prefix, used verbatim.
    Escape(String),
    /// No styling.
    Plain,
}

impl Style {
    fn prefix(&self) -> Option<&str> {
        match self {
            Style::Green => Some(GREEN),
            Style::Red => Some(RED),
            Style::Yellow => Some(YELLOW),
            Style::Escape(prefix) => Some(prefix),
            Style::Plain => None,
        }
    }
}

/// Whether output gets colored, fixed at construction.
#[derive(Debug, Clone, Copy)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Colors iff stdout is an interactive terminal and the `NO_COLOR`
    /// kill switch is unset.
    pub fn from_env() -> Self {
        Self {
            enabled: io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
        }
    }

    /// Never colors.
    pub const fn plain() -> Self {
        Self { enabled: false }
    }

    /// Always colors, regardless of the terminal.
    pub const fn forced() -> Self {
        Self { enabled: true }
    }

    /// Print `text` to stdout with the selected style, flushing
    /// immediately. Never appends a newline; callers control line breaks.
    pub fn cprint(&self, text: &str, style: &Style) {
        let mut stdout = io::stdout().lock();
        let _ = self.write_styled(&mut stdout, text, style);
    }

    /// Writer-generic variant of [`cprint`](Self::cprint).
    pub fn write_styled<W: Write>(&self, out: &mut W, text: &str, style: &Style) -> io::Result<()> {
        match style.prefix() {
            Some(prefix) if self.enabled => write!(out, "{prefix}{text}{RESET}")?,
            _ => write!(out, "{text}")?,
        }
        out.flush()
    }
}
