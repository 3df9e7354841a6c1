//! Terminal services: size queries and screen-control escape sequences.
//!
//! The size query is modeled as a trait so layouts can be driven by a fake
//! terminal in tests. Screen control is raw escape output written by the
//! layouts themselves; the sequences here must match byte-for-byte what
//! terminals expect, so they are fixed constants rather than going through a
//! terminal library's command layer.

use crate::error::{PingmonError, Result};

/// Enter the alternate screen buffer, preserving prior screen content.
pub const ENTER_ALTERNATE_SCREEN: &str = "\x1b[?1049h";
/// Exit the alternate screen buffer, restoring prior screen content.
pub const EXIT_ALTERNATE_SCREEN: &str = "\x1b[?1049l";
/// Move the cursor to row 1, column 1.
pub const CURSOR_HOME: &str = "\x1b[H";
/// Clear from the cursor to the end of the line.
pub const CLEAR_TO_LINE_END: &str = "\x1b[K";
/// Clear from the cursor to the end of the screen.
pub const CLEAR_TO_SCREEN_END: &str = "\x1b[J";

/// Terminal dimensions at one instant.
///
/// Layouts query this fresh on every redraw; it is never cached across cycles
/// because the terminal may be resized between draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalSize {
    pub columns: u16,
    pub lines: u16,
}

impl TerminalSize {
    pub fn new(columns: u16, lines: u16) -> Self {
        Self { columns, lines }
    }
}

/// Source of terminal dimensions.
pub trait Terminal: Send + Sync {
    /// Query the current terminal size.
    fn size(&self) -> Result<TerminalSize>;
}

/// The process's controlling terminal, queried through crossterm.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTerminal;

impl Terminal for SystemTerminal {
    fn size(&self) -> Result<TerminalSize> {
        let (columns, lines) = crossterm::terminal::size()
            .map_err(|err| PingmonError::terminal("size query failed", err))?;
        Ok(TerminalSize { columns, lines })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_sequences_are_exact() {
        assert_eq!(ENTER_ALTERNATE_SCREEN, "\u{1b}[?1049h");
        assert_eq!(EXIT_ALTERNATE_SCREEN, "\u{1b}[?1049l");
        assert_eq!(CURSOR_HOME, "\u{1b}[H");
        assert_eq!(CLEAR_TO_LINE_END, "\u{1b}[K");
        assert_eq!(CLEAR_TO_SCREEN_END, "\u{1b}[J");
    }

    #[test]
    fn terminal_size_construction() {
        let size = TerminalSize::new(80, 24);
        assert_eq!(size.columns, 80);
        assert_eq!(size.lines, 24);
    }
}
