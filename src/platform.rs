use std::io::{self, Write};

use anyhow::{Context, Result};
use crossterm::{cursor, execute, terminal, tty::IsTty};

/// Clears the console before a full re-render.
pub trait Screen {
    fn clear(&mut self) -> Result<()>;
}

/// Clears the real terminal through crossterm.
#[derive(Debug, Default)]
pub struct TerminalScreen;

impl Screen for TerminalScreen {
    fn clear(&mut self) -> Result<()> {
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0)
        )
        .context("clear terminal")?;
        stdout.flush().context("flush terminal")
    }
}

/// Used when output is not a terminal or clearing is turned off.
#[derive(Debug, Default)]
pub struct NullScreen;

impl Screen for NullScreen {
    fn clear(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Picks a screen for stdout. Clearing only happens on an interactive terminal.
pub fn screen(clear: bool) -> Box<dyn Screen> {
    if clear && io::stdout().is_tty() {
        Box::new(TerminalScreen)
    } else {
        Box::new(NullScreen)
    }
}
