use std::io;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

/// Concrete terminal type driven by the game loop.
pub type GameTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Raw-mode + alternate-screen guard for one run of the game.
///
/// The terminal is restored best-effort on drop. [`TerminalSession::restore`]
/// is also safe to call from a panic hook, where the screen state is
/// unknown.
pub struct TerminalSession {
    terminal: GameTerminal,
}

impl TerminalSession {
    /// Puts the terminal into raw mode on the alternate screen with the
    /// cursor hidden, and wraps it in a ratatui terminal.
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(error) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(error);
        }

        match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(error) => {
                Self::restore();
                Err(error)
            }
        }
    }

    /// Returns mutable access to the inner ratatui terminal.
    pub fn terminal_mut(&mut self) -> &mut GameTerminal {
        &mut self.terminal
    }

    /// Undoes [`enter`](Self::enter), ignoring failures.
    pub fn restore() {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        Self::restore();
    }
}
