/// Raw-mode scope around the whole run.
///
/// `TerminalGuard::acquire` switches the terminal into raw mode and clears
/// it; dropping the guard switches it back. The main screen is used, so the
/// last frame stays on screen after exit. A panic hook
/// restores the terminal too, before the default hook prints the panic.

use std::io::{self, stdout};
use std::panic;

use crossterm::{cursor, execute, style::ResetColor, terminal};

use crate::error::{GameError, Result};

#[derive(Debug)]
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    pub fn acquire() -> Result<Self> {
        Self::reset_terminal_on_panic();
        if let Err(e) = Self::set_terminal_state() {
            // Half-applied state is still worth undoing.
            let _ = Self::reset_terminal_state();
            return Err(GameError::Terminal(e));
        }
        log::debug!("terminal in raw mode");
        Ok(TerminalGuard { _private: () })
    }

    fn set_terminal_state() -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::SetTitle("mazechase"),
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All)
        )
    }

    fn reset_terminal_state() -> io::Result<()> {
        execute!(stdout(), ResetColor, cursor::Show)?;
        terminal::disable_raw_mode()
    }

    fn reset_terminal_on_panic() {
        let default_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            log::error!("panic occurred, attempting to reset terminal: {panic_info}");
            if let Err(e) = Self::reset_terminal_state() {
                log::error!("failure resetting terminal: {e}");
            }
            default_hook(panic_info)
        }));
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        match Self::reset_terminal_state() {
            Ok(()) => log::debug!("terminal restored"),
            Err(e) => {
                log::error!("failure restoring terminal: {e}");
                eprintln!("{}", GameError::Terminal(e));
            }
        }
    }
}
