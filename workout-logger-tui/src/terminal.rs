// workout-logger-tui/src/terminal.rs
use crossterm::{
    cursor::Show,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io;

/// Runs `restore` when dropped, so every exit path after setup puts the
/// terminal back, including early `?` returns.
pub struct TerminalGuard<F: FnMut()> {
    restore: F,
}

impl<F: FnMut()> TerminalGuard<F> {
    pub fn new(restore: F) -> Self {
        TerminalGuard { restore }
    }
}

impl<F: FnMut()> Drop for TerminalGuard<F> {
    fn drop(&mut self) {
        (self.restore)();
    }
}

fn restore_terminal() {
    // Errors here have nowhere to go
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture, Show);
}

/// Raw mode, alternate screen and mouse capture. The guard undoes all three.
pub fn enter() -> io::Result<TerminalGuard<fn()>> {
    enable_raw_mode()?;
    let guard = TerminalGuard::new(restore_terminal as fn());
    execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    Ok(guard)
}
