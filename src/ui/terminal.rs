//! Terminal mode setup and teardown. Restoring is best-effort and also runs
//! from a panic hook so a crash never leaves the shell in raw mode.

use std::io::{self, Write};

use crossterm::{
    cursor::Show,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};

/// Switch `out` to the alternate screen with mouse reporting on.
pub fn enter_screen<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(out, EnterAlternateScreen, EnableMouseCapture)
}

/// Undo [`enter_screen`] and show the cursor again.
pub fn leave_screen<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(out, DisableMouseCapture, LeaveAlternateScreen, Show)
}

/// Raw mode plus alternate screen on stdout. On failure everything already
/// switched on is switched off again.
pub fn enter() -> io::Result<()> {
    enable_raw_mode()?;
    if let Err(err) = enter_screen(&mut io::stdout()) {
        restore();
        return Err(err);
    }
    Ok(())
}

/// Leave raw mode and the alternate screen, ignoring errors.
pub fn restore() {
    let _ = disable_raw_mode();
    let _ = leave_screen(&mut io::stdout());
}

/// Restore the terminal before the default panic message is printed.
pub fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore();
        previous(info);
    }));
}
