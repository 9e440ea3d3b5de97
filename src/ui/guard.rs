//! Terminal lifecycle.
//!
//! [`TerminalGuard`] puts the terminal into raw mode on the alternate screen
//! and puts it back when dropped. The panic hook does the same before the
//! panic message is printed, so the message lands on a usable screen.
use std::io::{Result as IoResult, Stdout, stdout};
use std::panic::{set_hook, take_hook};

use crossterm::ExecutableCommand;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::error;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

/// RAII wrapper for terminal state.
///
/// Holding one means the terminal is in raw mode on the alternate screen.
pub struct TerminalGuard;

impl TerminalGuard
{
    /// Enters raw mode and switches to the alternate screen.
    ///
    /// # Errors
    ///
    /// On failure to enter raw mode or switch screens.
    pub fn new() -> IoResult<Self>
    {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard
{
    fn drop(&mut self)
    {
        restore_terminal();
    }
}

/// Leaves raw mode and the alternate screen, logging what fails.
fn restore_terminal()
{
    // Terminal will be borked when failure, at least leave a trace
    if let Err(err) = disable_raw_mode()
    {
        error!("Failed to disable raw mode: {err}");
    }

    if let Err(err) = stdout().execute(LeaveAlternateScreen)
    {
        error!("Failed to leave alternate screen: {err}");
    }
}

/// Creates the ratatui terminal on stdout.
///
/// The screen itself is prepared by [`TerminalGuard`].
///
/// # Errors
///
/// Returns an error if the terminal size cannot be queried.
pub fn init_tui() -> IoResult<Terminal<CrosstermBackend<Stdout>>>
{
    let backend = CrosstermBackend::new(stdout());
    Terminal::new(backend)
}

/// Installs a panic hook that restores the terminal first.
pub fn init_panic_hook()
{
    let original_hook = take_hook();
    set_hook(Box::new(move |panic_info| {
        restore_terminal();

        error!("Application panicked: {panic_info}");

        original_hook(panic_info);
    }));
}
