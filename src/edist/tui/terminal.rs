//! # Terminal Ownership
//!
//! There is one terminal and, at any instant, exactly one party driving it:
//! the browser UI or the external editor. [`TerminalOwner`] is that token.
//!
//! The host holds it by default. [`hand_off`] is the only place it moves:
//!
//! 1. `release()` leaves the alternate screen and raw mode, so the editor
//!    gets a cooked terminal and can set up its own full-screen mode.
//! 2. The child runs to completion, blocking the event loop.
//! 3. `reclaim()` re-enters raw mode and the alternate screen before any
//!    further message is processed. This happens whether or not the child
//!    succeeded.
//!
//! Reclaiming only restores the terminal modes. The screen contents are
//! still whatever the editor left behind, so the driver follows every edit
//! with a redraw that resizes (and therefore fully clears) the UI.

use crate::error::{EdistError, Result};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal};
use std::io::{self, Stdout};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalOwner {
    Host,
    Editor,
}

/// The driver's view of the terminal.
///
/// [`Tui`] is the real implementation; tests use a recording fake.
pub trait Console {
    /// Gives the terminal away. Only valid while the host owns it.
    fn release(&mut self) -> Result<()>;

    /// Takes the terminal back and re-enters full-screen mode.
    fn reclaim(&mut self) -> Result<()>;

    fn owner(&self) -> TerminalOwner;

    fn hide_cursor(&mut self) -> Result<()>;

    /// Resizes the UI's buffers to `width`x`height`, which clears the screen
    /// and forces the next draw to repaint everything.
    fn resize(&mut self, width: u16, height: u16) -> Result<()>;

    fn size(&self) -> Result<(u16, u16)>;
}

/// Runs `child` with the terminal handed over to it, then takes the
/// terminal back. Reclaim errors take precedence over the child's result.
pub fn hand_off<C, T, F>(console: &mut C, child: F) -> Result<T>
where
    C: Console + ?Sized,
    F: FnOnce() -> Result<T>,
{
    console.release()?;
    let outcome = child();
    console.reclaim()?;
    outcome
}

/// Full-screen terminal backed by crossterm.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    owner: TerminalOwner,
    active: bool,
}

impl Tui {
    /// Switches the terminal into raw mode on the alternate screen and
    /// installs a panic hook that puts it back.
    pub fn enter() -> Result<Self> {
        let terminal = setup_in_raw_mode(enable_raw_mode, open_alternate_screen, || {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            disable_raw_mode()
        })?;

        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            original_hook(panic_info);
        }));

        Ok(Self {
            terminal,
            owner: TerminalOwner::Host,
            active: true,
        })
    }

    pub fn draw<F>(&mut self, render: F) -> Result<()>
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(render).map_err(EdistError::Terminal)?;
        Ok(())
    }

    /// Restores the terminal to the state it was in before [`Tui::enter`].
    pub fn leave(mut self) -> Result<()> {
        self.restore()
    }

    fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        if self.owner == TerminalOwner::Host {
            disable_raw_mode().map_err(EdistError::Terminal)?;
            execute!(self.terminal.backend_mut(), LeaveAlternateScreen)
                .map_err(EdistError::Terminal)?;
        }
        self.terminal.show_cursor().map_err(EdistError::Terminal)?;
        Ok(())
    }
}

fn open_alternate_screen() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    execute!(io::stdout(), EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.hide_cursor()?;
    terminal.clear()?;
    Ok(terminal)
}

/// Enables raw mode and runs `setup`. If `setup` fails there is no [`Tui`]
/// whose drop would undo raw mode, so `undo` runs before the error returns.
fn setup_in_raw_mode<T>(
    enable: impl FnOnce() -> io::Result<()>,
    setup: impl FnOnce() -> io::Result<T>,
    undo: impl FnOnce() -> io::Result<()>,
) -> Result<T> {
    enable().map_err(EdistError::Terminal)?;
    setup().map_err(|e| {
        if let Err(undo_err) = undo() {
            tracing::warn!(error = %undo_err, "could not restore terminal");
        }
        EdistError::Terminal(e)
    })
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

impl Console for Tui {
    fn release(&mut self) -> Result<()> {
        debug_assert_eq!(self.owner, TerminalOwner::Host);
        self.terminal.show_cursor().map_err(EdistError::Terminal)?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)
            .map_err(EdistError::Terminal)?;
        disable_raw_mode().map_err(EdistError::Terminal)?;
        self.owner = TerminalOwner::Editor;
        tracing::debug!("terminal released");
        Ok(())
    }

    fn reclaim(&mut self) -> Result<()> {
        enable_raw_mode().map_err(EdistError::Terminal)?;
        execute!(self.terminal.backend_mut(), EnterAlternateScreen)
            .map_err(EdistError::Terminal)?;
        self.owner = TerminalOwner::Host;
        self.terminal.hide_cursor().map_err(EdistError::Terminal)?;
        self.terminal.clear().map_err(EdistError::Terminal)?;
        tracing::debug!("terminal reclaimed");
        Ok(())
    }

    fn owner(&self) -> TerminalOwner {
        self.owner
    }

    fn hide_cursor(&mut self) -> Result<()> {
        self.terminal.hide_cursor().map_err(EdistError::Terminal)
    }

    fn resize(&mut self, width: u16, height: u16) -> Result<()> {
        self.terminal
            .resize(Rect::new(0, 0, width, height))
            .map_err(EdistError::Terminal)
    }

    fn size(&self) -> Result<(u16, u16)> {
        let size = self.terminal.size().map_err(EdistError::Terminal)?;
        Ok((size.width, size.height))
    }
}
