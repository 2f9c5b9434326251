use std::io;
use std::panic;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::backend::CrosstermBackend;

use crate::renderer::TerminalRenderer;

/// Concrete renderer type used by the runtime.
pub type AppRenderer = TerminalRenderer<CrosstermBackend<io::Stdout>>;

/// Owns terminal lifecycle (raw mode, alternate screen, mouse capture) for
/// one game session.
///
/// On drop, this type restores terminal state best-effort.
#[derive(Debug)]
pub struct TerminalSession {
    renderer: AppRenderer,
}

impl TerminalSession {
    /// Enters raw mode, switches to the alternate screen and, when `mouse`
    /// is set, enables mouse capture for swipe gestures.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error; the terminal is restored first.
    pub fn enter(mouse: bool) -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(error) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(error);
        }
        if mouse {
            if let Err(error) = execute!(stdout, EnableMouseCapture) {
                let _ = cleanup_terminal_best_effort();
                return Err(error);
            }
        }

        match TerminalRenderer::new(CrosstermBackend::new(stdout)) {
            Ok(renderer) => Ok(Self { renderer }),
            Err(error) => {
                let _ = cleanup_terminal_best_effort();
                Err(error)
            }
        }
    }

    pub fn renderer_mut(&mut self) -> &mut AppRenderer {
        &mut self.renderer
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = cleanup_terminal_best_effort();
    }
}

/// Restores the terminal before the default panic message is printed.
pub fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = cleanup_terminal_best_effort();
        default_hook(panic_info);
    }));
}

fn cleanup_terminal_best_effort() -> io::Result<()> {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    execute!(stdout, DisableMouseCapture, Show, LeaveAlternateScreen)
}
