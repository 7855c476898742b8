//! Terminal rendering and event loop for fbrowse.
//!
//! Handles setup/teardown of raw mode and the alternate screen, redraws,
//! and dispatches key events to the app. Opening a file goes through the
//! [TerminalSession] handoff with the crossterm-backed [CrosstermControl].

use crate::app::{AppState, KeypressResult};
use crate::core::error::FmResult;
use crate::core::session::{TerminalControl, TerminalSession};
use crate::ui;

use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io::{self, Stdout};

/// The real terminal: crossterm for raw mode and screens, termios for the exact attribute snapshot.
#[derive(Debug, Default)]
pub struct CrosstermControl {
    /// Cooked mode as seen right after leaving raw mode, before the editor touched anything.
    #[cfg(unix)]
    cooked: Option<nix::sys::termios::Termios>,
}

impl TerminalControl for CrosstermControl {
    #[cfg(unix)]
    type Snapshot = nix::sys::termios::Termios;
    #[cfg(not(unix))]
    type Snapshot = bool;

    fn capture(&mut self) -> io::Result<Self::Snapshot> {
        #[cfg(unix)]
        {
            Ok(nix::sys::termios::tcgetattr(io::stdin())?)
        }
        #[cfg(not(unix))]
        {
            crossterm::terminal::is_raw_mode_enabled()
        }
    }

    fn release(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        #[cfg(unix)]
        {
            self.cooked = Some(nix::sys::termios::tcgetattr(io::stdin())?);
        }
        execute!(io::stdout(), LeaveAlternateScreen, Show)
    }

    fn restore(&mut self, snapshot: &Self::Snapshot) -> io::Result<()> {
        #[cfg(unix)]
        {
            use nix::sys::termios::{SetArg, tcsetattr};
            let stdin = io::stdin();
            // crossterm remembers the mode it finds here and returns to it on exit,
            // so it must see our cooked mode and not whatever the editor left behind
            if let Some(cooked) = self.cooked.take() {
                tcsetattr(&stdin, SetArg::TCSANOW, &cooked)?;
            }
            enable_raw_mode()?;
            tcsetattr(&stdin, SetArg::TCSANOW, snapshot)?;
        }
        #[cfg(not(unix))]
        {
            enable_raw_mode()?;
            if !*snapshot {
                disable_raw_mode()?;
            }
        }
        Ok(())
    }

    fn reacquire(&mut self) -> io::Result<()> {
        execute!(io::stdout(), EnterAlternateScreen, Hide)
    }
}

/// Owns raw mode and the alternate screen while the browser runs.
///
/// Dropping it without [ScreenGuard::teardown] still leaves both, so during unwinding
/// the teardown happens after any in-flight handoff has been unwound.
struct ScreenGuard {
    armed: bool,
}

impl ScreenGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let guard = Self { armed: true };
        execute!(io::stdout(), EnterAlternateScreen, Hide)?;
        Ok(guard)
    }

    fn teardown(mut self) -> io::Result<()> {
        self.armed = false;
        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen, Show)
    }
}

impl Drop for ScreenGuard {
    fn drop(&mut self) {
        if self.armed {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
        }
    }
}

/// Initializes the terminal in raw mode and alternate screen and runs the main event loop.
///
/// Blocks until quit. The terminal is torn down even when the loop fails or panics, so a
/// fatal error never leaves the shell in raw mode.
pub fn run_terminal(app: &mut AppState) -> FmResult<()> {
    let screen = ScreenGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    let mut session = TerminalSession::new(CrosstermControl::default());

    let result = event_loop(&mut terminal, &mut session, app);

    drop(session);
    drop(terminal);
    let teardown = screen.teardown();
    result?;
    teardown?;
    Ok(())
}

/// Main event loop: draws the UI, blocks on the next event and dispatches it.
/// Returns on quit or on a fatal error.
fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    session: &mut TerminalSession<CrosstermControl>,
    app: &mut AppState,
) -> FmResult<()> {
    terminal.draw(|f| ui::render(f, app))?;

    loop {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if !session.is_browsing() {
                    continue;
                }

                match app.handle_keypress(key) {
                    KeypressResult::Quit => break,
                    KeypressResult::OpenFile(path) => {
                        let mut editor = app.editor_command();
                        let outcome = session.hand_off(&mut editor, &path)?;
                        app.finish_handoff(outcome);
                        // full clear/reset, the editor drew over our buffers
                        terminal.clear()?;
                    }
                    KeypressResult::Continue | KeypressResult::Consumed => {}
                }
                terminal.draw(|f| ui::render(f, app))?;
            }

            Event::Resize(_, _) => {
                terminal.draw(|f| ui::render(f, app))?;
            }

            _ => {}
        }
    }
    Ok(())
}
