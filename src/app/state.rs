//! Application State and main controller module for fbrowse.
//!
//! [AppState] holds everything the event loop and the renderer need:
//! - The loaded configuration and the keymap built from it
//! - The [DirectoryView] model for the displayed directory
//! - The status line message
//!
//! Keys are dispatched here, and the result of an editor handoff is folded back in
//! through [AppState::finish_handoff].

use crate::app::keymap::{Action, Keymap};
use crate::app::nav::{DeleteMode, DirectoryView};
use crate::config::Config;
use crate::core::{EditorCommand, EntryDetails, FmError, FmResult, HandoffOutcome};

use crossterm::event::KeyEvent;
use std::path::{Path, PathBuf};

/// Enumeration for each individual keypress result processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeypressResult {
    /// No binding matched.
    Continue,
    /// The key was handled by the app.
    Consumed,
    Quit,
    /// The terminal should be handed to the editor for this file.
    OpenFile(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// One line of feedback shown under the entry list until the next key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    kind: StatusKind,
    text: String,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }

    #[inline]
    pub fn kind(&self) -> StatusKind {
        self.kind
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Main struct which holds the central application state of fbrowse
pub struct AppState<'a> {
    pub(super) config: &'a Config,
    pub(super) keymap: Keymap,
    pub(super) view: DirectoryView,
    pub(super) status: Option<StatusMessage>,
}

impl<'a> AppState<'a> {
    /// Opens the current working directory.
    pub fn new(config: &'a Config) -> FmResult<Self> {
        let current_dir = std::env::current_dir()?;
        Self::from_dir(config, &current_dir)
    }

    pub fn from_dir(config: &'a Config, initial_path: &Path) -> FmResult<Self> {
        let view = DirectoryView::load(initial_path)?;
        tracing::info!(path = %initial_path.display(), entries = view.entries().len(), "browser started");
        Ok(Self {
            config,
            keymap: Keymap::from_keys(config.keys()),
            view,
            status: None,
        })
    }

    // Getters / accessors

    #[inline]
    pub fn config(&self) -> &Config {
        self.config
    }

    #[inline]
    pub fn view(&self) -> &DirectoryView {
        &self.view
    }

    #[inline]
    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// Details of the selected entry, stat'ed now.
    pub fn details(&self) -> Option<FmResult<EntryDetails>> {
        self.view.details_for(self.view.selected())
    }

    pub fn editor_command(&self) -> EditorCommand {
        self.config.editor().command()
    }

    pub(super) fn delete_mode(&self) -> DeleteMode {
        if self.config.general().move_to_trash() {
            DeleteMode::Trash
        } else {
            DeleteMode::Permanent
        }
    }

    // Input

    /// Dispatches one key press. The previous status message is cleared first.
    pub fn handle_keypress(&mut self, key: KeyEvent) -> KeypressResult {
        let Some(action) = self.keymap.lookup(key) else {
            return KeypressResult::Continue;
        };
        self.status = None;

        match action {
            Action::Nav(nav_action) => self.handle_nav_action(nav_action),
            Action::File(file_action) => self.handle_file_action(file_action),
            Action::System(sys_action) => self.handle_sys_action(sys_action),
        }
    }

    /// Folds the outcome of an editor handoff back into the state.
    ///
    /// The directory is reloaded only when the editor actually ran. A failed reload is
    /// reported alongside an editor failure, and replaces the note for a non-zero exit.
    pub fn finish_handoff(&mut self, outcome: HandoffOutcome) {
        let reload_err = if outcome.child_ran() {
            self.view.refresh().err()
        } else {
            None
        };

        match (outcome, reload_err) {
            (HandoffOutcome::Skipped, _) => {}
            (HandoffOutcome::Completed(_), Some(reload)) => self.report_error(&reload),
            (HandoffOutcome::Completed(status), None) if status.success() => {}
            (HandoffOutcome::Completed(status), None) => {
                let editor = self.editor_command();
                self.status = Some(StatusMessage::info(format!(
                    "{} exited with {}",
                    editor.program(),
                    status
                )));
            }
            (HandoffOutcome::Failed(e), None) => self.report_error(&e),
            (HandoffOutcome::Failed(e), Some(reload)) => {
                tracing::warn!(error = %e, reload = %reload, "editor failed and reload failed");
                self.status = Some(StatusMessage::error(format!("{}; {}", e, reload)));
            }
        }
    }

    /// Logs a recoverable error and shows it on the status line.
    pub fn report_error(&mut self, err: &FmError) {
        tracing::warn!(error = %err, "operation failed");
        self.status = Some(StatusMessage::error(err.to_string()));
    }
}
