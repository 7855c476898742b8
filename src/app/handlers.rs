//! Action handler methods for fbrowse.
//!
//! Implements the [AppState] methods behind each keymap action. Recoverable
//! errors end up on the status line, never in a returned error.

use crate::app::keymap::{FileAction, NavAction, SystemAction};
use crate::app::nav::{Direction, NavTarget};
use crate::app::state::{AppState, KeypressResult, StatusMessage};
use crate::core::FmError;

use std::io;

impl<'a> AppState<'a> {
    pub(super) fn handle_nav_action(&mut self, action: NavAction) -> KeypressResult {
        match action {
            NavAction::GoUp => self.view.move_selection(Direction::Up),
            NavAction::GoDown => self.view.move_selection(Direction::Down),
            NavAction::Activate => return self.activate_selected(),
            NavAction::GoParent => {
                if let Err(e) = self.view.navigate_up() {
                    self.report_error(&e);
                }
            }
        }
        KeypressResult::Consumed
    }

    pub(super) fn handle_file_action(&mut self, action: FileAction) -> KeypressResult {
        match action {
            FileAction::Delete => self.delete_selected(),
        }
        KeypressResult::Consumed
    }

    pub(super) fn handle_sys_action(&mut self, action: SystemAction) -> KeypressResult {
        match action {
            SystemAction::Quit => KeypressResult::Quit,
        }
    }

    /// Enters the selected directory or asks the loop to open the selected file.
    ///
    /// The editor is looked up on `PATH` first, so a missing editor never suspends the terminal.
    fn activate_selected(&mut self) -> KeypressResult {
        let Some(idx) = self.view.selected() else {
            return KeypressResult::Consumed;
        };

        match self.view.navigate(idx) {
            Ok(NavTarget::EnterDirectory(path)) => {
                if let Err(e) = self.view.enter(path) {
                    self.report_error(&e);
                }
                KeypressResult::Consumed
            }
            Ok(NavTarget::OpenFile(path)) => {
                let editor = self.editor_command();
                if !editor.exists() {
                    self.report_error(&FmError::EditorLaunchFailed {
                        editor: editor.program().to_string(),
                        source: io::Error::new(io::ErrorKind::NotFound, "not found in PATH"),
                    });
                    return KeypressResult::Consumed;
                }
                KeypressResult::OpenFile(path)
            }
            Err(e) => {
                self.report_error(&e);
                KeypressResult::Consumed
            }
        }
    }

    fn delete_selected(&mut self) {
        let Some(idx) = self.view.selected() else {
            return;
        };
        let name = self
            .view
            .selected_entry()
            .map(|e| e.name_str().into_owned())
            .unwrap_or_default();

        let mode = self.delete_mode();
        match self.view.delete(idx, mode) {
            Ok(()) => self.status = Some(StatusMessage::info(format!("Deleted {}", name))),
            Err(e) => self.report_error(&e),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::app::state::{AppState, KeypressResult, StatusKind};
    use crate::config::Config;

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::error;
    use std::fs::{self, File};
    use tempfile::tempdir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn enter_directory_and_come_back() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        fs::create_dir(dir.path().join("a_dir"))?;
        fs::create_dir(dir.path().join("b_dir"))?;
        File::create(dir.path().join("b_dir/inner.txt"))?;
        let config = Config::default();
        let mut app = AppState::from_dir(&config, dir.path())?;

        app.handle_keypress(key(KeyCode::Down));
        assert_eq!(app.handle_keypress(key(KeyCode::Enter)), KeypressResult::Consumed);
        assert_eq!(app.view().path(), dir.path().join("b_dir"));
        assert_eq!(app.view().entries().len(), 1);

        app.handle_keypress(key(KeyCode::Backspace));
        assert_eq!(app.view().path(), dir.path());
        assert_eq!(
            app.view().selected_entry().map(|e| e.name_str().into_owned()),
            Some("b_dir".to_string())
        );
        Ok(())
    }

    #[test]
    fn missing_editor_reports_without_opening() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        File::create(dir.path().join("notes.txt"))?;
        let config =
            Config::from_toml("[editor]\ncmd = \"fbrowse-no-such-editor-4f1c\"\n")?;
        let mut app = AppState::from_dir(&config, dir.path())?;

        assert_eq!(app.handle_keypress(key(KeyCode::Enter)), KeypressResult::Consumed);
        let status = app.status().ok_or("missing status")?;
        assert_eq!(status.kind(), StatusKind::Error);
        assert!(status.text().contains("fbrowse-no-such-editor-4f1c"));
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn existing_editor_opens_file() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        File::create(dir.path().join("notes.txt"))?;
        let config = Config::from_toml("[editor]\ncmd = \"true\"\n")?;
        let mut app = AppState::from_dir(&config, dir.path())?;

        assert_eq!(
            app.handle_keypress(key(KeyCode::Enter)),
            KeypressResult::OpenFile(dir.path().join("notes.txt"))
        );
        Ok(())
    }

    #[test]
    fn delete_key_removes_selected() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        File::create(dir.path().join("a.txt"))?;
        File::create(dir.path().join("b.txt"))?;
        let config = Config::default();
        let mut app = AppState::from_dir(&config, dir.path())?;

        assert_eq!(app.handle_keypress(ctrl('d')), KeypressResult::Consumed);
        assert!(!dir.path().join("a.txt").exists());
        assert_eq!(app.view().entries().len(), 1);
        assert_eq!(app.status().map(|s| s.kind()), Some(StatusKind::Info));
        Ok(())
    }

    #[test]
    fn delete_vanished_entry_reports_error() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        File::create(dir.path().join("a.txt"))?;
        File::create(dir.path().join("b.txt"))?;
        let config = Config::default();
        let mut app = AppState::from_dir(&config, dir.path())?;

        fs::remove_file(dir.path().join("a.txt"))?;
        app.handle_keypress(ctrl('d'));
        assert_eq!(app.view().entries().len(), 2);
        assert_eq!(app.status().map(|s| s.kind()), Some(StatusKind::Error));
        Ok(())
    }

    #[test]
    fn delete_in_empty_directory_is_noop() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let config = Config::default();
        let mut app = AppState::from_dir(&config, dir.path())?;

        assert_eq!(app.handle_keypress(ctrl('d')), KeypressResult::Consumed);
        assert_eq!(app.handle_keypress(key(KeyCode::Enter)), KeypressResult::Consumed);
        assert!(app.status().is_none());
        Ok(())
    }

    #[test]
    fn quit_key() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let config = Config::default();
        let mut app = AppState::from_dir(&config, dir.path())?;
        assert_eq!(app.handle_keypress(key(KeyCode::Char('q'))), KeypressResult::Quit);
        Ok(())
    }
}
