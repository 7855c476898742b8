//! Editor handoff tests for fbrowse
//!
//! The terminal is replaced by an in-memory fake holding raw attribute bytes, so these tests
//! check the handoff protocol without a tty. Editors are real processes where it matters.

use fbrowse::app::{AppState, KeypressResult, StatusKind};
use fbrowse::config::Config;
use fbrowse::core::{
    EditorCommand, EditorLauncher, FmError, HandoffOutcome, SessionPhase, TerminalControl,
    TerminalSession,
};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::RefCell;
use std::error;
use std::fs::{self, File};
use std::io;
use std::path::Path;
use std::process::ExitStatus;
use std::rc::Rc;
use tempfile::tempdir;

/// Fake tty: the "driver" attributes plus whether the browser currently owns the screen.
#[derive(Default)]
struct Tty {
    attrs: Vec<u8>,
    owned: bool,
}

struct MemControl(Rc<RefCell<Tty>>);

impl TerminalControl for MemControl {
    type Snapshot = Vec<u8>;

    fn capture(&mut self) -> io::Result<Vec<u8>> {
        Ok(self.0.borrow().attrs.clone())
    }

    fn release(&mut self) -> io::Result<()> {
        let mut tty = self.0.borrow_mut();
        tty.owned = false;
        // cooked mode: flip the low bit of every flag byte
        for b in tty.attrs.iter_mut() {
            *b ^= 1;
        }
        Ok(())
    }

    fn restore(&mut self, snapshot: &Vec<u8>) -> io::Result<()> {
        self.0.borrow_mut().attrs = snapshot.clone();
        Ok(())
    }

    fn reacquire(&mut self) -> io::Result<()> {
        self.0.borrow_mut().owned = true;
        Ok(())
    }
}

/// Editor that leaves random garbage in the terminal attributes.
struct MessyEditor {
    tty: Rc<RefCell<Tty>>,
    rng: StdRng,
    inner: EditorCommand,
}

impl EditorLauncher for MessyEditor {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn launch(&mut self, path: &Path) -> io::Result<ExitStatus> {
        {
            let mut tty = self.tty.borrow_mut();
            assert!(!tty.owned, "editor started while the browser owns the screen");
            let len = tty.attrs.len();
            tty.attrs = (0..len).map(|_| self.rng.random::<u8>()).collect();
        }
        self.inner.launch(path)
    }
}

fn mem_session(attrs: Vec<u8>) -> (TerminalSession<MemControl>, Rc<RefCell<Tty>>) {
    let tty = Rc::new(RefCell::new(Tty { attrs, owned: true }));
    (TerminalSession::new(MemControl(Rc::clone(&tty))), tty)
}

#[cfg(unix)]
#[test]
fn test_roundtrip_restores_random_attributes_exactly() -> Result<(), Box<dyn error::Error>> {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let dir = tempdir()?;
    let file = dir.path().join("notes.txt");
    File::create(&file)?;

    for _ in 0..32 {
        let len = rng.random_range(1..=64);
        let before: Vec<u8> = (0..len).map(|_| rng.random::<u8>()).collect();
        let (mut session, tty) = mem_session(before.clone());
        let mut editor = MessyEditor {
            tty: Rc::clone(&tty),
            rng: StdRng::seed_from_u64(rng.random()),
            inner: EditorCommand::new("true", Vec::new()),
        };

        let outcome = session.hand_off(&mut editor, &file)?;
        assert!(matches!(outcome, HandoffOutcome::Completed(s) if s.success()));
        assert_eq!(tty.borrow().attrs, before);
        assert!(tty.borrow().owned);
        assert_eq!(session.phase(), SessionPhase::Browsing);
    }
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_missing_program_fails_launch_and_restores() -> Result<(), Box<dyn error::Error>> {
    let (mut session, tty) = mem_session(vec![4, 2]);
    let mut editor = EditorCommand::new("fbrowse-no-such-editor-91b2", Vec::new());

    let outcome = session.hand_off(&mut editor, Path::new("x"))?;
    match &outcome {
        HandoffOutcome::Failed(FmError::EditorLaunchFailed { editor, source }) => {
            assert_eq!(editor, "fbrowse-no-such-editor-91b2");
            assert_eq!(source.kind(), io::ErrorKind::NotFound);
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert!(!outcome.child_ran());
    assert_eq!(tty.borrow().attrs, [4, 2]);
    assert!(tty.borrow().owned);
    assert!(session.is_browsing());
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_signal_terminated_editor_is_abnormal() -> Result<(), Box<dyn error::Error>> {
    let (mut session, tty) = mem_session(vec![8]);
    let mut editor = EditorCommand::new("sh", vec!["-c".into(), "kill -9 $$".into()]);

    let outcome = session.hand_off(&mut editor, Path::new("ignored"))?;
    assert!(matches!(
        outcome,
        HandoffOutcome::Failed(FmError::EditorExitedAbnormally { .. })
    ));
    assert!(outcome.child_ran());
    assert_eq!(tty.borrow().attrs, [8]);
    Ok(())
}

/// Opening a file whose editor exits with status 1: back to browsing, reloaded, a status note only.
#[cfg(unix)]
#[test]
fn test_editor_exit_status_one_reloads_with_note() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    File::create(dir.path().join("notes.txt"))?;
    let config = Config::from_toml("[editor]\ncmd = \"false\"\n")?;
    let mut app = AppState::from_dir(&config, dir.path())?;
    let (mut session, tty) = mem_session(vec![1, 2, 3]);

    let path = match app.handle_keypress(crossterm::event::KeyEvent::new(
        crossterm::event::KeyCode::Enter,
        crossterm::event::KeyModifiers::NONE,
    )) {
        KeypressResult::OpenFile(path) => path,
        other => panic!("expected OpenFile, got {:?}", other),
    };
    assert_eq!(path, dir.path().join("notes.txt"));

    // something changes on disk while the editor runs
    fs::write(dir.path().join("swap.tmp"), b"")?;

    let mut editor = app.editor_command();
    let outcome = session.hand_off(&mut editor, &path)?;
    assert!(matches!(&outcome, HandoffOutcome::Completed(s) if s.code() == Some(1)));
    app.finish_handoff(outcome);

    assert!(session.is_browsing());
    assert_eq!(tty.borrow().attrs, [1, 2, 3]);
    assert_eq!(app.view().entries().len(), 2);
    let status = app.status().ok_or("missing status note")?;
    assert_eq!(status.kind(), StatusKind::Info);
    assert!(status.text().contains("false"));
    Ok(())
}

#[test]
fn test_second_handoff_while_in_flight_has_no_effect() -> Result<(), Box<dyn error::Error>> {
    let (mut session, tty) = mem_session(vec![6, 6]);
    let mut editor = EditorCommand::new("fbrowse-never-started", Vec::new());

    for phase in [
        SessionPhase::Suspending,
        SessionPhase::EditorRunning,
        SessionPhase::Resuming,
    ] {
        session.set_phase(phase);
        let outcome = session.hand_off(&mut editor, Path::new("x"))?;
        assert!(matches!(outcome, HandoffOutcome::Skipped));
        assert!(!outcome.child_ran());
        assert_eq!(session.phase(), phase);
        assert_eq!(tty.borrow().attrs, [6, 6]);
        assert!(tty.borrow().owned);
    }
    Ok(())
}
