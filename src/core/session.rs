//! Terminal handoff between the browser and an external editor.
//!
//! The browser owns the terminal (raw mode, alternate screen) while browsing.
//! Opening a file hands the terminal to the editor process and takes it back afterwards:
//!
//! `Browsing -> Suspending -> EditorRunning -> Resuming -> Browsing`
//!
//! The terminal attributes are captured before the screen is released and written back
//! after the child exits. The snapshot is held by a [HandoffGuard] whose `Drop` restores
//! the attributes if the handoff is cut short. On a panic it does not take the screen
//! back, leaving the final teardown to whoever set the terminal up.
//!
//! The actual terminal is abstracted behind [TerminalControl] so that the protocol can be
//! driven against a fake in tests; see [crate::core::terminal::CrosstermControl] for the
//! real implementation.

use crate::core::error::{FmError, FmResult};

use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

/// Phases of the handoff state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Browsing,
    Suspending,
    EditorRunning,
    Resuming,
}

/// Terminal primitives needed for the handoff.
pub trait TerminalControl {
    /// Opaque copy of the terminal attributes.
    type Snapshot;

    /// Reads the current terminal attributes.
    fn capture(&mut self) -> io::Result<Self::Snapshot>;

    /// Gives up raw mode and the alternate screen so a foreground child can use the terminal.
    fn release(&mut self) -> io::Result<()>;

    /// Writes the captured attributes back, exactly as they were.
    fn restore(&mut self, snapshot: &Self::Snapshot) -> io::Result<()>;

    /// Takes the drawing surface back after [TerminalControl::restore].
    fn reacquire(&mut self) -> io::Result<()>;
}

/// Something that can run an editor on a path in the foreground and wait for it.
pub trait EditorLauncher {
    /// Name used in messages and logs.
    fn name(&self) -> &str;

    /// Runs the editor to completion. Errors mean the process never started.
    fn launch(&mut self, path: &Path) -> io::Result<ExitStatus>;
}

/// The configured editor command: a program plus leading arguments, the path goes last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorCommand {
    program: String,
    args: Vec<String>,
}

impl EditorCommand {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Splits a command line like `"code --wait"` on whitespace.
    /// Returns None for a blank command line.
    pub fn parse(cmdline: &str) -> Option<Self> {
        let mut parts = cmdline.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self::new(program, parts.collect()))
    }

    #[inline]
    pub fn program(&self) -> &str {
        &self.program
    }

    #[inline]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Returns true if the program can be found on `PATH` (or is an existing path).
    pub fn exists(&self) -> bool {
        which::which(&self.program).is_ok()
    }
}

impl EditorLauncher for EditorCommand {
    fn name(&self) -> &str {
        &self.program
    }

    fn launch(&mut self, path: &Path) -> io::Result<ExitStatus> {
        Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
    }
}

/// Result of a handoff that did not hit a fatal terminal error.
#[derive(Debug)]
pub enum HandoffOutcome {
    /// A handoff was already in flight; nothing happened.
    Skipped,
    /// The editor ran and exited with a code (zero or not).
    Completed(ExitStatus),
    /// The editor did not start or did not exit normally. The terminal was restored.
    Failed(FmError),
}

impl HandoffOutcome {
    /// Returns true if a child process actually ran, i.e. files may have changed.
    pub fn child_ran(&self) -> bool {
        matches!(
            self,
            HandoffOutcome::Completed(_)
                | HandoffOutcome::Failed(FmError::EditorExitedAbnormally { .. })
        )
    }
}

/// Holds the captured snapshot and restores it when dropped.
struct HandoffGuard<'a, C: TerminalControl> {
    control: &'a mut C,
    snapshot: Option<C::Snapshot>,
}

impl<'a, C: TerminalControl> HandoffGuard<'a, C> {
    fn new(control: &'a mut C, snapshot: C::Snapshot) -> Self {
        Self {
            control,
            snapshot: Some(snapshot),
        }
    }

    /// Restores the snapshot and reacquires the screen, reporting failures.
    fn finish(mut self) -> io::Result<()> {
        match self.snapshot.take() {
            Some(snapshot) => {
                self.control.restore(&snapshot)?;
                self.control.reacquire()
            }
            None => Ok(()),
        }
    }
}

impl<C: TerminalControl> Drop for HandoffGuard<'_, C> {
    fn drop(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            tracing::warn!("handoff aborted, restoring terminal from guard");
            let _ = self.control.restore(&snapshot);
            // while unwinding the screen stays released, the outer teardown runs next
            if !std::thread::panicking() {
                let _ = self.control.reacquire();
            }
        }
    }
}

/// Owns the terminal control and the handoff phase for the whole process.
pub struct TerminalSession<C: TerminalControl> {
    control: C,
    phase: SessionPhase,
}

impl<C: TerminalControl> TerminalSession<C> {
    pub fn new(control: C) -> Self {
        Self {
            control,
            phase: SessionPhase::Browsing,
        }
    }

    #[inline]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[inline]
    pub fn is_browsing(&self) -> bool {
        self.phase == SessionPhase::Browsing
    }

    #[inline]
    pub fn control(&self) -> &C {
        &self.control
    }

    #[inline]
    pub fn control_mut(&mut self) -> &mut C {
        &mut self.control
    }

    /// Forces a phase. Only meant for tests that need an in-flight session.
    #[doc(hidden)]
    pub fn set_phase(&mut self, phase: SessionPhase) {
        self.phase = phase;
    }

    /// Hands the terminal to `editor` for `path` and takes it back.
    ///
    /// Blocks until the editor exits.
    /// # Returns
    /// - `Ok(Skipped)` if a handoff is already in flight.
    /// - `Ok(Completed)` / `Ok(Failed)` once the terminal is back in browsing mode.
    /// - `Err` only for fatal terminal-state failures.
    pub fn hand_off<E: EditorLauncher>(
        &mut self,
        editor: &mut E,
        path: &Path,
    ) -> FmResult<HandoffOutcome> {
        if self.phase != SessionPhase::Browsing {
            tracing::debug!(phase = ?self.phase, "handoff requested while in flight, ignoring");
            return Ok(HandoffOutcome::Skipped);
        }

        self.phase = SessionPhase::Suspending;
        let snapshot = self
            .control
            .capture()
            .map_err(FmError::TerminalStateCaptureFailed)?;
        let mut guard = HandoffGuard::new(&mut self.control, snapshot);

        if let Err(source) = guard.control.release() {
            self.phase = SessionPhase::Resuming;
            guard
                .finish()
                .map_err(FmError::TerminalStateRestoreFailed)?;
            self.phase = SessionPhase::Browsing;
            return Ok(HandoffOutcome::Failed(FmError::EditorLaunchFailed {
                editor: editor.name().to_string(),
                source,
            }));
        }

        self.phase = SessionPhase::EditorRunning;
        tracing::info!(editor = editor.name(), path = %path.display(), "editor started");
        let result = editor.launch(path);

        self.phase = SessionPhase::Resuming;
        guard
            .finish()
            .map_err(FmError::TerminalStateRestoreFailed)?;
        self.phase = SessionPhase::Browsing;

        let outcome = match result {
            Ok(status) if status.code().is_some() => HandoffOutcome::Completed(status),
            Ok(status) => HandoffOutcome::Failed(FmError::EditorExitedAbnormally {
                editor: editor.name().to_string(),
                status,
            }),
            Err(source) => HandoffOutcome::Failed(FmError::EditorLaunchFailed {
                editor: editor.name().to_string(),
                source,
            }),
        };
        tracing::info!(?outcome, "editor handoff finished");
        Ok(outcome)
    }
}
