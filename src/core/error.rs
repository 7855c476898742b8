//! Error types for fbrowse.
//!
//! Every fallible filesystem, process and terminal operation returns [`FmResult<T>`].
//! Most variants are recoverable and end up as a status message in the UI.
//! Only the terminal-state failures (and raw terminal I/O) are fatal, see [`FmError::is_fatal`].

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

/// Unified error type for the directory model and the session controller.
#[derive(Debug, thiserror::Error)]
pub enum FmError {
    /// The directory could not be listed (missing, not a directory, permission).
    #[error("cannot read {}: {source}", path.display())]
    Unreadable { path: PathBuf, source: io::Error },

    /// A single entry could not be stat'ed, usually because it vanished.
    #[error("cannot stat {}: {source}", path.display())]
    StatFailed { path: PathBuf, source: io::Error },

    /// Removing an entry failed.
    #[error("cannot delete {}: {source}", path.display())]
    DeleteFailed { path: PathBuf, source: io::Error },

    /// The editor could not be found or spawned.
    #[error("failed to launch {editor}: {source}")]
    EditorLaunchFailed { editor: String, source: io::Error },

    /// The editor was terminated without an exit code (killed by a signal).
    #[error("{editor} terminated abnormally ({status})")]
    EditorExitedAbnormally { editor: String, status: ExitStatus },

    #[error("could not capture terminal state: {0}")]
    TerminalStateCaptureFailed(#[source] io::Error),

    #[error("could not restore terminal state: {0}")]
    TerminalStateRestoreFailed(#[source] io::Error),

    /// Drawing or event I/O on the terminal failed.
    #[error("terminal i/o error: {0}")]
    Io(#[from] io::Error),
}

impl FmError {
    /// Returns true for errors after which the terminal cannot be trusted anymore.
    ///
    /// The runner tears the terminal down and the process exits on these.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            FmError::TerminalStateCaptureFailed(_)
                | FmError::TerminalStateRestoreFailed(_)
                | FmError::Io(_)
        )
    }
}

/// Convenience alias used throughout fbrowse.
pub type FmResult<T> = Result<T, FmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreadable_displays_path_and_cause() {
        let err = FmError::Unreadable {
            path: PathBuf::from("/missing"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.to_string(), "cannot read /missing: not found");
        assert!(!err.is_fatal());
    }

    #[test]
    fn terminal_failures_are_fatal() {
        let capture = FmError::TerminalStateCaptureFailed(io::Error::other("no tty"));
        let restore = FmError::TerminalStateRestoreFailed(io::Error::other("no tty"));
        assert!(capture.is_fatal());
        assert!(restore.is_fatal());
        assert_eq!(
            restore.to_string(),
            "could not restore terminal state: no tty"
        );
    }

    #[test]
    fn editor_and_filesystem_failures_are_recoverable() {
        let launch = FmError::EditorLaunchFailed {
            editor: "vim".into(),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        let delete = FmError::DeleteFailed {
            path: PathBuf::from("/tmp/x"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(!launch.is_fatal());
        assert!(!delete.is_fatal());
        assert_eq!(launch.to_string(), "failed to launch vim: not found");
    }
}
