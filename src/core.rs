//! Core runtime logic for fbrowse.
//!
//! This module contains the non-UI "engine" pieces used by the application:
//! - [fm]: directory listing and entry metadata (see [browse_dir], [EntryRef], [EntryDetails]).
//! - [formatter]: formatting helpers for permissions, sizes, times and kinds.
//! - [session]: the terminal handoff state machine used to run the external editor.
//! - [terminal]: terminal setup/teardown and the main crossterm/ratatui event loop.
//! - [error]: the [FmError] type shared by all of the above.

pub mod error;
pub mod fm;
pub mod formatter;
pub mod session;
pub mod terminal;

pub use error::{FmError, FmResult};
pub use fm::{EntryDetails, EntryKind, EntryRef, browse_dir, compare_entries};
pub use formatter::{
    format_attributes, format_file_size, format_file_time, format_file_type, sanitize_name,
};
pub use session::{
    EditorCommand, EditorLauncher, HandoffOutcome, SessionPhase, TerminalControl, TerminalSession,
};
