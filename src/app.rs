//! Application state and input handling for fbrowse.
//!
//! - [nav]: the [DirectoryView] model (load, select, navigate, delete, details)
//! - [keymap]: key parsing and the key to action mapping
//! - [state]: [AppState], the object the event loop and renderer work on
//! - [handlers]: what each action does

pub mod handlers;
pub mod keymap;
pub mod nav;
pub mod state;

pub use nav::{DeleteMode, Direction, DirectoryView, NavTarget};
pub use state::{AppState, KeypressResult, StatusKind, StatusMessage};
