//! Miscellaneous utility functions for fbrowse.
//!
//! This module holds the [helpers] submodule (color parsing, home path handling, log file location)
//! and the [cli] submodule for command-line flags.

pub mod cli;
pub mod helpers;

pub use helpers::{get_home, log_file_path, parse_color, shorten_home_path};
