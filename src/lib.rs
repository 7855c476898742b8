//! Internal library crate for fbrowse.
//!
//! The shipped application is the `fb` binary (`src/main.rs`).
//!
//! This library exists to share code between the binary and the integration tests.
//! It is not considered a library for external use.

pub mod app;
pub mod config;
pub mod core;
pub mod ui;
pub mod utils;
