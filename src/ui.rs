//! Terminal UI for fbrowse.
//!
//! - [render]: the per-frame entry point and the screen layout
//! - [panes]: the entry list and the details pane

pub mod panes;
pub mod render;

pub use render::render;
