//! Configuration options for fbrowse
//!
//! Module for loading and managing configuration settings for fbrowse.
//!
//! Includes:
//! - General settings ([general])
//! - Theme settings ([theme])
//! - Key bindings and the editor command ([input])
//! - Loading from the toml file ([load])

pub mod general;
pub mod input;
pub mod load;
pub mod theme;

pub use general::General;
pub use input::{Editor, Keys};
pub use load::Config;
pub use theme::Theme;
