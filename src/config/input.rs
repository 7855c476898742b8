//! Input configuration options for fbrowse
//!
//! This module defines the key bindings and the editor command which are read from
//! the fbrowse.toml configuration file.

use crate::core::EditorCommand;

use serde::Deserialize;

/// Key bindings for every action, each a list of key strings like `"Ctrl+d"` or `"<c-d>"`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Keys {
    go_up: Vec<String>,
    go_down: Vec<String>,
    activate: Vec<String>,
    go_parent: Vec<String>,
    delete: Vec<String>,
    quit: Vec<String>,
}

/// Editor configuration options
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Editor {
    cmd: String,
}

macro_rules! accessor {
    ($($name:ident),+ $(,)?) => {
        impl Keys {
            $(
                #[inline]
                pub fn $name(&self) -> &[String] {
                    &self.$name
                }
            )+
        }
    };
}

accessor!(go_up, go_down, activate, go_parent, delete, quit);

/// Default input configuration options
impl Default for Keys {
    fn default() -> Self {
        Keys {
            go_up: vec!["Up".into(), "k".into()],
            go_down: vec!["Down".into(), "j".into()],
            activate: vec!["Enter".into()],
            go_parent: vec!["Backspace".into()],
            delete: vec!["Ctrl+d".into()],
            quit: vec!["q".into()],
        }
    }
}

/// Public methods for accessing editor configuration options
impl Editor {
    /// The configured command line, "vim" when blank.
    #[inline]
    pub fn cmd(&self) -> &str {
        let trimmed = self.cmd.trim();
        if trimmed.is_empty() { "vim" } else { trimmed }
    }

    /// The command split into program and leading arguments.
    pub fn command(&self) -> EditorCommand {
        EditorCommand::parse(self.cmd()).unwrap_or_else(|| EditorCommand::new("vim", Vec::new()))
    }
}

/// Default editor configuration options
impl Default for Editor {
    fn default() -> Self {
        Editor { cmd: "vim".into() }
    }
}
