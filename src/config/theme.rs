//! Theme configuration options for fbrowse
//!
//! Colors for the entry list, the details labels, the selection, the path header and the status line,
//! read from the `[theme]` table of fbrowse.toml.

use crate::core::EntryKind;
use crate::utils::parse_color;

use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

/// Theme configuration options
/// # Examples
/// ```toml
/// [theme]
/// directory = "blue"
/// symlink = "#ff00ff"
/// [theme.selection]
/// fg = "black"
/// bg = "cyan"
/// ```
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Theme {
    #[serde(deserialize_with = "deserialize_color_field")]
    directory: Color,
    #[serde(deserialize_with = "deserialize_color_field")]
    symlink: Color,
    #[serde(deserialize_with = "deserialize_color_field")]
    special: Color,
    #[serde(deserialize_with = "deserialize_color_field")]
    label: Color,
    selection: ColorPair,
    path: ColorPair,
    status: ColorPair,
    #[serde(deserialize_with = "deserialize_color_field")]
    error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            directory: Color::Blue,
            symlink: Color::Magenta,
            special: Color::Yellow,
            label: Color::Cyan,
            selection: ColorPair {
                fg: Color::Reset,
                bg: Color::Indexed(236),
            },
            path: ColorPair {
                fg: Color::Magenta,
                ..ColorPair::default()
            },
            status: ColorPair::default(),
            error: Color::Red,
        }
    }
}

impl Theme {
    /// Style of an entry row by kind. Regular files keep the terminal default.
    pub fn entry_style(&self, kind: EntryKind) -> Style {
        let fg = match kind {
            EntryKind::Directory => self.directory,
            EntryKind::Symlink => self.symlink,
            EntryKind::NamedPipe | EntryKind::Socket | EntryKind::Device => self.special,
            EntryKind::RegularFile | EntryKind::Other => Color::Reset,
        };
        Style::default().fg(fg)
    }

    /// Style of the field labels in the details pane.
    pub fn label_style(&self) -> Style {
        Style::default().fg(self.label)
    }

    pub fn selection_style(&self) -> Style {
        self.selection.as_style().add_modifier(Modifier::BOLD)
    }

    pub fn path_style(&self) -> Style {
        self.path.as_style()
    }

    pub fn status_style(&self) -> Style {
        self.status.as_style()
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }
}

/// Foreground/background pair, both default to the terminal colors.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ColorPair {
    #[serde(default = "reset", deserialize_with = "deserialize_color_field")]
    fg: Color,
    #[serde(default = "reset", deserialize_with = "deserialize_color_field")]
    bg: Color,
}

impl Default for ColorPair {
    fn default() -> Self {
        Self {
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

impl ColorPair {
    pub fn as_style(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }
}

fn reset() -> Color {
    Color::Reset
}

fn deserialize_color_field<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(parse_color(&s))
}
