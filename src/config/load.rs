//! The main config loading module for fbrowse.
//!
//! Handles loading and deserializing settings from `fbrowse.toml`.
//!
//! Provides the main [Config] struct, as well as the internal [RawConfig] used for parsing.
//!
//! Also implements default config generation for `fb --init`.

use crate::config::{Editor, General, Keys, Theme};
use crate::utils::get_home;

use serde::Deserialize;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Raw configuration as read from the toml file.
/// Every table is optional and falls back to its defaults.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub(crate) struct RawConfig {
    general: General,
    theme: Theme,
    editor: Editor,
    keys: Keys,
}

/// Main configuration struct for fbrowse
#[derive(Debug, Clone, Default)]
pub struct Config {
    general: General,
    theme: Theme,
    editor: Editor,
    keys: Keys,
}

impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        Self {
            general: raw.general,
            theme: raw.theme,
            editor: raw.editor,
            keys: raw.keys,
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    /// If the file does not exist or fails to parse, returns the default configuration.
    ///
    /// Called by the entry point before the terminal is taken over.
    pub fn load() -> Self {
        let path = Self::default_path();

        if !path.exists() {
            eprintln!(
                "No fbrowse.toml config file found. Using internal defaults. (Tip: run 'fb --init' to generate a config file.)"
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Read and parse a specific config file.
    pub fn load_from(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> io::Result<Self> {
        toml::from_str::<RawConfig>(content)
            .map(Config::from)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))
    }

    #[inline]
    pub fn general(&self) -> &General {
        &self.general
    }

    #[inline]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    #[inline]
    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    #[inline]
    pub fn keys(&self) -> &Keys {
        &self.keys
    }

    /// Determine the default configuration file path.
    /// Checks the FBROWSE_CONFIG environment variable first,
    /// then XDG_CONFIG_HOME,
    /// then defaults to ~/.config/fbrowse/fbrowse.toml.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("FBROWSE_CONFIG") {
            return PathBuf::from(path);
        }

        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg_config).join("fbrowse/fbrowse.toml");
        }

        if let Some(home) = get_home() {
            return home.join(".config/fbrowse/fbrowse.toml");
        }
        PathBuf::from("fbrowse.toml")
    }

    /// Generate a default configuration file at the specified path.
    /// If the file already exists, returns an error.
    pub fn generate_default(path: &Path) -> io::Result<()> {
        if path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("Config file already exists at {}", path.display()),
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_TOML)?;
        println!("Default config generated at {}", path.display());
        Ok(())
    }
}

const DEFAULT_TOML: &str = r##"# fbrowse.toml - default configuration for fbrowse

# Note:
# Commented values are the internal defaults of fbrowse
# Use hex codes (eg. "#RRGGBB") or terminal colors ("cyan")

[general]
# Move deleted entries to the trash instead of removing them
# move_to_trash = false
# One of "error", "warn", "info", "debug", "trace"
# log_level = "info"

[editor]
# cmd = "vim"

[theme]
# directory = "blue"
# symlink = "magenta"
# special = "yellow"
# label = "cyan"
# error = "red"

# [theme.selection]
# fg = "default"
# bg = "236"

# [theme.path]
# fg = "magenta"

[keys]
# go_up = ["Up", "k"]
# go_down = ["Down", "j"]
# activate = ["Enter"]
# go_parent = ["Backspace"]
# delete = ["Ctrl+d"]
# quit = ["q"]
"##;
