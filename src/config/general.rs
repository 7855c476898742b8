//! The general configuration settings for fbrowse.
//!
//! This module defines the [General] struct for deserializing the `[general]` table:
//! how deletes are performed and how verbose the log file is.

use serde::Deserialize;
use tracing::Level;

use std::str::FromStr;

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct General {
    move_to_trash: bool,
    log_level: String,
}

impl Default for General {
    fn default() -> Self {
        General {
            move_to_trash: false,
            log_level: "info".into(),
        }
    }
}

impl General {
    #[inline]
    pub fn move_to_trash(&self) -> bool {
        self.move_to_trash
    }

    /// The configured log level. Unknown values fall back to `INFO`.
    pub fn log_level(&self) -> Level {
        Level::from_str(self.log_level.trim()).unwrap_or(Level::INFO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_parsing() -> Result<(), Box<dyn std::error::Error>> {
        let general: General = toml::from_str(r#"log_level = "debug""#)?;
        assert_eq!(general.log_level(), Level::DEBUG);
        assert!(!general.move_to_trash());

        let bogus: General = toml::from_str(r#"log_level = "chatty""#)?;
        assert_eq!(bogus.log_level(), Level::INFO);
        Ok(())
    }
}
