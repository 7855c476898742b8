//! Helpers for fbrowse.
//!
//! - Color parsing from names, hex codes or 256-color indices
//! - Locating the home directory
//! - Displaying home directories as "~" in file paths
//! - Locating the log file

use ratatui::style::Color;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// Parses a string (color name, hex or 256-color index) into a ratatui::style::Color
///
/// Supports standard names (red, green, etc.), hex values (#RRGGBB or #RGB)
/// and palette indices ("0" to "255"). Anything else falls back to [Color::Reset].
pub fn parse_color(s: &str) -> Color {
    let s = s.trim();
    match s.to_lowercase().as_str() {
        "default" | "reset" => Color::Reset,
        "yellow" => Color::Yellow,
        "red" => Color::Red,
        "blue" => Color::Blue,
        "green" => Color::Green,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "black" => Color::Black,
        "gray" => Color::Gray,
        "darkgray" => Color::DarkGray,
        _ => {
            if let Ok(idx) = s.parse::<u8>() {
                return Color::Indexed(idx);
            }
            if let Some(hex) = s.strip_prefix('#') {
                let expanded = match hex.len() {
                    6 => hex.to_string(),
                    3 => hex.chars().flat_map(|c| [c, c]).collect(),
                    _ => return Color::Reset,
                };
                if let Ok(rgb) = u32::from_str_radix(&expanded, 16) {
                    return Color::Rgb(
                        ((rgb >> 16) & 0xFF) as u8,
                        ((rgb >> 8) & 0xFF) as u8,
                        (rgb & 0xFF) as u8,
                    );
                }
            }
            // fallback
            Color::Reset
        }
    }
}

#[inline]
pub fn get_home() -> Option<PathBuf> {
    dirs::home_dir()
}

/// Util function to shorten home directory to ~.
/// Used by the path header in the ui render function.
pub fn shorten_home_path<P: AsRef<Path>>(path: P) -> String {
    shorten_with_home(path.as_ref(), get_home().as_deref())
}

fn shorten_with_home(path: &Path, home: Option<&Path>) -> String {
    if let Some(home_dir) = home
        && let Ok(stripped) = path.strip_prefix(home_dir)
    {
        if stripped.as_os_str().is_empty() {
            return "~".to_string();
        }
        return format!("~{}{}", MAIN_SEPARATOR, stripped.display());
    }
    path.display().to_string()
}

/// Where the log file goes: the platform state dir, else the cache dir, else the temp dir.
pub fn log_file_path() -> PathBuf {
    dirs::state_dir()
        .or_else(dirs::cache_dir)
        .unwrap_or_else(std::env::temp_dir)
        .join("fbrowse")
        .join("fbrowse.log")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color_names_and_hex() {
        assert_eq!(parse_color("Cyan"), Color::Cyan);
        assert_eq!(parse_color("default"), Color::Reset);
        assert_eq!(parse_color("#ff8000"), Color::Rgb(255, 128, 0));
        assert_eq!(parse_color("#f80"), Color::Rgb(255, 136, 0));
        assert_eq!(parse_color("236"), Color::Indexed(236));
    }

    #[test]
    fn test_parse_color_fallback() {
        assert_eq!(parse_color("#12"), Color::Reset);
        assert_eq!(parse_color("#zzzzzz"), Color::Reset);
        assert_eq!(parse_color("256"), Color::Reset);
        assert_eq!(parse_color("chartreuse-ish"), Color::Reset);
    }

    #[test]
    fn test_shorten_home_path() {
        let home = Path::new("/home/user");
        assert_eq!(shorten_with_home(Path::new("/home/user"), Some(home)), "~");
        assert_eq!(
            shorten_with_home(Path::new("/home/user/docs"), Some(home)),
            format!("~{}docs", MAIN_SEPARATOR)
        );
        assert_eq!(
            shorten_with_home(Path::new("/home/username"), Some(home)),
            "/home/username"
        );
        assert_eq!(shorten_with_home(Path::new("/etc"), None), "/etc");
    }

    #[test]
    fn test_log_file_name() {
        let path = log_file_path();
        assert!(path.ends_with("fbrowse/fbrowse.log"));
    }
}
