//! Key mapping and action dispatch for fbrowse
//!
//! Maps keys to actions, parsed from the `[keys]` config table.

use crate::config::Keys;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Represents any action in the app: navigation, file, or system.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Nav(NavAction),
    File(FileAction),
    System(SystemAction),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NavAction {
    GoUp,
    GoDown,
    Activate,
    GoParent,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FileAction {
    Delete,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SystemAction {
    Quit,
}

/// Key + modifiers as used in keybind/keymap
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub struct Key {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

/// Stores the mapping from Key to action, built from the config
#[derive(Debug, Clone)]
pub struct Keymap {
    map: HashMap<Key, Action>,
}

impl Keymap {
    #[rustfmt::skip]
    pub fn from_keys(keys: &Keys) -> Self {
        let mut map = HashMap::new();

        use NavAction as N;

        bind(keys.go_up(),      Action::Nav(N::GoUp),                     &mut map);
        bind(keys.go_down(),    Action::Nav(N::GoDown),                   &mut map);
        bind(keys.activate(),   Action::Nav(N::Activate),                 &mut map);
        bind(keys.go_parent(),  Action::Nav(N::GoParent),                 &mut map);
        bind(keys.delete(),     Action::File(FileAction::Delete),         &mut map);
        bind(keys.quit(),       Action::System(SystemAction::Quit),       &mut map);

        Keymap { map }
    }

    /// Looks up the action for a given key event
    pub fn lookup(&self, key: KeyEvent) -> Option<Action> {
        let k = Key {
            code: key.code,
            modifiers: key.modifiers,
        };

        if let Some(action) = self.map.get(&k).copied() {
            return Some(action);
        }

        // Terminals report uppercase letters with SHIFT, bindings store the bare char.
        if matches!(key.code, KeyCode::Char(_)) && key.modifiers.contains(KeyModifiers::SHIFT) {
            let k2 = Key {
                code: key.code,
                modifiers: key.modifiers - KeyModifiers::SHIFT,
            };
            return self.map.get(&k2).copied();
        }
        None
    }
}

/// Parses `"k"`, `"Ctrl+d"`, `"<c-d>"`, `"Backspace"`, `"F5"` and friends.
pub fn parse_key(s: &str) -> Option<Key> {
    let mut modifiers = KeyModifiers::NONE;
    let mut code: Option<KeyCode> = None;

    let is_bracketed = s.starts_with('<') && s.ends_with('>') && s.len() > 2;
    let mut input = if is_bracketed {
        s[1..s.len() - 1].to_string()
    } else {
        s.to_string()
    };

    if is_bracketed && input.contains('-') {
        let parts: Vec<&str> = input.split('-').collect();

        for &prefix in parts.iter().take(parts.len().saturating_sub(1)) {
            match prefix.to_lowercase().as_str() {
                "c" | "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "a" | "m" | "alt" => modifiers |= KeyModifiers::ALT,
                "s" | "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }
        input = parts.last()?.to_string();
    }

    if input.len() == 1 {
        let c = input.chars().next()?;
        return Some(Key {
            code: KeyCode::Char(if modifiers.contains(KeyModifiers::SHIFT) {
                c.to_ascii_uppercase()
            } else {
                c
            }),
            modifiers,
        });
    }

    for part in input.split('+') {
        let p_low = part.to_lowercase();
        match p_low.as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "alt" | "meta" => modifiers |= KeyModifiers::ALT,
            "shift" => modifiers |= KeyModifiers::SHIFT,

            "up" => code = Some(KeyCode::Up),
            "down" => code = Some(KeyCode::Down),
            "left" => code = Some(KeyCode::Left),
            "right" => code = Some(KeyCode::Right),
            "enter" => code = Some(KeyCode::Enter),
            "esc" => code = Some(KeyCode::Esc),
            "backspace" | "back" => code = Some(KeyCode::Backspace),
            "delete" | "del" => code = Some(KeyCode::Delete),
            "tab" => code = Some(KeyCode::Tab),
            "space" | "spc" => code = Some(KeyCode::Char(' ')),

            _ => {
                if part.chars().count() == 1 {
                    let mut c = part.chars().next()?;
                    if modifiers.contains(KeyModifiers::SHIFT) {
                        c = c.to_ascii_uppercase();
                    }
                    code = Some(KeyCode::Char(c));
                } else if p_low.starts_with('f')
                    && p_low.len() > 1
                    && p_low[1..].chars().all(|c| c.is_ascii_digit())
                {
                    let n = p_low[1..].parse().ok()?;
                    code = Some(KeyCode::F(n));
                } else if part.is_empty() {
                    continue;
                } else {
                    return None;
                }
            }
        }
    }

    Some(Key {
        code: code?,
        modifiers,
    })
}

fn bind(key_list: &[String], action: Action, map: &mut HashMap<Key, Action>) {
    for k in key_list {
        match parse_key(k) {
            Some(key) => {
                map.insert(key, action);
            }
            None => tracing::warn!(key = %k, ?action, "ignoring unparsable key binding"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn parse_key_forms() {
        let ctrl_d = Key {
            code: KeyCode::Char('d'),
            modifiers: KeyModifiers::CONTROL,
        };
        assert_eq!(parse_key("Ctrl+d"), Some(ctrl_d));
        assert_eq!(parse_key("<c-d>"), Some(ctrl_d));
        assert_eq!(parse_key("Backspace").map(|k| k.code), Some(KeyCode::Backspace));
        assert_eq!(parse_key("F5").map(|k| k.code), Some(KeyCode::F(5)));
        assert_eq!(parse_key("+").map(|k| k.code), Some(KeyCode::Char('+')));
        assert_eq!(parse_key("<x-d>"), None);
        assert_eq!(parse_key("hyper+d"), None);
    }

    #[test]
    fn default_bindings() {
        let keymap = Keymap::from_keys(&Keys::default());
        assert_eq!(
            keymap.lookup(press(KeyCode::Char('j'), KeyModifiers::NONE)),
            Some(Action::Nav(NavAction::GoDown))
        );
        assert_eq!(
            keymap.lookup(press(KeyCode::Up, KeyModifiers::NONE)),
            Some(Action::Nav(NavAction::GoUp))
        );
        assert_eq!(
            keymap.lookup(press(KeyCode::Enter, KeyModifiers::NONE)),
            Some(Action::Nav(NavAction::Activate))
        );
        assert_eq!(
            keymap.lookup(press(KeyCode::Char('d'), KeyModifiers::CONTROL)),
            Some(Action::File(FileAction::Delete))
        );
        assert_eq!(keymap.lookup(press(KeyCode::Char('d'), KeyModifiers::NONE)), None);
        assert_eq!(
            keymap.lookup(press(KeyCode::Char('q'), KeyModifiers::NONE)),
            Some(Action::System(SystemAction::Quit))
        );
    }
}
