//! Keyboard event types and key chords.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;

use crate::error::Error;

bitflags! {
    /// Keyboard modifier flags.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        /// Shift key.
        const SHIFT = 0b0000_0001;
        /// Alt/Option key.
        const ALT = 0b0000_0010;
        /// Control key.
        const CTRL = 0b0000_0100;
        /// Super/Meta/Windows key (not widely supported).
        const SUPER = 0b0000_1000;
    }
}

/// A key code representing a keyboard key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Backspace key.
    Backspace,
    /// Enter/Return key.
    Enter,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
    /// Up arrow key.
    Up,
    /// Down arrow key.
    Down,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page Up key.
    PageUp,
    /// Page Down key.
    PageDown,
    /// Tab key.
    Tab,
    /// Shift+Tab (backtab).
    BackTab,
    /// Delete key.
    Delete,
    /// Insert key.
    Insert,
    /// Function key (F1-F24).
    F(u8),
    /// A character key (includes space).
    Char(char),
    /// Escape key.
    Esc,
    /// Menu key.
    Menu,
}

impl KeyCode {
    /// Check if this is a function key.
    #[must_use]
    pub fn is_function_key(&self) -> bool {
        matches!(self, Self::F(_))
    }

    /// Get the character if this is a character key.
    #[must_use]
    pub fn char(&self) -> Option<char> {
        match self {
            Self::Char(c) => Some(*c),
            _ => None,
        }
    }

    fn name(self) -> Option<&'static str> {
        Some(match self {
            Self::Backspace => "Backspace",
            Self::Enter => "Enter",
            Self::Left => "CursorLeft",
            Self::Right => "CursorRight",
            Self::Up => "CursorUp",
            Self::Down => "CursorDown",
            Self::Home => "Home",
            Self::End => "End",
            Self::PageUp => "PageUp",
            Self::PageDown => "PageDown",
            Self::Tab => "Tab",
            Self::BackTab => "BackTab",
            Self::Delete => "Delete",
            Self::Insert => "Insert",
            Self::Esc => "Esc",
            Self::Menu => "Menu",
            Self::Char(' ') => "Space",
            Self::F(_) | Self::Char(_) => return None,
        })
    }

    fn from_name(name: &str) -> Option<Self> {
        const NAMED: &[KeyCode] = &[
            KeyCode::Backspace,
            KeyCode::Enter,
            KeyCode::Left,
            KeyCode::Right,
            KeyCode::Up,
            KeyCode::Down,
            KeyCode::Home,
            KeyCode::End,
            KeyCode::PageUp,
            KeyCode::PageDown,
            KeyCode::Tab,
            KeyCode::BackTab,
            KeyCode::Delete,
            KeyCode::Insert,
            KeyCode::Esc,
            KeyCode::Menu,
            KeyCode::Char(' '),
        ];
        if let Some(code) = NAMED
            .iter()
            .find(|code| code.name().is_some_and(|n| n.eq_ignore_ascii_case(name)))
        {
            return Some(*code);
        }
        match name.to_ascii_lowercase().as_str() {
            "left" => return Some(Self::Left),
            "right" => return Some(Self::Right),
            "up" => return Some(Self::Up),
            "down" => return Some(Self::Down),
            "escape" => return Some(Self::Esc),
            "return" => return Some(Self::Enter),
            _ => {}
        }
        if let Some(num) = name.strip_prefix(|c: char| c == 'F' || c == 'f') {
            if let Ok(n) = num.parse::<u8>() {
                if (1..=24).contains(&n) {
                    return Some(Self::F(n));
                }
            }
        }
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(Self::Char(c)),
            _ => None,
        }
    }
}

/// A keyboard event; also used as the key chord of shortcuts and bindings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// The key code.
    pub code: KeyCode,
    /// Modifier keys held.
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    /// Create a new key event.
    #[must_use]
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Create a key event with no modifiers.
    #[must_use]
    pub fn key(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty())
    }

    /// Create a character key event.
    #[must_use]
    pub fn char(c: char) -> Self {
        Self::key(KeyCode::Char(c))
    }

    /// Create a Ctrl+key event.
    #[must_use]
    pub fn with_ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CTRL)
    }

    /// Create an Alt+key event.
    #[must_use]
    pub fn with_alt(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::ALT)
    }

    /// Check if Shift is held.
    #[must_use]
    pub fn shift(&self) -> bool {
        self.modifiers.contains(KeyModifiers::SHIFT)
    }

    /// Check if Ctrl is held.
    #[must_use]
    pub fn ctrl(&self) -> bool {
        self.modifiers.contains(KeyModifiers::CTRL)
    }

    /// Check if Alt is held.
    #[must_use]
    pub fn alt(&self) -> bool {
        self.modifiers.contains(KeyModifiers::ALT)
    }

    /// The chord with letter keys folded to upper case.
    ///
    /// Terminals report Ctrl+q and Ctrl+Q inconsistently; bindings and
    /// shortcuts compare normalized chords.
    #[must_use]
    pub fn normalized(&self) -> Self {
        match self.code {
            KeyCode::Char(c) if c.is_alphabetic() => {
                let upper = c.to_uppercase().next().unwrap_or(c);
                Self::new(KeyCode::Char(upper), self.modifiers)
            }
            _ => *self,
        }
    }

    /// Check if two chords name the same key combination.
    #[must_use]
    pub fn same_chord(&self, other: &KeyEvent) -> bool {
        self.normalized() == other.normalized()
    }

    /// The upper-cased character pressed, ignoring modifiers.
    ///
    /// This is what hot keys are compared against.
    #[must_use]
    pub fn hotkey_char(&self) -> Option<char> {
        self.code
            .char()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_uppercase().next().unwrap_or(c))
    }
}

impl From<char> for KeyEvent {
    fn from(c: char) -> Self {
        Self::char(c)
    }
}

impl From<KeyCode> for KeyEvent {
    fn from(code: KeyCode) -> Self {
        Self::key(code)
    }
}

/// Formats the chord as a shortcut tag, e.g. `Ctrl+Q` or `Ctrl+Alt+F5`.
impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl() {
            f.write_str("Ctrl+")?;
        }
        if self.alt() {
            f.write_str("Alt+")?;
        }
        if self.shift() {
            f.write_str("Shift+")?;
        }
        if self.modifiers.contains(KeyModifiers::SUPER) {
            f.write_str("Super+")?;
        }
        match self.code {
            KeyCode::F(n) => write!(f, "F{n}"),
            KeyCode::Char(c) if c != ' ' => {
                for upper in c.to_uppercase() {
                    write!(f, "{upper}")?;
                }
                Ok(())
            }
            code => f.write_str(code.name().unwrap_or("?")),
        }
    }
}

impl FromStr for KeyEvent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(Error::ParseKey(s.to_string()));
        }
        // A trailing "++" means the key itself is '+'.
        let (mods, key) = if let Some(prefix) = trimmed.strip_suffix("++") {
            (prefix, "+")
        } else if trimmed == "+" {
            ("", "+")
        } else {
            match trimmed.rsplit_once('+') {
                Some((mods, key)) => (mods, key),
                None => ("", trimmed),
            }
        };
        if key.is_empty() {
            return Err(Error::ParseKey(s.to_string()));
        }

        let mut modifiers = KeyModifiers::empty();
        for part in mods.split('+').filter(|p| !p.is_empty()) {
            modifiers |= match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => KeyModifiers::CTRL,
                "alt" | "option" => KeyModifiers::ALT,
                "shift" => KeyModifiers::SHIFT,
                "super" | "meta" | "cmd" => KeyModifiers::SUPER,
                _ => return Err(Error::ParseKey(s.to_string())),
            };
        }
        let code = KeyCode::from_name(key).ok_or_else(|| Error::ParseKey(s.to_string()))?;
        Ok(Self::new(code, modifiers))
    }
}
