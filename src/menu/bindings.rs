//! Positional key bindings for menu navigation.
//!
//! Shortcuts and hot keys are resolved by the bar before this table is
//! consulted; the table only maps chords to positional commands.

use std::collections::HashMap;

use crate::input::{KeyCode, KeyEvent, KeyModifiers};

/// A positional menu command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MenuCommand {
    LineUp,
    LineDown,
    Left,
    Right,
    /// Esc: close one level, or everything at the top level.
    Cancel,
    /// Enter: activate the highlighted row.
    Accept,
    /// Open the bar when closed, close it when open.
    ToggleExpand,
}

/// Chord to command table.
#[derive(Clone, Debug)]
pub struct KeyBindings {
    map: HashMap<KeyEvent, MenuCommand>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::with_activation_key(KeyEvent::key(KeyCode::F(9)))
    }
}

impl KeyBindings {
    /// An empty table.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// The default navigation table with `activation` bound to
    /// [`MenuCommand::ToggleExpand`] next to Ctrl+Space.
    #[must_use]
    pub fn with_activation_key(activation: KeyEvent) -> Self {
        let mut bindings = Self::empty();
        bindings.bind(KeyEvent::key(KeyCode::Up), MenuCommand::LineUp);
        bindings.bind(KeyEvent::key(KeyCode::Down), MenuCommand::LineDown);
        bindings.bind(KeyEvent::key(KeyCode::Left), MenuCommand::Left);
        bindings.bind(KeyEvent::key(KeyCode::Right), MenuCommand::Right);
        bindings.bind(KeyEvent::key(KeyCode::Esc), MenuCommand::Cancel);
        bindings.bind(KeyEvent::key(KeyCode::Enter), MenuCommand::Accept);
        bindings.bind(
            KeyEvent::new(KeyCode::Char(' '), KeyModifiers::CTRL),
            MenuCommand::ToggleExpand,
        );
        bindings.bind(activation, MenuCommand::ToggleExpand);
        bindings
    }

    /// Bind `key` to `command`, returning the command it replaced.
    pub fn bind(&mut self, key: KeyEvent, command: MenuCommand) -> Option<MenuCommand> {
        self.map.insert(key.normalized(), command)
    }

    /// Remove the binding for `key`.
    pub fn unbind(&mut self, key: &KeyEvent) -> Option<MenuCommand> {
        self.map.remove(&key.normalized())
    }

    /// Replace every binding of `command` with `key`.
    pub fn rebind(&mut self, command: MenuCommand, key: KeyEvent) {
        self.map.retain(|_, c| *c != command);
        self.bind(key, command);
    }

    /// Command bound to `key`.
    #[must_use]
    pub fn command_for(&self, key: &KeyEvent) -> Option<MenuCommand> {
        self.map.get(&key.normalized()).copied()
    }

    /// Chords bound to `command`.
    #[must_use]
    pub fn keys_for(&self, command: MenuCommand) -> Vec<KeyEvent> {
        let mut keys: Vec<KeyEvent> = self
            .map
            .iter()
            .filter(|(_, c)| **c == command)
            .map(|(k, _)| *k)
            .collect();
        keys.sort_by_key(ToString::to_string);
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let bindings = KeyBindings::default();
        assert_eq!(
            bindings.command_for(&KeyEvent::key(KeyCode::Up)),
            Some(MenuCommand::LineUp)
        );
        assert_eq!(
            bindings.command_for(&KeyEvent::key(KeyCode::Esc)),
            Some(MenuCommand::Cancel)
        );
        assert_eq!(
            bindings.command_for(&KeyEvent::key(KeyCode::F(9))),
            Some(MenuCommand::ToggleExpand)
        );
        assert_eq!(
            bindings.command_for(&KeyEvent::with_ctrl(KeyCode::Char(' '))),
            Some(MenuCommand::ToggleExpand)
        );
        assert_eq!(bindings.command_for(&KeyEvent::char('x')), None);
    }

    #[test]
    fn test_rebind_activation() {
        let mut bindings = KeyBindings::default();
        bindings.rebind(MenuCommand::ToggleExpand, KeyEvent::key(KeyCode::F(10)));
        assert_eq!(bindings.command_for(&KeyEvent::key(KeyCode::F(9))), None);
        assert_eq!(
            bindings.keys_for(MenuCommand::ToggleExpand),
            vec![KeyEvent::key(KeyCode::F(10))]
        );
    }

    #[test]
    fn test_letter_bindings_ignore_case() {
        let mut bindings = KeyBindings::empty();
        bindings.bind(KeyEvent::char('j'), MenuCommand::LineDown);
        assert_eq!(
            bindings.command_for(&KeyEvent::char('J')),
            Some(MenuCommand::LineDown)
        );
        assert_eq!(bindings.unbind(&KeyEvent::char('j')), Some(MenuCommand::LineDown));
    }
}
