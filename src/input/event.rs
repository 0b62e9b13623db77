//! Input events delivered to the menu system.

use crate::input::keyboard::KeyEvent;
use crate::input::mouse::MouseEvent;

/// An input event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Keyboard event.
    Key(KeyEvent),
    /// Mouse event.
    Mouse(MouseEvent),
    /// Terminal resize event.
    Resize(ResizeEvent),
}

impl Event {
    /// Get the key event if this is one.
    #[must_use]
    pub fn key(&self) -> Option<&KeyEvent> {
        match self {
            Self::Key(e) => Some(e),
            _ => None,
        }
    }

    /// Get the mouse event if this is one.
    #[must_use]
    pub fn mouse(&self) -> Option<&MouseEvent> {
        match self {
            Self::Mouse(e) => Some(e),
            _ => None,
        }
    }

    /// Check if this is a resize event.
    #[must_use]
    pub fn is_resize(&self) -> bool {
        matches!(self, Self::Resize(_))
    }
}

impl From<KeyEvent> for Event {
    fn from(e: KeyEvent) -> Self {
        Self::Key(e)
    }
}

impl From<MouseEvent> for Event {
    fn from(e: MouseEvent) -> Self {
        Self::Mouse(e)
    }
}

impl From<ResizeEvent> for Event {
    fn from(e: ResizeEvent) -> Self {
        Self::Resize(e)
    }
}

/// Terminal resize event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResizeEvent {
    /// New width in columns.
    pub width: u16,
    /// New height in rows.
    pub height: u16,
}

impl ResizeEvent {
    /// Create a new resize event.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyCode;

    #[test]
    fn test_event_accessors() {
        let key = KeyEvent::key(KeyCode::Enter);
        let event = Event::from(key);
        assert_eq!(event.key(), Some(&key));
        assert!(event.mouse().is_none());

        let mouse = MouseEvent::press(1, 2);
        let event = Event::from(mouse);
        assert_eq!(event.mouse(), Some(&mouse));

        let event: Event = ResizeEvent::new(100, 50).into();
        assert!(event.is_resize());
    }
}
