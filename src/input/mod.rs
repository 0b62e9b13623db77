//! Input event types consumed by menus.
//!
//! Parsing terminal byte streams is the host's job; menus only see the
//! decoded keyboard, mouse and resize events defined here.

mod event;
mod keyboard;
mod mouse;

pub use event::{Event, ResizeEvent};
pub use keyboard::{KeyCode, KeyEvent, KeyModifiers};
pub use mouse::{MouseEvent, MouseFlags};
