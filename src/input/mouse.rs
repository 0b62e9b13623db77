//! Mouse event handling.

use bitflags::bitflags;

bitflags! {
    /// What happened in a mouse event, plus the modifiers held.
    ///
    /// A host reports a physical left click as either `BUTTON1_PRESSED` or
    /// `BUTTON1_CLICKED`, not both; menus react to either one.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct MouseFlags: u32 {
        const BUTTON1_PRESSED = 1 << 0;
        const BUTTON1_RELEASED = 1 << 1;
        const BUTTON1_CLICKED = 1 << 2;
        const BUTTON1_DOUBLE_CLICKED = 1 << 3;
        const BUTTON2_PRESSED = 1 << 4;
        const BUTTON2_CLICKED = 1 << 5;
        const BUTTON3_PRESSED = 1 << 6;
        const BUTTON3_RELEASED = 1 << 7;
        const BUTTON3_CLICKED = 1 << 8;
        /// Pointer moved (hover) without a button transition.
        const REPORT_POSITION = 1 << 9;
        const WHEELED_UP = 1 << 10;
        const WHEELED_DOWN = 1 << 11;
        const SHIFT = 1 << 12;
        const CTRL = 1 << 13;
        const ALT = 1 << 14;
    }
}

impl MouseFlags {
    /// Flags that count as "the user pressed or clicked something".
    pub const ANY_PRESS: Self = Self::BUTTON1_PRESSED
        .union(Self::BUTTON1_CLICKED)
        .union(Self::BUTTON1_DOUBLE_CLICKED)
        .union(Self::BUTTON2_PRESSED)
        .union(Self::BUTTON2_CLICKED)
        .union(Self::BUTTON3_PRESSED)
        .union(Self::BUTTON3_CLICKED);

    /// Flags that activate a menu row.
    pub const ACTIVATE: Self = Self::BUTTON1_PRESSED
        .union(Self::BUTTON1_CLICKED)
        .union(Self::BUTTON1_DOUBLE_CLICKED);
}

/// A mouse event in screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MouseEvent {
    /// X position (column).
    pub x: i32,
    /// Y position (row).
    pub y: i32,
    /// Event and modifier flags.
    pub flags: MouseFlags,
}

impl MouseEvent {
    /// Create a new mouse event.
    #[must_use]
    pub fn new(x: i32, y: i32, flags: MouseFlags) -> Self {
        Self { x, y, flags }
    }

    /// Create a left-button press event.
    #[must_use]
    pub fn press(x: i32, y: i32) -> Self {
        Self::new(x, y, MouseFlags::BUTTON1_PRESSED)
    }

    /// Create a left-button click event.
    #[must_use]
    pub fn click(x: i32, y: i32) -> Self {
        Self::new(x, y, MouseFlags::BUTTON1_CLICKED)
    }

    /// Create a left-button release event.
    #[must_use]
    pub fn release(x: i32, y: i32) -> Self {
        Self::new(x, y, MouseFlags::BUTTON1_RELEASED)
    }

    /// Create a hover (position report) event.
    #[must_use]
    pub fn move_to(x: i32, y: i32) -> Self {
        Self::new(x, y, MouseFlags::REPORT_POSITION)
    }

    /// Create a right-button click event.
    #[must_use]
    pub fn right_click(x: i32, y: i32) -> Self {
        Self::new(x, y, MouseFlags::BUTTON3_CLICKED)
    }

    /// Check if any button was pressed or clicked.
    #[must_use]
    pub fn is_press(&self) -> bool {
        self.flags.intersects(MouseFlags::ANY_PRESS)
    }

    /// Check if this press/click activates a menu row.
    #[must_use]
    pub fn is_activation(&self) -> bool {
        self.flags.intersects(MouseFlags::ACTIVATE)
    }

    /// Check if this is a pure position report.
    #[must_use]
    pub fn is_hover(&self) -> bool {
        self.flags.contains(MouseFlags::REPORT_POSITION) && !self.is_press()
    }
}
