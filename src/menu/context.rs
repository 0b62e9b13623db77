//! Context menus: a menu group shown at an arbitrary screen position.
//!
//! A [`ContextMenu`] is a description. [`ContextMenu::show`] builds a
//! transient [`MenuBar`] holding the group as its only top-level entry and
//! parks it in the [`MenuSystem`], which routes events to it and drops it
//! once its chain closes.

use std::cell::Cell;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::geometry::{Point, Rect};
use crate::host::{Host, ViewId};
use crate::input::{Event, KeyCode, KeyEvent, KeyModifiers, MouseFlags};
use crate::logging::{LogLevel, emit_log, log_enabled};
use crate::menu::bar::ContextPlacement;
use crate::menu::observer::MenuObserver;
use crate::menu::{EntryId, MenuBar, MenuSystem, MenuTree};

/// How a context menu is triggered and placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContextMenuOptions {
    /// Pull a popup that would start left of or above the screen back to
    /// column/row 0. When off, the negative position is kept and the
    /// renderer clips.
    pub force_minimum_pos_to_zero: bool,
    pub trigger_key: KeyEvent,
    pub trigger_mouse_flags: MouseFlags,
    pub use_single_frame_submenus: bool,
}

impl Default for ContextMenuOptions {
    fn default() -> Self {
        Self {
            force_minimum_pos_to_zero: true,
            trigger_key: KeyEvent::new(KeyCode::F(10), KeyModifiers::SHIFT),
            trigger_mouse_flags: MouseFlags::BUTTON3_CLICKED,
            use_single_frame_submenus: false,
        }
    }
}

/// Flags the shown context menu for removal once its chain closed.
struct DismissOnClose(Rc<Cell<bool>>);

impl MenuObserver for DismissOnClose {
    fn all_closed(&mut self) {
        self.0.set(true);
    }
}

/// A pop-up menu not attached to a bar.
#[derive(Debug)]
pub struct ContextMenu {
    id: ViewId,
    tree: MenuTree,
    entries: EntryId,
    host_frame: Option<Rect>,
    position: Option<Point>,
    options: ContextMenuOptions,
}

impl ContextMenu {
    /// Create a context menu for the group `entries` of `tree`.
    pub fn new(tree: MenuTree, entries: EntryId) -> Result<Self> {
        let entry = tree.entry(entries)?;
        if !tree.is_group(entries) || entry.parent().is_some() {
            return Err(Error::InvalidArgument(format!(
                "context menu needs a top-level group, got {:?}",
                entry.title()
            )));
        }
        Ok(Self {
            id: ViewId::next(),
            tree,
            entries,
            host_frame: None,
            position: None,
            options: ContextMenuOptions::default(),
        })
    }

    /// Show at `position`.
    #[must_use]
    pub fn with_position(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }

    /// Anchor to a view: the popup opens on the row below `frame`, or
    /// above it when there is no room below.
    #[must_use]
    pub fn with_host_frame(mut self, frame: Rect) -> Self {
        self.host_frame = Some(frame);
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: ContextMenuOptions) -> Self {
        self.options = options;
        self
    }

    /// Identity used by the [`MenuSystem`] slot.
    #[must_use]
    pub fn id(&self) -> ViewId {
        self.id
    }

    #[must_use]
    pub fn tree(&self) -> &MenuTree {
        &self.tree
    }

    #[must_use]
    pub fn entries(&self) -> EntryId {
        self.entries
    }

    #[must_use]
    pub fn options(&self) -> &ContextMenuOptions {
        &self.options
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = Some(position);
    }

    pub fn set_host_frame(&mut self, frame: Option<Rect>) {
        self.host_frame = frame;
    }

    /// Top-left corner the popup is requested at.
    ///
    /// An explicit position wins; otherwise the bottom-left corner of the
    /// anchor frame; otherwise the screen origin.
    #[must_use]
    pub fn position(&self) -> Point {
        match (self.position, self.host_frame) {
            (Some(position), _) => position,
            (None, Some(frame)) => Point::new(frame.x, frame.bottom()),
            (None, None) => Point::default(),
        }
    }

    /// Check if `event` is this menu's trigger key or mouse button.
    #[must_use]
    pub fn matches_trigger(&self, event: &Event) -> bool {
        match event {
            Event::Key(key) => key.same_chord(&self.options.trigger_key),
            Event::Mouse(mouse) => mouse.flags.intersects(self.options.trigger_mouse_flags),
            Event::Resize(_) => false,
        }
    }

    /// Check if this menu is the one shown.
    #[must_use]
    pub fn is_shown(&self, system: &MenuSystem) -> bool {
        system.context_owner() == Some(self.id)
    }

    /// Show the menu, hiding any other shown context menu first.
    ///
    /// Returns `Ok(false)` when an observer vetoed the opening.
    pub fn show(&self, system: &mut MenuSystem, host: &mut dyn Host) -> Result<bool> {
        system.hide_context(host);

        let placement = ContextPlacement {
            position: self.position(),
            anchor: self.host_frame,
            force_min_zero: self.options.force_minimum_pos_to_zero,
        };
        let mut bar =
            MenuBar::new(system, self.tree.clone(), vec![self.entries])?.for_context(placement);
        bar.set_use_single_frame_submenus(self.options.use_single_frame_submenus);
        let closed = Rc::new(Cell::new(false));
        bar.add_observer(Box::new(DismissOnClose(Rc::clone(&closed))));
        if !bar.open(host, 0)? {
            return Ok(false);
        }
        if log_enabled(LogLevel::Debug) {
            let frame = bar.chain().first().map(|p| p.frame());
            emit_log(
                LogLevel::Debug,
                "menu.context",
                &format!("context menu {} shown at {frame:?}", self.id),
            );
        }
        system.install_context(self.id, bar, closed);
        Ok(true)
    }

    /// Hide this menu if it is the one shown.
    pub fn hide(&self, system: &mut MenuSystem, host: &mut dyn Host) -> bool {
        self.is_shown(system) && system.hide_context(host)
    }
}
