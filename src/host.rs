//! The application host that menus run inside.
//!
//! Menus do not own a terminal, an event loop or a view hierarchy. They ask
//! the [`Host`] for screen bounds, input focus, the mouse grab, a container
//! to attach popups to, and an idle queue for deferred command execution.
//! [`HeadlessHost`] is a complete in-memory implementation used by tests
//! and by applications that drive menus without a real terminal.

use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::geometry::{Rect, Size};

/// Identity of a view (bar, popup or application widget).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(u32);

impl ViewId {
    /// Allocate a process-unique view id.
    #[must_use]
    pub fn next() -> Self {
        static NEXT: AtomicU32 = AtomicU32::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw id value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view#{}", self.0)
    }
}

/// Work queued for the host's next idle turn.
pub type IdleTask = Box<dyn FnOnce()>;

/// Services a menu needs from the application.
pub trait Host {
    /// Screen bounds in cells (renderer columns and rows).
    fn screen_size(&self) -> Size;

    /// The view that currently has input focus.
    fn focused(&self) -> Option<ViewId>;

    /// Move input focus. `None` clears it.
    fn set_focus(&mut self, view: Option<ViewId>);

    /// Give `view` exclusive ownership of mouse events.
    ///
    /// Returns `false` if another view holds the grab.
    fn grab_mouse(&mut self, view: ViewId) -> bool;

    /// Release the mouse grab.
    fn ungrab_mouse(&mut self);

    /// The view holding the mouse grab.
    fn mouse_grabber(&self) -> Option<ViewId>;

    /// Attach a view to the current top-level container.
    fn add_view(&mut self, view: ViewId, frame: Rect);

    /// Detach a view from the current top-level container.
    fn remove_view(&mut self, view: ViewId);

    /// Run `task` after the current input event has been fully handled.
    fn schedule_idle(&mut self, task: IdleTask);
}

/// In-memory host with no terminal attached.
pub struct HeadlessHost {
    size: Size,
    focus: Option<ViewId>,
    grab: Option<ViewId>,
    container: Vec<(ViewId, Rect)>,
    idle: VecDeque<IdleTask>,
    grabs: usize,
    ungrabs: usize,
}

impl HeadlessHost {
    /// Create a host with a screen of `width` x `height` cells.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: Size::new(width, height),
            focus: None,
            grab: None,
            container: Vec::new(),
            idle: VecDeque::new(),
            grabs: 0,
            ungrabs: 0,
        }
    }

    /// Change the screen size (the caller still has to deliver the resize
    /// event to the menus).
    pub fn resize(&mut self, width: u32, height: u32) {
        self.size = Size::new(width, height);
    }

    /// Views currently attached to the container, in attach order.
    #[must_use]
    pub fn views(&self) -> Vec<ViewId> {
        self.container.iter().map(|(id, _)| *id).collect()
    }

    /// Frame of an attached view.
    #[must_use]
    pub fn frame_of(&self, view: ViewId) -> Option<Rect> {
        self.container
            .iter()
            .find(|(id, _)| *id == view)
            .map(|(_, frame)| *frame)
    }

    /// Check if a view is attached.
    #[must_use]
    pub fn contains_view(&self, view: ViewId) -> bool {
        self.frame_of(view).is_some()
    }

    /// Number of tasks waiting for the next idle turn.
    #[must_use]
    pub fn pending_idle(&self) -> usize {
        self.idle.len()
    }

    /// Run queued idle tasks, including ones queued while running.
    ///
    /// Returns how many tasks ran.
    pub fn run_idle(&mut self) -> usize {
        let mut ran = 0;
        while let Some(task) = self.idle.pop_front() {
            task();
            ran += 1;
        }
        ran
    }

    /// Successful grabs and releases so far.
    #[must_use]
    pub fn grab_counts(&self) -> (usize, usize) {
        (self.grabs, self.ungrabs)
    }
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new(80, 24)
    }
}

impl fmt::Debug for HeadlessHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeadlessHost")
            .field("size", &self.size)
            .field("focus", &self.focus)
            .field("grab", &self.grab)
            .field("container", &self.container)
            .field("idle", &self.idle.len())
            .finish_non_exhaustive()
    }
}

impl Host for HeadlessHost {
    fn screen_size(&self) -> Size {
        self.size
    }

    fn focused(&self) -> Option<ViewId> {
        self.focus
    }

    fn set_focus(&mut self, view: Option<ViewId>) {
        self.focus = view;
    }

    fn grab_mouse(&mut self, view: ViewId) -> bool {
        match self.grab {
            Some(holder) if holder != view => false,
            Some(_) => true,
            None => {
                self.grab = Some(view);
                self.grabs += 1;
                true
            }
        }
    }

    fn ungrab_mouse(&mut self) {
        if self.grab.take().is_some() {
            self.ungrabs += 1;
        }
    }

    fn mouse_grabber(&self) -> Option<ViewId> {
        self.grab
    }

    fn add_view(&mut self, view: ViewId, frame: Rect) {
        if let Some(entry) = self.container.iter_mut().find(|(id, _)| *id == view) {
            entry.1 = frame;
        } else {
            self.container.push((view, frame));
        }
    }

    fn remove_view(&mut self, view: ViewId) {
        self.container.retain(|(id, _)| *id != view);
        if self.focus == Some(view) {
            self.focus = None;
        }
    }

    fn schedule_idle(&mut self, task: IdleTask) {
        self.idle.push_back(task);
    }
}
