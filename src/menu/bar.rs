//! The menu bar and the chain of popups it keeps open.
//!
//! A [`MenuBar`] is the only thing the application talks to. It resolves
//! input against shortcuts, hot keys and [`KeyBindings`] (in that order),
//! keeps the open chain consistent with the tree, and hands the mouse
//! grab and input focus back and forth with the [`Host`].
//!
//! The chain is a plain stack: index 0 hangs below the bar, every further
//! level is the sub-menu of the highlighted row one level up.

use crate::error::{Error, Result};
use crate::geometry::{Point, Rect};
use crate::host::{Host, ViewId};
use crate::input::{Event, KeyEvent, MouseEvent};
use crate::logging::{LogLevel, emit_log, log_enabled};
use crate::menu::bindings::{KeyBindings, MenuCommand};
use crate::menu::layout::{place_cascade, place_context, place_in_place, place_top_level};
use crate::menu::observer::{ClosingEvent, MenuObserver, Observers};
use crate::menu::popup::{Direction, MenuPopup, PopupAction};
use crate::menu::render::{BarItem, Canvas};
use crate::menu::system::MenuSystem;
use crate::menu::{EntryId, MenuTree};

/// Where a context menu's popup goes instead of below a bar title.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ContextPlacement {
    pub position: Point,
    pub anchor: Option<Rect>,
    pub force_min_zero: bool,
}

/// A bar of top-level menus.
#[derive(Debug)]
pub struct MenuBar {
    tree: MenuTree,
    top: Vec<EntryId>,
    view: ViewId,
    frame: Rect,
    selected: isize,
    selected_sub: isize,
    chain: Vec<MenuPopup>,
    /// Bar holds focus with a simple entry highlighted and no popup.
    active: bool,
    saved_focus: Option<ViewId>,
    single_frame: bool,
    arrows_as_left_right: bool,
    activation_key: KeyEvent,
    bindings: KeyBindings,
    observers: Observers,
    placement: Option<ContextPlacement>,
    log_target: &'static str,
}

fn bar_item_width(tree: &MenuTree, id: EntryId) -> u32 {
    tree.get(id)
        .map_or(0, |e| e.title_columns(tree.width_method()) as u32 + 2)
}

impl MenuBar {
    /// Create a bar showing `top` from `tree`.
    ///
    /// Every top-level id must be a group (simple or not) that is not a
    /// child of another group.
    pub fn new(system: &MenuSystem, tree: MenuTree, top: Vec<EntryId>) -> Result<Self> {
        for id in &top {
            let entry = tree.entry(*id)?;
            if !tree.is_group(*id) {
                return Err(Error::InvalidArgument(format!(
                    "bar entry {:?} is not a group",
                    entry.title()
                )));
            }
            if entry.parent().is_some() {
                return Err(Error::InvalidArgument(format!(
                    "bar entry {:?} belongs to another group",
                    entry.title()
                )));
            }
        }
        let activation_key = system.config().activation_key;
        let width = top.iter().map(|id| bar_item_width(&tree, *id)).sum();
        Ok(Self {
            tree,
            top,
            view: ViewId::next(),
            frame: Rect::new(0, 0, width, 1),
            selected: -1,
            selected_sub: -1,
            chain: Vec::new(),
            active: false,
            saved_focus: None,
            single_frame: false,
            arrows_as_left_right: false,
            activation_key,
            bindings: KeyBindings::with_activation_key(activation_key),
            observers: Observers::default(),
            placement: None,
            log_target: "menu.bar",
        })
    }

    pub(crate) fn for_context(mut self, placement: ContextPlacement) -> Self {
        self.placement = Some(placement);
        self.log_target = "menu.context";
        self
    }

    fn trace(&self, message: impl FnOnce() -> String) {
        if log_enabled(LogLevel::Debug) {
            emit_log(LogLevel::Debug, self.log_target, &message());
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    #[must_use]
    pub fn tree(&self) -> &MenuTree {
        &self.tree
    }

    /// Mutable tree access for enablement and check-state changes.
    ///
    /// Popups re-read the tree on every call, so a change is visible on
    /// the next render.
    pub fn tree_mut(&mut self) -> &mut MenuTree {
        &mut self.tree
    }

    #[must_use]
    pub fn top_entries(&self) -> &[EntryId] {
        &self.top
    }

    /// View id of the bar row.
    #[must_use]
    pub fn view(&self) -> ViewId {
        self.view
    }

    /// Bar row frame.
    #[must_use]
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Move the bar row; popups opened afterwards hang below it.
    pub fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
    }

    /// Selected top-level index, or -1.
    #[must_use]
    pub fn selected(&self) -> isize {
        self.selected
    }

    /// Depth of the deepest open level, or -1.
    #[must_use]
    pub fn selected_sub(&self) -> isize {
        self.selected_sub
    }

    /// Check if any popup is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        !self.chain.is_empty()
    }

    /// Check if the bar holds focus on a simple entry without a popup.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Open popups, root first.
    #[must_use]
    pub fn chain(&self) -> &[MenuPopup] {
        &self.chain
    }

    /// Entry highlighted in the deepest popup.
    #[must_use]
    pub fn current_entry(&self) -> Option<EntryId> {
        self.chain.last().and_then(|p| p.current_entry(&self.tree))
    }

    #[must_use]
    pub fn use_single_frame_submenus(&self) -> bool {
        self.single_frame
    }

    /// Flatten sub-menus into their parent's frame. Clears
    /// `use_arrows_as_left_right` when enabled.
    pub fn set_use_single_frame_submenus(&mut self, value: bool) {
        self.single_frame = value;
        if value {
            self.arrows_as_left_right = false;
        }
    }

    #[must_use]
    pub fn use_arrows_as_left_right(&self) -> bool {
        self.arrows_as_left_right
    }

    /// Cascade into a sub-menu as soon as Up/Down lands on it. Clears
    /// `use_single_frame_submenus` when enabled.
    pub fn set_use_arrows_as_left_right(&mut self, value: bool) {
        self.arrows_as_left_right = value;
        if value {
            self.single_frame = false;
        }
    }

    #[must_use]
    pub fn activation_key(&self) -> KeyEvent {
        self.activation_key
    }

    /// Replace the key that opens and closes the bar.
    pub fn set_activation_key(&mut self, key: KeyEvent) {
        self.bindings.unbind(&self.activation_key);
        self.bindings.bind(key, MenuCommand::ToggleExpand);
        self.activation_key = key;
    }

    #[must_use]
    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn bindings_mut(&mut self) -> &mut KeyBindings {
        &mut self.bindings
    }

    /// Subscribe to transitions.
    pub fn add_observer(&mut self, observer: Box<dyn MenuObserver>) {
        self.observers.push(observer);
    }

    fn engaged(&self) -> bool {
        self.active || !self.chain.is_empty()
    }

    fn selected_entry(&self) -> Option<EntryId> {
        usize::try_from(self.selected)
            .ok()
            .and_then(|i| self.top.get(i))
            .copied()
    }

    /// Sub-menu of the highlighted row, unless that row is disabled.
    fn current_sub(&self) -> Option<EntryId> {
        self.current_entry()
            .filter(|id| self.tree.is_enabled(*id))
            .and_then(|id| self.tree.sub_menu_of(id))
    }

    /// Move the deepest highlight off a row that was disabled since it was
    /// last drawn.
    fn refresh_deepest(&mut self) {
        if let Some(popup) = self.chain.last_mut() {
            popup.refresh(&self.tree);
        }
    }

    fn owns_view(&self, view: ViewId) -> bool {
        view == self.view || self.chain.iter().any(|p| p.view() == view)
    }

    fn release_grab(&self, host: &mut dyn Host) {
        if host.mouse_grabber().is_some_and(|v| self.owns_view(v)) {
            host.ungrab_mouse();
        }
    }

    fn take_grab(&self, host: &mut dyn Host, view: ViewId) {
        self.release_grab(host);
        if !host.grab_mouse(view) {
            self.trace(|| format!("mouse grab for {view} refused"));
        }
    }

    // ------------------------------------------------------------------
    // Bar geometry
    // ------------------------------------------------------------------

    /// Screen column where the title at `index` starts.
    #[must_use]
    pub fn title_x(&self, index: usize) -> i32 {
        let offset: u32 = self
            .top
            .iter()
            .take(index)
            .map(|id| bar_item_width(&self.tree, *id))
            .sum();
        self.frame.x + offset as i32
    }

    /// Top-level index whose title covers `(x, y)`.
    #[must_use]
    pub fn item_at(&self, x: i32, y: i32) -> Option<usize> {
        if self.placement.is_some() || y != self.frame.y {
            return None;
        }
        let mut left = self.frame.x;
        for (i, id) in self.top.iter().enumerate() {
            let right = left + bar_item_width(&self.tree, *id) as i32;
            if x >= left && x < right {
                return Some(i);
            }
            left = right;
        }
        None
    }

    fn popup_at(&self, x: i32, y: i32) -> Option<usize> {
        (0..self.chain.len())
            .rev()
            .find(|i| self.chain[*i].is_visible() && self.chain[*i].frame().contains(x, y))
    }

    // ------------------------------------------------------------------
    // Opening
    // ------------------------------------------------------------------

    /// Open the top-level menu at `index`, closing whatever is open.
    ///
    /// A simple entry is highlighted on the bar instead of opening a
    /// popup. Returns `Ok(false)` when an observer vetoes the transition.
    pub fn open(&mut self, host: &mut dyn Host, index: usize) -> Result<bool> {
        let Some(&group) = self.top.get(index) else {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.top.len(),
            });
        };
        if !self.tree.is_enabled(group) {
            self.trace(|| format!("top-level {index} is disabled"));
            return Ok(false);
        }
        if self.engaged() && !self.close_chain(host, true, false) {
            return Ok(false);
        }
        self.saved_focus = host.focused();

        if self.tree.is_simple(group) {
            self.selected = index as isize;
            self.active = true;
            host.set_focus(Some(self.view));
            self.take_grab(host, self.view);
            self.trace(|| format!("bar active on simple entry {index}"));
            return Ok(true);
        }

        let Ok(shown) = self.observers.opening(group) else {
            self.trace(|| format!("opening top-level {index} vetoed"));
            self.abandon();
            return Ok(false);
        };
        let size = MenuPopup::size_for(&self.tree, shown, false);
        let screen = host.screen_size();
        let frame = match self.placement {
            Some(p) => place_context(p.position, p.anchor, size, screen, p.force_min_zero),
            None => place_top_level(
                Point::new(self.title_x(index), self.frame.y + 1),
                size,
                screen,
            ),
        };
        let mut popup = match MenuPopup::new(&self.tree, group, shown, false, frame) {
            Ok(popup) => popup,
            Err(err) => {
                self.abandon();
                return Err(err);
            }
        };
        popup.previous_focus = self.saved_focus;
        let view = popup.view();
        host.add_view(view, frame);
        host.set_focus(Some(view));
        self.take_grab(host, view);
        self.chain.push(popup);
        self.selected = index as isize;
        self.selected_sub = 0;
        self.active = false;
        self.observers.opened(group, shown);
        self.trace(|| format!("opened top-level {index} at {frame:?}"));
        Ok(true)
    }

    /// Drop the selection left over from a close that was meant to be
    /// followed by a reopen which then failed.
    fn abandon(&mut self) {
        self.saved_focus = None;
        if self.selected >= 0 {
            self.selected = -1;
            self.observers.all_closed();
        }
    }

    /// Open `group` as a sub-menu of the deepest popup.
    ///
    /// `group` must be the sub-menu of that popup's highlighted row.
    pub fn open_submenu(&mut self, host: &mut dyn Host, group: EntryId) -> Result<bool> {
        if self.current_sub() != Some(group) {
            return Err(Error::InvalidArgument(format!(
                "entry {} is not the highlighted sub-menu",
                group.index()
            )));
        }
        self.open_sub(host, group)
    }

    fn open_sub(&mut self, host: &mut dyn Host, sub: EntryId) -> Result<bool> {
        let Some(parent) = self.chain.last() else {
            return Ok(false);
        };
        let parent_view = parent.view();
        let parent_frame = parent.frame();
        let parent_group = parent.group();
        let parent_row = usize::try_from(parent.current_index()).unwrap_or(0);

        let Ok(shown) = self.observers.opening(sub) else {
            self.trace(|| format!("opening sub-menu {} vetoed", sub.index()));
            return Ok(false);
        };
        let screen = host.screen_size();
        let size = MenuPopup::size_for(&self.tree, shown, self.single_frame);
        let frame = if self.single_frame {
            place_in_place(parent_frame, size, screen)
        } else {
            place_cascade(parent_frame, parent_row, size, screen)
        };
        let mut popup = MenuPopup::new(&self.tree, sub, shown, self.single_frame, frame)?;
        popup.previous_focus = Some(parent_view);

        if self.single_frame {
            if let Some(parent) = self.chain.last_mut() {
                parent.visible = false;
            }
            host.remove_view(parent_view);
        }
        let view = popup.view();
        host.add_view(view, frame);
        host.set_focus(Some(view));
        self.take_grab(host, view);
        self.chain.push(popup);
        self.selected_sub = self.chain.len() as isize - 1;
        self.observers.opened(parent_group, shown);
        self.trace(|| {
            format!(
                "opened sub-menu {} at depth {} ({})",
                sub.index(),
                self.selected_sub,
                if self.single_frame { "single-frame" } else { "cascading" }
            )
        });
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Closing
    // ------------------------------------------------------------------

    /// Close the deepest level (`is_submenu`) or the whole chain.
    ///
    /// With `reopen` the top-level selection survives so the caller can
    /// reopen at another index. Returns `false` when nothing was open or an
    /// observer vetoed.
    pub fn close(&mut self, host: &mut dyn Host, reopen: bool, is_submenu: bool) -> bool {
        if is_submenu && self.chain.len() > 1 {
            self.close_submenu(host)
        } else {
            self.close_chain(host, reopen, false)
        }
    }

    /// Close every open level and give focus back to the application.
    pub fn close_all(&mut self, host: &mut dyn Host) -> bool {
        self.close_chain(host, false, false)
    }

    fn close_submenu(&mut self, host: &mut dyn Host) -> bool {
        let depth = self.chain.len();
        if depth < 2 {
            return false;
        }
        let closing = &self.chain[depth - 1];
        let origin = closing.origin();
        let event = ClosingEvent {
            group: closing.group(),
            reopening: false,
            is_submenu: true,
        };
        if self.observers.closing(&event).is_err() {
            let parent = &mut self.chain[depth - 2];
            if let Some(row) = parent.row_of(&self.tree, origin) {
                parent.force_current(row);
            }
            self.trace(|| format!("closing sub-menu {} vetoed", origin.index()));
            return false;
        }

        self.release_grab(host);
        let Some(closed) = self.chain.pop() else {
            return false;
        };
        host.remove_view(closed.view());
        let Some(parent) = self.chain.last_mut() else {
            return false;
        };
        if !parent.visible {
            parent.visible = true;
            host.add_view(parent.view(), parent.frame());
        }
        let parent_view = parent.view();
        host.set_focus(closed.previous_focus());
        self.take_grab(host, parent_view);
        self.selected_sub -= 1;
        self.trace(|| format!("closed sub-menu {}", origin.index()));
        true
    }

    fn close_chain(&mut self, host: &mut dyn Host, reopen: bool, force: bool) -> bool {
        if !self.engaged() {
            return false;
        }
        if !force {
            if let Some(root) = self.chain.first() {
                let event = ClosingEvent {
                    group: root.group(),
                    reopening: reopen,
                    is_submenu: false,
                };
                if self.observers.closing(&event).is_err() {
                    self.trace(|| "closing menu vetoed".to_string());
                    return false;
                }
            }
        }

        self.release_grab(host);
        for popup in self.chain.drain(..).rev() {
            host.remove_view(popup.view());
        }
        host.set_focus(self.saved_focus.take());
        self.active = false;
        self.selected_sub = -1;
        if !reopen {
            self.selected = -1;
            self.observers.all_closed();
        }
        self.trace(|| format!("closed menu (reopen: {reopen}, forced: {force})"));
        true
    }

    /// Close everything without asking observers. Used on resize.
    pub fn force_close(&mut self, host: &mut dyn Host) -> bool {
        self.close_chain(host, false, true)
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Move to the next top-level menu, wrapping around.
    pub fn next_menu(&mut self, host: &mut dyn Host) -> Result<bool> {
        self.step_menu(host, 1)
    }

    /// Move to the previous top-level menu, wrapping around.
    pub fn previous_menu(&mut self, host: &mut dyn Host) -> Result<bool> {
        self.step_menu(host, -1)
    }

    /// Open the nearest enabled top-level entry `delta` steps away.
    fn step_menu(&mut self, host: &mut dyn Host, delta: isize) -> Result<bool> {
        let len = self.top.len() as isize;
        if len < 2 || self.selected < 0 {
            return Ok(false);
        }
        let target = (1..len)
            .map(|step| (self.selected + delta * step).rem_euclid(len) as usize)
            .find(|i| self.tree.is_enabled(self.top[*i]));
        match target {
            Some(index) => self.open(host, index),
            None => Ok(false),
        }
    }

    fn first_enabled_top(&self) -> Option<usize> {
        self.top.iter().position(|id| self.tree.is_enabled(*id))
    }

    fn move_line(&mut self, host: &mut dyn Host, direction: Direction) -> Result<()> {
        if self.chain.is_empty() {
            if direction == Direction::Down {
                if let Some(id) = self.selected_entry() {
                    self.run_entry(host, id);
                }
            }
            return Ok(());
        }
        let moved = match self.chain.last_mut() {
            Some(popup) => popup.move_selection(&self.tree, direction),
            None => false,
        };
        if log_enabled(LogLevel::Debug) {
            let current = self.chain.last().map_or(-1, MenuPopup::current_index);
            emit_log(
                LogLevel::Debug,
                "menu.popup",
                &format!("{direction:?} -> row {current}"),
            );
        }
        if moved && self.arrows_as_left_right {
            if let Some(sub) = self.current_sub() {
                self.open_sub(host, sub)?;
            }
        }
        Ok(())
    }

    /// Activate the highlighted row of the deepest popup, or the simple
    /// entry highlighted on the bar.
    ///
    /// Actions run on the host's idle queue after the chain has closed.
    pub fn activate_current(&mut self, host: &mut dyn Host) -> Result<bool> {
        if self.chain.is_empty() {
            return Ok(match (self.active, self.selected_entry()) {
                (true, Some(id)) => self.run_entry(host, id),
                _ => false,
            });
        }
        let Some(popup) = self.chain.last() else {
            return Ok(false);
        };
        match popup.activation(&self.tree) {
            PopupAction::OpenSub(sub) => self.open_sub(host, sub),
            PopupAction::Run(id) => Ok(self.run_entry(host, id)),
            PopupAction::Back => Ok(self.close_submenu(host)),
            PopupAction::Nothing => Ok(false),
        }
    }

    fn run_entry(&mut self, host: &mut dyn Host, id: EntryId) -> bool {
        let Some(action) = self
            .tree
            .get(id)
            .filter(|e| e.is_enabled())
            .and_then(|e| e.action_fn())
            .cloned()
        else {
            return false;
        };
        if self.engaged() && !self.close_chain(host, false, false) {
            return false;
        }
        self.trace(|| format!("scheduling action of entry {}", id.index()));
        host.schedule_idle(Box::new(move || action()));
        true
    }

    /// Open a top-level menu, or run it if it is simple.
    fn select_top(&mut self, host: &mut dyn Host, index: usize) -> Result<bool> {
        match self.top.get(index) {
            Some(&id) if self.tree.is_simple(id) => Ok(self.run_entry(host, id)),
            Some(_) => self.open(host, index),
            None => Ok(false),
        }
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    /// Handle one input event. Returns `true` if the menu consumed it.
    pub fn process_event(&mut self, host: &mut dyn Host, event: &Event) -> Result<bool> {
        match event {
            Event::Key(key) => self.process_key(host, key),
            Event::Mouse(mouse) => self.process_mouse(host, mouse),
            Event::Resize(_) => Ok(self.on_resize(host)),
        }
    }

    /// Close everything when the terminal size changes while open.
    pub fn on_resize(&mut self, host: &mut dyn Host) -> bool {
        if !self.engaged() {
            return false;
        }
        self.trace(|| "resize while open, closing".to_string());
        self.force_close(host)
    }

    fn find_shortcut(&self, key: &KeyEvent) -> Option<EntryId> {
        self.top
            .iter()
            .filter_map(|root| self.tree.find_shortcut(*root, key))
            .find(|id| {
                self.tree.is_enabled(*id) && self.tree.get(*id).is_some_and(|e| e.has_action())
            })
    }

    fn top_with_hotkey(&self, c: char) -> Option<usize> {
        self.top.iter().position(|id| {
            self.tree
                .get(*id)
                .is_some_and(|e| e.is_enabled() && e.hotkey() == Some(c))
        })
    }

    /// Resolve a key: shortcut first, then hot key, then the binding table.
    ///
    /// While the bar is engaged every key is consumed.
    pub fn process_key(&mut self, host: &mut dyn Host, key: &KeyEvent) -> Result<bool> {
        self.refresh_deepest();
        if let Some(id) = self.find_shortcut(key) {
            return Ok(self.run_entry(host, id) || self.engaged());
        }
        if self.process_hotkey(host, key)? {
            return Ok(true);
        }
        match self.bindings.command_for(key) {
            Some(command) => self.execute(host, command),
            None => Ok(self.engaged()),
        }
    }

    fn process_hotkey(&mut self, host: &mut dyn Host, key: &KeyEvent) -> Result<bool> {
        let Some(c) = key.hotkey_char() else {
            return Ok(false);
        };
        if key.ctrl() {
            return Ok(false);
        }
        if key.alt() {
            return match self.top_with_hotkey(c) {
                Some(index) => {
                    self.select_top(host, index)?;
                    Ok(true)
                }
                None => Ok(false),
            };
        }
        if !self.engaged() {
            return Ok(false);
        }

        if self.chain.is_empty() {
            return match self.top_with_hotkey(c) {
                Some(index) => {
                    self.select_top(host, index)?;
                    Ok(true)
                }
                None => Ok(false),
            };
        }
        let Some(row) = self
            .chain
            .last()
            .and_then(|popup| popup.find_hotkey(&self.tree, c))
        else {
            return Ok(false);
        };
        if let Some(popup) = self.chain.last_mut() {
            popup.set_current(&self.tree, row);
        }
        self.activate_current(host)?;
        Ok(true)
    }

    /// Run a positional command.
    pub fn execute(&mut self, host: &mut dyn Host, command: MenuCommand) -> Result<bool> {
        if command == MenuCommand::ToggleExpand {
            if self.engaged() {
                self.close_chain(host, false, false);
            } else if let Some(index) = self.first_enabled_top() {
                self.open(host, index)?;
            } else {
                return Ok(false);
            }
            return Ok(true);
        }
        if !self.engaged() {
            return Ok(false);
        }
        match command {
            MenuCommand::LineUp => self.move_line(host, Direction::Up)?,
            MenuCommand::LineDown => self.move_line(host, Direction::Down)?,
            MenuCommand::Left => {
                if self.chain.len() > 1 {
                    self.close_submenu(host);
                } else {
                    self.previous_menu(host)?;
                }
            }
            MenuCommand::Right => match self.current_sub() {
                Some(sub) => {
                    self.open_sub(host, sub)?;
                }
                None => {
                    self.next_menu(host)?;
                }
            },
            MenuCommand::Cancel => {
                if self.chain.len() > 1 {
                    self.close_submenu(host);
                } else {
                    self.close_chain(host, false, false);
                }
            }
            MenuCommand::Accept => {
                self.activate_current(host)?;
            }
            MenuCommand::ToggleExpand => {}
        }
        Ok(true)
    }

    /// Handle a mouse event.
    ///
    /// A press outside the bar and every popup closes the chain and is
    /// reported unhandled so the application can deliver it.
    pub fn process_mouse(&mut self, host: &mut dyn Host, mouse: &MouseEvent) -> Result<bool> {
        self.refresh_deepest();
        if let Some(level) = self.popup_at(mouse.x, mouse.y) {
            return self.mouse_on_popup(host, level, mouse);
        }
        if let Some(index) = self.item_at(mouse.x, mouse.y) {
            return self.mouse_on_bar(host, index, mouse);
        }
        if self.engaged() && mouse.is_press() {
            self.trace(|| format!("press outside at ({}, {})", mouse.x, mouse.y));
            self.close_chain(host, false, false);
        }
        Ok(false)
    }

    fn mouse_on_popup(
        &mut self,
        host: &mut dyn Host,
        level: usize,
        mouse: &MouseEvent,
    ) -> Result<bool> {
        let Some(row) = self.chain[level].row_at(&self.tree, mouse.x, mouse.y) else {
            return Ok(true);
        };
        if !self.chain[level].is_selectable(&self.tree, row) {
            return Ok(true);
        }
        if mouse.is_activation() {
            if !self.truncate_to(host, level) {
                return Ok(true);
            }
            self.chain[level].set_current(&self.tree, row);
            self.activate_current(host)?;
        } else if mouse.is_hover() {
            let grabbed = host.mouse_grabber().is_some_and(|v| self.owns_view(v));
            if !grabbed || self.chain[level].current_index() == row as isize {
                return Ok(true);
            }
            if !self.truncate_to(host, level) {
                return Ok(true);
            }
            self.chain[level].set_current(&self.tree, row);
            if !self.single_frame {
                if let Some(sub) = self.current_sub() {
                    self.open_sub(host, sub)?;
                }
            }
        }
        Ok(true)
    }

    /// Close levels deeper than `level`.
    fn truncate_to(&mut self, host: &mut dyn Host, level: usize) -> bool {
        while self.chain.len() > level + 1 {
            if !self.close_submenu(host) {
                return false;
            }
        }
        true
    }

    fn mouse_on_bar(&mut self, host: &mut dyn Host, index: usize, mouse: &MouseEvent) -> Result<bool> {
        if mouse.is_activation() {
            if self.engaged() && self.selected == index as isize {
                self.close_chain(host, false, false);
            } else {
                self.select_top(host, index)?;
            }
            return Ok(true);
        }
        if mouse.is_hover() && self.is_open() && self.selected != index as isize {
            self.open(host, index)?;
        }
        Ok(self.engaged())
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    /// Bar titles with their positions.
    #[must_use]
    pub fn bar_items(&self) -> Vec<BarItem> {
        let mut x = self.frame.x;
        self.top
            .iter()
            .enumerate()
            .filter_map(|(i, id)| {
                let entry = self.tree.get(*id)?;
                let width = bar_item_width(&self.tree, *id);
                let item = BarItem {
                    title: entry.display_title().to_string(),
                    hotkey_index: entry.hotkey_index(),
                    x,
                    width,
                    selected: i as isize == self.selected,
                };
                x += width as i32;
                Some(item)
            })
            .collect()
    }

    /// Draw the bar row. Context menus have none.
    pub fn render_bar(&self, canvas: &mut dyn Canvas) {
        if self.placement.is_none() {
            canvas.draw_bar(self.frame, &self.bar_items());
        }
    }

    /// Draw the bar and every visible popup, deepest last.
    pub fn render(&self, canvas: &mut dyn Canvas) {
        self.render_bar(canvas);
        let last = self.chain.len().saturating_sub(1);
        for (i, popup) in self.chain.iter().enumerate() {
            popup.render(&self.tree, canvas, i == last);
        }
    }

    // ------------------------------------------------------------------
    // Diagnostics
    // ------------------------------------------------------------------

    /// Verify the chain against the tree and the host.
    ///
    /// Checks that each level shows the sub-menu of the row highlighted
    /// one level up and lies under the selected top-level entry, that depth bookkeeping matches, and that the mouse
    /// grab and focus sit on the deepest popup.
    pub fn check_invariants(&self, host: &dyn Host) -> std::result::Result<(), String> {
        if self.selected_sub != self.chain.len() as isize - 1 {
            return Err(format!(
                "selected_sub {} with {} open levels",
                self.selected_sub,
                self.chain.len()
            ));
        }
        if self.active && !self.chain.is_empty() {
            return Err("bar active while a popup is open".to_string());
        }
        if let Some(root) = self.chain.first() {
            if self.selected_entry() != Some(root.origin()) {
                return Err(format!(
                    "root popup shows entry {} but selected is {}",
                    root.origin().index(),
                    self.selected
                ));
            }
        }
        for popup in self.chain.iter().skip(1) {
            let path = self.tree.path_to(popup.origin());
            if path.first().copied() != self.selected_entry() {
                return Err(format!(
                    "entry {} is not under the selected top-level entry",
                    popup.origin().index()
                ));
            }
        }
        for (depth, pair) in self.chain.windows(2).enumerate() {
            let expected = pair[0]
                .current_entry(&self.tree)
                .and_then(|id| self.tree.sub_menu_of(id));
            if expected != Some(pair[1].origin()) {
                return Err(format!(
                    "level {} is not the sub-menu of level {depth}'s current row",
                    depth + 1
                ));
            }
            if pair[1].is_flattened() == pair[0].is_visible() {
                return Err(format!("level {depth} visibility does not match its child"));
            }
        }
        if let Some(deepest) = self.chain.last() {
            if !deepest.is_visible() {
                return Err("deepest popup is hidden".to_string());
            }
        }

        let expected_holder = match self.chain.last() {
            Some(popup) => Some(popup.view()),
            None if self.active => Some(self.view),
            None => None,
        };
        if let Some(holder) = host.mouse_grabber() {
            if self.owns_view(holder) && Some(holder) != expected_holder {
                return Err(format!("{holder} holds the mouse grab"));
            }
        }
        if expected_holder.is_some() && host.focused() != expected_holder {
            return Err(format!("focus is on {:?}", host.focused()));
        }
        Ok(())
    }
}
