//! One open menu level.
//!
//! A [`MenuPopup`] shows the children of one group and tracks which row is
//! highlighted. It never mutates the chain it lives in; activation returns
//! a [`PopupAction`] that the owning [`MenuBar`](super::MenuBar) applies.

use crate::error::{Error, Result};
use crate::geometry::{Rect, Size};
use crate::host::ViewId;
use crate::menu::layout::popup_size;
use crate::menu::render::{Canvas, MenuRow, RowState};
use crate::menu::{EntryId, MenuTree};

/// A row of a popup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PopupRow {
    Entry(EntryId),
    Separator,
    /// Title of the group a single-frame submenu replaced; selecting it
    /// goes back one level.
    Header(EntryId),
}

/// Direction for keyboard navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// What activating the highlighted row asks the bar to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PopupAction {
    /// Open the sub-menu of this group.
    OpenSub(EntryId),
    /// Run this entry's action and close the whole chain.
    Run(EntryId),
    /// Close this level.
    Back,
    /// Nothing to do.
    Nothing,
}

/// State of one displayed menu level.
#[derive(Clone, Debug)]
pub struct MenuPopup {
    view: ViewId,
    origin: EntryId,
    group: EntryId,
    flattened: bool,
    current: isize,
    pub(crate) previous_focus: Option<ViewId>,
    frame: Rect,
    pub(crate) visible: bool,
}

impl MenuPopup {
    /// Create a popup for `group`.
    ///
    /// `origin` is the group the level was opened for; `group` is what is
    /// displayed (an observer may substitute it). With `flattened` the rows
    /// start with a back header and a separator.
    pub fn new(
        tree: &MenuTree,
        origin: EntryId,
        group: EntryId,
        flattened: bool,
        frame: Rect,
    ) -> Result<Self> {
        if !tree.contains(origin) {
            return Err(Error::UnknownEntry(origin));
        }
        if !tree.is_group(group) {
            return Err(Error::InvalidArgument(format!(
                "popup needs a group, got entry {}",
                group.index()
            )));
        }
        let mut popup = Self {
            view: ViewId::next(),
            origin,
            group,
            flattened,
            current: -1,
            previous_focus: None,
            frame,
            visible: true,
        };
        popup.current = popup.first_selectable(tree);
        Ok(popup)
    }

    /// Natural frame size for displaying `group`.
    #[must_use]
    pub fn size_for(tree: &MenuTree, group: EntryId, flattened: bool) -> Size {
        let children = tree.children(group).iter().map(|c| c.map(|id| tree.width(id)));
        if flattened {
            let header = std::iter::once(Some(tree.width(group))).chain(std::iter::once(None));
            popup_size(header.chain(children))
        } else {
            popup_size(children)
        }
    }

    /// View id of this popup.
    #[must_use]
    pub fn view(&self) -> ViewId {
        self.view
    }

    /// Group this level was opened for.
    #[must_use]
    pub fn origin(&self) -> EntryId {
        self.origin
    }

    /// Group displayed by this level.
    #[must_use]
    pub fn group(&self) -> EntryId {
        self.group
    }

    /// Whether this is a single-frame (flattened) level.
    #[must_use]
    pub fn is_flattened(&self) -> bool {
        self.flattened
    }

    /// Highlighted row, or -1 when nothing is selectable.
    #[must_use]
    pub fn current_index(&self) -> isize {
        self.current
    }

    /// View focused before this popup took focus.
    #[must_use]
    pub fn previous_focus(&self) -> Option<ViewId> {
        self.previous_focus
    }

    /// Screen frame, border included.
    #[must_use]
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Whether the popup is attached to the screen (single-frame mode
    /// hides a level while its submenu replaces it).
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Rows in display order.
    #[must_use]
    pub fn rows(&self, tree: &MenuTree) -> Vec<PopupRow> {
        let mut rows = Vec::new();
        if self.flattened {
            rows.push(PopupRow::Header(self.group));
            rows.push(PopupRow::Separator);
        }
        rows.extend(tree.children(self.group).iter().map(|child| match child {
            Some(id) => PopupRow::Entry(*id),
            None => PopupRow::Separator,
        }));
        rows
    }

    fn row(&self, tree: &MenuTree, index: usize) -> Option<PopupRow> {
        let offset = if self.flattened { 2 } else { 0 };
        if self.flattened && index < offset {
            return Some(if index == 0 {
                PopupRow::Header(self.group)
            } else {
                PopupRow::Separator
            });
        }
        tree.children(self.group)
            .get(index - offset)
            .map(|child| child.map_or(PopupRow::Separator, PopupRow::Entry))
    }

    /// Number of rows.
    #[must_use]
    pub fn row_count(&self, tree: &MenuTree) -> usize {
        tree.children(self.group).len() + if self.flattened { 2 } else { 0 }
    }

    /// Row holding `id`.
    #[must_use]
    pub fn row_of(&self, tree: &MenuTree, id: EntryId) -> Option<usize> {
        self.rows(tree)
            .iter()
            .position(|row| *row == PopupRow::Entry(id))
    }

    /// Whether `index` can be highlighted: an enabled entry or the header.
    #[must_use]
    pub fn is_selectable(&self, tree: &MenuTree, index: usize) -> bool {
        match self.row(tree, index) {
            Some(PopupRow::Entry(id)) => tree.is_enabled(id),
            Some(PopupRow::Header(_)) => true,
            Some(PopupRow::Separator) | None => false,
        }
    }

    fn first_selectable(&self, tree: &MenuTree) -> isize {
        let count = self.row_count(tree);
        // Single-frame levels start on the first child, not the header.
        let start = if self.flattened { 2 } else { 0 };
        (start..count)
            .chain(0..start.min(count))
            .find(|i| self.is_selectable(tree, *i))
            .map_or(-1, |i| i as isize)
    }

    /// Entry under the highlight.
    #[must_use]
    pub fn current_entry(&self, tree: &MenuTree) -> Option<EntryId> {
        let index = usize::try_from(self.current).ok()?;
        match self.row(tree, index)? {
            PopupRow::Entry(id) => Some(id),
            _ => None,
        }
    }

    /// Highlight `index` if it is selectable.
    pub fn set_current(&mut self, tree: &MenuTree, index: usize) -> bool {
        if self.is_selectable(tree, index) {
            self.current = index as isize;
            true
        } else {
            false
        }
    }

    pub(crate) fn force_current(&mut self, index: usize) {
        self.current = index as isize;
    }

    /// Re-evaluate enablement; a highlight on a row that became disabled
    /// moves to the next selectable row.
    pub fn refresh(&mut self, tree: &MenuTree) {
        let Ok(start) = usize::try_from(self.current) else {
            self.current = self.first_selectable(tree);
            return;
        };
        if self.is_selectable(tree, start) {
            return;
        }
        let count = self.row_count(tree);
        self.current = (1..=count)
            .map(|step| (start + step) % count)
            .find(|i| self.is_selectable(tree, *i))
            .map_or(-1, |i| i as isize);
    }

    /// Move the highlight one selectable row in `direction`, wrapping
    /// around and skipping separators and disabled entries.
    ///
    /// Returns `false` when no row is selectable.
    pub fn move_selection(&mut self, tree: &MenuTree, direction: Direction) -> bool {
        let count = self.row_count(tree);
        if count == 0 {
            self.current = -1;
            return false;
        }
        let count = count as isize;
        let mut index = self.current;
        for _ in 0..count {
            index = match direction {
                Direction::Down => (index + 1).rem_euclid(count),
                Direction::Up => (index - 1).rem_euclid(count),
            };
            if self.is_selectable(tree, index as usize) {
                self.current = index;
                return true;
            }
        }
        self.current = -1;
        false
    }

    /// Row whose entry has hot key `key`.
    #[must_use]
    pub fn find_hotkey(&self, tree: &MenuTree, key: char) -> Option<usize> {
        self.rows(tree).iter().enumerate().find_map(|(i, row)| match row {
            PopupRow::Entry(id)
                if tree.is_enabled(*id)
                    && tree.get(*id).and_then(|e| e.hotkey()) == Some(key) =>
            {
                Some(i)
            }
            _ => None,
        })
    }

    /// Row under screen cell `(x, y)`; `None` on the border or outside.
    #[must_use]
    pub fn row_at(&self, tree: &MenuTree, x: i32, y: i32) -> Option<usize> {
        let inner = Rect::new(
            self.frame.x + 1,
            self.frame.y + 1,
            self.frame.width.saturating_sub(2),
            self.frame.height.saturating_sub(2),
        );
        if !inner.contains(x, y) {
            return None;
        }
        let row = (y - inner.y) as usize;
        (row < self.row_count(tree)).then_some(row)
    }

    /// Decide what activating the highlighted row does.
    #[must_use]
    pub fn activation(&self, tree: &MenuTree) -> PopupAction {
        let Some(index) = usize::try_from(self.current).ok() else {
            return PopupAction::Nothing;
        };
        match self.row(tree, index) {
            Some(PopupRow::Header(_)) => PopupAction::Back,
            Some(PopupRow::Entry(id)) if tree.is_enabled(id) => {
                if let Some(sub) = tree.sub_menu_of(id) {
                    PopupAction::OpenSub(sub)
                } else if tree.get(id).is_some_and(|e| e.has_action()) {
                    PopupAction::Run(id)
                } else {
                    PopupAction::Nothing
                }
            }
            _ => PopupAction::Nothing,
        }
    }

    /// Lay out every row.
    #[must_use]
    pub fn layout_rows(&self, tree: &MenuTree) -> Vec<MenuRow> {
        let inner = self.frame.width.saturating_sub(2);
        let method = tree.width_method();
        self.rows(tree)
            .into_iter()
            .enumerate()
            .map(|(i, row)| {
                let state = if i as isize == self.current {
                    RowState::Focused
                } else {
                    RowState::Normal
                };
                match row {
                    PopupRow::Separator => MenuRow::separator(inner),
                    PopupRow::Header(group) => match tree.get(group) {
                        Some(entry) => MenuRow::header(entry, inner, state),
                        None => MenuRow::separator(inner),
                    },
                    PopupRow::Entry(id) => match tree.get(id) {
                        Some(entry) => MenuRow::for_entry(
                            entry,
                            inner,
                            state,
                            tree.sub_menu_of(id).is_some(),
                            method,
                        ),
                        None => MenuRow::separator(inner),
                    },
                }
            })
            .collect()
    }

    /// Draw the frame and the rows that fit inside it.
    pub fn render(&self, tree: &MenuTree, canvas: &mut dyn Canvas, focused: bool) {
        if !self.visible {
            return;
        }
        canvas.draw_frame(self.frame, focused);
        let visible_rows = self.frame.height.saturating_sub(2) as usize;
        for (i, row) in self.layout_rows(tree).iter().take(visible_rows).enumerate() {
            canvas.draw_row(self.frame.x + 1, self.frame.y + 1 + i as i32, row);
        }
    }
}
