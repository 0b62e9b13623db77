//! Rendering contract between menus and the screen renderer.
//!
//! Menus decide *what* goes where: row kind, state, and the column of each
//! part. The renderer decides glyphs and colors. [`MenuRow`] is the full
//! description of one popup row; [`BarItem`] of one bar title.

use crate::geometry::Rect;
use crate::menu::entry::{CheckStyle, MenuEntry};
use crate::unicode::{WidthMethod, display_width, glyph_columns};

/// Row kind inside a popup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowKind {
    /// A command or a group header.
    Item,
    /// Horizontal rule.
    Separator,
    /// Single-frame back-navigation header.
    Header,
}

/// Interaction state of a row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowState {
    Normal,
    Focused,
    Disabled,
}

/// Check glyph class to draw in the check column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckMark {
    Checked,
    Unchecked,
    Indeterminate,
    RadioOn,
    RadioOff,
}

/// Layout of a single popup row. Columns are relative to the first cell
/// inside the popup border.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuRow {
    pub kind: RowKind,
    pub state: RowState,
    /// Cells available inside the border.
    pub width: u32,
    pub check: Option<CheckMark>,
    pub check_col: u32,
    pub title: String,
    pub title_col: u32,
    /// Char index of the hot key in `title`.
    pub hotkey_index: Option<usize>,
    pub help: String,
    pub help_col: u32,
    pub shortcut: String,
    pub shortcut_col: u32,
    /// Draw a "has submenu" indicator in the last column.
    pub submenu: bool,
}

impl MenuRow {
    /// A separator row.
    #[must_use]
    pub fn separator(width: u32) -> Self {
        Self {
            kind: RowKind::Separator,
            state: RowState::Normal,
            width,
            check: None,
            check_col: 0,
            title: String::new(),
            title_col: 0,
            hotkey_index: None,
            help: String::new(),
            help_col: 0,
            shortcut: String::new(),
            shortcut_col: 0,
            submenu: false,
        }
    }

    /// Lay out `entry` in a row `width` cells wide.
    ///
    /// Title (after the optional check column) is left-aligned; help and
    /// shortcut are right-aligned, leaving the last column for the submenu
    /// indicator.
    #[must_use]
    pub fn for_entry(
        entry: &MenuEntry,
        width: u32,
        state: RowState,
        submenu: bool,
        method: WidthMethod,
    ) -> Self {
        let check = check_mark(entry);
        let check_cols = if entry.has_check_glyph() { 2 } else { 0 };
        let title_col = 1 + check_cols;

        let shortcut = entry.shortcut_tag();
        let shortcut_w = display_width(&shortcut, method) as u32;
        let help = entry.help_text().to_string();
        let help_w = display_width(&help, method) as u32;

        let right_edge = width.saturating_sub(1);
        let shortcut_col = right_edge.saturating_sub(shortcut_w);
        let help_col = if shortcut.is_empty() {
            right_edge.saturating_sub(help_w)
        } else {
            shortcut_col.saturating_sub(2 + help_w)
        };

        Self {
            kind: RowKind::Item,
            state: if entry.is_enabled() {
                state
            } else {
                RowState::Disabled
            },
            width,
            check,
            check_col: 1,
            title: entry.display_title().to_string(),
            title_col,
            hotkey_index: entry.hotkey_index(),
            help,
            help_col,
            shortcut,
            shortcut_col,
            submenu,
        }
    }

    /// The back-navigation header of a single-frame submenu.
    #[must_use]
    pub fn header(group: &MenuEntry, width: u32, state: RowState) -> Self {
        Self {
            kind: RowKind::Header,
            title: group.display_title().to_string(),
            title_col: 1,
            hotkey_index: None,
            state,
            ..Self::separator(width)
        }
    }

    /// Render the row as plain text: `x`, `~`, `*`, `o` check marks, `>` for
    /// a submenu, `-` rules for separators, and `<` before a header title.
    ///
    /// Wide glyphs are followed by a space so column math stays valid.
    #[must_use]
    pub fn to_plain(&self, method: WidthMethod) -> String {
        let mut cells = vec![' '; self.width as usize];
        match self.kind {
            RowKind::Separator => cells.fill('-'),
            RowKind::Header => {
                put(&mut cells, 0, "<", method);
                put(&mut cells, self.title_col, &self.title, method);
            }
            RowKind::Item => {
                if let Some(mark) = self.check {
                    let glyph = match mark {
                        CheckMark::Checked => "x",
                        CheckMark::Unchecked => " ",
                        CheckMark::Indeterminate => "~",
                        CheckMark::RadioOn => "*",
                        CheckMark::RadioOff => "o",
                    };
                    put(&mut cells, self.check_col, glyph, method);
                }
                put(&mut cells, self.title_col, &self.title, method);
                put(&mut cells, self.help_col, &self.help, method);
                put(&mut cells, self.shortcut_col, &self.shortcut, method);
                if self.submenu {
                    put(&mut cells, self.width.saturating_sub(1), ">", method);
                }
            }
        }
        cells.into_iter().collect()
    }
}

fn check_mark(entry: &MenuEntry) -> Option<CheckMark> {
    match (entry.check_style(), entry.checked_state()) {
        (CheckStyle::Checkbox, Some(true)) | (CheckStyle::NoCheck, Some(true)) => {
            Some(CheckMark::Checked)
        }
        (CheckStyle::Checkbox, Some(false)) => Some(CheckMark::Unchecked),
        (CheckStyle::Checkbox, None) => Some(CheckMark::Indeterminate),
        (CheckStyle::Radio, Some(true)) => Some(CheckMark::RadioOn),
        (CheckStyle::Radio, _) => Some(CheckMark::RadioOff),
        (CheckStyle::NoCheck, _) => None,
    }
}

fn put(cells: &mut [char], col: u32, text: &str, method: WidthMethod) {
    let mut col = col as usize;
    for c in text.chars() {
        if col >= cells.len() {
            break;
        }
        cells[col] = c;
        col += glyph_columns(c.encode_utf8(&mut [0; 4]), method);
    }
}

/// Layout of one title on the bar row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BarItem {
    pub title: String,
    pub hotkey_index: Option<usize>,
    /// Screen column of the item's first cell (leading pad included).
    pub x: i32,
    /// Cells taken, pads included.
    pub width: u32,
    pub selected: bool,
}

/// Drawing surface a renderer provides to menus.
pub trait Canvas {
    /// Draw a popup frame (border) around `frame`.
    fn draw_frame(&mut self, frame: Rect, focused: bool);

    /// Draw one popup row with its first inner cell at `(x, y)`.
    fn draw_row(&mut self, x: i32, y: i32, row: &MenuRow);

    /// Draw the bar background and its titles.
    fn draw_bar(&mut self, frame: Rect, items: &[BarItem]);
}
