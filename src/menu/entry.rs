//! Menu entry data: one command or one expandable group header.
//!
//! A [`MenuEntry`] is plain data. Where it sits in the menu hierarchy is
//! recorded by the [`MenuTree`](super::MenuTree) that owns it.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::input::KeyEvent;
use crate::menu::EntryId;
use crate::unicode::{WidthMethod, display_width, glyph_columns};

/// Hot-key marker used when no [`MenuConfig`](super::MenuConfig) says otherwise.
pub const DEFAULT_HOTKEY_MARKER: char = '_';

/// Command run when an entry is activated.
pub type Action = Rc<dyn Fn()>;

/// Predicate deciding whether an entry can currently run.
pub type CanRun = Rc<dyn Fn() -> bool>;

/// How the check state of an entry is presented.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CheckStyle {
    /// No check glyph.
    #[default]
    NoCheck,
    /// Independent on/off (optionally "unset") box.
    Checkbox,
    /// One-of-many within the parent group.
    Radio,
}

/// Title with the hot-key marker resolved.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HotkeyTitle {
    /// Title with the first marker removed.
    pub text: String,
    /// Upper-cased hot key.
    pub hotkey: Option<char>,
    /// Char index of the hot key inside `text`.
    pub hotkey_index: Option<usize>,
}

/// Split `title` at the first `marker` that is followed by a character.
#[must_use]
pub fn parse_hotkey(title: &str, marker: char) -> HotkeyTitle {
    let mut text = String::with_capacity(title.len());
    let mut hotkey = None;
    let mut hotkey_index = None;
    let mut chars = title.chars().peekable();
    let mut count = 0;

    while let Some(c) = chars.next() {
        if c == marker && hotkey.is_none() {
            if let Some(&next) = chars.peek() {
                hotkey = Some(next.to_uppercase().next().unwrap_or(next));
                hotkey_index = Some(count);
                continue;
            }
        }
        text.push(c);
        count += 1;
    }

    HotkeyTitle {
        text,
        hotkey,
        hotkey_index,
    }
}

/// Data for a single menu row.
///
/// Built with the `with_*`-style builder methods and handed to
/// [`MenuTree::insert`](super::MenuTree::insert) or
/// [`MenuTree::insert_group`](super::MenuTree::insert_group).
#[derive(Clone)]
pub struct MenuEntry {
    title: String,
    parsed: HotkeyTitle,
    help: String,
    shortcut: Option<KeyEvent>,
    action: Option<Action>,
    can_run: Option<CanRun>,
    checked: Option<bool>,
    check_style: CheckStyle,
    allow_null_checked: bool,
    pub(crate) parent: Option<EntryId>,
    data: Option<Rc<dyn Any>>,
}

impl MenuEntry {
    /// Create an entry with `title`; the hot key follows the default marker.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        let parsed = parse_hotkey(&title, DEFAULT_HOTKEY_MARKER);
        Self {
            title,
            parsed,
            help: String::new(),
            shortcut: None,
            action: None,
            can_run: None,
            checked: None,
            check_style: CheckStyle::NoCheck,
            allow_null_checked: false,
            parent: None,
            data: None,
        }
    }

    /// Set help text shown between title and shortcut.
    #[must_use]
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    /// Set the global shortcut chord.
    #[must_use]
    pub fn shortcut(mut self, key: KeyEvent) -> Self {
        self.shortcut = Some(key);
        self
    }

    /// Set the command run on activation.
    #[must_use]
    pub fn action(mut self, action: impl Fn() + 'static) -> Self {
        self.action = Some(Rc::new(action));
        self
    }

    /// Set the enablement predicate.
    #[must_use]
    pub fn can_run(mut self, can_run: impl Fn() -> bool + 'static) -> Self {
        self.can_run = Some(Rc::new(can_run));
        self
    }

    /// Make this a checkbox entry.
    ///
    /// Without `allow_null` the state is never unset.
    #[must_use]
    pub fn checkbox(mut self, allow_null: bool) -> Self {
        self.check_style = CheckStyle::Checkbox;
        self.allow_null_checked = allow_null;
        if !allow_null && self.checked.is_none() {
            self.checked = Some(false);
        }
        self
    }

    /// Make this a radio entry.
    #[must_use]
    pub fn radio(mut self) -> Self {
        self.check_style = CheckStyle::Radio;
        self
    }

    /// Set the initial check state.
    #[must_use]
    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = Some(checked);
        self
    }

    /// Attach opaque application data.
    #[must_use]
    pub fn data(mut self, data: impl Any) -> Self {
        self.data = Some(Rc::new(data));
        self
    }

    pub(crate) fn apply_marker(&mut self, marker: char) {
        self.parsed = parse_hotkey(&self.title, marker);
    }

    /// Raw title including the hot-key marker.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    pub(crate) fn set_title(&mut self, title: String, marker: char) {
        self.parsed = parse_hotkey(&title, marker);
        self.title = title;
    }

    /// Title as displayed (marker removed).
    #[must_use]
    pub fn display_title(&self) -> &str {
        &self.parsed.text
    }

    /// Upper-cased hot key, if the title carries a marker.
    #[must_use]
    pub fn hotkey(&self) -> Option<char> {
        self.parsed.hotkey
    }

    /// Char index of the hot key in [`display_title`](Self::display_title).
    #[must_use]
    pub fn hotkey_index(&self) -> Option<usize> {
        self.parsed.hotkey_index
    }

    /// Help text.
    #[must_use]
    pub fn help_text(&self) -> &str {
        &self.help
    }

    pub(crate) fn set_help(&mut self, help: String) {
        self.help = help;
    }

    /// Global shortcut chord.
    #[must_use]
    pub fn shortcut_key(&self) -> Option<KeyEvent> {
        self.shortcut
    }

    /// Shortcut as displayed, e.g. `Ctrl+Q`; empty without a shortcut.
    #[must_use]
    pub fn shortcut_tag(&self) -> String {
        self.shortcut.map(|k| k.to_string()).unwrap_or_default()
    }

    /// The activation command.
    #[must_use]
    pub fn action_fn(&self) -> Option<&Action> {
        self.action.as_ref()
    }

    /// Whether an action is attached.
    #[must_use]
    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }

    /// Enablement: the predicate's answer, or `true` without one.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.can_run.as_ref().is_none_or(|can_run| can_run())
    }

    /// Tri-state check value.
    #[must_use]
    pub fn checked_state(&self) -> Option<bool> {
        self.checked
    }

    /// Check style.
    #[must_use]
    pub fn check_style(&self) -> CheckStyle {
        self.check_style
    }

    /// Whether a checkbox may be "unset".
    #[must_use]
    pub fn allow_null_checked(&self) -> bool {
        self.allow_null_checked
    }

    pub(crate) fn set_checked(&mut self, checked: Option<bool>) {
        self.checked = match (self.check_style, checked) {
            (CheckStyle::Checkbox, None) if !self.allow_null_checked => Some(false),
            (_, value) => value,
        };
    }

    /// Cycle the check state of a checkbox.
    ///
    /// `unset → true → false → unset` when null is allowed, else `true ↔ false`.
    pub fn toggle_checked(&mut self) -> Result<()> {
        if self.check_style != CheckStyle::Checkbox {
            return Err(Error::InvalidOperation(format!(
                "toggle_checked on {:?} which is not a checkbox",
                self.title
            )));
        }
        self.checked = if self.allow_null_checked {
            match self.checked {
                None => Some(true),
                Some(true) => Some(false),
                Some(false) => None,
            }
        } else {
            Some(!self.checked.unwrap_or(false))
        };
        Ok(())
    }

    /// Whether a check glyph column is reserved for this entry.
    #[must_use]
    pub fn has_check_glyph(&self) -> bool {
        self.checked == Some(true) || self.check_style != CheckStyle::NoCheck
    }

    /// Owning group, if the entry is a child of one.
    #[must_use]
    pub fn parent(&self) -> Option<EntryId> {
        self.parent
    }

    /// Attached application data.
    #[must_use]
    pub fn data_ref<T: Any>(&self) -> Option<&T> {
        self.data.as_ref().and_then(|d| d.downcast_ref::<T>())
    }

    /// Columns taken by the title (marker excluded, every glyph at least one).
    #[must_use]
    pub fn title_columns(&self, method: WidthMethod) -> usize {
        glyph_columns(&self.parsed.text, method)
    }

    /// Row width used for popup layout.
    #[must_use]
    pub fn width(&self, method: WidthMethod) -> usize {
        let check = if self.has_check_glyph() { 2 } else { 0 };
        let help = if self.help.is_empty() {
            0
        } else {
            2 + display_width(&self.help, method)
        };
        let shortcut = match self.shortcut {
            Some(key) => 2 + display_width(&key.to_string(), method),
            None => 0,
        };
        1 + self.title_columns(method) + 2 + check + help + shortcut
    }
}

impl fmt::Debug for MenuEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuEntry")
            .field("title", &self.title)
            .field("help", &self.help)
            .field("shortcut", &self.shortcut)
            .field("has_action", &self.action.is_some())
            .field("checked", &self.checked)
            .field("check_style", &self.check_style)
            .field("parent", &self.parent)
            .finish_non_exhaustive()
    }
}
