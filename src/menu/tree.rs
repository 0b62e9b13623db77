//! Arena owning every entry of a menu hierarchy.
//!
//! Entries refer to each other by [`EntryId`]; a child records its owning
//! group as a plain id, so nothing in the tree owns its parent.

use crate::error::{Error, Result};
use crate::input::KeyEvent;
use crate::menu::entry::{CheckStyle, DEFAULT_HOTKEY_MARKER, MenuEntry};
use crate::unicode::WidthMethod;

/// Index of an entry in a [`MenuTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(usize);

impl EntryId {
    /// Position in the arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Whether an entry is a plain command or a group of children.
///
/// `None` children render as separators.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntryKind {
    Leaf,
    Group { children: Vec<Option<EntryId>> },
}

#[derive(Clone, Debug)]
struct Node {
    entry: MenuEntry,
    kind: EntryKind,
}

/// Owner of a menu hierarchy.
///
/// The application builds the tree once, hands it to a
/// [`MenuBar`](super::MenuBar), and may later flip enablement and check
/// state through [`MenuBar::tree_mut`](super::MenuBar::tree_mut). Group
/// children are fixed once the group is inserted.
#[derive(Clone, Debug)]
pub struct MenuTree {
    nodes: Vec<Node>,
    marker: char,
    width_method: WidthMethod,
}

impl Default for MenuTree {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuTree {
    /// Create an empty tree using the default hot-key marker.
    #[must_use]
    pub fn new() -> Self {
        Self::with_marker(DEFAULT_HOTKEY_MARKER)
    }

    /// Create an empty tree whose titles use `marker` for hot keys.
    #[must_use]
    pub fn with_marker(marker: char) -> Self {
        Self {
            nodes: Vec::new(),
            marker,
            width_method: WidthMethod::default(),
        }
    }

    /// Set the width method used for layout.
    #[must_use]
    pub fn with_width_method(mut self, method: WidthMethod) -> Self {
        self.width_method = method;
        self
    }

    /// Hot-key marker of this tree.
    #[must_use]
    pub fn hotkey_marker(&self) -> char {
        self.marker
    }

    /// Width method used for layout.
    #[must_use]
    pub fn width_method(&self) -> WidthMethod {
        self.width_method
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, mut entry: MenuEntry, kind: EntryKind) -> EntryId {
        entry.apply_marker(self.marker);
        entry.parent = None;
        self.nodes.push(Node { entry, kind });
        EntryId(self.nodes.len() - 1)
    }

    /// Insert a leaf command.
    pub fn insert(&mut self, entry: MenuEntry) -> EntryId {
        self.push(entry, EntryKind::Leaf)
    }

    /// Insert a group owning `children`.
    ///
    /// Fails with [`Error::InvalidArgument`] when `children` is `None`, or
    /// when a child is unknown or already owned by another group.
    pub fn insert_group(
        &mut self,
        entry: MenuEntry,
        children: Option<Vec<Option<EntryId>>>,
    ) -> Result<EntryId> {
        let Some(children) = children else {
            return Err(Error::InvalidArgument(format!(
                "group {:?} needs a children list",
                entry.title()
            )));
        };
        for (i, child) in children.iter().flatten().enumerate() {
            let node = self.node(*child)?;
            if node.entry.parent.is_some() {
                return Err(Error::InvalidArgument(format!(
                    "entry {:?} already belongs to a group",
                    node.entry.title()
                )));
            }
            if children.iter().flatten().skip(i + 1).any(|c| c == child) {
                return Err(Error::InvalidArgument(format!(
                    "entry {:?} listed twice",
                    node.entry.title()
                )));
            }
        }

        let id = self.push(
            entry,
            EntryKind::Group {
                children: children.clone(),
            },
        );
        for child in children.into_iter().flatten() {
            self.nodes[child.0].entry.parent = Some(id);
        }
        Ok(id)
    }

    /// Insert a simple top-level entry: an action and no children.
    pub fn insert_simple(&mut self, entry: MenuEntry) -> Result<EntryId> {
        if !entry.has_action() {
            return Err(Error::InvalidArgument(format!(
                "simple entry {:?} needs an action",
                entry.title()
            )));
        }
        Ok(self.push(entry, EntryKind::Group { children: Vec::new() }))
    }

    fn node(&self, id: EntryId) -> Result<&Node> {
        self.nodes.get(id.0).ok_or(Error::UnknownEntry(id))
    }

    /// Check that `id` names an entry.
    #[must_use]
    pub fn contains(&self, id: EntryId) -> bool {
        id.0 < self.nodes.len()
    }

    /// Entry data.
    pub fn entry(&self, id: EntryId) -> Result<&MenuEntry> {
        self.node(id).map(|n| &n.entry)
    }

    /// Entry data, or `None` for an unknown id.
    #[must_use]
    pub fn get(&self, id: EntryId) -> Option<&MenuEntry> {
        self.nodes.get(id.0).map(|n| &n.entry)
    }

    /// Entry kind.
    pub fn kind(&self, id: EntryId) -> Result<&EntryKind> {
        self.node(id).map(|n| &n.kind)
    }

    /// Children of a group; empty for leaves and unknown ids.
    #[must_use]
    pub fn children(&self, id: EntryId) -> &[Option<EntryId>] {
        match self.nodes.get(id.0).map(|n| &n.kind) {
            Some(EntryKind::Group { children }) => children,
            _ => &[],
        }
    }

    /// Check if the entry is a group (simple or not).
    #[must_use]
    pub fn is_group(&self, id: EntryId) -> bool {
        matches!(self.kind(id), Ok(EntryKind::Group { .. }))
    }

    /// A group with no children, no parent and an action.
    #[must_use]
    pub fn is_simple(&self, id: EntryId) -> bool {
        match self.nodes.get(id.0) {
            Some(Node {
                entry,
                kind: EntryKind::Group { children },
            }) => children.is_empty() && entry.parent.is_none() && entry.has_action(),
            _ => false,
        }
    }

    /// The group to open when `id` is activated, if any.
    #[must_use]
    pub fn sub_menu_of(&self, id: EntryId) -> Option<EntryId> {
        (!self.children(id).is_empty()).then_some(id)
    }

    /// Owning group.
    #[must_use]
    pub fn parent(&self, id: EntryId) -> Option<EntryId> {
        self.get(id).and_then(MenuEntry::parent)
    }

    /// Ids from the outermost ancestor down to `id`.
    #[must_use]
    pub fn path_to(&self, id: EntryId) -> Vec<EntryId> {
        let mut path = vec![id];
        let mut cursor = self.parent(id);
        while let Some(parent) = cursor {
            path.push(parent);
            cursor = self.parent(parent);
        }
        path.reverse();
        path
    }

    /// Every entry below `root` in depth-first order (root excluded).
    #[must_use]
    pub fn descendants(&self, root: EntryId) -> Vec<EntryId> {
        let mut out = Vec::new();
        let mut stack: Vec<EntryId> = self.children(root).iter().rev().flatten().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().flatten().copied());
        }
        out
    }

    /// First entry in the subtree at `root` (root included) whose shortcut
    /// matches `key`.
    #[must_use]
    pub fn find_shortcut(&self, root: EntryId, key: &KeyEvent) -> Option<EntryId> {
        std::iter::once(root)
            .chain(self.descendants(root))
            .find(|id| {
                self.get(*id)
                    .and_then(MenuEntry::shortcut_key)
                    .is_some_and(|s| s.same_chord(key))
            })
    }

    /// Layout width of an entry; 0 for unknown ids.
    #[must_use]
    pub fn width(&self, id: EntryId) -> usize {
        self.get(id).map_or(0, |e| e.width(self.width_method))
    }

    /// Check if the entry exists and is enabled.
    #[must_use]
    pub fn is_enabled(&self, id: EntryId) -> bool {
        self.get(id).is_some_and(MenuEntry::is_enabled)
    }

    /// Replace the title, re-deriving the hot key.
    pub fn set_title(&mut self, id: EntryId, title: impl Into<String>) -> Result<()> {
        let marker = self.marker;
        let node = self.nodes.get_mut(id.0).ok_or(Error::UnknownEntry(id))?;
        node.entry.set_title(title.into(), marker);
        Ok(())
    }

    /// Replace the help text.
    pub fn set_help(&mut self, id: EntryId, help: impl Into<String>) -> Result<()> {
        let node = self.nodes.get_mut(id.0).ok_or(Error::UnknownEntry(id))?;
        node.entry.set_help(help.into());
        Ok(())
    }

    /// Cycle a checkbox; see [`MenuEntry::toggle_checked`].
    pub fn toggle_checked(&mut self, id: EntryId) -> Result<()> {
        let node = self.nodes.get_mut(id.0).ok_or(Error::UnknownEntry(id))?;
        node.entry.toggle_checked()
    }

    /// Set the check state.
    ///
    /// Checking a radio entry unchecks the radio siblings in its group.
    pub fn set_checked(&mut self, id: EntryId, checked: Option<bool>) -> Result<()> {
        let style = self.entry(id)?.check_style();
        if style == CheckStyle::Radio && checked == Some(true) {
            if let Some(parent) = self.parent(id) {
                let siblings: Vec<EntryId> = self.children(parent).iter().flatten().copied().collect();
                for sibling in siblings {
                    let entry = &mut self.nodes[sibling.0].entry;
                    if sibling != id && entry.check_style() == CheckStyle::Radio {
                        entry.set_checked(Some(false));
                    }
                }
            }
        }
        self.nodes[id.0].entry.set_checked(checked);
        Ok(())
    }
}
