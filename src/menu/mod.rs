//! Menu bars, cascading popups and context menus.
//!
//! The application builds a [`MenuTree`] of [`MenuEntry`] values, hands
//! it to a [`MenuBar`] and feeds the bar its input events. A [`Host`]
//! (see [`crate::host`]) provides focus, mouse grab, the view container
//! and the idle queue actions run on.
//!
//! # Example
//!
//! ```
//! use opentui_menu::host::HeadlessHost;
//! use opentui_menu::input::{KeyCode, KeyEvent};
//! use opentui_menu::menu::{MenuBar, MenuEntry, MenuSystem};
//!
//! let system = MenuSystem::default();
//! let mut tree = system.tree();
//! let new = tree.insert(MenuEntry::new("_New").action(|| {}));
//! let file = tree.insert_group(MenuEntry::new("_File"), Some(vec![Some(new)])).unwrap();
//! let mut bar = MenuBar::new(&system, tree, vec![file]).unwrap();
//!
//! let mut host = HeadlessHost::new(80, 24);
//! bar.process_key(&mut host, &KeyEvent::key(KeyCode::F(9))).unwrap();
//! assert!(bar.is_open());
//! ```
//!
//! [`Host`]: crate::host::Host

pub mod bar;
pub mod bindings;
pub mod context;
pub mod entry;
pub mod layout;
pub mod observer;
pub mod popup;
pub mod render;
pub mod system;
pub mod tree;

pub use bar::MenuBar;
pub use bindings::{KeyBindings, MenuCommand};
pub use context::{ContextMenu, ContextMenuOptions};
pub use entry::{Action, CanRun, CheckStyle, HotkeyTitle, MenuEntry, parse_hotkey};
pub use observer::{ClosingEvent, MenuObserver, Opening, Veto};
pub use popup::{Direction, MenuPopup, PopupAction, PopupRow};
pub use render::{BarItem, Canvas, CheckMark, MenuRow, RowKind, RowState};
pub use system::{MenuConfig, MenuSystem};
pub use tree::{EntryId, EntryKind, MenuTree};
