//! `opentui_menu` - Cascading menus for cell-based terminal UIs
//!
//! Menu bars, cascading or single-frame popups and context menus, driven
//! by keyboard hot keys, shortcuts and navigation keys as well as mouse
//! clicks, hover and grab. Rendering goes through the [`menu::Canvas`]
//! contract; everything else the menus need from the application comes
//! from a [`host::Host`].

// Crate-level lint configuration
#![warn(unsafe_code)] // No unsafe code expected
#![allow(clippy::cast_possible_truncation)] // Intentional coordinate casts
#![allow(clippy::cast_sign_loss)] // Intentional coordinate conversions
#![allow(clippy::cast_possible_wrap)] // Intentional coordinate conversions
#![allow(clippy::module_name_repetitions)] // Allow menu::MenuBar etc
#![allow(clippy::struct_excessive_bools)] // Menu state needs multiple flags
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::needless_pass_by_value)] // Allow pass by value for small Copy types
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::cast_lossless)] // as casts are fine for primitive widening
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::redundant_clone)] // Clones in tests for clarity are fine
#![allow(clippy::semicolon_if_nothing_returned)] // Style preference
#![allow(clippy::needless_collect)] // Collect for assertions is clear

pub mod error;
pub mod geometry;
pub mod host;
pub mod input;
pub mod logging;
pub mod menu;
pub mod unicode;

// Re-export core types at crate root
pub use error::{Error, Result};
pub use geometry::{Point, Rect, Size};
pub use host::{HeadlessHost, Host, IdleTask, ViewId};
pub use logging::{LogLevel, clear_log_callback, emit_log, set_log_callback, set_log_level};

// Re-export input types
pub use input::{Event, KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseFlags, ResizeEvent};

// Re-export menu types
pub use menu::{
    ContextMenu, ContextMenuOptions, EntryId, MenuBar, MenuConfig, MenuEntry, MenuObserver,
    MenuSystem, MenuTree,
};
pub use unicode::WidthMethod;
