//! Shared menu configuration and the shown-context-menu slot.

use std::cell::Cell;
use std::rc::Rc;

use crate::error::Result;
use crate::host::{Host, ViewId};
use crate::input::{Event, KeyCode, KeyEvent};
use crate::logging::{LogLevel, emit_log, log_enabled};
use crate::menu::MenuBar;
use crate::menu::entry::DEFAULT_HOTKEY_MARKER;
use crate::menu::tree::MenuTree;
use crate::unicode::WidthMethod;

/// Settings shared by every menu of an application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuConfig {
    /// Character that marks the hot key in a title.
    pub hotkey_marker: char,
    /// Key that opens and closes a bar.
    pub activation_key: KeyEvent,
    /// How title glyphs are measured.
    pub width_method: WidthMethod,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            hotkey_marker: DEFAULT_HOTKEY_MARKER,
            activation_key: KeyEvent::key(KeyCode::F(9)),
            width_method: WidthMethod::default(),
        }
    }
}

impl MenuConfig {
    #[must_use]
    pub fn with_hotkey_marker(mut self, marker: char) -> Self {
        self.hotkey_marker = marker;
        self
    }

    #[must_use]
    pub fn with_activation_key(mut self, key: KeyEvent) -> Self {
        self.activation_key = key;
        self
    }

    #[must_use]
    pub fn with_width_method(mut self, method: WidthMethod) -> Self {
        self.width_method = method;
        self
    }
}

struct ShownContext {
    owner: ViewId,
    bar: MenuBar,
    closed: Rc<Cell<bool>>,
}

/// Context object every menu is created against.
///
/// Holds the configuration and at most one shown context menu. Showing a
/// second context menu hides the first.
pub struct MenuSystem {
    config: MenuConfig,
    context: Option<ShownContext>,
}

impl Default for MenuSystem {
    fn default() -> Self {
        Self::new(MenuConfig::default())
    }
}

impl std::fmt::Debug for MenuSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuSystem")
            .field("config", &self.config)
            .field("context_owner", &self.context_owner())
            .finish()
    }
}

impl MenuSystem {
    #[must_use]
    pub fn new(config: MenuConfig) -> Self {
        Self {
            config,
            context: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    /// An empty tree using this system's marker and width method.
    #[must_use]
    pub fn tree(&self) -> MenuTree {
        MenuTree::with_marker(self.config.hotkey_marker).with_width_method(self.config.width_method)
    }

    /// The context menu whose bar is shown, if any.
    #[must_use]
    pub fn context_owner(&self) -> Option<ViewId> {
        self.context.as_ref().map(|c| c.owner)
    }

    /// Transient bar of the shown context menu.
    #[must_use]
    pub fn context_bar(&self) -> Option<&MenuBar> {
        self.context.as_ref().map(|c| &c.bar)
    }

    pub fn context_bar_mut(&mut self) -> Option<&mut MenuBar> {
        self.context.as_mut().map(|c| &mut c.bar)
    }

    pub(crate) fn install_context(&mut self, owner: ViewId, bar: MenuBar, closed: Rc<Cell<bool>>) {
        self.context = Some(ShownContext { owner, bar, closed });
    }

    /// Close and drop the shown context menu.
    pub fn hide_context(&mut self, host: &mut dyn Host) -> bool {
        let Some(mut shown) = self.context.take() else {
            return false;
        };
        shown.bar.force_close(host);
        if log_enabled(LogLevel::Debug) {
            emit_log(
                LogLevel::Debug,
                "menu.context",
                &format!("context menu {} hidden", shown.owner),
            );
        }
        true
    }

    /// Route an event to the shown context menu.
    ///
    /// The context menu is dropped as soon as its chain has fully closed.
    pub fn process_event(&mut self, host: &mut dyn Host, event: &Event) -> Result<bool> {
        let Some(shown) = self.context.as_mut() else {
            return Ok(false);
        };
        let handled = shown.bar.process_event(host, event);
        if shown.closed.get() {
            let owner = shown.owner;
            self.context = None;
            if log_enabled(LogLevel::Debug) {
                emit_log(
                    LogLevel::Debug,
                    "menu.context",
                    &format!("context menu {owner} dismissed"),
                );
            }
        }
        handled
    }
}
