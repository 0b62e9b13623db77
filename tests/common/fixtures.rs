//! A small application menu used across integration tests.
//!
//! ```text
//! File            Edit              Run (simple)
//!   New  Ctrl+N     Undo  Ctrl+Z
//!   Open            Redo (disabled)
//!   ----            ----
//!   Recent >        Wrap [ ]
//!     a.txt
//!     b.txt
//!     More >
//!       c.txt
//!   ----
//!   Quit  Quit App  Ctrl+Q
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use opentui_menu::host::{HeadlessHost, Host, ViewId};
use opentui_menu::input::{KeyCode, KeyEvent};
use opentui_menu::menu::{EntryId, MenuBar, MenuEntry, MenuSystem, MenuTree};

use super::observer::RecorderHandle;

/// Screen used by the sample app.
pub const SCREEN_WIDTH: u32 = 80;
pub const SCREEN_HEIGHT: u32 = 25;

/// Ids of the sample menu entries.
#[derive(Clone, Copy, Debug)]
pub struct Ids {
    pub file: EntryId,
    pub new: EntryId,
    pub open: EntryId,
    pub recent: EntryId,
    pub a_txt: EntryId,
    pub b_txt: EntryId,
    pub more: EntryId,
    pub c_txt: EntryId,
    pub quit: EntryId,
    pub edit: EntryId,
    pub undo: EntryId,
    pub redo: EntryId,
    pub wrap: EntryId,
    pub run: EntryId,
}

/// The sample bar plus everything a test needs to drive it.
pub struct App {
    pub system: MenuSystem,
    pub bar: MenuBar,
    pub host: HeadlessHost,
    /// View focused before any menu opens.
    pub app_view: ViewId,
    pub ids: Ids,
    /// Names of actions that ran, in order.
    pub ran: Rc<RefCell<Vec<&'static str>>>,
    pub redo_enabled: Rc<Cell<bool>>,
    pub recorder: RecorderHandle,
}

fn recording(ran: &Rc<RefCell<Vec<&'static str>>>, name: &'static str) -> impl Fn() + 'static {
    let ran = Rc::clone(ran);
    move || ran.borrow_mut().push(name)
}

/// Build the sample tree; returns the tree and its ids.
pub fn sample_tree(
    system: &MenuSystem,
    ran: &Rc<RefCell<Vec<&'static str>>>,
    redo_enabled: &Rc<Cell<bool>>,
) -> (MenuTree, Ids) {
    let mut tree = system.tree();

    let new = tree.insert(
        MenuEntry::new("_New")
            .shortcut(KeyEvent::with_ctrl(KeyCode::Char('n')))
            .action(recording(ran, "new")),
    );
    let open = tree.insert(MenuEntry::new("_Open").action(recording(ran, "open")));
    let a_txt = tree.insert(MenuEntry::new("_a.txt").action(recording(ran, "a.txt")));
    let b_txt = tree.insert(MenuEntry::new("_b.txt").action(recording(ran, "b.txt")));
    let c_txt = tree.insert(MenuEntry::new("_c.txt").action(recording(ran, "c.txt")));
    let more = tree
        .insert_group(MenuEntry::new("_More"), Some(vec![Some(c_txt)]))
        .unwrap();
    let recent = tree
        .insert_group(
            MenuEntry::new("_Recent"),
            Some(vec![Some(a_txt), Some(b_txt), Some(more)]),
        )
        .unwrap();
    let quit = tree.insert(
        MenuEntry::new("_Quit")
            .help("Quit App")
            .shortcut(KeyEvent::with_ctrl(KeyCode::Char('q')))
            .action(recording(ran, "quit")),
    );
    let file = tree
        .insert_group(
            MenuEntry::new("_File"),
            Some(vec![Some(new), Some(open), None, Some(recent), None, Some(quit)]),
        )
        .unwrap();

    let undo = tree.insert(
        MenuEntry::new("_Undo")
            .shortcut(KeyEvent::with_ctrl(KeyCode::Char('z')))
            .action(recording(ran, "undo")),
    );
    let flag = Rc::clone(redo_enabled);
    let redo = tree.insert(
        MenuEntry::new("_Redo")
            .action(recording(ran, "redo"))
            .can_run(move || flag.get()),
    );
    let wrap = tree.insert(MenuEntry::new("_Wrap").checkbox(false));
    let edit = tree
        .insert_group(
            MenuEntry::new("_Edit"),
            Some(vec![Some(undo), Some(redo), None, Some(wrap)]),
        )
        .unwrap();

    let run = tree
        .insert_simple(MenuEntry::new("_Run").action(recording(ran, "run")))
        .unwrap();

    let ids = Ids {
        file,
        new,
        open,
        recent,
        a_txt,
        b_txt,
        more,
        c_txt,
        quit,
        edit,
        undo,
        redo,
        wrap,
        run,
    };
    (tree, ids)
}

impl App {
    pub fn new() -> Self {
        let system = MenuSystem::default();
        let ran = Rc::new(RefCell::new(Vec::new()));
        let redo_enabled = Rc::new(Cell::new(false));
        let (tree, ids) = sample_tree(&system, &ran, &redo_enabled);
        let mut bar = MenuBar::new(&system, tree, vec![ids.file, ids.edit, ids.run]).unwrap();
        let recorder = RecorderHandle::default();
        bar.add_observer(recorder.observer());

        let mut host = HeadlessHost::new(SCREEN_WIDTH, SCREEN_HEIGHT);
        let app_view = ViewId::next();
        host.set_focus(Some(app_view));

        Self {
            system,
            bar,
            host,
            app_view,
            ids,
            ran,
            redo_enabled,
            recorder,
        }
    }

    pub fn key(&mut self, key: KeyEvent) -> bool {
        let handled = self.bar.process_key(&mut self.host, &key).unwrap();
        self.check();
        handled
    }

    pub fn code(&mut self, code: KeyCode) -> bool {
        self.key(KeyEvent::key(code))
    }

    pub fn mouse(&mut self, event: opentui_menu::input::MouseEvent) -> bool {
        let handled = self.bar.process_mouse(&mut self.host, &event).unwrap();
        self.check();
        handled
    }

    /// Assert the bar's structural invariants.
    pub fn check(&self) {
        if let Err(message) = self.bar.check_invariants(&self.host) {
            panic!("invariant violated: {message}");
        }
    }

    /// Origins of the open levels, root first.
    pub fn chain_origins(&self) -> Vec<EntryId> {
        self.bar.chain().iter().map(|p| p.origin()).collect()
    }

    pub fn ran(&self) -> Vec<&'static str> {
        self.ran.borrow().clone()
    }
}
