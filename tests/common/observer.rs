//! Observer that records every transition and can veto on demand.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use opentui_menu::menu::{ClosingEvent, EntryId, MenuObserver, Opening, Veto};

/// Shared switches and log behind a [`Recorder`].
#[derive(Clone, Default)]
pub struct RecorderHandle {
    pub log: Rc<RefCell<Vec<String>>>,
    pub veto_open: Rc<Cell<bool>>,
    pub veto_close: Rc<Cell<bool>>,
    pub veto_close_submenu: Rc<Cell<bool>>,
    pub replace_with: Rc<Cell<Option<EntryId>>>,
}

impl RecorderHandle {
    pub fn observer(&self) -> Box<dyn MenuObserver> {
        Box::new(Recorder(self.clone()))
    }

    pub fn events(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.log
            .borrow()
            .iter()
            .filter(|e| e.starts_with(prefix))
            .count()
    }
}

pub struct Recorder(RecorderHandle);

impl MenuObserver for Recorder {
    fn opening(&mut self, candidate: EntryId) -> Result<Opening, Veto> {
        self.0
            .log
            .borrow_mut()
            .push(format!("opening {}", candidate.index()));
        if self.0.veto_open.get() {
            return Err(Veto);
        }
        Ok(match self.0.replace_with.get() {
            Some(group) => Opening::Replace(group),
            None => Opening::Proceed,
        })
    }

    fn opened(&mut self, parent: EntryId, entry: EntryId) {
        self.0
            .log
            .borrow_mut()
            .push(format!("opened {} {}", parent.index(), entry.index()));
    }

    fn closing(&mut self, event: &ClosingEvent) -> Result<(), Veto> {
        self.0.log.borrow_mut().push(format!(
            "closing {} reopening={} submenu={}",
            event.group.index(),
            event.reopening,
            event.is_submenu
        ));
        let veto = if event.is_submenu {
            self.0.veto_close_submenu.get()
        } else {
            self.0.veto_close.get()
        };
        if veto { Err(Veto) } else { Ok(()) }
    }

    fn all_closed(&mut self) {
        self.0.log.borrow_mut().push("all_closed".to_string());
    }
}
