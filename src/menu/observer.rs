//! Transition notifications raised by a menu bar.
//!
//! Observers are called synchronously while the bar is mid-transition. A
//! `Err(Veto)` from `opening` or `closing` aborts that transition and the
//! bar keeps its previous state.

use crate::menu::EntryId;

/// Returned by an observer to cancel a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Veto;

/// What to display for a level that is about to open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Opening {
    /// Display the candidate group.
    Proceed,
    /// Display this group instead.
    Replace(EntryId),
}

/// A level is about to close.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClosingEvent {
    /// Group shown by the closing level.
    pub group: EntryId,
    /// The bar closes only to reopen at another top-level index.
    pub reopening: bool,
    /// Only one nested level closes.
    pub is_submenu: bool,
}

/// Receiver of menu bar transitions. Every method has a no-op default.
pub trait MenuObserver {
    /// A level displaying `candidate` is about to open.
    fn opening(&mut self, _candidate: EntryId) -> Result<Opening, Veto> {
        Ok(Opening::Proceed)
    }

    /// A level opened. `parent` is the group shown one level up (or the
    /// top-level group itself), `entry` the group now displayed.
    fn opened(&mut self, _parent: EntryId, _entry: EntryId) {}

    /// A level is about to close.
    fn closing(&mut self, _event: &ClosingEvent) -> Result<(), Veto> {
        Ok(())
    }

    /// The whole chain closed and focus went back to the application.
    fn all_closed(&mut self) {}
}

/// Ordered list of observers.
#[derive(Default)]
pub struct Observers {
    list: Vec<Box<dyn MenuObserver>>,
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("len", &self.list.len())
            .finish()
    }
}

impl Observers {
    /// Add an observer.
    pub fn push(&mut self, observer: Box<dyn MenuObserver>) {
        self.list.push(observer);
    }

    /// Number of observers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Check if no observers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Ask every observer; the first veto wins, the last replacement wins.
    pub fn opening(&mut self, candidate: EntryId) -> Result<EntryId, Veto> {
        let mut shown = candidate;
        for observer in &mut self.list {
            if let Opening::Replace(group) = observer.opening(candidate)? {
                shown = group;
            }
        }
        Ok(shown)
    }

    pub fn opened(&mut self, parent: EntryId, entry: EntryId) {
        for observer in &mut self.list {
            observer.opened(parent, entry);
        }
    }

    pub fn closing(&mut self, event: &ClosingEvent) -> Result<(), Veto> {
        for observer in &mut self.list {
            observer.closing(event)?;
        }
        Ok(())
    }

    pub fn all_closed(&mut self) {
        for observer in &mut self.list {
            observer.all_closed();
        }
    }
}
