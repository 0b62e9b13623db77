//! Error types for the menu subsystem.

use std::fmt;

use crate::menu::EntryId;

/// Result type alias for menu operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for menu operations.
///
/// Vetoed transitions are not errors; observers report those through
/// [`Veto`](crate::menu::Veto) and the bar rolls its state back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A constructor received an argument it cannot work with
    /// (e.g. a non-simple group built without a children list).
    InvalidArgument(String),
    /// The operation does not apply to this entry (e.g. toggling a
    /// non-checkbox entry). No state was changed.
    InvalidOperation(String),
    /// The id does not name an entry of the tree.
    UnknownEntry(EntryId),
    /// A top-level index outside the bar.
    IndexOutOfRange { index: usize, len: usize },
    /// A key chord string could not be parsed.
    ParseKey(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(s) => write!(f, "invalid argument: {s}"),
            Self::InvalidOperation(s) => write!(f, "invalid operation: {s}"),
            Self::UnknownEntry(id) => write!(f, "unknown menu entry {}", id.index()),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "menu index {index} out of range for {len} entries")
            }
            Self::ParseKey(s) => write!(f, "cannot parse key chord: {s:?}"),
        }
    }
}

impl std::error::Error for Error {}
