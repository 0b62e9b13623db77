//! Display width calculation for menu layout.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Width calculation method for ambiguous-width characters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WidthMethod {
    /// POSIX-like wcwidth: ambiguous width = 1.
    #[default]
    WcWidth,
    /// Unicode East Asian Width: ambiguous width = 2.
    Unicode,
}

/// Display width of a string in terminal columns.
#[must_use]
pub fn display_width(s: &str, method: WidthMethod) -> usize {
    if s.is_ascii() {
        return s.bytes().filter(|b| (b' '..=b'~').contains(b)).count();
    }
    match method {
        WidthMethod::WcWidth => UnicodeWidthStr::width(s),
        WidthMethod::Unicode => UnicodeWidthStr::width_cjk(s),
    }
}

/// Display width of a single character.
#[must_use]
pub fn display_width_char(c: char, method: WidthMethod) -> usize {
    if c.is_ascii() && (' '..='~').contains(&c) {
        return 1;
    }
    match method {
        WidthMethod::WcWidth => UnicodeWidthChar::width(c).unwrap_or(0),
        WidthMethod::Unicode => UnicodeWidthChar::width_cjk(c).unwrap_or(0),
    }
}

/// Columns reserved for a menu title.
///
/// Every grapheme takes at least one column so zero-width glyphs still get
/// a cell of their own in the menu row.
#[must_use]
pub fn glyph_columns(s: &str, method: WidthMethod) -> usize {
    s.graphemes(true)
        .map(|g| display_width(g, method).max(1))
        .sum()
}
