//! Unicode utilities for menu title measurement.

mod width;

pub use width::{WidthMethod, display_width, display_width_char, glyph_columns};
