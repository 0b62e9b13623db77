//! Popup sizing and placement.
//!
//! Every function here is pure: given the natural size of a popup, an
//! anchor and the screen bounds it returns the frame to use. Overflow is
//! resolved by flipping or shifting first and clipping at the screen edge
//! last.

use crate::geometry::{Point, Rect, Size};

/// Frame size for a popup whose rows have the given layout widths.
///
/// Separators are passed as `None`; they count toward the height only.
#[must_use]
pub fn popup_size<I>(row_widths: I) -> Size
where
    I: IntoIterator<Item = Option<usize>>,
{
    let mut rows = 0_u32;
    let mut widest = 0_usize;
    for width in row_widths {
        rows += 1;
        if let Some(width) = width {
            widest = widest.max(width);
        }
    }
    Size::new(2 + widest as u32, 2 + rows)
}

fn screen_i32(len: u32) -> i32 {
    i32::try_from(len).unwrap_or(i32::MAX)
}

/// Clip `rect` so it does not extend past the right or bottom screen edge.
///
/// The origin is pulled on-screen first; size shrinks only when the
/// rectangle is larger than the screen itself.
#[must_use]
pub fn clip_to_screen(rect: Rect, screen: Size) -> Rect {
    let cols = screen_i32(screen.width);
    let rows = screen_i32(screen.height);
    let x = rect.x.max(0);
    let y = rect.y.max(0);
    let width = rect.width.min((cols - x).max(0) as u32);
    let height = rect.height.min((rows - y).max(0) as u32);
    Rect::new(x, y, width, height)
}

/// Frame for a top-level popup hanging below a bar title at `anchor`.
///
/// Horizontal overflow moves the popup left until its right edge meets
/// the screen edge; vertical overflow shifts it up.
#[must_use]
pub fn place_top_level(anchor: Point, size: Size, screen: Size) -> Rect {
    let cols = screen_i32(screen.width);
    let rows = screen_i32(screen.height);
    let mut rect = Rect::from_parts(anchor, size);
    if rect.right() > cols {
        rect.x = cols - screen_i32(size.width);
    }
    if rect.bottom() > rows {
        rect.y = rows - screen_i32(size.height);
    }
    clip_to_screen(rect, screen)
}

/// Frame for a cascading popup opened from `row` of `parent`.
///
/// The child's first row lines up with the parent's row and it attaches
/// to the parent's right edge, or to its left edge when the right side
/// would overflow.
#[must_use]
pub fn place_cascade(parent: Rect, row: usize, size: Size, screen: Size) -> Rect {
    let cols = screen_i32(screen.width);
    let rows = screen_i32(screen.height);
    let width = screen_i32(size.width);
    let row = i32::try_from(row).unwrap_or(i32::MAX);
    let mut rect = Rect::new(
        parent.right(),
        parent.y.saturating_add(row),
        size.width,
        size.height,
    );
    if rect.right() > cols {
        rect.x = parent.x - width;
    }
    if rect.bottom() > rows {
        rect.y = rows - screen_i32(size.height);
    }
    clip_to_screen(rect, screen)
}

/// Frame for a single-frame submenu replacing the popup at `current`.
#[must_use]
pub fn place_in_place(current: Rect, size: Size, screen: Size) -> Rect {
    place_top_level(current.origin(), size, screen)
}

/// Frame for a context menu.
///
/// `position` is the requested top-left corner. With an `anchor` frame, a
/// popup that does not fit below flips above the anchor; otherwise it is
/// shifted up. Without `force_min_zero` a negative column or row is kept
/// and the renderer clips.
#[must_use]
pub fn place_context(
    position: Point,
    anchor: Option<Rect>,
    size: Size,
    screen: Size,
    force_min_zero: bool,
) -> Rect {
    let cols = screen_i32(screen.width);
    let rows = screen_i32(screen.height);
    let width = screen_i32(size.width);
    let height = screen_i32(size.height);
    let mut rect = Rect::from_parts(position, size);

    if rect.right() > cols {
        rect.x = cols - width;
    }
    if rect.bottom() > rows {
        rect.y = match anchor {
            Some(frame) => frame.y - height,
            None => rows - height,
        };
    }
    if force_min_zero {
        rect.x = rect.x.max(0);
        rect.y = rect.y.max(0);
    }
    rect
}
