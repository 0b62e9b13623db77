//! A character grid implementing the menu drawing contract.

use opentui_menu::geometry::Rect;
use opentui_menu::menu::{BarItem, Canvas, MenuRow};
use opentui_menu::unicode::WidthMethod;

/// Draws frames with `+-|`, rows through [`MenuRow::to_plain`] and bar
/// titles with the selected one in brackets.
#[derive(Debug)]
pub struct GridCanvas {
    width: usize,
    height: usize,
    cells: Vec<char>,
    pub frames: Vec<(Rect, bool)>,
    pub rows: Vec<MenuRow>,
}

impl GridCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![' '; width * height],
            frames: Vec::new(),
            rows: Vec::new(),
        }
    }

    fn put(&mut self, x: i32, y: i32, c: char) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = c;
        }
    }

    fn put_str(&mut self, x: i32, y: i32, s: &str) {
        for (i, c) in s.chars().enumerate() {
            self.put(x + i as i32, y, c);
        }
    }

    /// Grid contents with trailing blanks removed.
    pub fn text(&self) -> String {
        let lines: Vec<String> = self
            .cells
            .chunks(self.width)
            .map(|row| row.iter().collect::<String>().trim_end().to_string())
            .collect();
        lines.join("\n").trim_end().to_string()
    }
}

impl Canvas for GridCanvas {
    fn draw_frame(&mut self, frame: Rect, focused: bool) {
        self.frames.push((frame, focused));
        let right = frame.right() - 1;
        let bottom = frame.bottom() - 1;
        for y in frame.y..=bottom {
            for x in frame.x..=right {
                let edge_x = x == frame.x || x == right;
                let edge_y = y == frame.y || y == bottom;
                let c = match (edge_x, edge_y) {
                    (true, true) => '+',
                    (false, true) => '-',
                    (true, false) => '|',
                    (false, false) => ' ',
                };
                self.put(x, y, c);
            }
        }
    }

    fn draw_row(&mut self, x: i32, y: i32, row: &MenuRow) {
        self.rows.push(row.clone());
        let text = row.to_plain(WidthMethod::WcWidth);
        self.put_str(x, y, &text);
    }

    fn draw_bar(&mut self, frame: Rect, items: &[BarItem]) {
        for x in frame.x..frame.right() {
            self.put(x, frame.y, ' ');
        }
        for item in items {
            let cell = if item.selected {
                format!("[{}]", item.title)
            } else {
                format!(" {} ", item.title)
            };
            self.put_str(item.x, frame.y, &cell);
        }
    }
}
