//! Menu interaction and layout benchmarks.

#![allow(clippy::semicolon_if_nothing_returned)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use opentui_menu::geometry::Rect;
use opentui_menu::host::HeadlessHost;
use opentui_menu::input::{KeyCode, KeyEvent, MouseEvent};
use opentui_menu::menu::{BarItem, Canvas, EntryId, MenuBar, MenuEntry, MenuRow, MenuSystem};
use opentui_menu::unicode::WidthMethod;
use std::hint::black_box;

/// Canvas that only lays rows out, so benchmarks measure menu work.
struct NullCanvas {
    cells: usize,
}

impl Canvas for NullCanvas {
    fn draw_frame(&mut self, frame: Rect, _focused: bool) {
        self.cells += (frame.width * frame.height) as usize;
    }

    fn draw_row(&mut self, _x: i32, _y: i32, row: &MenuRow) {
        self.cells += row.to_plain(WidthMethod::WcWidth).len();
    }

    fn draw_bar(&mut self, _frame: Rect, items: &[BarItem]) {
        self.cells += items.len();
    }
}

/// A bar with `menus` top-level groups of `rows` items, each group holding
/// one nested submenu of `rows` items.
fn build_bar(menus: usize, rows: usize) -> MenuBar {
    let system = MenuSystem::default();
    let mut tree = system.tree();
    let mut top: Vec<EntryId> = Vec::with_capacity(menus);
    for m in 0..menus {
        let nested: Vec<Option<EntryId>> = (0..rows)
            .map(|r| Some(tree.insert(MenuEntry::new(format!("Nested _{r}")).action(|| {}))))
            .collect();
        let sub = tree
            .insert_group(MenuEntry::new(format!("_More {m}")), Some(nested))
            .unwrap();
        let mut children: Vec<Option<EntryId>> = (0..rows)
            .map(|r| {
                let entry = MenuEntry::new(format!("Item {r}"))
                    .help("does a thing")
                    .action(|| {});
                Some(tree.insert(entry))
            })
            .collect();
        children.push(None);
        children.push(Some(sub));
        top.push(
            tree.insert_group(MenuEntry::new(format!("Menu {m}")), Some(children))
                .unwrap(),
        );
    }
    MenuBar::new(&system, tree, top).unwrap()
}

fn bench_open_close(c: &mut Criterion) {
    let mut group = c.benchmark_group("open_close");
    for rows in [4, 16, 64] {
        group.bench_with_input(BenchmarkId::from_parameter(rows), &rows, |b, &rows| {
            let mut bar = build_bar(4, rows);
            let mut host = HeadlessHost::new(200, 100);
            b.iter(|| {
                bar.open(&mut host, black_box(1)).unwrap();
                bar.close_all(&mut host);
            });
        });
    }
    group.finish();
}

fn bench_keyboard_navigation(c: &mut Criterion) {
    let mut group = c.benchmark_group("keyboard_navigation");
    let down = KeyEvent::key(KeyCode::Down);
    let right = KeyEvent::key(KeyCode::Right);

    group.bench_function("line_down_wrap", |b| {
        let mut bar = build_bar(4, 32);
        let mut host = HeadlessHost::new(200, 100);
        bar.open(&mut host, 0).unwrap();
        b.iter(|| bar.process_key(&mut host, black_box(&down)).unwrap());
    });

    group.bench_function("next_menu", |b| {
        let mut bar = build_bar(8, 16);
        let mut host = HeadlessHost::new(200, 100);
        bar.open(&mut host, 0).unwrap();
        b.iter(|| bar.process_key(&mut host, black_box(&right)).unwrap());
    });

    group.bench_function("shortcut_miss", |b| {
        let mut bar = build_bar(8, 64);
        let mut host = HeadlessHost::new(200, 100);
        let key = KeyEvent::with_ctrl(KeyCode::Char('k'));
        b.iter(|| bar.process_key(&mut host, black_box(&key)).unwrap());
    });

    group.finish();
}

fn bench_mouse_hover(c: &mut Criterion) {
    c.bench_function("hover_rows", |b| {
        let mut bar = build_bar(4, 16);
        let mut host = HeadlessHost::new(200, 100);
        bar.open(&mut host, 0).unwrap();
        let frame = bar.chain()[0].frame();
        let mut row = 0;
        b.iter(|| {
            row = (row + 1) % 16;
            let event = MouseEvent::move_to(frame.x + 2, frame.y + 1 + row);
            bar.process_mouse(&mut host, black_box(&event)).unwrap()
        });
    });
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    for rows in [8, 32] {
        group.bench_with_input(BenchmarkId::from_parameter(rows), &rows, |b, &rows| {
            let mut bar = build_bar(4, rows);
            let mut host = HeadlessHost::new(200, 100);
            bar.open(&mut host, 0).unwrap();
            b.iter(|| {
                let mut canvas = NullCanvas { cells: 0 };
                bar.render(&mut canvas);
                black_box(canvas.cells)
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_open_close,
    bench_keyboard_navigation,
    bench_mouse_hover,
    bench_render,
);
criterion_main!(benches);
