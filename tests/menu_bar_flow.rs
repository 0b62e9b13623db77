//! End-to-end keyboard and mouse flows through a menu bar.
//!
//! Every step goes through `App`, which checks the bar's structural
//! invariants after each event.

mod common;

use common::fixtures::App;
use opentui_menu::host::Host;
use opentui_menu::input::{Event, KeyCode, KeyEvent, MouseEvent, ResizeEvent};
use opentui_menu::unicode::WidthMethod;

// ============================================================================
// Open / close
// ============================================================================

#[test]
fn test_activation_key_opens_first_menu_and_esc_restores_focus() {
    common::init_logging();
    let mut app = App::new();

    assert!(app.code(KeyCode::F(9)));
    assert!(app.bar.is_open());
    assert_eq!(app.bar.selected(), 0);
    assert_eq!(app.chain_origins(), vec![app.ids.file]);
    let popup = &app.bar.chain()[0];
    assert_eq!(popup.current_index(), 0);
    assert_eq!(app.host.focused(), Some(popup.view()));
    assert_eq!(app.host.mouse_grabber(), Some(popup.view()));

    assert!(app.code(KeyCode::Esc));
    assert!(!app.bar.is_open());
    assert_eq!(app.bar.selected(), -1);
    assert_eq!(app.host.focused(), Some(app.app_view));
    assert_eq!(app.host.mouse_grabber(), None);
    assert!(app.host.views().is_empty());
    let (grabs, ungrabs) = app.host.grab_counts();
    assert_eq!(grabs, ungrabs);
}

#[test]
fn test_ctrl_space_toggles() {
    let mut app = App::new();
    let ctrl_space = KeyEvent::with_ctrl(KeyCode::Char(' '));
    assert!(app.key(ctrl_space));
    assert!(app.bar.is_open());
    assert!(app.key(ctrl_space));
    assert!(!app.bar.is_open());
}

#[test]
fn test_observer_sees_open_and_close() {
    let mut app = App::new();
    app.code(KeyCode::F(9));
    app.code(KeyCode::Esc);
    let file = app.ids.file.index();
    assert_eq!(
        app.recorder.events(),
        vec![
            format!("opening {file}"),
            format!("opened {file} {file}"),
            format!("closing {file} reopening=false submenu=false"),
            "all_closed".to_string(),
        ]
    );
}

#[test]
fn test_closing_top_level_removes_whole_chain() {
    let mut app = App::new();
    app.code(KeyCode::F(9));
    app.code(KeyCode::Down); // Open
    app.code(KeyCode::Down); // Recent, separator skipped
    app.code(KeyCode::Right);
    app.code(KeyCode::Down); // b.txt
    app.code(KeyCode::Down); // More
    app.code(KeyCode::Right);
    assert_eq!(
        app.chain_origins(),
        vec![app.ids.file, app.ids.recent, app.ids.more]
    );
    assert_eq!(app.host.views().len(), 3);
    assert_eq!(app.bar.selected_sub(), 2);

    assert!(app.bar.close(&mut app.host, false, false));
    app.check();
    assert!(!app.bar.is_open());
    assert!(app.host.views().is_empty());
    assert_eq!(app.host.focused(), Some(app.app_view));
    assert_eq!(app.bar.selected_sub(), -1);
}

#[test]
fn test_left_closes_one_level() {
    let mut app = App::new();
    app.code(KeyCode::F(9));
    app.code(KeyCode::Down);
    app.code(KeyCode::Down);
    app.code(KeyCode::Right);
    let parent_view = app.bar.chain()[0].view();
    assert_eq!(app.bar.chain().len(), 2);

    app.code(KeyCode::Left);
    assert_eq!(app.chain_origins(), vec![app.ids.file]);
    assert_eq!(app.host.focused(), Some(parent_view));
    assert_eq!(app.host.mouse_grabber(), Some(parent_view));
    assert_eq!(app.bar.selected_sub(), 0);
}

#[test]
fn test_cascade_frames_line_up_with_parent_rows() {
    let mut app = App::new();
    app.code(KeyCode::F(9));
    app.code(KeyCode::Down);
    app.code(KeyCode::Down);
    app.code(KeyCode::Right);
    let root = app.bar.chain()[0].frame();
    let child = app.bar.chain()[1].frame();
    assert_eq!((root.x, root.y, root.width, root.height), (0, 1, 27, 8));
    assert_eq!(child.x, root.right());
    // Recent is row 3; the child's first row sits on the same screen line.
    assert_eq!(child.y + 1, root.y + 1 + 3);
}

// ============================================================================
// Top-level navigation
// ============================================================================

#[test]
fn test_right_moves_to_next_menu() {
    let mut app = App::new();
    app.code(KeyCode::F(9));
    assert_eq!(app.bar.chain()[0].current_index(), 0);

    app.code(KeyCode::Right);
    assert_eq!(app.bar.selected(), 1);
    assert_eq!(app.chain_origins(), vec![app.ids.edit]);
    assert_eq!(app.host.views(), vec![app.bar.chain()[0].view()]);
    let frame = app.bar.chain()[0].frame();
    assert_eq!((frame.x, frame.y), (6, 1));
}

#[test]
fn test_simple_entry_is_highlighted_then_run_on_enter() {
    let mut app = App::new();
    app.code(KeyCode::F(9));
    app.code(KeyCode::Right);
    app.code(KeyCode::Right);
    assert_eq!(app.bar.selected(), 2);
    assert!(!app.bar.is_open());
    assert!(app.bar.is_active());
    assert_eq!(app.host.focused(), Some(app.bar.view()));

    // Wraps around to File.
    app.code(KeyCode::Right);
    assert_eq!(app.chain_origins(), vec![app.ids.file]);
    app.code(KeyCode::Left);
    assert!(app.bar.is_active());

    app.code(KeyCode::Enter);
    assert!(!app.bar.is_active());
    assert_eq!(app.bar.selected(), -1);
    assert_eq!(app.host.focused(), Some(app.app_view));
    assert!(app.ran().is_empty());
    assert_eq!(app.host.run_idle(), 1);
    assert_eq!(app.ran(), vec!["run"]);
}

#[test]
fn test_reopen_keeps_selection_and_mode_flags() {
    let mut app = App::new();
    app.bar.set_use_single_frame_submenus(true);
    app.bar.open(&mut app.host, 0).unwrap();
    app.recorder.clear();

    assert!(app.bar.close(&mut app.host, true, false));
    app.check();
    assert_eq!(app.bar.selected(), 0);
    assert!(!app.bar.is_open());
    assert_eq!(app.recorder.count("all_closed"), 0);
    assert_eq!(
        app.recorder.events()[0],
        format!("closing {} reopening=true submenu=false", app.ids.file.index())
    );

    assert!(app.bar.open(&mut app.host, 1).unwrap());
    app.check();
    assert!(app.bar.use_single_frame_submenus());
    assert!(!app.bar.use_arrows_as_left_right());
    assert_eq!(app.host.focused(), Some(app.bar.chain()[0].view()));
}

// ============================================================================
// Hot keys and shortcuts
// ============================================================================

#[test]
fn test_alt_hotkey_opens_and_plain_hotkey_runs() {
    let mut app = App::new();
    assert!(!app.key(KeyEvent::char('e')));
    assert!(!app.bar.is_open());

    assert!(app.key(KeyEvent::with_alt(KeyCode::Char('e'))));
    assert_eq!(app.chain_origins(), vec![app.ids.edit]);

    // Redo is disabled: no match, but the open menu swallows the key.
    assert!(app.key(KeyEvent::char('r')));
    assert!(app.bar.is_open());

    assert!(app.key(KeyEvent::char('u')));
    assert!(!app.bar.is_open());
    app.host.run_idle();
    assert_eq!(app.ran(), vec!["undo"]);
}

#[test]
fn test_hotkeys_only_match_displayed_level() {
    let mut app = App::new();
    app.code(KeyCode::F(9));
    // More lives two levels down.
    app.key(KeyEvent::char('m'));
    assert_eq!(app.chain_origins(), vec![app.ids.file]);

    app.key(KeyEvent::char('r'));
    assert_eq!(app.chain_origins(), vec![app.ids.file, app.ids.recent]);
    app.key(KeyEvent::char('m'));
    assert_eq!(
        app.chain_origins(),
        vec![app.ids.file, app.ids.recent, app.ids.more]
    );
}

#[test]
fn test_shortcut_runs_without_opening() {
    let mut app = App::new();
    assert!(app.key(KeyEvent::with_ctrl(KeyCode::Char('q'))));
    assert!(!app.bar.is_open());
    assert!(app.recorder.events().is_empty());
    app.host.run_idle();
    assert_eq!(app.ran(), vec!["quit"]);
}

#[test]
fn test_shortcut_from_other_menu_closes_chain_first() {
    let mut app = App::new();
    app.bar.open(&mut app.host, 1).unwrap();
    assert!(app.key(KeyEvent::with_ctrl(KeyCode::Char('N'))));
    assert!(!app.bar.is_open());
    assert_eq!(app.host.focused(), Some(app.app_view));
    assert_eq!(app.host.pending_idle(), 1);
    app.host.run_idle();
    assert_eq!(app.ran(), vec!["new"]);
}

// ============================================================================
// Mode flags
// ============================================================================

#[test]
fn test_arrows_as_left_right_cascades_on_landing() {
    let mut app = App::new();
    app.bar.set_use_arrows_as_left_right(true);
    app.code(KeyCode::F(9));
    app.code(KeyCode::Down);
    assert_eq!(app.bar.chain().len(), 1);
    app.code(KeyCode::Down);
    assert_eq!(app.chain_origins(), vec![app.ids.file, app.ids.recent]);
    app.code(KeyCode::Down);
    app.code(KeyCode::Down);
    assert_eq!(
        app.chain_origins(),
        vec![app.ids.file, app.ids.recent, app.ids.more]
    );
}

#[test]
fn test_single_frame_replaces_parent_and_header_goes_back() {
    let mut app = App::new();
    app.bar.set_use_single_frame_submenus(true);
    app.code(KeyCode::F(9));
    app.code(KeyCode::Down);
    app.code(KeyCode::Down);
    let parent_frame = app.bar.chain()[0].frame();
    app.code(KeyCode::Enter);

    let chain = app.bar.chain();
    assert_eq!(chain.len(), 2);
    assert!(!chain[0].is_visible());
    assert!(chain[1].is_flattened());
    assert_eq!(chain[1].frame().origin(), parent_frame.origin());
    assert_eq!(app.host.views(), vec![chain[1].view()]);
    // Header, separator, then the first child is highlighted.
    assert_eq!(chain[1].current_index(), 2);

    app.code(KeyCode::Up); // onto the header
    assert_eq!(app.bar.chain()[1].current_index(), 0);
    app.code(KeyCode::Enter);
    let root = &app.bar.chain()[0];
    assert_eq!(app.bar.chain().len(), 1);
    assert!(root.is_visible());
    assert_eq!(app.host.views(), vec![root.view()]);
    assert_eq!(app.host.focused(), Some(root.view()));
}

// ============================================================================
// Deferred actions and vetoes
// ============================================================================

#[test]
fn test_click_runs_action_once_after_teardown() {
    let mut app = App::new();
    app.code(KeyCode::F(9));
    // Quit is row 5 of the popup at (0, 1).
    assert!(app.mouse(MouseEvent::click(3, 7)));
    assert!(!app.bar.is_open());
    assert!(app.ran().is_empty());
    assert_eq!(app.host.run_idle(), 1);
    assert_eq!(app.host.run_idle(), 0);
    assert_eq!(app.ran(), vec!["quit"]);
}

#[test]
fn test_vetoed_submenu_close_keeps_chain() {
    let mut app = App::new();
    app.code(KeyCode::F(9));
    app.key(KeyEvent::char('r'));
    let child_view = app.bar.chain()[1].view();

    app.recorder.veto_close_submenu.set(true);
    assert!(app.code(KeyCode::Esc));
    assert_eq!(app.bar.chain().len(), 2);
    assert_eq!(app.bar.chain()[0].current_entry(app.bar.tree()), Some(app.ids.recent));
    assert_eq!(app.host.focused(), Some(child_view));
    assert_eq!(app.host.mouse_grabber(), Some(child_view));

    app.recorder.veto_close_submenu.set(false);
    app.code(KeyCode::Esc);
    assert_eq!(app.bar.chain().len(), 1);
}

#[test]
fn test_vetoed_close_cancels_action() {
    let mut app = App::new();
    app.code(KeyCode::F(9));
    app.recorder.veto_close.set(true);
    app.code(KeyCode::Enter);
    assert!(app.bar.is_open());
    assert_eq!(app.host.pending_idle(), 0);
}

#[test]
fn test_vetoed_open_leaves_bar_closed() {
    let mut app = App::new();
    app.recorder.veto_open.set(true);
    assert!(app.code(KeyCode::F(9)));
    assert!(!app.bar.is_open());
    assert_eq!(app.bar.selected(), -1);
    assert_eq!(app.host.focused(), Some(app.app_view));
    assert_eq!(app.host.mouse_grabber(), None);
}

#[test]
fn test_observer_can_substitute_group() {
    let mut app = App::new();
    app.recorder.replace_with.set(Some(app.ids.recent));
    app.bar.open(&mut app.host, 0).unwrap();
    app.check();
    let popup = &app.bar.chain()[0];
    assert_eq!(popup.origin(), app.ids.file);
    assert_eq!(popup.group(), app.ids.recent);
    assert_eq!(popup.current_entry(app.bar.tree()), Some(app.ids.a_txt));
}

#[test]
fn test_resize_force_closes_even_when_vetoed() {
    let mut app = App::new();
    app.code(KeyCode::F(9));
    app.key(KeyEvent::char('r'));
    assert_eq!(app.bar.chain().len(), 2);

    app.recorder.veto_close.set(true);
    app.recorder.veto_close_submenu.set(true);
    app.host.resize(100, 30);
    let resize = Event::Resize(ResizeEvent::new(100, 30));
    assert!(app.bar.process_event(&mut app.host, &resize).unwrap());
    app.check();
    assert!(!app.bar.is_open());
    assert!(app.host.views().is_empty());
    assert_eq!(app.recorder.count("all_closed"), 1);
    assert_eq!(app.host.focused(), Some(app.app_view));
}

// ============================================================================
// Mouse
// ============================================================================

#[test]
fn test_click_on_disabled_entry_does_nothing() {
    let mut app = App::new();
    app.bar.open(&mut app.host, 1).unwrap();
    // Edit popup at (6, 1); Redo is row 1.
    assert!(app.mouse(MouseEvent::click(8, 3)));
    assert_eq!(app.bar.chain()[0].current_index(), 0);
    assert_eq!(app.host.run_idle(), 0);

    app.redo_enabled.set(true);
    app.mouse(MouseEvent::click(8, 3));
    assert!(!app.bar.is_open());
    app.host.run_idle();
    assert_eq!(app.ran(), vec!["redo"]);
}

#[test]
fn test_hover_walk_through_cascades() {
    let mut app = App::new();
    app.code(KeyCode::F(9));
    app.mouse(MouseEvent::move_to(2, 5)); // Recent
    assert_eq!(app.chain_origins(), vec![app.ids.file, app.ids.recent]);
    let recent = app.bar.chain()[1].frame();
    app.mouse(MouseEvent::move_to(recent.x + 1, recent.y + 3)); // More
    assert_eq!(app.bar.chain().len(), 3);

    app.mouse(MouseEvent::move_to(2, 3)); // Open, back in the root
    assert_eq!(app.chain_origins(), vec![app.ids.file]);
    assert_eq!(app.bar.chain()[0].current_entry(app.bar.tree()), Some(app.ids.open));
}

#[test]
fn test_press_outside_closes_and_is_not_consumed() {
    let mut app = App::new();
    app.code(KeyCode::F(9));
    assert!(!app.mouse(MouseEvent::press(60, 20)));
    assert!(!app.bar.is_open());
    assert_eq!(app.host.focused(), Some(app.app_view));
    assert_eq!(app.recorder.count("all_closed"), 1);
}

#[test]
fn test_bar_title_click_toggles_and_hover_switches() {
    let mut app = App::new();
    assert!(app.mouse(MouseEvent::press(1, 0)));
    assert_eq!(app.chain_origins(), vec![app.ids.file]);
    app.mouse(MouseEvent::move_to(8, 0));
    assert_eq!(app.chain_origins(), vec![app.ids.edit]);
    app.mouse(MouseEvent::press(8, 0));
    assert!(!app.bar.is_open());
    assert_eq!(app.bar.selected(), -1);
}

#[test]
fn test_click_on_simple_title_runs_it() {
    let mut app = App::new();
    // Run starts at column 12.
    assert!(app.mouse(MouseEvent::click(13, 0)));
    assert!(!app.bar.is_open());
    assert!(!app.bar.is_active());
    app.host.run_idle();
    assert_eq!(app.ran(), vec!["run"]);
}

// ============================================================================
// Layout metrics
// ============================================================================

#[test]
fn test_quit_entry_metrics() {
    let app = App::new();
    let quit = app.bar.tree().entry(app.ids.quit).unwrap();
    assert_eq!(quit.shortcut_tag(), "Ctrl+Q");
    assert_eq!(quit.hotkey(), Some('Q'));
    assert_eq!(quit.width(WidthMethod::WcWidth), 1 + 4 + 2 + (2 + 8) + (2 + 6));
}

#[test]
fn test_popup_height_counts_separators() {
    let mut app = App::new();
    app.code(KeyCode::F(9));
    let frame = app.bar.chain()[0].frame();
    let children = app.bar.tree().children(app.ids.file).len() as u32;
    assert_eq!(frame.height, children + 2);
}
