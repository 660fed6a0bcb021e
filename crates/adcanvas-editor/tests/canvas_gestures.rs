//! Integration tests: pointer, wheel and keyboard gestures on the canvas.
//!
//! The demo board at scale 1 has nodes sized 256×120:
//! campaign-1 at (100,100), adset-1 at (400,200), ad-1 at (700,300).

use adcanvas_core::{Board, CanvasConfig, IdGenerator, NodeId, NodeKind, Point, WheelOutcome};
use adcanvas_editor::{Button, CanvasEditor, EditorEvent, InputEvent, Modifiers};
use pretty_assertions::assert_eq;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn clock() -> u64 {
    1_700_000_000_000
}

fn make_editor() -> CanvasEditor {
    init();
    CanvasEditor::with_ids(Board::demo(), CanvasConfig::default(), IdGenerator::new(11, clock))
}

fn id(name: &str) -> NodeId {
    NodeId::intern(name)
}

fn position(editor: &CanvasEditor, name: &str) -> Point {
    editor.node(id(name)).map(|n| n.position).unwrap()
}

fn press(editor: &mut CanvasEditor, x: f64, y: f64, modifiers: Modifiers) {
    editor.pointer_down(Point::new(x, y), Button::Primary, modifiers);
}

fn click(editor: &mut CanvasEditor, x: f64, y: f64, modifiers: Modifiers) {
    press(editor, x, y, modifiers);
    editor.pointer_up(Point::new(x, y));
}

fn drag(editor: &mut CanvasEditor, from: (f64, f64), to: (f64, f64), modifiers: Modifiers) {
    press(editor, from.0, from.1, modifiers);
    editor.pointer_move(Point::new(to.0, to.1));
    editor.pointer_up(Point::new(to.0, to.1));
}

// ─── Drag ───────────────────────────────────────────────────────────────

#[test]
fn drag_moves_node_by_pointer_delta() {
    let mut editor = make_editor();
    drag(&mut editor, (150.0, 150.0), (250.0, 200.0), Modifiers::NONE);
    assert_eq!(position(&editor, "campaign-1"), Point::new(200.0, 150.0));
}

#[test]
fn drag_is_clamped_to_surface() {
    let mut editor = make_editor();
    editor.set_surface_size(1000.0, 800.0);

    press(&mut editor, 150.0, 150.0, Modifiers::NONE);
    editor.pointer_move(Point::new(5000.0, 5000.0));
    assert_eq!(position(&editor, "campaign-1"), Point::new(744.0, 680.0));
    editor.pointer_move(Point::new(-500.0, -500.0));
    assert_eq!(position(&editor, "campaign-1"), Point::ZERO);
    editor.pointer_up(Point::new(-500.0, -500.0));

    for node in editor.nodes() {
        assert!(node.position.x >= 0.0 && node.position.x <= 1000.0 - 256.0);
        assert!(node.position.y >= 0.0 && node.position.y <= 800.0 - 120.0);
    }
}

#[test]
fn clamp_uses_reported_element_size() {
    let mut editor = make_editor();
    editor.set_surface_size(1000.0, 800.0);
    editor.report_element_size(id("campaign-1"), 300.0, 200.0);
    drag(&mut editor, (150.0, 150.0), (5000.0, 5000.0), Modifiers::NONE);
    assert_eq!(position(&editor, "campaign-1"), Point::new(700.0, 600.0));
}

#[test]
fn drag_emits_positions_and_resolves_outside_canvas() {
    let mut editor = make_editor();
    press(&mut editor, 150.0, 150.0, Modifiers::NONE);
    editor.pointer_move(Point::new(160.0, 150.0));
    assert!(editor.captures_pointer());
    // Released far outside: still resolves.
    editor.pointer_up(Point::new(-9000.0, 12000.0));
    assert!(!editor.captures_pointer());

    let moved: Vec<_> = editor
        .take_events()
        .into_iter()
        .filter(|e| matches!(e, EditorEvent::PositionChanged { .. }))
        .collect();
    assert_eq!(
        moved,
        vec![EditorEvent::PositionChanged {
            id: id("campaign-1"),
            position: Point::new(110.0, 100.0),
        }]
    );
}

#[test]
fn drag_under_zoom_tracks_canvas_units() {
    let mut editor = make_editor();
    editor.wheel(0.0, -100.0, Modifiers::CMD);
    assert_eq!(editor.viewport().scale(), 2.0);
    // campaign-1 is drawn at (200,200) on screen now.
    drag(&mut editor, (220.0, 220.0), (420.0, 220.0), Modifiers::NONE);
    assert_eq!(position(&editor, "campaign-1"), Point::new(200.0, 100.0));
}

#[test]
fn small_movement_is_a_click() {
    let mut editor = make_editor();
    drag(&mut editor, (150.0, 150.0), (153.0, 152.0), Modifiers::NONE);
    assert_eq!(position(&editor, "campaign-1"), Point::new(100.0, 100.0));
    assert_eq!(editor.selected(), vec![id("campaign-1")]);
}

// ─── Selection ──────────────────────────────────────────────────────────

#[test]
fn plain_click_replaces_selection() {
    let mut editor = make_editor();
    click(&mut editor, 150.0, 150.0, Modifiers::NONE);
    click(&mut editor, 500.0, 250.0, Modifiers::NONE);
    assert_eq!(editor.selected(), vec![id("adset-1")]);
}

#[test]
fn modifier_click_toggles() {
    let mut editor = make_editor();
    click(&mut editor, 150.0, 150.0, Modifiers::NONE);
    click(&mut editor, 500.0, 250.0, Modifiers::SHIFT);
    assert_eq!(editor.selected(), vec![id("campaign-1"), id("adset-1")]);

    let summary = editor.bulk_summary().unwrap();
    assert_eq!(summary.count, 2);
    assert_eq!(summary.kind, None);

    click(&mut editor, 150.0, 150.0, Modifiers::CMD);
    assert_eq!(editor.selected(), vec![id("adset-1")]);
    assert_eq!(editor.bulk_summary(), None);
}

#[test]
fn marquee_selects_anchors_inside() {
    let mut editor = make_editor();
    drag(&mut editor, (50.0, 50.0), (450.0, 250.0), Modifiers::NONE);
    assert_eq!(editor.selected(), vec![id("campaign-1"), id("adset-1")]);
    assert!(editor.marquee_rect().is_none());
}

#[test]
fn marquee_drawn_backwards_is_normalized() {
    let mut editor = make_editor();
    // Background between adset-1 and ad-1, clear of adset-1's port.
    press(&mut editor, 660.0, 250.0, Modifiers::NONE);
    editor.pointer_move(Point::new(50.0, 50.0));
    let rect = editor.marquee_rect().unwrap();
    assert_eq!((rect.x, rect.y, rect.width, rect.height), (50.0, 50.0, 610.0, 200.0));
    editor.pointer_up(Point::new(50.0, 50.0));
    assert_eq!(editor.selected(), vec![id("campaign-1"), id("adset-1")]);
}

#[test]
fn tiny_marquee_is_a_background_click() {
    let mut editor = make_editor();
    click(&mut editor, 150.0, 150.0, Modifiers::NONE);
    drag(&mut editor, (50.0, 50.0), (53.0, 52.0), Modifiers::NONE);
    assert!(editor.selected().is_empty());
}

#[test]
fn shift_marquee_adds() {
    let mut editor = make_editor();
    click(&mut editor, 800.0, 350.0, Modifiers::NONE);
    drag(&mut editor, (50.0, 50.0), (150.0, 150.0), Modifiers::SHIFT);
    assert_eq!(editor.selected(), vec![id("campaign-1"), id("ad-1")]);
}

#[test]
fn marquee_under_zoom_converts_to_canvas() {
    let mut editor = make_editor();
    editor.wheel(0.0, -100.0, Modifiers::CMD);
    // Screen (150,150)-(300,300) is canvas (75,75)-(150,150).
    drag(&mut editor, (150.0, 150.0), (300.0, 300.0), Modifiers::NONE);
    assert_eq!(editor.selected(), vec![id("campaign-1")]);
}

#[test]
fn select_all_and_escape() {
    let mut editor = make_editor();
    assert!(editor.key_down("a", Modifiers::CMD, false));
    assert_eq!(editor.selected().len(), 3);
    assert!(editor.key_down("Escape", Modifiers::NONE, false));
    assert!(editor.selected().is_empty());
}

// ─── Viewport ───────────────────────────────────────────────────────────

#[test]
fn zoom_in_three_times() {
    let mut editor = make_editor();
    for _ in 0..3 {
        editor.zoom_in();
    }
    assert!((editor.viewport().scale() - 1.3).abs() < 1e-9);
    assert_eq!(editor.viewport().zoom_percent(), 130);
}

#[test]
fn zoom_out_clamps() {
    let mut editor = make_editor();
    for _ in 0..20 {
        editor.zoom_out();
    }
    assert_eq!(editor.viewport().scale(), 0.5);
    assert!(!editor.key_down("-", Modifiers::CMD, false));
    assert!(editor.key_down("0", Modifiers::CMD, false));
    assert_eq!(editor.viewport().scale(), 1.0);
}

#[test]
fn wheel_routing() {
    let mut editor = make_editor();
    assert_eq!(editor.wheel(0.0, 30.0, Modifiers::NONE), WheelOutcome::Ignored);
    assert_eq!(editor.wheel(0.0, 30.0, Modifiers::CMD), WheelOutcome::Zoomed);
    assert!((editor.viewport().scale() - 0.7).abs() < 1e-9);

    editor.key_down(" ", Modifiers::NONE, false);
    assert_eq!(editor.wheel(10.0, 20.0, Modifiers::NONE), WheelOutcome::Panned);
    assert_eq!(editor.viewport().pan_offset(), Point::new(-10.0, -20.0));
    editor.key_up(" ");
    assert_eq!(editor.wheel(10.0, 20.0, Modifiers::NONE), WheelOutcome::Ignored);
}

#[test]
fn space_drag_pans_instead_of_moving() {
    let mut editor = make_editor();
    editor.zoom_in();
    editor.zoom_in();
    editor.key_down(" ", Modifiers::NONE, false);
    assert!(editor.is_pan_mode());
    // Pressing on a node pans rather than dragging it.
    drag(&mut editor, (150.0, 150.0), (210.0, 174.0), Modifiers::NONE);
    editor.key_up(" ");

    let pan = editor.viewport().pan_offset();
    assert!((pan.x - 50.0).abs() < 1e-9);
    assert!((pan.y - 20.0).abs() < 1e-9);
    assert_eq!(position(&editor, "campaign-1"), Point::new(100.0, 100.0));
    assert!(!editor.is_pan_mode());
}

#[test]
fn middle_button_pans() {
    let mut editor = make_editor();
    editor.pointer_down(Point::new(10.0, 10.0), Button::Middle, Modifiers::NONE);
    editor.pointer_move(Point::new(40.0, 30.0));
    editor.pointer_up(Point::new(40.0, 30.0));
    assert_eq!(editor.viewport().pan_offset(), Point::new(30.0, 20.0));
}

// ─── Clipboard ──────────────────────────────────────────────────────────

#[test]
fn copy_paste_offsets_new_nodes() {
    let mut editor = make_editor();
    editor.select(&[id("campaign-1"), id("adset-1")]);
    assert!(editor.key_down("c", Modifiers::CMD, false));
    assert!(editor.key_down("v", Modifiers::CMD, false));

    assert_eq!(editor.nodes().len(), 5);
    let pasted: Vec<_> = editor.nodes()[3..].to_vec();
    assert_eq!(pasted[0].position, Point::new(120.0, 120.0));
    assert_eq!(pasted[1].position, Point::new(420.0, 220.0));
    assert_eq!(pasted[0].kind, NodeKind::Campaign);
    assert_ne!(pasted[0].id, id("campaign-1"));
    assert_ne!(pasted[1].id, id("adset-1"));
    assert_eq!(editor.selected(), vec![pasted[0].id, pasted[1].id]);
    assert_eq!(editor.history().len(), 2);

    editor.paste();
    assert_eq!(editor.nodes()[5].position, Point::new(140.0, 140.0));
}

#[test]
fn empty_paste_reports() {
    let mut editor = make_editor();
    assert!(!editor.key_down("v", Modifiers::CMD, false));
    assert_eq!(editor.nodes().len(), 3);
    let last = editor.take_events().pop();
    match last {
        Some(EditorEvent::Notice(notice)) => assert_eq!(notice.message, "Nothing to paste"),
        other => panic!("expected notice, got {other:?}"),
    }
}

#[test]
fn duplicate_does_not_touch_clipboard() {
    let mut editor = make_editor();
    editor.select(&[id("ad-1")]);
    assert!(editor.key_down("d", Modifiers::CMD, false));
    assert_eq!(editor.nodes().len(), 4);
    assert_eq!(editor.nodes()[3].position, Point::new(720.0, 320.0));
    assert!(editor.clipboard().is_empty());
}

#[test]
fn duplicate_node_from_menu() {
    let mut editor = make_editor();
    let copy = editor.duplicate_node(id("campaign-1")).unwrap();
    let node = editor.node(copy).unwrap();
    assert_eq!(node.display_name, "Summer Sale 2023");
    assert!(copy.as_str().starts_with("campaign-1700000000000-"));
}

// ─── Bulk edit ──────────────────────────────────────────────────────────

#[test]
fn rename_selected_applies_to_all() {
    let mut editor = make_editor();
    editor.select(&[id("campaign-1"), id("ad-1")]);
    assert!(editor.rename_selected("Q4"));
    assert_eq!(editor.node(id("campaign-1")).unwrap().display_name, "Q4");
    assert_eq!(editor.node(id("ad-1")).unwrap().display_name, "Q4");
    assert_eq!(editor.node(id("adset-1")).unwrap().display_name, "Women 25-34");
}

#[test]
fn align_left_and_center() {
    let mut editor = make_editor();
    editor.select(&[id("campaign-1"), id("ad-1")]);
    assert!(editor.align_selected_center());
    assert_eq!(position(&editor, "campaign-1").x, 400.0);
    assert_eq!(position(&editor, "ad-1").x, 400.0);
    assert_eq!(position(&editor, "ad-1").y, 300.0);

    editor.undo();
    editor.select(&[id("adset-1"), id("ad-1")]);
    assert!(editor.align_selected_left());
    assert_eq!(position(&editor, "ad-1").x, 400.0);
    assert_eq!(position(&editor, "campaign-1").x, 100.0);
}

#[test]
fn distribute_vertically_keeps_order() {
    init();
    let mut board = Board::demo();
    board.nodes[1].position.y = 130.0;
    board.nodes[2].position.y = 500.0;
    let mut editor = CanvasEditor::with_ids(board, CanvasConfig::default(), IdGenerator::new(1, clock));
    editor.key_down("a", Modifiers::CMD, false);
    assert!(editor.distribute_selected_vertically());
    assert_eq!(position(&editor, "campaign-1").y, 100.0);
    assert_eq!(position(&editor, "adset-1").y, 300.0);
    assert_eq!(position(&editor, "ad-1").y, 500.0);
    assert_eq!(position(&editor, "adset-1").x, 400.0);
}

#[test]
fn bulk_action_without_selection_reports() {
    let mut editor = make_editor();
    assert!(!editor.align_selected_left());
    match editor.take_events().pop() {
        Some(EditorEvent::Notice(notice)) => assert_eq!(notice.message, "Nothing selected"),
        other => panic!("expected notice, got {other:?}"),
    }
}

// ─── Misc ───────────────────────────────────────────────────────────────

#[test]
fn double_click_requests_edit() {
    let mut editor = make_editor();
    assert!(editor.double_click(Point::new(800.0, 350.0)));
    assert_eq!(
        editor.take_events(),
        vec![EditorEvent::EditRequested { id: id("ad-1") }]
    );
    assert!(!editor.double_click(Point::new(10.0, 10.0)));
}

#[test]
fn add_and_delete_node() {
    let mut editor = make_editor();
    let new_id = editor
        .add_node(NodeKind::AdSet, "Men 18-24", Point::new(400.0, 500.0))
        .unwrap();
    assert!(new_id.as_str().starts_with("adset-"));
    assert_eq!(editor.nodes().len(), 4);
    assert!(editor.delete_node(new_id));
    assert_eq!(editor.nodes().len(), 3);
    assert!(!editor.delete_node(new_id));
}

// ─── Overlapping presses ────────────────────────────────────────────────

#[test]
fn second_press_during_drag_is_ignored() {
    let mut editor = make_editor();
    press(&mut editor, 150.0, 150.0, Modifiers::NONE);
    editor.pointer_move(Point::new(250.0, 250.0));
    assert_eq!(position(&editor, "campaign-1"), Point::new(200.0, 200.0));

    assert!(!editor.pointer_down(Point::new(10.0, 10.0), Button::Middle, Modifiers::NONE));
    assert!(editor.captures_pointer());
    editor.pointer_up(Point::new(250.0, 250.0));

    assert!(!editor.captures_pointer());
    assert_eq!(editor.viewport().pan_offset(), Point::ZERO);
    assert_eq!(editor.history().len(), 2);
    assert!(editor.undo());
    assert_eq!(position(&editor, "campaign-1"), Point::new(100.0, 100.0));
}

#[test]
fn second_press_during_marquee_is_ignored() {
    let mut editor = make_editor();
    press(&mut editor, 50.0, 50.0, Modifiers::NONE);
    editor.pointer_move(Point::new(450.0, 250.0));

    assert!(!editor.pointer_down(Point::new(150.0, 150.0), Button::Primary, Modifiers::NONE));
    assert!(editor.marquee_rect().is_some());
    editor.pointer_up(Point::new(450.0, 250.0));

    assert!(editor.marquee_rect().is_none());
    assert_eq!(editor.selected(), vec![id("campaign-1"), id("adset-1")]);
    assert_eq!(position(&editor, "campaign-1"), Point::new(100.0, 100.0));
}

#[test]
fn second_press_during_pan_is_ignored() {
    let mut editor = make_editor();
    editor.pointer_down(Point::new(10.0, 10.0), Button::Middle, Modifiers::NONE);
    assert!(!editor.pointer_down(Point::new(150.0, 150.0), Button::Primary, Modifiers::NONE));
    editor.pointer_move(Point::new(40.0, 30.0));
    editor.pointer_up(Point::new(40.0, 30.0));

    assert!(!editor.captures_pointer());
    assert_eq!(editor.viewport().pan_offset(), Point::new(30.0, 20.0));
    assert_eq!(position(&editor, "campaign-1"), Point::new(100.0, 100.0));
}

// ─── Normalized events ──────────────────────────────────────────────────

#[test]
fn normalized_events_drive_the_editor() {
    let mut editor = make_editor();
    assert!(editor.handle_event(&InputEvent::pointer_down(150.0, 150.0, Modifiers::NONE)));
    assert!(editor.handle_event(&InputEvent::pointer_move(250.0, 200.0)));
    assert!(editor.handle_event(&InputEvent::pointer_up(250.0, 200.0)));
    assert_eq!(position(&editor, "campaign-1"), Point::new(200.0, 150.0));

    assert!(editor.handle_event(&InputEvent::key("z", Modifiers::CMD)));
    assert_eq!(position(&editor, "campaign-1"), Point::new(100.0, 100.0));

    editor.take_events();
    assert!(editor.handle_event(&InputEvent::DoubleClick { x: 500.0, y: 250.0 }));
    assert_eq!(
        editor.take_events(),
        vec![EditorEvent::EditRequested { id: id("adset-1") }]
    );
}

#[test]
fn normalized_wheel_and_space_key() {
    let mut editor = make_editor();
    let plain = InputEvent::Wheel {
        dx: 0.0,
        dy: 40.0,
        modifiers: Modifiers::NONE,
    };
    assert!(!editor.handle_event(&plain));

    let zoom = InputEvent::Wheel {
        dx: 0.0,
        dy: -10.0,
        modifiers: Modifiers::CMD,
    };
    assert!(editor.handle_event(&zoom));
    assert_eq!(editor.viewport().zoom_percent(), 110);

    assert!(editor.handle_event(&InputEvent::KeyDown {
        key: " ".to_string(),
        modifiers: Modifiers::NONE,
        repeat: false,
    }));
    assert!(editor.is_pan_mode());
    assert!(editor.handle_event(&InputEvent::KeyUp { key: " ".to_string() }));
    assert!(!editor.is_pan_mode());
}
