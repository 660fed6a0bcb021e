//! Integration tests: snapshot undo/redo through the canvas editor.
//!
//! Every committed action (drag, delete, paste, connect, bulk edit) records
//! one whole-board snapshot; undo/redo restore them without recording.

use adcanvas_core::{Board, CanvasConfig, IdGenerator, NodeId, Point};
use adcanvas_editor::{Button, CanvasEditor, EditorEvent, Modifiers};
use pretty_assertions::assert_eq;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn clock() -> u64 {
    1_700_000_000_000
}

fn make_editor() -> CanvasEditor {
    init();
    CanvasEditor::with_ids(Board::demo(), CanvasConfig::default(), IdGenerator::new(3, clock))
}

fn id(name: &str) -> NodeId {
    NodeId::intern(name)
}

fn position(editor: &CanvasEditor, name: &str) -> Point {
    editor.node(id(name)).map(|n| n.position).unwrap()
}

fn click(editor: &mut CanvasEditor, x: f64, y: f64, modifiers: Modifiers) {
    editor.pointer_down(Point::new(x, y), Button::Primary, modifiers);
    editor.pointer_up(Point::new(x, y));
}

fn drag(editor: &mut CanvasEditor, from: (f64, f64), to: (f64, f64)) {
    editor.pointer_down(Point::new(from.0, from.1), Button::Primary, Modifiers::NONE);
    editor.pointer_move(Point::new(to.0, to.1));
    editor.pointer_up(Point::new(to.0, to.1));
}

fn notices(editor: &mut CanvasEditor) -> Vec<String> {
    editor
        .take_events()
        .into_iter()
        .filter_map(|e| match e {
            EditorEvent::Notice(n) => Some(n.message),
            _ => None,
        })
        .collect()
}

// ─── Basic undo/redo ────────────────────────────────────────────────────

#[test]
fn undo_restores_previous_state() {
    let mut editor = make_editor();
    drag(&mut editor, (150.0, 150.0), (250.0, 200.0));
    assert_eq!(position(&editor, "campaign-1"), Point::new(200.0, 150.0));

    assert!(editor.undo());
    assert_eq!(position(&editor, "campaign-1"), Point::new(100.0, 100.0));
}

#[test]
fn redo_reapplies() {
    let mut editor = make_editor();
    drag(&mut editor, (150.0, 150.0), (250.0, 200.0));
    editor.undo();
    assert!(editor.redo());
    assert_eq!(position(&editor, "campaign-1"), Point::new(200.0, 150.0));
}

#[test]
fn undo_s1_s2_then_redo() {
    let mut editor = make_editor();
    // S1: moved.
    drag(&mut editor, (150.0, 150.0), (250.0, 200.0));
    let s1 = editor.snapshot();
    // S2: renamed.
    assert!(editor.rename_node(id("campaign-1"), "Winter Sale"));
    let s2 = editor.snapshot();

    editor.undo();
    assert_eq!(editor.snapshot(), s1);
    editor.redo();
    assert_eq!(editor.snapshot(), s2);
}

#[test]
fn undo_at_earliest_snapshot_is_rejected() {
    let mut editor = make_editor();
    assert!(!editor.undo());
    assert_eq!(notices(&mut editor), vec!["Nothing to undo".to_string()]);
    assert_eq!(editor.snapshot(), Board::demo());
    assert_eq!(editor.history().cursor(), 0);

    assert!(!editor.redo());
    assert_eq!(notices(&mut editor), vec!["Nothing to redo".to_string()]);
}

#[test]
fn shortcuts_drive_history() {
    let mut editor = make_editor();
    drag(&mut editor, (150.0, 150.0), (250.0, 200.0));
    assert!(editor.key_down("z", Modifiers::CMD, false));
    assert_eq!(position(&editor, "campaign-1"), Point::new(100.0, 100.0));
    let redo = Modifiers {
        shift: true,
        meta: true,
        ..Modifiers::NONE
    };
    assert!(editor.key_down("z", redo, false));
    assert_eq!(position(&editor, "campaign-1"), Point::new(200.0, 150.0));
}

// ─── Recording ──────────────────────────────────────────────────────────

#[test]
fn drag_records_one_snapshot() {
    let mut editor = make_editor();
    editor.pointer_down(Point::new(150.0, 150.0), Button::Primary, Modifiers::NONE);
    for step in 1..=10 {
        editor.pointer_move(Point::new(150.0 + step as f64 * 10.0, 150.0));
    }
    editor.pointer_up(Point::new(250.0, 150.0));
    assert_eq!(editor.history().len(), 2);
}

#[test]
fn click_records_nothing() {
    let mut editor = make_editor();
    click(&mut editor, 150.0, 150.0, Modifiers::NONE);
    assert_eq!(editor.history().len(), 1);
}

#[test]
fn new_action_after_undo_prunes_redo() {
    let mut editor = make_editor();
    drag(&mut editor, (150.0, 150.0), (250.0, 200.0));
    editor.undo();
    editor.rename_node(id("ad-1"), "Hero Image");
    assert!(!editor.history().can_redo());
    assert!(!editor.redo());
    assert_eq!(position(&editor, "campaign-1"), Point::new(100.0, 100.0));
}

#[test]
fn history_depth_is_bounded() {
    init();
    let config = CanvasConfig {
        history_depth: 3,
        ..CanvasConfig::default()
    };
    let mut editor = CanvasEditor::with_ids(Board::demo(), config, IdGenerator::new(3, clock));
    for name in ["a", "b", "c", "d", "e"] {
        editor.rename_node(id("ad-1"), name);
    }
    assert_eq!(editor.history().len(), 3);
    assert!(editor.undo());
    assert!(editor.undo());
    assert!(!editor.undo());
    assert_eq!(editor.node(id("ad-1")).unwrap().display_name, "c");
}

// ─── Cascading delete ───────────────────────────────────────────────────

#[test]
fn delete_adset_with_outgoing_connection_is_one_entry() {
    let mut editor = make_editor();
    // Ad Set port (right-edge midpoint) → drop on the Ad.
    drag(&mut editor, (656.0, 260.0), (750.0, 350.0));
    assert_eq!(editor.connections().connections().len(), 1);
    let before_delete = editor.snapshot();
    let entries = editor.history().len();

    click(&mut editor, 500.0, 250.0, Modifiers::NONE);
    assert_eq!(editor.selected(), vec![id("adset-1")]);
    assert!(editor.key_down("Delete", Modifiers::NONE, false));

    assert!(editor.node(id("adset-1")).is_none());
    assert!(editor.connections().connections().is_empty());
    assert_eq!(editor.history().len(), entries + 1);
    assert!(editor.selected().is_empty());

    // One undo brings back both the node and the connection.
    editor.undo();
    assert_eq!(editor.snapshot(), before_delete);
}

#[test]
fn undo_drops_selection_of_vanished_nodes() {
    let mut editor = make_editor();
    let new_id = editor
        .add_node(adcanvas_core::NodeKind::Ad, "Story", Point::new(50.0, 600.0))
        .unwrap();
    editor.select(&[new_id]);
    editor.undo();
    assert!(editor.node(new_id).is_none());
    assert!(editor.selected().is_empty());
}
