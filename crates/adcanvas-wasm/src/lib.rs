//! WASM bridge for the ad canvas: exposes `CanvasEditor` to the browser.
//!
//! Compiled via `wasm-pack build --target web`. Structured data crosses the
//! boundary as JSON strings; simple results are plain `bool`s and numbers.
//!
//! The host forwards raw DOM events, renders nodes at their canvas positions
//! inside a layer styled with `viewport_transform()`, draws `curves_json()`
//! as SVG paths, and drains `take_events_json()` after each call to update
//! its own state and show notices.

use adcanvas_core::{Board, CanvasConfig, ConnectionId, IdGenerator, NodeId, NodeKind, Point};
use adcanvas_editor::shortcuts::{ShortcutAction, ShortcutMap};
use adcanvas_editor::{Button, CanvasEditor, InputEvent, Modifiers};
use adcanvas_render::ConnectionCurve;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// The main WASM-facing canvas controller.
#[wasm_bindgen]
pub struct AdCanvas {
    editor: CanvasEditor,
}

#[wasm_bindgen]
impl AdCanvas {
    /// Create a controller. Either argument may be an empty string: the
    /// config falls back to defaults and the board to the demo board.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str, board_json: &str) -> Self {
        console_error_panic_hook_setup();

        let config = parse_or_default::<CanvasConfig>(config_json, "config")
            .unwrap_or_default();
        let board = parse_or_default::<Board>(board_json, "board").unwrap_or_else(Board::demo);
        Self {
            editor: CanvasEditor::with_ids(board, config, id_generator()),
        }
    }

    // ─── Document ────────────────────────────────────────────────────────

    /// Replace the board. Returns `false` if the JSON is malformed.
    pub fn load_board(&mut self, json: &str) -> bool {
        match serde_json::from_str::<Board>(json) {
            Ok(board) => {
                self.editor.load(board);
                true
            }
            Err(e) => {
                log::warn!("rejecting board: {e}");
                false
            }
        }
    }

    /// The current board (nodes and connections) as JSON.
    pub fn board_json(&self) -> String {
        to_json(&self.editor.snapshot(), "{}")
    }

    // ─── Pointer ─────────────────────────────────────────────────────────

    /// Handle pointer down. `button` is the DOM `MouseEvent.button` value.
    /// Returns true if a re-render is needed.
    #[allow(clippy::too_many_arguments)]
    pub fn handle_pointer_down(
        &mut self,
        x: f64,
        y: f64,
        button: i16,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> bool {
        self.editor.handle_event(&InputEvent::PointerDown {
            x,
            y,
            button: Button::from_dom(button),
            modifiers: Modifiers {
                shift,
                ctrl,
                alt,
                meta,
            },
        })
    }

    /// Handle pointer move, from the canvas or, while `captures_pointer()`
    /// is true, from the window.
    pub fn handle_pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.editor.handle_event(&InputEvent::pointer_move(x, y))
    }

    /// Handle pointer up, from the canvas or the window.
    pub fn handle_pointer_up(&mut self, x: f64, y: f64) -> bool {
        self.editor.handle_event(&InputEvent::pointer_up(x, y))
    }

    pub fn handle_double_click(&mut self, x: f64, y: f64) -> bool {
        self.editor.handle_event(&InputEvent::DoubleClick { x, y })
    }

    /// Handle a wheel event. Returns true if the host must call
    /// `preventDefault()`; plain scrolling returns false.
    pub fn handle_wheel(&mut self, dx: f64, dy: f64, ctrl: bool, meta: bool) -> bool {
        self.editor.handle_event(&InputEvent::Wheel {
            dx,
            dy,
            modifiers: Modifiers {
                ctrl,
                meta,
                ..Modifiers::NONE
            },
        })
    }

    /// Whether a gesture is active and the host should listen for pointer
    /// events on the window.
    pub fn captures_pointer(&self) -> bool {
        self.editor.captures_pointer()
    }

    // ─── Keyboard ────────────────────────────────────────────────────────

    /// Handle a keydown. Returns JSON `{"changed":bool,"action":"<name>"}`.
    /// The host should `preventDefault()` whenever `action` is not `"none"`.
    pub fn handle_key(
        &mut self,
        key: &str,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
        repeat: bool,
    ) -> String {
        let mods = Modifiers {
            shift,
            ctrl,
            alt,
            meta,
        };
        let Some(action) = ShortcutMap::resolve(key, mods) else {
            return r#"{"changed":false,"action":"none"}"#.to_string();
        };
        let changed = self.editor.handle_event(&InputEvent::KeyDown {
            key: key.to_string(),
            modifiers: mods,
            repeat,
        });
        format!(
            r#"{{"changed":{changed},"action":"{}"}}"#,
            action_to_name(action)
        )
    }

    pub fn handle_key_up(&mut self, key: &str) -> bool {
        self.editor.handle_event(&InputEvent::KeyUp {
            key: key.to_string(),
        })
    }

    pub fn is_pan_mode(&self) -> bool {
        self.editor.is_pan_mode()
    }

    // ─── Viewport ────────────────────────────────────────────────────────

    pub fn zoom_in(&mut self) -> bool {
        self.editor.zoom_in()
    }

    pub fn zoom_out(&mut self) -> bool {
        self.editor.zoom_out()
    }

    pub fn reset_zoom(&mut self) -> bool {
        self.editor.reset_zoom()
    }

    /// Zoom read-out, e.g. `130` for 130 %.
    pub fn zoom_percent(&self) -> u32 {
        self.editor.viewport().zoom_percent()
    }

    /// CSS transform for the content layer (`transform-origin: 0 0`).
    pub fn viewport_transform(&self) -> String {
        self.editor.viewport().css_transform()
    }

    pub fn viewport_json(&self) -> String {
        to_json(&self.editor.viewport().state(), "{}")
    }

    // ─── Geometry ────────────────────────────────────────────────────────

    /// Report a node element's rendered size (e.g. from a `ResizeObserver`).
    pub fn report_element_size(&mut self, id: &str, width: f64, height: f64) {
        self.editor
            .report_element_size(NodeId::intern(id), width, height);
    }

    /// Report the canvas element's size.
    pub fn set_surface_size(&mut self, width: f64, height: f64) {
        self.editor.set_surface_size(width, height);
    }

    /// Node boxes in viewport pixels as a JSON array.
    pub fn bounds_json(&self) -> String {
        to_json(&self.editor.element_bounds(), "[]")
    }

    /// Committed curves plus the rubber band, as JSON
    /// `[{"id":…|null,"path":"M … C …","hovered":bool}]`.
    pub fn curves_json(&self) -> String {
        let hovered = self.editor.hovered_connection();
        let mut views: Vec<CurveView> = self
            .editor
            .curves()
            .iter()
            .map(|c| CurveView::new(c, hovered))
            .collect();
        if let Some(preview) = self.editor.preview_curve() {
            views.push(CurveView::new(&preview, None));
        }
        to_json(&views, "[]")
    }

    /// `{"x":…,"y":…}` of the hovered curve's delete affordance, or `null`.
    pub fn delete_handle_json(&self) -> String {
        to_json(&self.editor.delete_handle(), "null")
    }

    /// The active marquee in viewport pixels, or `null`.
    pub fn marquee_json(&self) -> String {
        to_json(&self.editor.marquee_rect(), "null")
    }

    // ─── Selection ───────────────────────────────────────────────────────

    /// Selected node ids as a JSON array.
    pub fn selection_json(&self) -> String {
        to_json(&self.editor.selected(), "[]")
    }

    /// Replace the selection from a JSON array of ids.
    pub fn select(&mut self, ids_json: &str) -> bool {
        let ids: Vec<NodeId> = serde_json::from_str(ids_json).unwrap_or_default();
        self.editor.select(&ids)
    }

    pub fn select_all(&mut self) -> bool {
        self.editor.select_all()
    }

    pub fn clear_selection(&mut self) -> bool {
        self.editor.clear_selection()
    }

    /// Bulk-edit panel summary `{"count":n,"kind":…|null}`, or `null` when closed.
    pub fn bulk_summary_json(&self) -> String {
        to_json(&self.editor.bulk_summary(), "null")
    }

    pub fn close_bulk_edit(&mut self) {
        self.editor.close_bulk_edit();
    }

    pub fn rename_selected(&mut self, name: &str) -> bool {
        self.editor.rename_selected(name)
    }

    pub fn align_selected_left(&mut self) -> bool {
        self.editor.align_selected_left()
    }

    pub fn align_selected_center(&mut self) -> bool {
        self.editor.align_selected_center()
    }

    pub fn distribute_selected_vertically(&mut self) -> bool {
        self.editor.distribute_selected_vertically()
    }

    // ─── Node commands ───────────────────────────────────────────────────

    /// Add a node. `kind` is `"campaign"`, `"adset"` or `"ad"`.
    /// Returns the new id, or an empty string on failure.
    pub fn add_node(&mut self, kind: &str, name: &str, x: f64, y: f64) -> String {
        let Some(kind) = NodeKind::from_name(kind) else {
            log::warn!("unknown node kind {kind:?}");
            return String::new();
        };
        self.editor
            .add_node(kind, name, Point::new(x, y))
            .map(|id| id.as_str().to_string())
            .unwrap_or_default()
    }

    pub fn rename_node(&mut self, id: &str, name: &str) -> bool {
        self.editor.rename_node(NodeId::intern(id), name)
    }

    pub fn delete_node(&mut self, id: &str) -> bool {
        self.editor.delete_node(NodeId::intern(id))
    }

    /// Returns the copy's id, or an empty string.
    pub fn duplicate_node(&mut self, id: &str) -> String {
        self.editor
            .duplicate_node(NodeId::intern(id))
            .map(|id| id.as_str().to_string())
            .unwrap_or_default()
    }

    pub fn delete_selection(&mut self) -> bool {
        self.editor.delete_selection()
    }

    pub fn copy_selection(&mut self) -> bool {
        self.editor.copy_selection()
    }

    pub fn paste(&mut self) -> bool {
        self.editor.paste()
    }

    pub fn duplicate_selection(&mut self) -> bool {
        self.editor.duplicate_selection()
    }

    pub fn undo(&mut self) -> bool {
        self.editor.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.editor.redo()
    }

    pub fn can_undo(&self) -> bool {
        self.editor.history().can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.editor.history().can_redo()
    }

    // ─── Connections ─────────────────────────────────────────────────────

    /// Start a click-mode connection from a node ("Connect to…").
    pub fn begin_connection_from(&mut self, id: &str) -> bool {
        self.editor.begin_connection_from(NodeId::intern(id))
    }

    pub fn cancel_connection(&mut self) -> bool {
        self.editor.cancel_connection()
    }

    pub fn remove_connection(&mut self, id: &str) -> bool {
        self.editor.remove_connection(ConnectionId::intern(id))
    }

    // ─── Events ──────────────────────────────────────────────────────────

    /// Drain queued editor events as a JSON array.
    pub fn take_events_json(&mut self) -> String {
        to_json(&self.editor.take_events(), "[]")
    }
}

#[derive(Serialize)]
struct CurveView {
    id: Option<ConnectionId>,
    path: String,
    hovered: bool,
}

impl CurveView {
    fn new(curve: &ConnectionCurve, hovered: Option<ConnectionId>) -> Self {
        Self {
            id: curve.id,
            path: curve.svg_path(),
            hovered: curve.id.is_some() && curve.id == hovered,
        }
    }
}

fn parse_or_default<T: serde::de::DeserializeOwned>(json: &str, what: &str) -> Option<T> {
    if json.trim().is_empty() {
        return None;
    }
    match serde_json::from_str(json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("ignoring malformed {what}: {e}");
            None
        }
    }
}

fn to_json<T: Serialize>(value: &T, fallback: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| fallback.to_string())
}

fn action_to_name(action: ShortcutAction) -> &'static str {
    match action {
        ShortcutAction::Undo => "undo",
        ShortcutAction::Redo => "redo",
        ShortcutAction::Delete => "delete",
        ShortcutAction::SelectAll => "selectAll",
        ShortcutAction::Duplicate => "duplicate",
        ShortcutAction::Copy => "copy",
        ShortcutAction::Paste => "paste",
        ShortcutAction::ZoomIn => "zoomIn",
        ShortcutAction::ZoomOut => "zoomOut",
        ShortcutAction::ZoomReset => "zoomReset",
        ShortcutAction::PanStart => "panStart",
        ShortcutAction::PanEnd => "panEnd",
        ShortcutAction::Deselect => "deselect",
    }
}

// ─── Clock ───────────────────────────────────────────────────────────────

#[cfg(target_arch = "wasm32")]
fn browser_millis() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(target_arch = "wasm32")]
fn id_generator() -> IdGenerator {
    let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
    IdGenerator::new(seed ^ browser_millis(), browser_millis)
}

#[cfg(not(target_arch = "wasm32"))]
fn id_generator() -> IdGenerator {
    IdGenerator::system()
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("adcanvas WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}
