//! Canvas orchestrator.
//!
//! `CanvasEditor` owns every piece of editor state and is the only thing
//! that mutates it. The host feeds it raw input and reads back geometry and
//! queued events.
//!
//! ## Pointer routing
//!
//! | Press lands on | Gesture |
//! |----------------|---------|
//! | anything, with Space held or the middle button | pan |
//! | a hovered curve's delete handle | remove that connection |
//! | anything, while a click-mode connection is pending | complete on a node, cancel on background |
//! | a node's port (right-edge midpoint) | drag-mode connection |
//! | a node | drag (or click, if released before the threshold) |
//! | background | marquee |
//!
//! Once a gesture starts it receives every move and the release, wherever
//! the pointer goes, until it resolves. `captures_pointer` tells the host
//! when to listen at window level. Presses that arrive while a gesture is
//! in flight are ignored.

use crate::clipboard::{self, Clipboard};
use crate::connect::{ConnectMode, ConnectionManager};
use crate::drag::{DragController, DragFrame, DragOutcome, PointerSample};
use crate::events::{EditorEvent, Notice};
use crate::history::HistoryManager;
use crate::input::{Button, InputEvent, Modifiers};
use crate::selection::{BulkEditSummary, MarqueeOutcome, SelectionManager};
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use adcanvas_core::{
    Board, CanvasConfig, CanvasError, CanvasNode, ConnectionId, IdGenerator, NodeId, NodeKind,
    NodePatch, NodeStore, Point, Rect, Size, Viewport, WheelOutcome,
};
use adcanvas_render::hit::{
    delete_handle_center, hit_test, hit_test_connection, hit_test_delete_handle, hit_test_port,
    nodes_in_rect,
};
use adcanvas_render::{
    ConnectionCurve, CurveStyle, ElementBounds, ElementRegistry, connection_curves, preview_curve,
};

/// The pointer gesture currently in flight.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture {
    Idle,
    Pan { last: Point },
    /// Node press; `toggle` records the modifiers held at press time.
    Drag { toggle: bool },
    Marquee,
    /// Connection dragged out of a port.
    Connect,
}

pub struct CanvasEditor {
    config: CanvasConfig,
    store: NodeStore,
    viewport: Viewport,
    registry: ElementRegistry,
    drag: DragController,
    selection: SelectionManager,
    connections: ConnectionManager,
    history: HistoryManager<Board>,
    clipboard: Clipboard,
    ids: IdGenerator,
    curve_style: CurveStyle,
    surface: Size,
    gesture: Gesture,
    pan_key: bool,
    hovered: Option<ConnectionId>,
    events: Vec<EditorEvent>,
}

impl Default for CanvasEditor {
    fn default() -> Self {
        Self::new(Board::demo(), CanvasConfig::default())
    }
}

impl CanvasEditor {
    /// Editor using the system clock for new ids. Not for `wasm32`; use
    /// [`with_ids`](Self::with_ids) there.
    pub fn new(board: Board, config: CanvasConfig) -> Self {
        Self::with_ids(board, config, IdGenerator::system())
    }

    pub fn with_ids(board: Board, config: CanvasConfig, ids: IdGenerator) -> Self {
        let config = config.validated();
        let mut editor = Self {
            store: NodeStore::default(),
            viewport: Viewport::new(&config),
            registry: ElementRegistry::new(config.default_node_size),
            drag: DragController::new(config.drag_threshold),
            selection: SelectionManager::new(),
            connections: ConnectionManager::default(),
            history: HistoryManager::new(config.history_depth),
            clipboard: Clipboard::new(),
            ids,
            curve_style: CurveStyle::from_config(&config),
            surface: config.surface_size,
            gesture: Gesture::Idle,
            pan_key: false,
            hovered: None,
            events: Vec::new(),
            config,
        };
        editor.load(board);
        editor.events.clear();
        editor
    }

    /// Replace the whole document and start a fresh history.
    pub fn load(&mut self, board: Board) {
        self.store = NodeStore::new(board.nodes);
        self.connections.replace_all(board.connections);
        self.connections.cancel();
        self.drag.cancel();
        self.selection.clear();
        self.selection.cancel_marquee();
        self.gesture = Gesture::Idle;
        self.hovered = None;
        let store = &self.store;
        self.registry.retain(|id| store.contains(id));
        self.history.clear();
        self.commit();
        log::info!(
            "loaded board: {} nodes, {} connections",
            self.store.len(),
            self.connections.connections().len()
        );
        self.events.push(EditorEvent::BoardReset);
    }

    // ─── Read access ─────────────────────────────────────────────────────

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn nodes(&self) -> &[CanvasNode] {
        self.store.nodes()
    }

    pub fn node(&self, id: NodeId) -> Option<&CanvasNode> {
        self.store.get(id)
    }

    pub fn connections(&self) -> &ConnectionManager {
        &self.connections
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn selection(&self) -> &SelectionManager {
        &self.selection
    }

    pub fn history(&self) -> &HistoryManager<Board> {
        &self.history
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    /// Selected ids in paint order.
    pub fn selected(&self) -> Vec<NodeId> {
        self.selection.ordered(self.store.nodes())
    }

    /// The current document.
    pub fn snapshot(&self) -> Board {
        Board::new(
            self.store.nodes().to_vec(),
            self.connections.connections().to_vec(),
        )
    }

    /// Whether a gesture is in flight and needs window-level pointer events.
    pub fn captures_pointer(&self) -> bool {
        self.gesture != Gesture::Idle
    }

    pub fn is_pan_mode(&self) -> bool {
        self.pan_key
    }

    /// Drain the queued events.
    pub fn take_events(&mut self) -> Vec<EditorEvent> {
        std::mem::take(&mut self.events)
    }

    // ─── Geometry ────────────────────────────────────────────────────────

    /// Host-measured size of a node's rendered element, in viewport pixels.
    pub fn report_element_size(&mut self, id: NodeId, width: f64, height: f64) {
        if !self.store.contains(id) {
            return;
        }
        self.registry
            .report(id, Size::new(width, height), self.viewport.scale());
    }

    /// Size of the canvas element that nodes are clamped to while dragging.
    pub fn set_surface_size(&mut self, width: f64, height: f64) {
        self.surface = Size::new(width, height);
    }

    pub fn element_bounds(&self) -> Vec<ElementBounds> {
        self.registry.all_bounds(self.store.nodes(), &self.viewport)
    }

    pub fn curves(&self) -> Vec<ConnectionCurve> {
        connection_curves(
            self.connections.connections(),
            &self.element_bounds(),
            &self.curve_style,
        )
    }

    /// Rubber band from the pending source to the pointer.
    pub fn preview_curve(&self) -> Option<ConnectionCurve> {
        let source = self.connections.pending_source()?;
        let pointer = self.connections.pointer()?;
        preview_curve(source, pointer, &self.element_bounds(), &self.curve_style)
    }

    pub fn hovered_connection(&self) -> Option<ConnectionId> {
        self.hovered
    }

    /// Center of the hovered curve's delete affordance.
    pub fn delete_handle(&self) -> Option<Point> {
        self.hovered_curve().map(|c| delete_handle_center(&c))
    }

    pub fn marquee_rect(&self) -> Option<Rect> {
        self.selection.marquee().map(|m| m.rect)
    }

    pub fn bulk_summary(&self) -> Option<BulkEditSummary> {
        if !self.selection.bulk_edit_open() {
            return None;
        }
        self.selection.bulk_summary(self.store.nodes())
    }

    fn hovered_curve(&self) -> Option<ConnectionCurve> {
        let id = self.hovered?;
        self.curves().into_iter().find(|c| c.id == Some(id))
    }

    fn to_canvas(&self, screen: Point) -> Point {
        self.viewport.screen_to_canvas(screen, Point::ZERO)
    }

    // ─── Input dispatch ──────────────────────────────────────────────────

    /// Route a normalized input event. Returns `true` if anything visible changed.
    pub fn handle_event(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::PointerDown {
                x,
                y,
                button,
                modifiers,
            } => self.pointer_down(Point::new(*x, *y), *button, *modifiers),
            InputEvent::PointerMove { x, y, .. } => self.pointer_move(Point::new(*x, *y)),
            InputEvent::PointerUp { x, y, .. } => self.pointer_up(Point::new(*x, *y)),
            InputEvent::DoubleClick { x, y } => self.double_click(Point::new(*x, *y)),
            InputEvent::Wheel { dx, dy, modifiers } => {
                self.wheel(*dx, *dy, *modifiers).intercepted()
            }
            InputEvent::KeyDown {
                key,
                modifiers,
                repeat,
            } => self.key_down(key, *modifiers, *repeat),
            InputEvent::KeyUp { key } => self.key_up(key),
        }
    }

    pub fn pointer_down(&mut self, p: Point, button: Button, modifiers: Modifiers) -> bool {
        // One gesture at a time; it resolves on the next release.
        if self.gesture != Gesture::Idle {
            log::debug!("ignoring press during {:?}", self.gesture);
            return false;
        }
        if button == Button::Middle || (button == Button::Primary && self.pan_key) {
            self.gesture = Gesture::Pan { last: p };
            return true;
        }
        if button != Button::Primary {
            return false;
        }

        if let Some(curve) = self.hovered_curve()
            && let Some(id) = curve.id
            && hit_test_delete_handle(&curve, p, self.config.delete_handle_radius)
        {
            return self.remove_connection(id);
        }

        let bounds = self.element_bounds();
        let hit = hit_test(&bounds, p);

        if self.connections.pending_mode() == Some(ConnectMode::Click) {
            match hit {
                Some(target) => self.complete_connection(target),
                None => {
                    self.connections.cancel();
                }
            }
            return true;
        }

        if let Some(source) = hit_test_port(&bounds, p, self.config.port_radius)
            && let Some(kind) = self.store.get(source).map(|n| n.kind)
            && self.connections.rules().can_originate(kind)
        {
            match self.connections.start(source, kind, ConnectMode::Drag) {
                Ok(()) => {
                    self.connections.update_pointer(p);
                    self.gesture = Gesture::Connect;
                }
                Err(err) => self.reject(&err),
            }
            return true;
        }

        if let Some(id) = hit {
            let Some(position) = self.store.get(id).map(|n| n.position) else {
                return false;
            };
            let frame = DragFrame {
                parent_origin: Point::ZERO,
                parent_size: self.surface,
                node_size: self.registry.size_of(id),
            };
            let sample = PointerSample::new(p, self.to_canvas(p));
            self.drag.begin(id, sample, position, frame);
            self.gesture = Gesture::Drag {
                toggle: modifiers.toggles_selection(),
            };
            return true;
        }

        self.selection.begin_marquee(p, modifiers.shift);
        self.gesture = Gesture::Marquee;
        true
    }

    pub fn pointer_move(&mut self, p: Point) -> bool {
        match self.gesture {
            Gesture::Pan { last } => {
                let scale = self.viewport.scale();
                self.viewport.pan((p.x - last.x) / scale, (p.y - last.y) / scale);
                self.gesture = Gesture::Pan { last: p };
                self.viewport_changed();
                true
            }
            Gesture::Drag { .. } => {
                let sample = PointerSample::new(p, self.to_canvas(p));
                let Some((id, position)) = self.drag.update(sample) else {
                    return false;
                };
                if let Err(err) = self.store.update_position(id, position) {
                    log::warn!("drag target vanished: {err}");
                    self.drag.cancel();
                    self.gesture = Gesture::Idle;
                    return false;
                }
                self.events.push(EditorEvent::PositionChanged { id, position });
                true
            }
            Gesture::Marquee => self.selection.update_marquee(p).is_some(),
            Gesture::Connect => self.connections.update_pointer(p),
            Gesture::Idle => {
                if self.connections.update_pointer(p) {
                    return true;
                }
                self.update_hover(p)
            }
        }
    }

    pub fn pointer_up(&mut self, p: Point) -> bool {
        let gesture = std::mem::replace(&mut self.gesture, Gesture::Idle);
        match gesture {
            Gesture::Idle => false,
            Gesture::Pan { .. } => true,
            Gesture::Drag { toggle } => match self.drag.end() {
                DragOutcome::None => false,
                DragOutcome::Click(id) => {
                    if self.selection.click(id, toggle) {
                        self.selection_changed();
                    }
                    true
                }
                DragOutcome::Moved { id, from, to } => {
                    if from != to {
                        log::debug!("drag committed {id}");
                        self.commit();
                    }
                    true
                }
            },
            Gesture::Marquee => {
                let before = self.selection.ids().clone();
                let viewport = &self.viewport;
                let nodes = self.store.nodes();
                let outcome = self.selection.finish_marquee(self.config.marquee_min_size, |rect| {
                    nodes_in_rect(nodes, viewport.screen_rect_to_canvas(rect, Point::ZERO))
                });
                if outcome == MarqueeOutcome::Discarded {
                    log::trace!("background click");
                }
                if *self.selection.ids() != before {
                    self.selection_changed();
                }
                true
            }
            Gesture::Connect => {
                let bounds = self.element_bounds();
                let source = self.connections.pending_source();
                match hit_test(&bounds, p) {
                    // Releasing over the source is a port click, not an attempt.
                    Some(target) if Some(target) != source => self.complete_connection(target),
                    _ => {
                        self.connections.cancel();
                    }
                }
                true
            }
        }
    }

    /// Double-click: ask the host to open the edit dialog for the node under `p`.
    pub fn double_click(&mut self, p: Point) -> bool {
        let Some(id) = hit_test(&self.element_bounds(), p) else {
            return false;
        };
        self.events.push(EditorEvent::EditRequested { id });
        true
    }

    fn update_hover(&mut self, p: Point) -> bool {
        let curves = self.curves();
        let on_handle = |id: ConnectionId| {
            curves.iter().any(|c| {
                c.id == Some(id) && hit_test_delete_handle(c, p, self.config.delete_handle_radius)
            })
        };
        let next = hit_test_connection(&curves, p, self.config.connection_hit_tolerance)
            .or_else(|| self.hovered.filter(|id| on_handle(*id)));
        if next == self.hovered {
            return false;
        }
        self.hovered = next;
        true
    }

    // ─── Wheel and keyboard ──────────────────────────────────────────────

    /// Ctrl/⌘ + wheel zooms, wheel with Space held pans, plain wheel is left
    /// to the host.
    pub fn wheel(&mut self, dx: f64, dy: f64, modifiers: Modifiers) -> WheelOutcome {
        let outcome = self.viewport.wheel(dx, dy, modifiers.command(), self.pan_key);
        if outcome.intercepted() {
            self.viewport_changed();
        }
        outcome
    }

    pub fn key_down(&mut self, key: &str, modifiers: Modifiers, repeat: bool) -> bool {
        let Some(action) = ShortcutMap::resolve(key, modifiers) else {
            return false;
        };
        log::trace!("shortcut {action:?}");
        match action {
            ShortcutAction::PanStart => {
                if repeat {
                    return false;
                }
                self.pan_key = true;
                true
            }
            ShortcutAction::PanEnd => self.key_up(key),
            ShortcutAction::Undo => self.undo(),
            ShortcutAction::Redo => self.redo(),
            ShortcutAction::Delete => self.delete_selection(),
            ShortcutAction::SelectAll => self.select_all(),
            ShortcutAction::Duplicate => self.duplicate_selection(),
            ShortcutAction::Copy => self.copy_selection(),
            ShortcutAction::Paste => self.paste(),
            ShortcutAction::ZoomIn => self.zoom_in(),
            ShortcutAction::ZoomOut => self.zoom_out(),
            ShortcutAction::ZoomReset => self.reset_zoom(),
            ShortcutAction::Deselect => self.escape(),
        }
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        match ShortcutMap::resolve_release(key) {
            Some(ShortcutAction::PanEnd) => {
                let was = self.pan_key;
                self.pan_key = false;
                was
            }
            _ => false,
        }
    }

    /// Cancel a pending connection and clear the selection.
    pub fn escape(&mut self) -> bool {
        let cancelled = self.connections.cancel();
        if self.gesture == Gesture::Connect {
            self.gesture = Gesture::Idle;
        }
        let cleared = self.selection.clear();
        if cleared {
            self.selection_changed();
        }
        cancelled || cleared
    }

    // ─── Viewport ────────────────────────────────────────────────────────

    pub fn zoom_in(&mut self) -> bool {
        let changed = self.viewport.zoom_in();
        if changed {
            self.viewport_changed();
        }
        changed
    }

    pub fn zoom_out(&mut self) -> bool {
        let changed = self.viewport.zoom_out();
        if changed {
            self.viewport_changed();
        }
        changed
    }

    pub fn reset_zoom(&mut self) -> bool {
        let changed = self.viewport.reset_zoom();
        if changed {
            self.viewport_changed();
        }
        changed
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.viewport.pan(dx, dy);
        self.viewport_changed();
    }

    // ─── Selection ───────────────────────────────────────────────────────

    pub fn select(&mut self, ids: &[NodeId]) -> bool {
        let store = &self.store;
        let changed = self
            .selection
            .set(ids.iter().copied().filter(|id| store.contains(*id)));
        if changed {
            self.selection_changed();
        }
        changed
    }

    pub fn select_all(&mut self) -> bool {
        let changed = self.selection.set(self.store.ids());
        if changed {
            self.selection_changed();
        }
        changed
    }

    pub fn clear_selection(&mut self) -> bool {
        let changed = self.selection.clear();
        if changed {
            self.selection_changed();
        }
        changed
    }

    pub fn close_bulk_edit(&mut self) {
        self.selection.close_bulk_edit();
    }

    // ─── Node commands ───────────────────────────────────────────────────

    /// Add a new node (context menu "Add …"). Returns its id.
    pub fn add_node(&mut self, kind: NodeKind, name: &str, position: Point) -> Option<NodeId> {
        let node = CanvasNode::new(self.ids.node_id(kind.id_prefix()), kind, name, position);
        let id = node.id;
        if let Err(err) = self.store.insert(node) {
            self.reject(&err);
            return None;
        }
        log::info!("added {} {id}", kind.label());
        self.events.push(EditorEvent::NodesAdded { ids: vec![id] });
        self.commit();
        Some(id)
    }

    pub fn rename_node(&mut self, id: NodeId, name: &str) -> bool {
        match self.store.rename(id, name) {
            Ok(true) => {
                self.commit();
                true
            }
            Ok(false) => false,
            Err(err) => {
                self.reject(&err);
                false
            }
        }
    }

    /// Delete one node and its connections.
    pub fn delete_node(&mut self, id: NodeId) -> bool {
        if !self.store.contains(id) {
            self.reject(&CanvasError::UnknownNode(id));
            return false;
        }
        self.remove_nodes(&[id])
    }

    /// Delete every selected node and every connection touching one, as a
    /// single history entry.
    pub fn delete_selection(&mut self) -> bool {
        let ids = self.selected();
        if ids.is_empty() {
            return false;
        }
        self.remove_nodes(&ids)
    }

    fn remove_nodes(&mut self, ids: &[NodeId]) -> bool {
        let removed = self.store.remove_many(ids);
        if removed.is_empty() {
            return false;
        }
        let removed_ids: Vec<NodeId> = removed.iter().map(|n| n.id).collect();
        let dropped = self.connections.remove_touching(&removed_ids);

        for id in &removed_ids {
            self.registry.forget(*id);
        }
        if self.drag.target().is_some_and(|t| removed_ids.contains(&t)) {
            self.drag.cancel();
            self.gesture = Gesture::Idle;
        }
        if self
            .connections
            .pending_source()
            .is_some_and(|s| removed_ids.contains(&s))
        {
            self.connections.cancel();
            if self.gesture == Gesture::Connect {
                self.gesture = Gesture::Idle;
            }
        }
        if self.hovered.is_some_and(|h| dropped.iter().any(|c| c.id == h)) {
            self.hovered = None;
        }
        let store = &self.store;
        if self.selection.retain(|id| store.contains(id)) {
            self.selection_changed();
        }

        log::info!(
            "deleted {} node(s), {} connection(s)",
            removed_ids.len(),
            dropped.len()
        );
        for connection in &dropped {
            self.events
                .push(EditorEvent::ConnectionRemoved { id: connection.id });
        }
        let count = removed_ids.len();
        self.events
            .push(EditorEvent::NodesRemoved { ids: removed_ids });
        self.notify(Notice::success(match count {
            1 => "Element deleted".to_string(),
            n => format!("{n} elements deleted"),
        }));
        self.commit();
        true
    }

    // ─── Clipboard ───────────────────────────────────────────────────────

    pub fn copy_selection(&mut self) -> bool {
        let nodes = self.selected_nodes();
        if nodes.is_empty() {
            self.reject(&CanvasError::EmptySelection);
            return false;
        }
        let count = nodes.len();
        self.clipboard.copy(nodes);
        self.notify(Notice::info(format!("Copied {count} element(s)")));
        true
    }

    pub fn paste(&mut self) -> bool {
        let Some(nodes) = self.clipboard.paste(self.config.paste_offset, &mut self.ids) else {
            self.reject(&CanvasError::EmptyClipboard);
            return false;
        };
        let count = self.insert_copies(nodes);
        self.notify(Notice::success(format!("Pasted {count} element(s)")));
        count > 0
    }

    pub fn duplicate_selection(&mut self) -> bool {
        let nodes = self.selected_nodes();
        if nodes.is_empty() {
            self.reject(&CanvasError::EmptySelection);
            return false;
        }
        let copies = clipboard::duplicate(&nodes, self.config.paste_offset, &mut self.ids);
        let count = self.insert_copies(copies);
        self.notify(Notice::success(format!("Duplicated {count} element(s)")));
        count > 0
    }

    /// Context-menu duplicate of a single node.
    pub fn duplicate_node(&mut self, id: NodeId) -> Option<NodeId> {
        let Some(node) = self.store.get(id).cloned() else {
            self.reject(&CanvasError::UnknownNode(id));
            return None;
        };
        let copies = clipboard::duplicate(&[node], self.config.paste_offset, &mut self.ids);
        let new_id = copies.first().map(|n| n.id);
        self.insert_copies(copies);
        new_id
    }

    fn selected_nodes(&self) -> Vec<CanvasNode> {
        self.store
            .nodes()
            .iter()
            .filter(|n| self.selection.contains(n.id))
            .cloned()
            .collect()
    }

    /// Insert freshly minted copies, select them, and record one history entry.
    fn insert_copies(&mut self, nodes: Vec<CanvasNode>) -> usize {
        let mut added = Vec::with_capacity(nodes.len());
        for node in nodes {
            let id = node.id;
            match self.store.insert(node) {
                Ok(()) => added.push(id),
                Err(err) => log::warn!("skipping copy: {err}"),
            }
        }
        if added.is_empty() {
            return 0;
        }
        log::info!("inserted {} copied node(s)", added.len());
        let count = added.len();
        self.selection.set(added.iter().copied());
        self.events.push(EditorEvent::NodesAdded { ids: added });
        self.selection_changed();
        self.commit();
        count
    }

    // ─── Connections ─────────────────────────────────────────────────────

    /// Context-menu "Connect to…": the next node click completes.
    pub fn begin_connection_from(&mut self, id: NodeId) -> bool {
        let Some(kind) = self.store.get(id).map(|n| n.kind) else {
            self.reject(&CanvasError::UnknownNode(id));
            return false;
        };
        match self.connections.start(id, kind, ConnectMode::Click) {
            Ok(()) => true,
            Err(err) => {
                self.reject(&err);
                false
            }
        }
    }

    pub fn cancel_connection(&mut self) -> bool {
        if self.gesture == Gesture::Connect {
            self.gesture = Gesture::Idle;
        }
        self.connections.cancel()
    }

    fn complete_connection(&mut self, target: NodeId) {
        let Some(kind) = self.store.get(target).map(|n| n.kind) else {
            self.connections.cancel();
            self.reject(&CanvasError::UnknownNode(target));
            return;
        };
        match self.connections.complete(target, kind, &mut self.ids) {
            Ok(connection) => {
                self.events.push(EditorEvent::ConnectionAdded(connection));
                self.notify(Notice::success("Connection created successfully"));
                self.commit();
            }
            Err(err) => self.reject(&err),
        }
    }

    pub fn remove_connection(&mut self, id: ConnectionId) -> bool {
        match self.connections.remove(id) {
            Ok(connection) => {
                log::info!(
                    "removed connection {} → {}",
                    connection.source_id,
                    connection.target_id
                );
                if self.hovered == Some(id) {
                    self.hovered = None;
                }
                self.events.push(EditorEvent::ConnectionRemoved { id });
                self.notify(Notice::success("Connection removed"));
                self.commit();
                true
            }
            Err(err) => {
                self.reject(&err);
                false
            }
        }
    }

    // ─── Bulk edit ───────────────────────────────────────────────────────

    /// Give every selected node the same name.
    pub fn rename_selected(&mut self, name: &str) -> bool {
        let ids = self.selected();
        if ids.is_empty() {
            self.reject(&CanvasError::EmptySelection);
            return false;
        }
        let changed = self.store.update_many(&ids, &NodePatch::rename(name));
        if changed.is_empty() {
            return false;
        }
        self.notify(Notice::success(format!("Renamed {} element(s)", changed.len())));
        self.commit();
        true
    }

    /// Move every selected node to the leftmost selected x.
    pub fn align_selected_left(&mut self) -> bool {
        let Some((min, _)) = self.selected_x_range() else {
            return false;
        };
        self.align_selected_x(min)
    }

    /// Move every selected node to the midpoint of the selection's x range.
    pub fn align_selected_center(&mut self) -> bool {
        let Some((min, max)) = self.selected_x_range() else {
            return false;
        };
        self.align_selected_x((min + max) / 2.0)
    }

    /// Space selected nodes evenly on y between the topmost and bottommost,
    /// keeping their vertical order.
    pub fn distribute_selected_vertically(&mut self) -> bool {
        let mut nodes: Vec<(NodeId, Point)> = self
            .selected_nodes()
            .into_iter()
            .map(|n| (n.id, n.position))
            .collect();
        if nodes.len() < 3 {
            return false;
        }
        nodes.sort_by(|a, b| a.1.y.total_cmp(&b.1.y));
        let top = nodes[0].1.y;
        let bottom = nodes[nodes.len() - 1].1.y;
        let step = (bottom - top) / (nodes.len() - 1) as f64;

        let mut changed = false;
        for (i, (id, position)) in nodes.into_iter().enumerate() {
            let next = Point::new(position.x, top + step * i as f64);
            if next == position {
                continue;
            }
            if self.store.update_position(id, next).is_ok() {
                self.events
                    .push(EditorEvent::PositionChanged { id, position: next });
                changed = true;
            }
        }
        if changed {
            self.commit();
        }
        changed
    }

    fn selected_x_range(&mut self) -> Option<(f64, f64)> {
        let nodes = self.selected_nodes();
        if nodes.is_empty() {
            self.reject(&CanvasError::EmptySelection);
            return None;
        }
        let (min, max) = nodes
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), n| {
                (lo.min(n.position.x), hi.max(n.position.x))
            });
        Some((min, max))
    }

    fn align_selected_x(&mut self, x: f64) -> bool {
        let ids = self.selected();
        let changed = self.store.update_many(&ids, &NodePatch::x(x));
        if changed.is_empty() {
            return false;
        }
        for id in changed {
            if let Some(node) = self.store.get(id) {
                let position = node.position;
                self.events.push(EditorEvent::PositionChanged { id, position });
            }
        }
        self.commit();
        true
    }

    // ─── History ─────────────────────────────────────────────────────────

    pub fn undo(&mut self) -> bool {
        match self.history.undo().cloned() {
            Ok(board) => {
                log::info!("undo");
                self.restore(board);
                true
            }
            Err(err) => {
                self.reject(&err);
                false
            }
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo().cloned() {
            Ok(board) => {
                log::info!("redo");
                self.restore(board);
                true
            }
            Err(err) => {
                self.reject(&err);
                false
            }
        }
    }

    fn commit(&mut self) {
        let snapshot = self.snapshot();
        self.history.record(snapshot);
    }

    /// Apply a snapshot without recording it.
    fn restore(&mut self, board: Board) {
        self.store.replace_all(board.nodes);
        self.connections.replace_all(board.connections);
        self.connections.cancel();
        self.drag.cancel();
        self.gesture = Gesture::Idle;
        self.hovered = None;
        let store = &self.store;
        self.registry.retain(|id| store.contains(id));
        if self.selection.retain(|id| store.contains(id)) {
            self.selection_changed();
        }
        self.events.push(EditorEvent::BoardReset);
    }

    // ─── Events ──────────────────────────────────────────────────────────

    fn notify(&mut self, notice: Notice) {
        self.events.push(EditorEvent::Notice(notice));
    }

    /// Surface a rejected action to the user. Nothing propagates further.
    fn reject(&mut self, err: &CanvasError) {
        log::warn!("rejected: {err}");
        self.notify(Notice::from(err));
    }

    fn selection_changed(&mut self) {
        let selected = self.selected();
        self.events.push(EditorEvent::SelectionChanged { selected });
    }

    fn viewport_changed(&mut self) {
        self.events
            .push(EditorEvent::ViewportChanged(self.viewport.state()));
    }
}
