//! Selection: click-select, modifier toggle, marquee, and the bulk-edit panel.
//!
//! | Gesture | Effect |
//! |---------|--------|
//! | click node | select only that node |
//! | Shift/⌘ + click node | toggle that node |
//! | drag on background | marquee; nodes whose anchor falls inside are selected |
//! | Shift + marquee | marquee hits are added to the selection |
//! | click background | clear selection, close bulk edit |
//!
//! The marquee rectangle is kept in screen pixels; the caller converts it to
//! canvas space to find the hits.

use adcanvas_core::{CanvasNode, NodeId, NodeKind, Point, Rect};
use serde::Serialize;
use std::collections::HashSet;

/// An in-progress marquee gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marquee {
    pub anchor: Point,
    pub rect: Rect,
    pub additive: bool,
}

/// How a marquee gesture resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarqueeOutcome {
    /// No marquee was active.
    None,
    /// Too small: treated as a background click, selection cleared.
    Discarded,
    /// Selection replaced (or extended) with this many hits.
    Selected(usize),
}

/// What the bulk-edit panel shows for a multi-selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkEditSummary {
    pub count: usize,
    /// The shared kind, or `None` when the selection is mixed.
    pub kind: Option<NodeKind>,
}

impl BulkEditSummary {
    pub fn label(&self) -> String {
        match self.kind {
            Some(kind) => format!("{} {}", self.count, kind.plural()),
            None => format!("{} mixed elements", self.count),
        }
    }
}

#[derive(Debug, Default)]
pub struct SelectionManager {
    selected: HashSet<NodeId>,
    marquee: Option<Marquee>,
    bulk_edit_open: bool,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.selected.contains(&id)
    }

    pub fn ids(&self) -> &HashSet<NodeId> {
        &self.selected
    }

    /// Selected ids in the nodes' paint order, for stable output.
    pub fn ordered(&self, nodes: &[CanvasNode]) -> Vec<NodeId> {
        nodes
            .iter()
            .map(|n| n.id)
            .filter(|id| self.selected.contains(id))
            .collect()
    }

    // ─── Click ───────────────────────────────────────────────────────────

    /// Resolve a click on a node. Returns `true` if the selection changed.
    pub fn click(&mut self, id: NodeId, toggle: bool) -> bool {
        let changed = if toggle {
            if !self.selected.remove(&id) {
                self.selected.insert(id);
            }
            true
        } else if self.selected.len() == 1 && self.selected.contains(&id) {
            false
        } else {
            self.selected.clear();
            self.selected.insert(id);
            true
        };
        self.sync_bulk_edit();
        changed
    }

    /// Clear the selection and close bulk edit. Returns `true` if anything was selected.
    pub fn clear(&mut self) -> bool {
        let changed = !self.selected.is_empty();
        self.selected.clear();
        self.bulk_edit_open = false;
        changed
    }

    /// Replace the selection wholesale.
    pub fn set(&mut self, ids: impl IntoIterator<Item = NodeId>) -> bool {
        let next: HashSet<NodeId> = ids.into_iter().collect();
        let changed = next != self.selected;
        self.selected = next;
        self.sync_bulk_edit();
        changed
    }

    /// Drop ids that no longer exist.
    pub fn retain(&mut self, mut keep: impl FnMut(NodeId) -> bool) -> bool {
        let before = self.selected.len();
        self.selected.retain(|id| keep(*id));
        self.sync_bulk_edit();
        before != self.selected.len()
    }

    // ─── Marquee ─────────────────────────────────────────────────────────

    pub fn marquee(&self) -> Option<&Marquee> {
        self.marquee.as_ref()
    }

    pub fn begin_marquee(&mut self, anchor: Point, additive: bool) {
        log::debug!("marquee start at ({}, {})", anchor.x, anchor.y);
        self.marquee = Some(Marquee {
            anchor,
            rect: Rect::new(anchor.x, anchor.y, 0.0, 0.0),
            additive,
        });
    }

    /// Grow the marquee to `pointer`. The rect is always normalized.
    pub fn update_marquee(&mut self, pointer: Point) -> Option<Rect> {
        let marquee = self.marquee.as_mut()?;
        marquee.rect = Rect::from_corners(marquee.anchor, pointer);
        Some(marquee.rect)
    }

    /// Finish the marquee. `hits` maps the final screen rect to the nodes
    /// inside it. A rect smaller than `min_size` on both axes is a background
    /// click.
    pub fn finish_marquee(
        &mut self,
        min_size: f64,
        hits: impl FnOnce(Rect) -> Vec<NodeId>,
    ) -> MarqueeOutcome {
        let Some(marquee) = self.marquee.take() else {
            return MarqueeOutcome::None;
        };
        if marquee.rect.width < min_size && marquee.rect.height < min_size {
            log::debug!("marquee discarded");
            self.clear();
            return MarqueeOutcome::Discarded;
        }
        let found = hits(marquee.rect);
        let count = found.len();
        if !marquee.additive {
            self.selected.clear();
        }
        self.selected.extend(found);
        self.sync_bulk_edit();
        log::debug!("marquee selected {count}");
        MarqueeOutcome::Selected(count)
    }

    pub fn cancel_marquee(&mut self) -> bool {
        self.marquee.take().is_some()
    }

    // ─── Bulk edit ───────────────────────────────────────────────────────

    pub fn bulk_edit_open(&self) -> bool {
        self.bulk_edit_open
    }

    pub fn close_bulk_edit(&mut self) {
        self.bulk_edit_open = false;
    }

    /// Panel summary, or `None` unless more than one node is selected.
    pub fn bulk_summary(&self, nodes: &[CanvasNode]) -> Option<BulkEditSummary> {
        if self.selected.len() < 2 {
            return None;
        }
        let mut kinds = nodes
            .iter()
            .filter(|n| self.selected.contains(&n.id))
            .map(|n| n.kind);
        let first = kinds.next();
        let kind = if kinds.all(|k| Some(k) == first) { first } else { None };
        Some(BulkEditSummary {
            count: self.selected.len(),
            kind,
        })
    }

    fn sync_bulk_edit(&mut self) {
        self.bulk_edit_open = self.selected.len() > 1;
    }
}
