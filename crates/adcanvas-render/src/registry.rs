//! Element registry: the rendered size of each node, as reported by the host.
//!
//! The registry is owned by the editor and shared with everything that needs
//! a node's on-screen box (drag clamping, hit testing, connection curves).
//! Positions are never stored here; a node's box is always derived from the
//! authoritative canvas position plus its registered size, so it cannot go
//! stale while the node is dragged or the viewport moves.

use adcanvas_core::{CanvasNode, NodeId, Point, Rect, Size, Viewport};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A node's bounding box in viewport-local pixels. Derived, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementBounds {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ElementBounds {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn contains(&self, p: Point) -> bool {
        self.rect().contains(p)
    }

    /// Where outgoing connections start.
    pub fn right_mid(&self) -> Point {
        Point::new(self.x + self.width, self.y + self.height / 2.0)
    }

    /// Where incoming connections end.
    pub fn left_mid(&self) -> Point {
        Point::new(self.x, self.y + self.height / 2.0)
    }
}

/// Rendered node sizes in canvas units, keyed by node id.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementRegistry {
    sizes: HashMap<NodeId, Size>,
    default_size: Size,
}

impl ElementRegistry {
    pub fn new(default_size: Size) -> Self {
        Self {
            sizes: HashMap::new(),
            default_size,
        }
    }

    /// Record a rendered box measured in viewport pixels at `scale`.
    pub fn report(&mut self, id: NodeId, rendered: Size, scale: f64) {
        let size = Size::new(rendered.width / scale, rendered.height / scale);
        log::trace!("element {id} reported {}x{}", size.width, size.height);
        self.sizes.insert(id, size);
    }

    pub fn forget(&mut self, id: NodeId) {
        self.sizes.remove(&id);
    }

    /// Drop entries for nodes that no longer exist.
    pub fn retain(&mut self, mut keep: impl FnMut(NodeId) -> bool) {
        self.sizes.retain(|id, _| keep(*id));
    }

    /// Canvas-unit size of a node, falling back to the default size.
    pub fn size_of(&self, id: NodeId) -> Size {
        self.sizes.get(&id).copied().unwrap_or(self.default_size)
    }

    /// Viewport-local box of one node.
    pub fn bounds_of(&self, node: &CanvasNode, viewport: &Viewport) -> ElementBounds {
        let size = self.size_of(node.id);
        let tl = viewport.canvas_to_screen(node.position, Point::ZERO);
        ElementBounds {
            id: node.id,
            x: tl.x,
            y: tl.y,
            width: size.width * viewport.scale(),
            height: size.height * viewport.scale(),
        }
    }

    /// Viewport-local boxes of every node, in paint order.
    pub fn all_bounds(&self, nodes: &[CanvasNode], viewport: &Viewport) -> Vec<ElementBounds> {
        nodes.iter().map(|n| self.bounds_of(n, viewport)).collect()
    }
}
