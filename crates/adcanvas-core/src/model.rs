//! Core data model for the campaign canvas.
//!
//! A board is a flat, insertion-ordered list of nodes (Campaign, Ad Set, Ad)
//! plus a list of directed connections between them. Node positions are
//! canvas-space anchor points (top-left corner, unscaled units). The
//! hierarchy is expressed only through connections; there is no containment.

use crate::id::{ConnectionId, NodeId};
use serde::{Deserialize, Serialize};

// ─── Geometry ────────────────────────────────────────────────────────────

/// A point in screen, viewport-local, or canvas space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn distance(self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle with non-negative width and height.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Normalize a drag from `a` to `b` so width and height are never negative.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (b.x - a.x).abs(),
            height: (b.y - a.y).abs(),
        }
    }

    /// Inclusive containment: points on the edge count as inside.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

// ─── Nodes ───────────────────────────────────────────────────────────────

/// The level of a node in the campaign hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Campaign,
    AdSet,
    Ad,
}

impl NodeKind {
    pub const ALL: [NodeKind; 3] = [NodeKind::Campaign, NodeKind::AdSet, NodeKind::Ad];

    /// Singular display label ("Ad Set").
    pub fn label(self) -> &'static str {
        match self {
            NodeKind::Campaign => "Campaign",
            NodeKind::AdSet => "Ad Set",
            NodeKind::Ad => "Ad",
        }
    }

    /// Plural display label ("Ad Sets"), used in user-facing messages.
    pub fn plural(self) -> &'static str {
        match self {
            NodeKind::Campaign => "Campaigns",
            NodeKind::AdSet => "Ad Sets",
            NodeKind::Ad => "Ads",
        }
    }

    /// Prefix of generated ids (`adset-<timestamp>-<random>`).
    pub fn id_prefix(self) -> &'static str {
        match self {
            NodeKind::Campaign => "campaign",
            NodeKind::AdSet => "adset",
            NodeKind::Ad => "ad",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "campaign" => Some(NodeKind::Campaign),
            "adset" | "ad_set" | "ad-set" => Some(NodeKind::AdSet),
            "ad" => Some(NodeKind::Ad),
            _ => None,
        }
    }
}

/// A draggable element on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasNode {
    pub id: NodeId,
    #[serde(alias = "type")]
    pub kind: NodeKind,
    #[serde(alias = "name")]
    pub display_name: String,
    pub position: Point,
}

impl CanvasNode {
    pub fn new(id: NodeId, kind: NodeKind, display_name: impl Into<String>, position: Point) -> Self {
        Self {
            id,
            kind,
            display_name: display_name.into(),
            position,
        }
    }
}

/// A partial update applied to one or more nodes. `None` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "name")]
    pub display_name: Option<String>,
}

impl NodePatch {
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            display_name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn x(x: f64) -> Self {
        Self {
            x: Some(x),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.display_name.is_none()
    }

    /// Apply to a node. Returns `true` if anything changed.
    pub fn apply(&self, node: &mut CanvasNode) -> bool {
        let before = node.position;
        if let Some(x) = self.x {
            node.position.x = x;
        }
        if let Some(y) = self.y {
            node.position.y = y;
        }
        let mut renamed = false;
        if let Some(name) = &self.display_name
            && *name != node.display_name
        {
            node.display_name = name.clone();
            renamed = true;
        }
        renamed || before != node.position
    }
}

// ─── Connections ─────────────────────────────────────────────────────────

/// A directed, typed edge from a parent level to a child level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub id: ConnectionId,
    pub source_id: NodeId,
    pub target_id: NodeId,
    #[serde(alias = "sourceType")]
    pub source_kind: NodeKind,
    #[serde(alias = "targetType")]
    pub target_kind: NodeKind,
}

impl Connection {
    /// Whether `id` is either endpoint of this connection.
    pub fn touches(&self, id: NodeId) -> bool {
        self.source_id == id || self.target_id == id
    }
}

// ─── Board ───────────────────────────────────────────────────────────────

/// The full editable document: nodes and connections, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Board {
    #[serde(default)]
    pub nodes: Vec<CanvasNode>,
    #[serde(default)]
    pub connections: Vec<Connection>,
}

impl Board {
    pub fn new(nodes: Vec<CanvasNode>, connections: Vec<Connection>) -> Self {
        Self { nodes, connections }
    }

    /// The starter board shown in a fresh workspace.
    pub fn demo() -> Self {
        Self {
            nodes: vec![
                CanvasNode::new(
                    NodeId::intern("campaign-1"),
                    NodeKind::Campaign,
                    "Summer Sale 2023",
                    Point::new(100.0, 100.0),
                ),
                CanvasNode::new(
                    NodeId::intern("adset-1"),
                    NodeKind::AdSet,
                    "Women 25-34",
                    Point::new(400.0, 200.0),
                ),
                CanvasNode::new(
                    NodeId::intern("ad-1"),
                    NodeKind::Ad,
                    "Product Showcase",
                    Point::new(700.0, 300.0),
                ),
            ],
            connections: Vec::new(),
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&CanvasNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}
