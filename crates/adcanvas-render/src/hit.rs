//! Hit testing: point → node, port, connection, or delete handle.
//!
//! Boxes are walked in reverse paint order so the topmost node wins.

use crate::curve::ConnectionCurve;
use crate::registry::ElementBounds;
use adcanvas_core::{CanvasNode, ConnectionId, NodeId, Point, Rect};

/// Vertical offset (px) of the delete affordance above a curve's midpoint.
pub const DELETE_HANDLE_LIFT: f64 = 25.0;

/// Find the topmost node whose box contains `p`.
/// Returns `None` if no node is hit (background).
pub fn hit_test(bounds: &[ElementBounds], p: Point) -> Option<NodeId> {
    bounds.iter().rev().find(|b| b.contains(p)).map(|b| b.id)
}

/// Find the topmost node whose connection port (right-edge midpoint) is
/// within `radius` of `p`.
pub fn hit_test_port(bounds: &[ElementBounds], p: Point, radius: f64) -> Option<NodeId> {
    bounds
        .iter()
        .rev()
        .find(|b| b.right_mid().distance(p) <= radius)
        .map(|b| b.id)
}

/// Nodes whose anchor position lies inside `rect` (canvas space).
///
/// Only the anchor point is tested, not the full box.
pub fn nodes_in_rect(nodes: &[CanvasNode], rect: Rect) -> Vec<NodeId> {
    nodes
        .iter()
        .filter(|n| rect.contains(n.position))
        .map(|n| n.id)
        .collect()
}

/// Find the closest committed curve within `tolerance` of `p`.
pub fn hit_test_connection(
    curves: &[ConnectionCurve],
    p: Point,
    tolerance: f64,
) -> Option<ConnectionId> {
    curves
        .iter()
        .filter_map(|c| Some((c.id?, c.distance_to(p))))
        .filter(|(_, d)| *d <= tolerance)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id)
}

/// Where the delete affordance of a hovered curve is drawn.
pub fn delete_handle_center(curve: &ConnectionCurve) -> Point {
    curve.midpoint().offset(0.0, -DELETE_HANDLE_LIFT)
}

/// Whether `p` falls on the delete affordance of `curve`.
pub fn hit_test_delete_handle(curve: &ConnectionCurve, p: Point, radius: f64) -> bool {
    delete_handle_center(curve).distance(p) <= radius
}
