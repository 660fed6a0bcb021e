//! Connection curves: live element boxes → cubic Béziers.
//!
//! A committed edge runs from the source's right-edge midpoint to the
//! target's left-edge midpoint. Both control points sit on the horizontal
//! through their endpoint, pushed out by `min(|Δx| × ratio, max)`, which
//! gives an S-curve that stays tight for short spans and does not balloon
//! for long ones.

use crate::registry::ElementBounds;
use adcanvas_core::{CanvasConfig, Connection, ConnectionId, NodeId, Point};
use kurbo::{CubicBez, ParamCurve, ParamCurveNearest};
use serde::{Deserialize, Serialize};

/// Accuracy passed to kurbo's nearest-point solver, in pixels.
const NEAREST_ACCURACY: f64 = 0.1;

/// Horizontal control-point offset policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveStyle {
    pub offset_ratio: f64,
    pub max_offset: f64,
}

impl Default for CurveStyle {
    fn default() -> Self {
        Self::from_config(&CanvasConfig::default())
    }
}

impl CurveStyle {
    pub fn from_config(config: &CanvasConfig) -> Self {
        Self {
            offset_ratio: config.curve_offset_ratio,
            max_offset: config.curve_max_offset,
        }
    }

    pub fn control_offset(&self, start: Point, end: Point) -> f64 {
        ((end.x - start.x).abs() * self.offset_ratio).min(self.max_offset)
    }
}

/// A renderable curve in viewport-local pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionCurve {
    /// `None` for the in-progress rubber band.
    pub id: Option<ConnectionId>,
    pub start: Point,
    pub control1: Point,
    pub control2: Point,
    pub end: Point,
}

impl ConnectionCurve {
    pub fn between(id: Option<ConnectionId>, start: Point, end: Point, style: &CurveStyle) -> Self {
        let offset = style.control_offset(start, end);
        Self {
            id,
            start,
            control1: start.offset(offset, 0.0),
            control2: end.offset(-offset, 0.0),
            end,
        }
    }

    fn bez(&self) -> CubicBez {
        CubicBez::new(
            to_kurbo(self.start),
            to_kurbo(self.control1),
            to_kurbo(self.control2),
            to_kurbo(self.end),
        )
    }

    /// Point at curve parameter 0.5, where the delete affordance sits.
    pub fn midpoint(&self) -> Point {
        from_kurbo(self.bez().eval(0.5))
    }

    /// Shortest distance from `p` to the curve.
    pub fn distance_to(&self, p: Point) -> f64 {
        self.bez().nearest(to_kurbo(p), NEAREST_ACCURACY).distance_sq.sqrt()
    }

    /// SVG path data (`M … C …`).
    pub fn svg_path(&self) -> String {
        format!(
            "M {} {} C {} {}, {} {}, {} {}",
            self.start.x,
            self.start.y,
            self.control1.x,
            self.control1.y,
            self.control2.x,
            self.control2.y,
            self.end.x,
            self.end.y
        )
    }
}

fn to_kurbo(p: Point) -> kurbo::Point {
    kurbo::Point::new(p.x, p.y)
}

fn from_kurbo(p: kurbo::Point) -> Point {
    Point::new(p.x, p.y)
}

fn find(bounds: &[ElementBounds], id: NodeId) -> Option<&ElementBounds> {
    bounds.iter().find(|b| b.id == id)
}

/// Curve for one committed connection, or `None` if either endpoint has no box.
pub fn connection_curve(
    connection: &Connection,
    bounds: &[ElementBounds],
    style: &CurveStyle,
) -> Option<ConnectionCurve> {
    let (Some(source), Some(target)) = (
        find(bounds, connection.source_id),
        find(bounds, connection.target_id),
    ) else {
        log::trace!("skipping curve {}: endpoint not on canvas", connection.id);
        return None;
    };
    Some(ConnectionCurve::between(
        Some(connection.id),
        source.right_mid(),
        target.left_mid(),
        style,
    ))
}

/// Curves for every resolvable connection. Unresolvable ones are skipped.
pub fn connection_curves(
    connections: &[Connection],
    bounds: &[ElementBounds],
    style: &CurveStyle,
) -> Vec<ConnectionCurve> {
    connections
        .iter()
        .filter_map(|c| connection_curve(c, bounds, style))
        .collect()
}

/// Rubber band from a pending source to the pointer.
pub fn preview_curve(
    source: NodeId,
    pointer: Point,
    bounds: &[ElementBounds],
    style: &CurveStyle,
) -> Option<ConnectionCurve> {
    let source = find(bounds, source)?;
    Some(ConnectionCurve::between(None, source.right_mid(), pointer, style))
}
