//! Derived canvas geometry: element boxes, hit testing, and connection curves.
//!
//! Nothing in this crate is authoritative. Boxes and curves are recomputed
//! from the node store, the viewport, and the host-reported element sizes.

pub mod curve;
pub mod hit;
pub mod registry;

pub use curve::{ConnectionCurve, CurveStyle, connection_curve, connection_curves, preview_curve};
pub use registry::{ElementBounds, ElementRegistry};
