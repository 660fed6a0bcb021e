//! Tunable constants for the canvas engine.
//!
//! Hosts may pass a partial JSON object; every missing field takes its default.

use crate::model::Size;
use serde::{Deserialize, Serialize};

/// Configuration for the canvas engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CanvasConfig {
    /// Scale increment for the zoom buttons. Default: **0.1**.
    pub zoom_step: f64,
    /// Smallest allowed scale. Default: **0.5**.
    pub min_scale: f64,
    /// Largest allowed scale. Default: **2.0**.
    pub max_scale: f64,
    /// Scale change per wheel delta unit (`Δscale = -deltaY × factor`). Default: **0.01**.
    pub wheel_zoom_factor: f64,

    /// Screen pixels the pointer must travel before a press becomes a drag. Default: **5**.
    pub drag_threshold: f64,
    /// A marquee smaller than this (screen px) on both axes counts as a background click. Default: **5**.
    pub marquee_min_size: f64,

    /// Canvas units added to x and y of pasted or duplicated nodes. Default: **20**.
    pub paste_offset: f64,

    /// Control-point offset of a connection curve is `min(|Δx| × ratio, max)`.
    pub curve_offset_ratio: f64,
    pub curve_max_offset: f64,

    /// Maximum retained history snapshots. Default: **100**.
    pub history_depth: usize,

    /// Size assumed for a node whose rendered box has not been reported.
    pub default_node_size: Size,
    /// Size of the containing canvas element until the host reports one.
    pub surface_size: Size,

    /// Radius (screen px) of the connection port on a node's right edge.
    pub port_radius: f64,
    /// Distance (screen px) within which a connection curve counts as hovered.
    pub connection_hit_tolerance: f64,
    /// Radius (screen px) of the delete affordance on a hovered curve.
    pub delete_handle_radius: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            zoom_step: 0.1,
            min_scale: 0.5,
            max_scale: 2.0,
            wheel_zoom_factor: 0.01,
            drag_threshold: 5.0,
            marquee_min_size: 5.0,
            paste_offset: 20.0,
            curve_offset_ratio: 0.5,
            curve_max_offset: 150.0,
            history_depth: 100,
            default_node_size: Size::new(256.0, 120.0),
            surface_size: Size::new(1600.0, 1200.0),
            port_radius: 8.0,
            connection_hit_tolerance: 6.0,
            delete_handle_radius: 12.0,
        }
    }
}

impl CanvasConfig {
    /// Repair nonsensical values: swapped scale bounds are swapped back and
    /// non-positive sizes or steps fall back to their defaults.
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();
        if self.min_scale > self.max_scale {
            std::mem::swap(&mut self.min_scale, &mut self.max_scale);
        }
        if self.min_scale <= 0.0 {
            log::warn!("min_scale {} is not positive, using default", self.min_scale);
            self.min_scale = defaults.min_scale;
            self.max_scale = self.max_scale.max(self.min_scale);
        }
        if self.zoom_step <= 0.0 {
            self.zoom_step = defaults.zoom_step;
        }
        if self.history_depth == 0 {
            self.history_depth = 1;
        }
        if self.default_node_size.width <= 0.0 || self.default_node_size.height <= 0.0 {
            self.default_node_size = defaults.default_node_size;
        }
        if self.surface_size.width <= 0.0 || self.surface_size.height <= 0.0 {
            self.surface_size = defaults.surface_size;
        }
        self.drag_threshold = self.drag_threshold.max(0.0);
        self.marquee_min_size = self.marquee_min_size.max(0.0);
        self
    }
}
