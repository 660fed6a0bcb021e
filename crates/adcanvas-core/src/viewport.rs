//! Pan/zoom transform and coordinate conversion.
//!
//! The canvas content is rendered with `scale(s) translate(pan.x, pan.y)`
//! around origin (0, 0). Scale applies before translate, so pan is measured
//! in unscaled canvas units:
//!
//! ```text
//! screen = (canvas + pan) × scale + origin
//! canvas = (screen − origin) / scale − pan
//! ```

use crate::config::CanvasConfig;
use crate::model::{Point, Rect};
use serde::{Deserialize, Serialize};

/// What a wheel event did to the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelOutcome {
    Zoomed,
    Panned,
    /// Plain scrolling; the host must not suppress the default behavior.
    Ignored,
}

impl WheelOutcome {
    /// Whether the host should call `preventDefault` on the wheel event.
    pub fn intercepted(self) -> bool {
        !matches!(self, WheelOutcome::Ignored)
    }
}

/// Serializable view of the viewport for hosts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    pub scale: f64,
    pub pan: Point,
}

/// Zoom scale plus accumulated pan offset.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    scale: f64,
    pan: Point,
    step: f64,
    min_scale: f64,
    max_scale: f64,
    wheel_factor: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(&CanvasConfig::default())
    }
}

impl Viewport {
    pub fn new(config: &CanvasConfig) -> Self {
        Self {
            scale: 1.0_f64.clamp(config.min_scale, config.max_scale),
            pan: Point::ZERO,
            step: config.zoom_step,
            min_scale: config.min_scale,
            max_scale: config.max_scale,
            wheel_factor: config.wheel_zoom_factor,
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn pan_offset(&self) -> Point {
        self.pan
    }

    pub fn state(&self) -> ViewportState {
        ViewportState {
            scale: self.scale,
            pan: self.pan,
        }
    }

    /// Zoom level as a whole percentage, for the zoom read-out.
    pub fn zoom_percent(&self) -> u32 {
        (self.scale * 100.0).round() as u32
    }

    // ─── Zoom ────────────────────────────────────────────────────────────

    /// Set the scale, clamped to the configured range. Returns `true` if it changed.
    pub fn set_scale(&mut self, scale: f64) -> bool {
        let clamped = scale.clamp(self.min_scale, self.max_scale);
        let changed = clamped != self.scale;
        self.scale = clamped;
        changed
    }

    pub fn zoom_in(&mut self) -> bool {
        self.set_scale(self.scale + self.step)
    }

    pub fn zoom_out(&mut self) -> bool {
        self.set_scale(self.scale - self.step)
    }

    pub fn reset_zoom(&mut self) -> bool {
        self.set_scale(1.0)
    }

    // ─── Pan ─────────────────────────────────────────────────────────────

    /// Add to the pan offset. The canvas is unbounded; no clamping.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.pan = self.pan.offset(dx, dy);
    }

    /// Route a wheel event: the zoom modifier zooms, the pan modifier pans,
    /// anything else is left to the host's default scrolling.
    pub fn wheel(&mut self, dx: f64, dy: f64, zoom_modifier: bool, pan_modifier: bool) -> WheelOutcome {
        if zoom_modifier {
            self.set_scale(self.scale - dy * self.wheel_factor);
            WheelOutcome::Zoomed
        } else if pan_modifier {
            self.pan(-dx, -dy);
            WheelOutcome::Panned
        } else {
            WheelOutcome::Ignored
        }
    }

    // ─── Coordinate conversion ───────────────────────────────────────────

    /// Convert a screen point to canvas space. `origin` is the screen
    /// position of the canvas element's top-left corner.
    pub fn screen_to_canvas(&self, screen: Point, origin: Point) -> Point {
        Point::new(
            (screen.x - origin.x) / self.scale - self.pan.x,
            (screen.y - origin.y) / self.scale - self.pan.y,
        )
    }

    /// Convert a canvas point to screen space.
    pub fn canvas_to_screen(&self, canvas: Point, origin: Point) -> Point {
        Point::new(
            (canvas.x + self.pan.x) * self.scale + origin.x,
            (canvas.y + self.pan.y) * self.scale + origin.y,
        )
    }

    /// Convert a screen-space rectangle to canvas space.
    pub fn screen_rect_to_canvas(&self, rect: Rect, origin: Point) -> Rect {
        let tl = self.screen_to_canvas(rect.origin(), origin);
        Rect::new(tl.x, tl.y, rect.width / self.scale, rect.height / self.scale)
    }

    /// The CSS-equivalent transform string for the content layer.
    pub fn css_transform(&self) -> String {
        format!(
            "scale({}) translate({}px, {}px)",
            self.scale, self.pan.x, self.pan.y
        )
    }
}
