//! Node drag state machine.
//!
//! ```text
//! Idle ──press──▶ Pending ──move > threshold──▶ Dragging ──release──▶ Idle
//!                    │
//!                    └──────────release──────────▶ Idle (click)
//! ```
//!
//! Both gestures start the same way, so a press only becomes a drag once the
//! pointer has travelled past the threshold in screen pixels. While dragging,
//! the node position is `pointer - parent_origin - grab_offset`, clamped so
//! the node stays inside its parent.

use adcanvas_core::{NodeId, Point, Size};

/// A pointer sample in both coordinate spaces the controller needs:
/// screen pixels for the threshold, parent space for positioning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub screen: Point,
    pub local: Point,
}

impl PointerSample {
    pub fn new(screen: Point, local: Point) -> Self {
        Self { screen, local }
    }
}

/// The containing element a node is clamped to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragFrame {
    pub parent_origin: Point,
    pub parent_size: Size,
    pub node_size: Size,
}

impl DragFrame {
    /// Clamp a position so the node box stays inside the parent.
    /// A node larger than its parent is pinned to the parent origin.
    pub fn clamp(&self, position: Point) -> Point {
        let max_x = (self.parent_size.width - self.node_size.width).max(0.0);
        let max_y = (self.parent_size.height - self.node_size.height).max(0.0);
        Point::new(position.x.clamp(0.0, max_x), position.y.clamp(0.0, max_y))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    /// Pressed but not yet past the threshold.
    Pending {
        id: NodeId,
        press: Point,
        grab: Point,
        start: Point,
        frame: DragFrame,
    },
    Dragging {
        id: NodeId,
        grab: Point,
        start: Point,
        current: Point,
        frame: DragFrame,
    },
}

/// How a press-release gesture resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragOutcome {
    /// No gesture was active.
    None,
    /// Released before the threshold: treat as a click on `id`.
    Click(NodeId),
    /// Released after dragging.
    Moved { id: NodeId, from: Point, to: Point },
}

pub struct DragController {
    state: DragState,
    threshold: f64,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new(5.0)
    }
}

impl DragController {
    pub fn new(threshold: f64) -> Self {
        Self {
            state: DragState::Idle,
            threshold,
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.state, DragState::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// The node being pressed or dragged.
    pub fn target(&self) -> Option<NodeId> {
        match self.state {
            DragState::Idle => None,
            DragState::Pending { id, .. } | DragState::Dragging { id, .. } => Some(id),
        }
    }

    /// Press on a node currently at `position` (parent space).
    pub fn begin(&mut self, id: NodeId, pointer: PointerSample, position: Point, frame: DragFrame) {
        let grab = Point::new(
            pointer.local.x - frame.parent_origin.x - position.x,
            pointer.local.y - frame.parent_origin.y - position.y,
        );
        log::debug!("drag pending on {id}");
        self.state = DragState::Pending {
            id,
            press: pointer.screen,
            grab,
            start: position,
            frame,
        };
    }

    /// Feed a pointer move. Returns the node's new position once dragging.
    pub fn update(&mut self, pointer: PointerSample) -> Option<(NodeId, Point)> {
        match self.state {
            DragState::Idle => None,
            DragState::Pending {
                id,
                press,
                grab,
                start,
                frame,
            } => {
                if press.distance(pointer.screen) <= self.threshold {
                    return None;
                }
                log::debug!("drag started on {id}");
                let current = Self::place(pointer, grab, &frame);
                self.state = DragState::Dragging {
                    id,
                    grab,
                    start,
                    current,
                    frame,
                };
                Some((id, current))
            }
            DragState::Dragging {
                id,
                grab,
                ref mut current,
                frame,
                ..
            } => {
                *current = Self::place(pointer, grab, &frame);
                log::trace!("drag {id} → ({}, {})", current.x, current.y);
                Some((id, *current))
            }
        }
    }

    /// Release the pointer, wherever it is.
    pub fn end(&mut self) -> DragOutcome {
        let outcome = match self.state {
            DragState::Idle => DragOutcome::None,
            DragState::Pending { id, .. } => DragOutcome::Click(id),
            DragState::Dragging {
                id, start, current, ..
            } => DragOutcome::Moved {
                id,
                from: start,
                to: current,
            },
        };
        self.state = DragState::Idle;
        outcome
    }

    /// Abort the gesture. Returns the node and its pre-drag position if it
    /// had started moving.
    pub fn cancel(&mut self) -> Option<(NodeId, Point)> {
        let restore = match self.state {
            DragState::Dragging { id, start, .. } => Some((id, start)),
            _ => None,
        };
        self.state = DragState::Idle;
        restore
    }

    fn place(pointer: PointerSample, grab: Point, frame: &DragFrame) -> Point {
        frame.clamp(Point::new(
            pointer.local.x - frame.parent_origin.x - grab.x,
            pointer.local.y - frame.parent_origin.y - grab.y,
        ))
    }
}
