//! Data model and spatial primitives for the campaign canvas.
//!
//! | Module | Role |
//! |--------|------|
//! | [`model`] | Nodes, connections, boards, and geometry types |
//! | [`id`] | Interned ids and `kind-timestamp-random` id generation |
//! | [`rules`] | Which node kinds may connect to which |
//! | [`viewport`] | Pan/zoom and screen ↔ canvas conversion |
//! | [`store`] | Node position store |
//! | [`config`] | Engine tunables |
//! | [`error`] | User-facing rejection messages |

pub mod config;
pub mod error;
pub mod id;
pub mod model;
pub mod rules;
pub mod store;
pub mod viewport;

pub use config::CanvasConfig;
pub use error::CanvasError;
pub use id::{ConnectionId, IdGenerator, NodeId};
pub use model::*;
pub use rules::HierarchyRules;
pub use store::NodeStore;
pub use viewport::{Viewport, ViewportState, WheelOutcome};
