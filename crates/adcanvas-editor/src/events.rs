//! Outbound events for the host.
//!
//! The editor never calls back into the host. It queues events, and the
//! host drains them after each input with `CanvasEditor::take_events`.

use adcanvas_core::{CanvasError, Connection, ConnectionId, NodeId, Point, ViewportState};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// A user-facing outcome message (toast).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }
}

impl From<&CanvasError> for Notice {
    fn from(err: &CanvasError) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EditorEvent {
    Notice(Notice),
    #[serde(rename_all = "camelCase")]
    PositionChanged { id: NodeId, position: Point },
    #[serde(rename_all = "camelCase")]
    SelectionChanged { selected: Vec<NodeId> },
    ConnectionAdded(Connection),
    #[serde(rename_all = "camelCase")]
    ConnectionRemoved { id: ConnectionId },
    #[serde(rename_all = "camelCase")]
    NodesRemoved { ids: Vec<NodeId> },
    #[serde(rename_all = "camelCase")]
    NodesAdded { ids: Vec<NodeId> },
    /// The board was replaced wholesale (load, undo, redo).
    BoardReset,
    #[serde(rename_all = "camelCase")]
    EditRequested { id: NodeId },
    ViewportChanged(ViewportState),
}
