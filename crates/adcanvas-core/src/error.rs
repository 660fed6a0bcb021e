//! Recoverable rejections of user input.
//!
//! Every variant's `Display` text is the message shown to the user.

use crate::id::{ConnectionId, NodeId};
use crate::model::NodeKind;
use smallvec::SmallVec;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CanvasError {
    #[error("{} cannot create connections", .kind.plural())]
    LeafCannotConnect { kind: NodeKind },

    #[error("Cannot connect an element to itself")]
    SelfConnection,

    #[error("{} can only connect to {}", .source_kind.plural(), plural_list(.allowed))]
    IllegalConnection {
        source_kind: NodeKind,
        target_kind: NodeKind,
        allowed: SmallVec<[NodeKind; 2]>,
    },

    #[error("Connection already exists")]
    DuplicateConnection,

    #[error("No connection is being created")]
    NoPendingConnection,

    #[error("Unknown element {0}")]
    UnknownNode(NodeId),

    #[error("Unknown connection {0}")]
    UnknownConnection(ConnectionId),

    #[error("Element {0} already exists")]
    DuplicateNode(NodeId),

    #[error("Nothing to paste")]
    EmptyClipboard,

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Nothing to redo")]
    NothingToRedo,

    #[error("Nothing selected")]
    EmptySelection,
}

fn plural_list(kinds: &[NodeKind]) -> String {
    match kinds {
        [] => "nothing".to_string(),
        [only] => only.plural().to_string(),
        [init @ .., last] => {
            let head: Vec<&str> = init.iter().map(|k| k.plural()).collect();
            format!("{} or {}", head.join(", "), last.plural())
        }
    }
}
