//! Node position store: the source of truth for every node on the canvas.
//!
//! No bounds are enforced here. Clamping a node to its parent element is the
//! drag controller's job and applies only to interactive drags; programmatic
//! moves (paste offsets, alignment) may land anywhere.

use crate::error::CanvasError;
use crate::id::NodeId;
use crate::model::{CanvasNode, NodePatch, Point};

/// Insertion-ordered node collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeStore {
    nodes: Vec<CanvasNode>,
}

impl NodeStore {
    pub fn new(nodes: Vec<CanvasNode>) -> Self {
        let mut store = Self::default();
        for node in nodes {
            if let Err(err) = store.insert(node) {
                log::warn!("dropping node while loading: {err}");
            }
        }
        store
    }

    pub fn nodes(&self) -> &[CanvasNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().map(|n| n.id)
    }

    pub fn get(&self, id: NodeId) -> Option<&CanvasNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut CanvasNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    /// Append a node. Ids must be unique.
    pub fn insert(&mut self, node: CanvasNode) -> Result<(), CanvasError> {
        if self.contains(node.id) {
            return Err(CanvasError::DuplicateNode(node.id));
        }
        self.nodes.push(node);
        Ok(())
    }

    /// Remove every node whose id is in `ids`, preserving the order of the rest.
    pub fn remove_many(&mut self, ids: &[NodeId]) -> Vec<CanvasNode> {
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.nodes)
            .into_iter()
            .partition(|n| ids.contains(&n.id));
        self.nodes = kept;
        removed
    }

    /// Replace the whole collection (used when restoring a snapshot).
    pub fn replace_all(&mut self, nodes: Vec<CanvasNode>) {
        self.nodes = nodes;
    }

    /// Overwrite one node's position. Idempotent.
    pub fn update_position(&mut self, id: NodeId, position: Point) -> Result<(), CanvasError> {
        let node = self.get_mut(id).ok_or(CanvasError::UnknownNode(id))?;
        node.position = position;
        Ok(())
    }

    /// Apply the same patch to every listed node. Unknown ids are skipped.
    /// Returns the ids that actually changed.
    pub fn update_many(&mut self, ids: &[NodeId], patch: &NodePatch) -> Vec<NodeId> {
        let mut changed = Vec::new();
        for node in self.nodes.iter_mut().filter(|n| ids.contains(&n.id)) {
            if patch.apply(node) {
                changed.push(node.id);
            }
        }
        changed
    }

    pub fn rename(&mut self, id: NodeId, name: &str) -> Result<bool, CanvasError> {
        let node = self.get_mut(id).ok_or(CanvasError::UnknownNode(id))?;
        Ok(NodePatch::rename(name).apply(node))
    }
}
