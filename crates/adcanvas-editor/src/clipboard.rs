//! Session clipboard for nodes.
//!
//! Copies are deep. Every paste or duplicate mints fresh ids
//! (`kind-timestamp-random`) and shifts positions by the paste offset so
//! copies never sit exactly on their source. Repeated pastes cascade.

use adcanvas_core::{CanvasNode, IdGenerator, Point};

#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    nodes: Vec<CanvasNode>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Replace the clipboard contents.
    pub fn copy(&mut self, nodes: impl IntoIterator<Item = CanvasNode>) {
        self.nodes = nodes.into_iter().collect();
        log::debug!("copied {} node(s)", self.nodes.len());
    }

    /// Fresh copies of the clipboard, or `None` if it is empty.
    pub fn paste(&mut self, offset: f64, ids: &mut IdGenerator) -> Option<Vec<CanvasNode>> {
        if self.nodes.is_empty() {
            return None;
        }
        let pasted = clone_offset(&self.nodes, offset, ids);
        for node in &mut self.nodes {
            node.position = node.position.offset(offset, offset);
        }
        Some(pasted)
    }
}

/// Copies of `nodes` with new ids, offset by `(offset, offset)`.
pub fn duplicate(nodes: &[CanvasNode], offset: f64, ids: &mut IdGenerator) -> Vec<CanvasNode> {
    clone_offset(nodes, offset, ids)
}

fn clone_offset(nodes: &[CanvasNode], offset: f64, ids: &mut IdGenerator) -> Vec<CanvasNode> {
    nodes
        .iter()
        .map(|n| CanvasNode {
            id: ids.node_id(n.kind.id_prefix()),
            position: Point::new(n.position.x + offset, n.position.y + offset),
            ..n.clone()
        })
        .collect()
}
