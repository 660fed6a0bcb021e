//! Connection legality: which node kinds may originate edges to which.

use crate::error::CanvasError;
use crate::model::NodeKind;
use smallvec::SmallVec;
use std::collections::HashMap;

/// Directed-edge legality map: `kind → allowed target kinds`.
///
/// A kind with no allowed targets is a leaf and cannot originate edges.
/// Extending the hierarchy is a matter of adding entries with [`allow`](Self::allow).
#[derive(Debug, Clone, PartialEq)]
pub struct HierarchyRules {
    targets: HashMap<NodeKind, SmallVec<[NodeKind; 2]>>,
}

impl Default for HierarchyRules {
    /// Campaign → Ad Set → Ad.
    fn default() -> Self {
        Self::empty()
            .allow(NodeKind::Campaign, NodeKind::AdSet)
            .allow(NodeKind::AdSet, NodeKind::Ad)
    }
}

impl HierarchyRules {
    /// A map with no legal edges at all.
    pub fn empty() -> Self {
        Self {
            targets: HashMap::new(),
        }
    }

    /// Permit edges from `source` to `target`.
    pub fn allow(mut self, source: NodeKind, target: NodeKind) -> Self {
        let entry = self.targets.entry(source).or_insert_with(SmallVec::new);
        if !entry.contains(&target) {
            entry.push(target);
        }
        self
    }

    /// Kinds that `source` may connect to, in the order they were allowed.
    pub fn targets(&self, source: NodeKind) -> &[NodeKind] {
        self.targets.get(&source).map(|t| t.as_slice()).unwrap_or(&[])
    }

    pub fn can_originate(&self, kind: NodeKind) -> bool {
        !self.targets(kind).is_empty()
    }

    pub fn allows(&self, source: NodeKind, target: NodeKind) -> bool {
        self.targets(source).contains(&target)
    }

    /// Reject leaf kinds as edge sources.
    pub fn check_source(&self, kind: NodeKind) -> Result<(), CanvasError> {
        if self.can_originate(kind) {
            Ok(())
        } else {
            Err(CanvasError::LeafCannotConnect { kind })
        }
    }

    /// Reject a `(source, target)` kind pair that is not a legal hierarchy step.
    pub fn check_edge(&self, source: NodeKind, target: NodeKind) -> Result<(), CanvasError> {
        if self.allows(source, target) {
            Ok(())
        } else {
            Err(CanvasError::IllegalConnection {
                source_kind: source,
                target_kind: target,
                allowed: self.targets(source).iter().copied().collect(),
            })
        }
    }
}
