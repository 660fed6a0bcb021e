//! Connection state machine and the committed edge list.
//!
//! ```text
//! Idle ──start(source)──▶ Pending ──complete(target)──▶ Idle (+ edge on success)
//!                            └────────cancel────────────▶ Idle
//! ```
//!
//! `complete` checks, in order: self-connection, hierarchy legality,
//! duplicate pair. Any rejection still returns the machine to `Idle`.

use adcanvas_core::{
    CanvasError, Connection, ConnectionId, HierarchyRules, IdGenerator, NodeId, NodeKind, Point,
};

/// How the pending connection was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectMode {
    /// Dragged from a node's port; resolves on pointer release.
    Drag,
    /// Chosen from a menu; resolves on the next node click.
    Click,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConnectState {
    Idle,
    Pending {
        source: NodeId,
        source_kind: NodeKind,
        mode: ConnectMode,
        /// Last pointer position (viewport-local), for the rubber band.
        pointer: Option<Point>,
    },
}

#[derive(Debug)]
pub struct ConnectionManager {
    connections: Vec<Connection>,
    rules: HierarchyRules,
    state: ConnectState,
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new(HierarchyRules::default())
    }
}

impl ConnectionManager {
    pub fn new(rules: HierarchyRules) -> Self {
        Self {
            connections: Vec::new(),
            rules,
            state: ConnectState::Idle,
        }
    }

    pub fn rules(&self) -> &HierarchyRules {
        &self.rules
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn get(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.iter().find(|c| c.id == id)
    }

    pub fn exists(&self, source: NodeId, target: NodeId) -> bool {
        self.connections
            .iter()
            .any(|c| c.source_id == source && c.target_id == target)
    }

    /// Replace every committed edge, e.g. when restoring a snapshot.
    pub fn replace_all(&mut self, connections: Vec<Connection>) {
        self.connections = connections;
    }

    // ─── State machine ───────────────────────────────────────────────────

    pub fn state(&self) -> &ConnectState {
        &self.state
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, ConnectState::Pending { .. })
    }

    pub fn pending_source(&self) -> Option<NodeId> {
        match self.state {
            ConnectState::Pending { source, .. } => Some(source),
            ConnectState::Idle => None,
        }
    }

    pub fn pending_mode(&self) -> Option<ConnectMode> {
        match self.state {
            ConnectState::Pending { mode, .. } => Some(mode),
            ConnectState::Idle => None,
        }
    }

    /// Propose `source` as the origin of a new edge. Leaf kinds are rejected
    /// and leave the machine idle.
    pub fn start(
        &mut self,
        source: NodeId,
        source_kind: NodeKind,
        mode: ConnectMode,
    ) -> Result<(), CanvasError> {
        if let Err(err) = self.rules.check_source(source_kind) {
            log::warn!("connection start rejected: {err}");
            self.state = ConnectState::Idle;
            return Err(err);
        }
        log::debug!("connection pending from {source} ({mode:?})");
        self.state = ConnectState::Pending {
            source,
            source_kind,
            mode,
            pointer: None,
        };
        Ok(())
    }

    /// Track the pointer for the rubber band.
    pub fn update_pointer(&mut self, p: Point) -> bool {
        match &mut self.state {
            ConnectState::Pending { pointer, .. } => {
                *pointer = Some(p);
                true
            }
            ConnectState::Idle => false,
        }
    }

    pub fn pointer(&self) -> Option<Point> {
        match self.state {
            ConnectState::Pending { pointer, .. } => pointer,
            ConnectState::Idle => None,
        }
    }

    /// Finish the pending edge at `target`. Always returns to `Idle`.
    pub fn complete(
        &mut self,
        target: NodeId,
        target_kind: NodeKind,
        ids: &mut IdGenerator,
    ) -> Result<Connection, CanvasError> {
        let state = std::mem::replace(&mut self.state, ConnectState::Idle);
        let ConnectState::Pending {
            source,
            source_kind,
            ..
        } = state
        else {
            return Err(CanvasError::NoPendingConnection);
        };

        if source == target {
            return Err(CanvasError::SelfConnection);
        }
        self.rules.check_edge(source_kind, target_kind)?;
        if self.exists(source, target) {
            return Err(CanvasError::DuplicateConnection);
        }

        let connection = Connection {
            id: ids.connection_id(),
            source_id: source,
            target_id: target,
            source_kind,
            target_kind,
        };
        log::info!("connected {source} → {target}");
        self.connections.push(connection.clone());
        Ok(connection)
    }

    /// Discard the pending source. Returns `true` if one was pending.
    pub fn cancel(&mut self) -> bool {
        let was_pending = self.is_pending();
        if was_pending {
            log::debug!("connection cancelled");
        }
        self.state = ConnectState::Idle;
        was_pending
    }

    // ─── Removal ─────────────────────────────────────────────────────────

    pub fn remove(&mut self, id: ConnectionId) -> Result<Connection, CanvasError> {
        let index = self
            .connections
            .iter()
            .position(|c| c.id == id)
            .ok_or(CanvasError::UnknownConnection(id))?;
        Ok(self.connections.remove(index))
    }

    /// Remove every edge with an endpoint in `nodes`.
    pub fn remove_touching(&mut self, nodes: &[NodeId]) -> Vec<Connection> {
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.connections)
            .into_iter()
            .partition(|c| nodes.iter().any(|id| c.touches(*id)));
        self.connections = kept;
        removed
    }
}
