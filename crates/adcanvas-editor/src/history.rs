//! Undo/redo history of whole-board snapshots.
//!
//! A flat list of immutable snapshots plus a cursor. The cursor starts at
//! "before the first snapshot" and always points at the snapshot matching
//! the current document.
//!
//! - `record` drops everything after the cursor, appends, and moves the
//!   cursor to the new end. There is no branching.
//! - `undo` / `redo` move the cursor and hand back the snapshot there. They
//!   never touch the document; the caller restores it.
//!
//! Continuous gestures record only their settled outcome.

use adcanvas_core::CanvasError;

#[derive(Debug, Clone)]
pub struct HistoryManager<T> {
    snapshots: Vec<T>,
    /// Index of the current snapshot; `None` before the first record.
    cursor: Option<usize>,
    max_depth: usize,
}

impl<T> Default for HistoryManager<T> {
    fn default() -> Self {
        Self::new(100)
    }
}

impl<T> HistoryManager<T> {
    pub fn new(max_depth: usize) -> Self {
        Self {
            snapshots: Vec::new(),
            cursor: None,
            max_depth: max_depth.max(1),
        }
    }

    /// Cursor as a signed index in `[-1, len - 1]`.
    pub fn cursor(&self) -> isize {
        self.cursor.map_or(-1, |c| c as isize)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        matches!(self.cursor, Some(c) if c > 0)
    }

    pub fn can_redo(&self) -> bool {
        let next = self.cursor.map_or(0, |c| c + 1);
        next < self.snapshots.len()
    }

    /// Snapshot at the cursor.
    pub fn current(&self) -> Option<&T> {
        self.cursor.and_then(|c| self.snapshots.get(c))
    }

    /// Append a snapshot, pruning any redo branch.
    pub fn record(&mut self, snapshot: T) {
        let keep = self.cursor.map_or(0, |c| c + 1);
        if keep < self.snapshots.len() {
            log::debug!("history: pruning {} redo entries", self.snapshots.len() - keep);
            self.snapshots.truncate(keep);
        }
        self.snapshots.push(snapshot);
        if self.snapshots.len() > self.max_depth {
            self.snapshots.remove(0);
        }
        self.cursor = Some(self.snapshots.len() - 1);
    }

    pub fn undo(&mut self) -> Result<&T, CanvasError> {
        match self.cursor {
            Some(c) if c > 0 => {
                self.cursor = Some(c - 1);
                Ok(&self.snapshots[c - 1])
            }
            _ => Err(CanvasError::NothingToUndo),
        }
    }

    pub fn redo(&mut self) -> Result<&T, CanvasError> {
        let next = self.cursor.map_or(0, |c| c + 1);
        if next >= self.snapshots.len() {
            return Err(CanvasError::NothingToRedo);
        }
        self.cursor = Some(next);
        Ok(&self.snapshots[next])
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.cursor = None;
    }
}
