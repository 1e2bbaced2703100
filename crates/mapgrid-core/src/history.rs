//! Linear snapshot-based undo/redo.
//!
//! The history never aliases live state: every push stores an owned clone.
//! Recording a new mutation discards the redo branch, so there is only ever
//! one line of history.

use std::collections::VecDeque;

/// Undo stack bound used when none is configured.
pub const DEFAULT_CAPACITY: usize = 100;

#[derive(Debug, Clone)]
pub struct History<T> {
  undo:     VecDeque<T>,
  redo:     Vec<T>,
  capacity: usize,
}

impl<T: Clone> Default for History<T> {
  fn default() -> Self { Self::new() }
}

impl<T: Clone> History<T> {
  pub fn new() -> Self { Self::with_capacity(DEFAULT_CAPACITY) }

  /// A history whose undo stack keeps at most `capacity` snapshots.
  /// A capacity of zero is raised to one.
  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      undo:     VecDeque::new(),
      redo:     Vec::new(),
      capacity: capacity.max(1),
    }
  }

  pub fn capacity(&self) -> usize { self.capacity }

  /// Snapshot `current` before it is mutated and drop the redo branch.
  pub fn record(&mut self, current: &T) {
    self.push_undo(current.clone());
    if !self.redo.is_empty() {
      tracing::debug!(discarded = self.redo.len(), "redo branch discarded");
      self.redo.clear();
    }
  }

  /// Step back. Returns the state to restore, or `None` if there is nothing
  /// to undo; in that case the history is left untouched.
  pub fn undo(&mut self, current: &T) -> Option<T> {
    let previous = self.undo.pop_back()?;
    self.redo.push(current.clone());
    Some(previous)
  }

  /// Step forward again after an undo. `None` if the redo stack is empty.
  pub fn redo(&mut self, current: &T) -> Option<T> {
    let next = self.redo.pop()?;
    self.push_undo(current.clone());
    Some(next)
  }

  pub fn can_undo(&self) -> bool { !self.undo.is_empty() }

  pub fn can_redo(&self) -> bool { !self.redo.is_empty() }

  pub fn undo_depth(&self) -> usize { self.undo.len() }

  pub fn redo_depth(&self) -> usize { self.redo.len() }

  pub fn clear(&mut self) {
    self.undo.clear();
    self.redo.clear();
  }

  fn push_undo(&mut self, snapshot: T) {
    self.undo.push_back(snapshot);
    while self.undo.len() > self.capacity {
      self.undo.pop_front();
      tracing::debug!(capacity = self.capacity, "evicted oldest undo snapshot");
    }
  }
}
