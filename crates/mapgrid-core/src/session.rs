//! [`Session`]: the single owner of live state.
//!
//! Collaborators receive the session by `&mut` instead of reaching for shared
//! globals. Every change goes through [`Session::mutate`], [`Session::undo`]
//! or [`Session::redo`], and observers hear about it only after the change is
//! committed.

use std::fmt;

use crate::{Catalog, History};

// ─── Commits ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitKind {
  Mutation,
  Undo,
  Redo,
}

/// Notification delivered to observers after state changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
  pub kind:  CommitKind,
  /// Short description of what changed, e.g. "edit cell" or "undo".
  pub label: String,
}

/// Something that wants to react to committed changes, typically by
/// re-projecting the catalog for display.
pub trait Observer {
  fn committed(&mut self, catalog: &Catalog, commit: &Commit);
}

impl<F> Observer for F
where
  F: FnMut(&Catalog, &Commit),
{
  fn committed(&mut self, catalog: &Catalog, commit: &Commit) {
    self(catalog, commit)
  }
}

// ─── Session ─────────────────────────────────────────────────────────────────

pub struct Session {
  catalog:   Catalog,
  history:   History<Catalog>,
  observers: Vec<Box<dyn Observer>>,
}

impl fmt::Debug for Session {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Session")
      .field("catalog", &self.catalog)
      .field("history", &self.history)
      .field("observers", &self.observers.len())
      .finish()
  }
}

impl Session {
  pub fn new(catalog: Catalog) -> Self {
    Self::with_history(catalog, History::new())
  }

  pub fn with_history(catalog: Catalog, history: History<Catalog>) -> Self {
    Self {
      catalog,
      history,
      observers: Vec::new(),
    }
  }

  /// The latest committed state.
  pub fn catalog(&self) -> &Catalog { &self.catalog }

  pub fn history(&self) -> &History<Catalog> { &self.history }

  pub fn subscribe(&mut self, observer: impl Observer + 'static) {
    self.observers.push(Box::new(observer));
  }

  /// Record an undo point, apply `change`, then notify observers.
  ///
  /// The whole closure is one undoable unit regardless of how many writes it
  /// performs.
  pub fn mutate<R>(
    &mut self,
    label: impl Into<String>,
    change: impl FnOnce(&mut Catalog) -> R,
  ) -> R {
    self.history.record(&self.catalog);
    let out = change(&mut self.catalog);
    self.notify(CommitKind::Mutation, label.into());
    out
  }

  /// Restore the state before the last mutation. `false` if there was none.
  pub fn undo(&mut self) -> bool {
    match self.history.undo(&self.catalog) {
      Some(previous) => {
        self.catalog = previous;
        self.notify(CommitKind::Undo, "undo".into());
        true
      }
      None => {
        tracing::debug!("undo requested with empty history");
        false
      }
    }
  }

  /// Re-apply the last undone mutation. `false` if there was none.
  pub fn redo(&mut self) -> bool {
    match self.history.redo(&self.catalog) {
      Some(next) => {
        self.catalog = next;
        self.notify(CommitKind::Redo, "redo".into());
        true
      }
      None => {
        tracing::debug!("redo requested with empty redo stack");
        false
      }
    }
  }

  fn notify(&mut self, kind: CommitKind, label: String) {
    let commit = Commit { kind, label };
    tracing::debug!(
      kind = ?commit.kind,
      label = %commit.label,
      undo_depth = self.history.undo_depth(),
      redo_depth = self.history.redo_depth(),
      "commit"
    );
    for observer in &mut self.observers {
      observer.committed(&self.catalog, &commit);
    }
  }
}
