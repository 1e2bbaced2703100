//! [`GridAdapter`]: projects the catalog into a grid and writes grid edits
//! back into the mapping index.
//!
//! The adapter holds layout policy only (orientation and value key). Every
//! projection is a fresh read of the session's committed catalog.

use std::{cell::RefCell, rc::Rc};

use mapgrid_core::{
  Catalog, Commit, Observer, Session,
  entity::Entity,
  mapping::RAW,
};
use serde::Serialize;

use crate::{
  event::{CellEdit, FileDrop},
  fill::{Assignment, apply_files_to_range},
  layout::{GridColumn, GridRow, LABEL_PROP, Orientation},
};

// ─── Frame ───────────────────────────────────────────────────────────────────

/// One display frame: the grid as it should be rendered right now.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Frame {
  pub value_key: String,
  pub rows:      Vec<GridRow>,
  pub columns:   Vec<GridColumn>,
  /// `cells[row][column]`; the label column is included.
  pub cells:     Vec<Vec<String>>,
}

impl Frame {
  /// Cell text, or `""` outside the frame.
  pub fn cell(&self, row: usize, column: usize) -> &str {
    self
      .cells
      .get(row)
      .and_then(|r| r.get(column))
      .map(String::as_str)
      .unwrap_or("")
  }

  pub fn row_count(&self) -> usize { self.rows.len() }

  pub fn column_count(&self) -> usize { self.columns.len() }
}

// ─── Adapter ─────────────────────────────────────────────────────────────────

/// A resolved write target: `(study_id, variable_id, value)`.
type Write = (String, String, String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridAdapter {
  pub orientation: Orientation,
  pub value_key:   String,
}

impl Default for GridAdapter {
  fn default() -> Self { Self::new(Orientation::default(), RAW) }
}

impl GridAdapter {
  pub fn new(orientation: Orientation, value_key: impl Into<String>) -> Self {
    Self {
      orientation,
      value_key: value_key.into(),
    }
  }

  // ── Projection ────────────────────────────────────────────────────────────

  /// Rows and columns for the current orientation. The first column is the
  /// structural label column.
  pub fn layout(&self, catalog: &Catalog) -> (Vec<GridRow>, Vec<GridColumn>) {
    let entities = &catalog.entities;
    match self.orientation {
      Orientation::StudiesAsRows => (
        entities.studies().iter().map(GridRow::of).collect(),
        Self::columns("Study", entities.variables()),
      ),
      Orientation::VariablesAsRows => (
        entities.variables().iter().map(GridRow::of).collect(),
        Self::columns("Variable", entities.studies()),
      ),
    }
  }

  fn columns<E: Entity>(label_header: &str, entities: &[E]) -> Vec<GridColumn> {
    std::iter::once(GridColumn::label(label_header))
      .chain(entities.iter().map(GridColumn::of))
      .collect()
  }

  /// Read the catalog into a display frame under this adapter's value key.
  pub fn project(&self, catalog: &Catalog) -> Frame {
    let (rows, columns) = self.layout(catalog);
    let cells = rows
      .iter()
      .map(|row| {
        columns
          .iter()
          .map(|column| {
            if column.structural {
              return row.label.clone();
            }
            let (study_id, variable_id) = self.orientation.pair(&row.id, &column.prop);
            catalog
              .mappings
              .get_value(study_id, variable_id, &self.value_key)
              .to_owned()
          })
          .collect()
      })
      .collect();

    Frame {
      value_key: self.value_key.clone(),
      rows,
      columns,
      cells,
    }
  }

  // ── Edits ─────────────────────────────────────────────────────────────────

  /// Apply one cell edit as its own undoable step.
  ///
  /// Returns `false` without touching history when the edit targets a
  /// structural column or does not resolve to a cell.
  pub fn apply_edit(&self, session: &mut Session, edit: &CellEdit) -> bool {
    match self.resolve_edit(session.catalog(), edit) {
      Some(write) => {
        self.commit(session, "edit cell", vec![write]);
        true
      }
      None => false,
    }
  }

  /// Apply a batch of edits as a single undoable step.
  ///
  /// Inapplicable edits are dropped; if none remain, nothing is recorded.
  /// Returns the number of writes performed.
  pub fn apply_batch(&self, session: &mut Session, edits: &[CellEdit]) -> usize {
    let writes: Vec<Write> = edits
      .iter()
      .filter_map(|edit| self.resolve_edit(session.catalog(), edit))
      .collect();
    self.commit(session, "edit range", writes)
  }

  /// Fill the dropped range with file values as a single undoable step.
  pub fn apply_drop(&self, session: &mut Session, drop: &FileDrop) -> usize {
    let (rows, columns) = self.layout(session.catalog());
    let writes: Vec<Write> = apply_files_to_range(
      Some(&drop.range),
      Some(rows.as_slice()),
      Some(columns.as_slice()),
      Some(drop.files.as_slice()),
    )
    .into_iter()
    .filter_map(|assignment| self.resolve_assignment(&columns, assignment))
    .collect();
    self.commit(session, "fill range", writes)
  }

  fn resolve_edit(&self, catalog: &Catalog, edit: &CellEdit) -> Option<Write> {
    if edit.column_id == LABEL_PROP {
      tracing::debug!(row = edit.row_index, "ignored edit on label column");
      return None;
    }

    let (row_id, column_known) = match self.orientation {
      Orientation::StudiesAsRows => (
        catalog.entities.studies().get(edit.row_index).map(|s| s.id()),
        catalog.entities.variable(&edit.column_id).is_some(),
      ),
      Orientation::VariablesAsRows => (
        catalog.entities.variables().get(edit.row_index).map(|v| v.id()),
        catalog.entities.study(&edit.column_id).is_some(),
      ),
    };

    let Some(row_id) = row_id.filter(|_| column_known) else {
      tracing::debug!(
        row = edit.row_index,
        column = %edit.column_id,
        "ignored edit outside the grid"
      );
      return None;
    };

    let (study_id, variable_id) = self.orientation.pair(row_id, &edit.column_id);
    Some((study_id.to_owned(), variable_id.to_owned(), edit.new_value.clone()))
  }

  fn resolve_assignment(
    &self,
    columns: &[GridColumn],
    assignment: Assignment,
  ) -> Option<Write> {
    let structural = columns
      .iter()
      .find(|c| c.prop == assignment.column_id)
      .is_none_or(|c| c.structural);
    if structural {
      return None;
    }
    let (study_id, variable_id) =
      self.orientation.pair(&assignment.row_id, &assignment.column_id);
    Some((study_id.to_owned(), variable_id.to_owned(), assignment.value))
  }

  fn commit(&self, session: &mut Session, label: &str, writes: Vec<Write>) -> usize {
    if writes.is_empty() {
      return 0;
    }
    let count = writes.len();
    let key = self.value_key.as_str();
    session.mutate(label, |catalog| {
      for (study_id, variable_id, value) in writes {
        catalog.mappings.upsert_value(&study_id, &variable_id, key, value);
      }
    });
    count
  }
}

// ─── Live frame ──────────────────────────────────────────────────────────────

/// Observer that keeps a shared [`Frame`] in step with the session.
pub struct LiveFrame {
  adapter: GridAdapter,
  frame:   Rc<RefCell<Frame>>,
}

impl LiveFrame {
  /// Subscribe a re-projecting observer to `session` and return the frame it
  /// maintains. The frame is populated immediately.
  pub fn attach(session: &mut Session, adapter: GridAdapter) -> Rc<RefCell<Frame>> {
    let frame = Rc::new(RefCell::new(adapter.project(session.catalog())));
    session.subscribe(Self {
      adapter,
      frame: Rc::clone(&frame),
    });
    frame
  }
}

impl Observer for LiveFrame {
  fn committed(&mut self, catalog: &Catalog, _commit: &Commit) {
    *self.frame.borrow_mut() = self.adapter.project(catalog);
  }
}
