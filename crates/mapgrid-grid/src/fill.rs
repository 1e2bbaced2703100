//! Range fill: spread an ordered list of dropped files over a cell range.
//!
//! This is a pure projection. It produces assignments and leaves writing them
//! to the caller.

use serde::Serialize;

use crate::{
  event::{CellRange, DroppedFile},
  layout::{GridColumn, GridRow},
};

/// One value destined for one cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
  pub row_id:    String,
  pub column_id: String,
  pub value:     String,
}

impl Assignment {
  pub fn new(
    row_id: impl Into<String>,
    column_id: impl Into<String>,
    value: impl Into<String>,
  ) -> Self {
    Self {
      row_id:    row_id.into(),
      column_id: column_id.into(),
      value:     value.into(),
    }
  }
}

/// Walk `range` row-major and pair each cell with the next item.
///
/// Cells are visited row by row, left to right within a row. Filling stops
/// when either the cells or the items run out; there is no padding and no
/// wraparound. Cells outside the grid are clipped away and do not consume an
/// item. Any missing input yields no assignments.
pub fn apply_files_to_range(
  range: Option<&CellRange>,
  rows: Option<&[GridRow]>,
  columns: Option<&[GridColumn]>,
  items: Option<&[DroppedFile]>,
) -> Vec<Assignment> {
  let (Some(range), Some(rows), Some(columns), Some(items)) =
    (range, rows, columns, items)
  else {
    return Vec::new();
  };
  if rows.is_empty() || columns.is_empty() || items.is_empty() {
    return Vec::new();
  }

  let (min_x, max_x, min_y, max_y) = range.normalized();
  let Some(col_span) = clip(min_x, max_x, columns.len()) else {
    return Vec::new();
  };
  let Some(row_span) = clip(min_y, max_y, rows.len()) else {
    return Vec::new();
  };

  let mut items = items.iter();
  let mut out = Vec::new();
  for row in &rows[row_span] {
    for column in &columns[col_span.clone()] {
      let Some(item) = items.next() else {
        return out;
      };
      out.push(Assignment::new(&row.id, &column.prop, item.value()));
    }
  }
  out
}

/// Intersect the inclusive span `lo..=hi` with `0..len`.
fn clip(lo: i64, hi: i64, len: usize) -> Option<std::ops::Range<usize>> {
  let last = i64::try_from(len).ok()? - 1;
  let lo = lo.max(0);
  let hi = hi.min(last);
  if lo > hi {
    return None;
  }
  // Both bounds are now within 0..len.
  Some(lo as usize..hi as usize + 1)
}
