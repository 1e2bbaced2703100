//! Event shapes emitted by the grid widget.
//!
//! Field aliases accept the camelCase names browser-side grids produce.

use serde::{Deserialize, Serialize};

/// A single cell edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellEdit {
  #[serde(alias = "rowIndex")]
  pub row_index: usize,
  #[serde(alias = "prop", alias = "columnId")]
  pub column_id: String,
  #[serde(default, alias = "newValue")]
  pub new_value: String,
  #[serde(default, alias = "oldValue")]
  pub old_value: String,
}

/// A rectangular block of cells addressed by two `(column, row)` corners.
///
/// `x1`/`y1` default to `x`/`y`, so a bare corner is a single cell. Corners
/// may arrive in either order. Coordinates are signed so that out-of-grid
/// corners deserialize and are then clipped rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRange {
  pub x:  i64,
  pub y:  i64,
  #[serde(default)]
  pub x1: Option<i64>,
  #[serde(default)]
  pub y1: Option<i64>,
}

impl CellRange {
  pub fn cell(x: i64, y: i64) -> Self { Self { x, y, x1: None, y1: None } }

  pub fn span(x: i64, y: i64, x1: i64, y1: i64) -> Self {
    Self {
      x,
      y,
      x1: Some(x1),
      y1: Some(y1),
    }
  }

  /// Inclusive `(min_x, max_x, min_y, max_y)`.
  pub fn normalized(&self) -> (i64, i64, i64, i64) {
    let x1 = self.x1.unwrap_or(self.x);
    let y1 = self.y1.unwrap_or(self.y);
    (self.x.min(x1), self.x.max(x1), self.y.min(y1), self.y.max(y1))
  }
}

/// A file (or a file inside a dropped directory).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroppedFile {
  #[serde(default)]
  pub name:          String,
  #[serde(default, alias = "relativePath")]
  pub relative_path: Option<String>,
}

impl DroppedFile {
  pub fn named(name: impl Into<String>) -> Self {
    Self {
      name:          name.into(),
      relative_path: None,
    }
  }

  pub fn at_path(name: impl Into<String>, relative_path: impl Into<String>) -> Self {
    Self {
      name:          name.into(),
      relative_path: Some(relative_path.into()),
    }
  }

  /// The relative path when the drop carried one, otherwise the bare name.
  pub fn value(&self) -> &str {
    match self.relative_path.as_deref() {
      Some(path) if !path.is_empty() => path,
      _ => &self.name,
    }
  }
}

/// Files dropped onto a selected range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDrop {
  pub range: CellRange,
  #[serde(default)]
  pub files: Vec<DroppedFile>,
}
