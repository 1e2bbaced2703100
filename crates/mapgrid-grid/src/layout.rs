//! Row and column descriptors for the projected grid.

use mapgrid_core::entity::Entity;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Prop of the structural first column that shows each row entity's label.
pub const LABEL_PROP: &str = "__label";

/// Which collection supplies the rows. The other one supplies the columns.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Orientation {
  #[default]
  StudiesAsRows,
  VariablesAsRows,
}

impl Orientation {
  /// Order a `(row_id, column_id)` pair as `(study_id, variable_id)`.
  pub fn pair<'a>(self, row_id: &'a str, column_id: &'a str) -> (&'a str, &'a str) {
    match self {
      Self::StudiesAsRows => (row_id, column_id),
      Self::VariablesAsRows => (column_id, row_id),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridRow {
  /// Id of the row entity.
  pub id:    String,
  pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridColumn {
  /// Id of the column entity, or [`LABEL_PROP`] for the label column.
  pub prop:       String,
  pub header:     String,
  /// Structural columns are read-only and never map to a relation cell.
  pub structural: bool,
}

impl GridRow {
  pub fn of(entity: &impl Entity) -> Self {
    Self {
      id:    entity.id().to_owned(),
      label: entity.label().to_owned(),
    }
  }
}

impl GridColumn {
  pub fn of(entity: &impl Entity) -> Self {
    Self {
      prop:       entity.id().to_owned(),
      header:     entity.label().to_owned(),
      structural: false,
    }
  }

  pub fn label(header: impl Into<String>) -> Self {
    Self {
      prop:       LABEL_PROP.to_owned(),
      header:     header.into(),
      structural: true,
    }
  }
}
