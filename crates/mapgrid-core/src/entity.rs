//! Entity types: the two independent collections the relation joins.
//!
//! Entities carry identity and basic descriptive attributes only. Everything
//! a study says about a variable lives in the [`crate::mapping`] relation.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Entity trait ────────────────────────────────────────────────────────────

/// Common identity surface shared by [`Study`] and [`Variable`].
///
/// The grid layer only ever needs an id and a human-readable label, which lets
/// either collection play the row role or the column role.
pub trait Entity {
  fn id(&self) -> &str;

  /// Display label for the structural (read-only) grid column or header.
  fn label(&self) -> &str;
}

// ─── Study ───────────────────────────────────────────────────────────────────

/// A published study that reports values for some set of variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Study {
  pub id:               String,
  #[serde(default)]
  pub title:            String,
  #[serde(default)]
  pub description:      String,
  #[serde(default, alias = "submissionDate")]
  pub submission_date:  Option<NaiveDate>,
  #[serde(default, alias = "publicationDate")]
  pub publication_date: Option<NaiveDate>,
}

impl Study {
  /// Create a study with a freshly generated id and empty attributes.
  pub fn new(title: impl Into<String>) -> Self {
    Self::with_id(Uuid::new_v4().to_string(), title)
  }

  /// Create a study with a caller-supplied id, e.g. during bulk import.
  pub fn with_id(id: impl Into<String>, title: impl Into<String>) -> Self {
    Self {
      id:               id.into(),
      title:            title.into(),
      description:      String::new(),
      submission_date:  None,
      publication_date: None,
    }
  }
}

impl Entity for Study {
  fn id(&self) -> &str { &self.id }

  fn label(&self) -> &str { &self.title }
}

// ─── Variable ────────────────────────────────────────────────────────────────

/// The closed set of variable kinds a study can describe.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum VariableKind {
  QuantitativeFaultSpec,
  QualitativeFaultSpec,
  OperationalCondition,
  EnvironmentalCondition,
  #[default]
  Other,
}

impl VariableKind {
  /// Parse a kind from its snake_case name.
  pub fn parse(raw: &str) -> Result<Self> {
    Self::from_str(raw.trim()).map_err(|_| Error::UnknownVariableKind {
      given:    raw.to_owned(),
      expected: Self::iter()
        .map(|kind| kind.to_string())
        .collect::<Vec<_>>()
        .join(", "),
    })
  }
}

/// A measurable or descriptive quantity studies report on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
  pub id:          String,
  #[serde(default)]
  pub name:        String,
  #[serde(default, rename = "type")]
  pub kind:        VariableKind,
  #[serde(default)]
  pub unit:        Option<String>,
  #[serde(default)]
  pub description: String,
}

impl Variable {
  /// Create a variable with a freshly generated id.
  pub fn new(name: impl Into<String>, kind: VariableKind) -> Self {
    Self::with_id(Uuid::new_v4().to_string(), name, kind)
  }

  pub fn with_id(
    id: impl Into<String>,
    name: impl Into<String>,
    kind: VariableKind,
  ) -> Self {
    Self {
      id: id.into(),
      name: name.into(),
      kind,
      unit: None,
      description: String::new(),
    }
  }
}

impl Entity for Variable {
  fn id(&self) -> &str { &self.id }

  fn label(&self) -> &str { &self.name }
}
