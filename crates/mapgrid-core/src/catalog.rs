//! [`Catalog`]: the entities and the relation between them, as one value.
//!
//! The catalog is the unit the history snapshots, so an undo step always
//! restores entities and mappings together.

use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  entity::{Study, Variable},
  mapping::{Mapping, MappingIndex},
  store::EntityStore,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
  pub entities: EntityStore,
  pub mappings: MappingIndex,
}

/// Flat, serialisable shape of a catalog as handed over by an entity provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogImport {
  #[serde(default)]
  pub studies:   Vec<Study>,
  #[serde(default)]
  pub variables: Vec<Variable>,
  #[serde(default)]
  pub mappings:  Vec<Mapping>,
}

impl Catalog {
  pub fn new() -> Self { Self::default() }

  /// Validate and load a bulk import.
  ///
  /// Rejects duplicate entity ids, duplicate mapping pairs, and mappings that
  /// point at a study or variable the import does not contain.
  pub fn from_import(import: CatalogImport) -> Result<Self> {
    let mut entities = EntityStore::new();
    for study in import.studies {
      entities.add_study(study)?;
    }
    for variable in import.variables {
      entities.add_variable(variable)?;
    }

    if let Some(orphan) = import.mappings.iter().find(|m| {
      entities.study(&m.study_id).is_none()
        || entities.variable(&m.variable_id).is_none()
    }) {
      return Err(Error::OrphanMapping {
        study_id:    orphan.study_id.clone(),
        variable_id: orphan.variable_id.clone(),
      });
    }

    let mappings = MappingIndex::from_mappings(import.mappings)?;
    Ok(Self { entities, mappings })
  }

  /// Parse a JSON document shaped like [`CatalogImport`].
  pub fn from_json(raw: &str) -> Result<Self> {
    Self::from_import(serde_json::from_str(raw)?)
  }

  /// Flatten back into the import shape; mappings are ordered by key.
  pub fn to_import(&self) -> CatalogImport {
    CatalogImport {
      studies:   self.entities.studies().to_vec(),
      variables: self.entities.variables().to_vec(),
      mappings:  self.mappings.iter().cloned().collect(),
    }
  }

  // ── Cascading deletes ─────────────────────────────────────────────────────

  /// Remove a study and every mapping that references it.
  ///
  /// Returns the removed study and the number of pruned mappings, or `None`
  /// if the study is unknown.
  pub fn delete_study(&mut self, id: &str) -> Option<(Study, usize)> {
    let study = self.entities.remove_study(id)?;
    let pruned = self.mappings.prune_study(id);
    tracing::debug!(study = id, pruned, "deleted study");
    Some((study, pruned))
  }

  /// Remove a variable and every mapping that references it.
  pub fn delete_variable(&mut self, id: &str) -> Option<(Variable, usize)> {
    let variable = self.entities.remove_variable(id)?;
    let pruned = self.mappings.prune_variable(id);
    tracing::debug!(variable = id, pruned, "deleted variable");
    Some((variable, pruned))
  }
}
