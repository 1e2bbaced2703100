//! [`EntityStore`]: the Study and Variable collections.
//!
//! Collections keep insertion order, which is also the order the grid
//! displays them in. The store knows nothing about mappings; deleting an
//! entity together with its mappings is done through [`crate::Catalog`].

use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  entity::{Study, Variable},
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityStore {
  #[serde(default)]
  studies:   Vec<Study>,
  #[serde(default)]
  variables: Vec<Variable>,
}

impl EntityStore {
  pub fn new() -> Self { Self::default() }

  // ── Studies ───────────────────────────────────────────────────────────────

  pub fn studies(&self) -> &[Study] { &self.studies }

  pub fn study(&self, id: &str) -> Option<&Study> {
    self.studies.iter().find(|s| s.id == id)
  }

  pub fn study_index(&self, id: &str) -> Option<usize> {
    self.studies.iter().position(|s| s.id == id)
  }

  /// Append a study. Fails if a study with the same id already exists.
  pub fn add_study(&mut self, study: Study) -> Result<()> {
    if self.study(&study.id).is_some() {
      return Err(Error::DuplicateStudy(study.id));
    }
    self.studies.push(study);
    Ok(())
  }

  /// Apply a field-level edit. Returns `false` if the study is unknown.
  ///
  /// The id is identity and survives the edit unchanged.
  pub fn update_study(&mut self, id: &str, edit: impl FnOnce(&mut Study)) -> bool {
    let Some(study) = self.studies.iter_mut().find(|s| s.id == id) else {
      return false;
    };
    edit(study);
    id.clone_into(&mut study.id);
    true
  }

  pub fn remove_study(&mut self, id: &str) -> Option<Study> {
    let index = self.study_index(id)?;
    Some(self.studies.remove(index))
  }

  // ── Variables ─────────────────────────────────────────────────────────────

  pub fn variables(&self) -> &[Variable] { &self.variables }

  pub fn variable(&self, id: &str) -> Option<&Variable> {
    self.variables.iter().find(|v| v.id == id)
  }

  pub fn variable_index(&self, id: &str) -> Option<usize> {
    self.variables.iter().position(|v| v.id == id)
  }

  /// Append a variable. Fails if a variable with the same id already exists.
  pub fn add_variable(&mut self, variable: Variable) -> Result<()> {
    if self.variable(&variable.id).is_some() {
      return Err(Error::DuplicateVariable(variable.id));
    }
    self.variables.push(variable);
    Ok(())
  }

  /// Apply a field-level edit. Returns `false` if the variable is unknown.
  pub fn update_variable(
    &mut self,
    id: &str,
    edit: impl FnOnce(&mut Variable),
  ) -> bool {
    let Some(variable) = self.variables.iter_mut().find(|v| v.id == id) else {
      return false;
    };
    edit(variable);
    id.clone_into(&mut variable.id);
    true
  }

  pub fn remove_variable(&mut self, id: &str) -> Option<Variable> {
    let index = self.variable_index(id)?;
    Some(self.variables.remove(index))
  }
}
