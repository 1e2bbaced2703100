//! Error types for `mapgrid-core`.
//!
//! Only the import boundary produces errors. Interactive operations (lookups,
//! upserts, deletes, undo, redo) resolve malformed input to no-ops instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("study already exists: {0}")]
  DuplicateStudy(String),

  #[error("variable already exists: {0}")]
  DuplicateVariable(String),

  #[error("more than one mapping for study {study_id} and variable {variable_id}")]
  DuplicateMapping {
    study_id:    String,
    variable_id: String,
  },

  #[error(
    "mapping references unknown entity (study {study_id}, variable {variable_id})"
  )]
  OrphanMapping {
    study_id:    String,
    variable_id: String,
  },

  #[error("unknown variable kind {given:?}, expected one of: {expected}")]
  UnknownVariableKind { given: String, expected: String },

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
