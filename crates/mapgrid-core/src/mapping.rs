//! The sparse Study × Variable relation.
//!
//! A [`Mapping`] exists only for pairs somebody has written to. Reading a pair
//! with no mapping behaves exactly like reading a mapping whose every value is
//! empty, so the full cross product is never allocated.

use std::collections::{BTreeMap, BTreeSet, HashMap, hash_map::Entry};

use serde::{Deserialize, Serialize};

use crate::Error;

// ─── Value keys ──────────────────────────────────────────────────────────────

/// The value as reported by the study.
pub const RAW: &str = "raw";
/// The value converted to the variable's canonical scale.
pub const NORMALIZED: &str = "normalized";
/// The unit the raw value was reported in.
pub const UNIT: &str = "unit";

/// Keys every mapping carries, in display order.
pub const RESERVED_KEYS: [&str; 3] = [RAW, NORMALIZED, UNIT];

// ─── Mapping ─────────────────────────────────────────────────────────────────

/// Composite key of the relation. At most one [`Mapping`] exists per key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MappingKey {
  pub study_id:    String,
  pub variable_id: String,
}

impl MappingKey {
  pub fn new(study_id: &str, variable_id: &str) -> Self {
    Self {
      study_id:    study_id.to_owned(),
      variable_id: variable_id.to_owned(),
    }
  }
}

/// What one study reports about one variable.
///
/// `values` is an open bag: the reserved keys always resolve, and any other
/// key a caller writes is kept until it is written again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mapping {
  #[serde(alias = "studyId")]
  pub study_id:    String,
  #[serde(alias = "variableId")]
  pub variable_id: String,
  #[serde(default)]
  pub values:      BTreeMap<String, String>,
}

impl Mapping {
  /// A mapping with every reserved key present and empty.
  pub fn empty(study_id: &str, variable_id: &str) -> Self {
    Self {
      study_id:    study_id.to_owned(),
      variable_id: variable_id.to_owned(),
      values:      RESERVED_KEYS
        .iter()
        .map(|k| ((*k).to_owned(), String::new()))
        .collect(),
    }
  }

  pub fn key(&self) -> MappingKey {
    MappingKey::new(&self.study_id, &self.variable_id)
  }

  /// The value under `key`, or `""` when the key was never written.
  pub fn value(&self, key: &str) -> &str {
    self.values.get(key).map(String::as_str).unwrap_or("")
  }

  /// True when no key holds a non-empty value.
  pub fn is_blank(&self) -> bool { self.values.values().all(String::is_empty) }
}

// ─── Index ───────────────────────────────────────────────────────────────────

/// Hash index over the relation keyed by `(study_id, variable_id)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<Mapping>", try_from = "Vec<Mapping>")]
pub struct MappingIndex {
  entries: HashMap<MappingKey, Mapping>,
}

impl MappingIndex {
  pub fn new() -> Self { Self::default() }

  /// Build an index from externally supplied mappings.
  ///
  /// Returns [`Error::DuplicateMapping`] if two mappings share a pair.
  pub fn from_mappings(
    mappings: impl IntoIterator<Item = Mapping>,
  ) -> crate::Result<Self> {
    let mut entries = HashMap::new();
    for mapping in mappings {
      match entries.entry(mapping.key()) {
        Entry::Occupied(slot) => {
          let key: &MappingKey = slot.key();
          return Err(Error::DuplicateMapping {
            study_id:    key.study_id.clone(),
            variable_id: key.variable_id.clone(),
          });
        }
        Entry::Vacant(slot) => {
          slot.insert(mapping);
        }
      }
    }
    Ok(Self { entries })
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  pub fn find(&self, study_id: &str, variable_id: &str) -> Option<&Mapping> {
    let mapping = self.entries.get(&MappingKey::new(study_id, variable_id));
    debug_assert!(
      mapping.is_none_or(|m| m.study_id == study_id && m.variable_id == variable_id),
      "mapping stored under a key that does not match its own pair",
    );
    mapping
  }

  /// The value under `key` for the pair, or `""` if either the mapping or the
  /// key is missing.
  pub fn get_value(&self, study_id: &str, variable_id: &str, key: &str) -> &str {
    self
      .find(study_id, variable_id)
      .map(|m| m.value(key))
      .unwrap_or("")
  }

  /// Shorthand for [`get_value`](Self::get_value) with the `raw` key.
  pub fn raw(&self, study_id: &str, variable_id: &str) -> &str {
    self.get_value(study_id, variable_id, RAW)
  }

  /// Every value key in use: the reserved keys first, then every other key
  /// observed in any mapping, sorted lexicographically.
  pub fn available_value_keys(&self) -> Vec<String> {
    let extra: BTreeSet<&str> = self
      .entries
      .values()
      .flat_map(|m| m.values.keys())
      .map(String::as_str)
      .filter(|k| !RESERVED_KEYS.contains(k))
      .collect();

    RESERVED_KEYS
      .iter()
      .copied()
      .chain(extra)
      .map(str::to_owned)
      .collect()
  }

  pub fn mappings_for_study(&self, study_id: &str) -> Vec<&Mapping> {
    self.filtered(|m| m.study_id == study_id)
  }

  pub fn mappings_for_variable(&self, variable_id: &str) -> Vec<&Mapping> {
    self.filtered(|m| m.variable_id == variable_id)
  }

  /// All mappings, ordered by `(study_id, variable_id)`.
  pub fn iter(&self) -> impl Iterator<Item = &Mapping> {
    self.filtered(|_| true).into_iter()
  }

  pub fn len(&self) -> usize { self.entries.len() }

  pub fn is_empty(&self) -> bool { self.entries.is_empty() }

  fn filtered(&self, keep: impl Fn(&Mapping) -> bool) -> Vec<&Mapping> {
    let mut out: Vec<&Mapping> =
      self.entries.values().filter(|m| keep(m)).collect();
    out.sort_by(|a, b| {
      (&a.study_id, &a.variable_id).cmp(&(&b.study_id, &b.variable_id))
    });
    out
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  /// Write `value` under `key`, creating the mapping if the pair has none.
  ///
  /// Every other key of an existing mapping is left untouched.
  pub fn upsert_value(
    &mut self,
    study_id: &str,
    variable_id: &str,
    key: &str,
    value: impl Into<String>,
  ) {
    let mapping = self
      .entries
      .entry(MappingKey::new(study_id, variable_id))
      .or_insert_with(|| Mapping::empty(study_id, variable_id));
    mapping.values.insert(key.to_owned(), value.into());
  }

  /// Remove the mapping for the pair. No-op if there is none.
  pub fn delete(&mut self, study_id: &str, variable_id: &str) -> Option<Mapping> {
    self.entries.remove(&MappingKey::new(study_id, variable_id))
  }

  /// Drop every mapping that references `study_id`. Returns how many went.
  pub fn prune_study(&mut self, study_id: &str) -> usize {
    self.prune(|k| k.study_id == study_id)
  }

  /// Drop every mapping that references `variable_id`. Returns how many went.
  pub fn prune_variable(&mut self, variable_id: &str) -> usize {
    self.prune(|k| k.variable_id == variable_id)
  }

  fn prune(&mut self, orphaned: impl Fn(&MappingKey) -> bool) -> usize {
    let before = self.entries.len();
    self.entries.retain(|k, _| !orphaned(k));
    before - self.entries.len()
  }
}

// ─── Serde bridge ────────────────────────────────────────────────────────────

impl From<MappingIndex> for Vec<Mapping> {
  fn from(index: MappingIndex) -> Self {
    let mut out: Vec<Mapping> = index.entries.into_values().collect();
    out.sort_by(|a, b| a.key().cmp(&b.key()));
    out
  }
}

impl TryFrom<Vec<Mapping>> for MappingIndex {
  type Error = Error;

  fn try_from(mappings: Vec<Mapping>) -> Result<Self, Self::Error> {
    Self::from_mappings(mappings)
  }
}
