//! Layered runtime settings: defaults, then an optional TOML file, then
//! `MAPGRID_*` environment variables.

use std::{collections::BTreeMap, path::Path};

use anyhow::Context as _;
use mapgrid_core::{history::DEFAULT_CAPACITY, mapping::RAW};
use mapgrid_grid::{Keymap, Orientation};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
  /// Mapping value key the grid displays and edits.
  pub value_key:        String,
  pub orientation:      Orientation,
  pub history_capacity: usize,
  /// Extra key bindings, combo → command (e.g. `"ctrl+shift+z" = "redo"`).
  pub keymap:           BTreeMap<String, String>,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      value_key:        RAW.to_owned(),
      orientation:      Orientation::default(),
      history_capacity: DEFAULT_CAPACITY,
      keymap:           BTreeMap::new(),
    }
  }
}

impl Settings {
  /// Load settings from `path` (if it exists) and the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("MAPGRID"))
      .build()
      .context("failed to read settings")?
      .try_deserialize()
      .context("failed to deserialise Settings")
  }

  pub fn keymap(&self) -> anyhow::Result<Keymap> {
    Keymap::with_overrides(
      self.keymap.iter().map(|(combo, command)| (combo.as_str(), command.as_str())),
    )
    .context("invalid key binding in settings")
  }
}
