//! Event-script replay.
//!
//! A script is JSON Lines: one event per line, tagged by `type`. Blank lines
//! and lines starting with `#` are ignored. A line that does not parse, or an
//! event that does not apply, is logged and skipped; replay carries on.
//!
//! Entity payloads nest under `study` or `variable`, so a variable's own
//! `type` field never collides with the event tag:
//!
//! ```json
//! {"type":"add_variable","variable":{"name":"Temp","type":"environmental_condition"}}
//! ```

use std::io::BufRead;

use anyhow::Context as _;
use chrono::NaiveDate;
use mapgrid_core::{
  Catalog, History, Session,
  entity::{Study, Variable, VariableKind},
};
use mapgrid_grid::{CellEdit, FileDrop, Focus, GridAdapter, KeyCombo, Keymap};
use serde::Deserialize;

use crate::Settings;

// ─── Events ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptEvent {
  /// A single grid cell edit.
  Edit(CellEdit),
  /// A range paste or multi-cell edit; one undo step.
  Batch { edits: Vec<CellEdit> },
  /// Files dropped onto a range.
  Drop(FileDrop),
  /// A key press routed through the keymap.
  Key {
    combo: String,
    #[serde(default)]
    focus: Focus,
  },
  Undo,
  Redo,
  AddStudy { study: NewStudy },
  AddVariable { variable: NewVariable },
  DeleteStudy { id: String },
  DeleteVariable { id: String },
}

/// Study attributes carried by an `add_study` event. Without an `id` the
/// study gets a fresh one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewStudy {
  pub id:               Option<String>,
  pub title:            String,
  pub description:      String,
  #[serde(alias = "submissionDate")]
  pub submission_date:  Option<NaiveDate>,
  #[serde(alias = "publicationDate")]
  pub publication_date: Option<NaiveDate>,
}

impl From<NewStudy> for Study {
  fn from(new: NewStudy) -> Self {
    let mut study = match new.id {
      Some(id) => Study::with_id(id, new.title),
      None => Study::new(new.title),
    };
    study.description = new.description;
    study.submission_date = new.submission_date;
    study.publication_date = new.publication_date;
    study
  }
}

/// Variable attributes carried by an `add_variable` event.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewVariable {
  pub id:          Option<String>,
  pub name:        String,
  #[serde(rename = "type")]
  pub kind:        VariableKind,
  pub unit:        Option<String>,
  pub description: String,
}

impl From<NewVariable> for Variable {
  fn from(new: NewVariable) -> Self {
    let mut variable = match new.id {
      Some(id) => Variable::with_id(id, new.name, new.kind),
      None => Variable::new(new.name, new.kind),
    };
    variable.unit = new.unit;
    variable.description = new.description;
    variable
  }
}

// ─── Replay ──────────────────────────────────────────────────────────────────

/// Counters reported after a replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
  /// Events that changed state.
  pub applied: usize,
  /// Well-formed events that turned out to be no-ops.
  pub ignored: usize,
  /// Lines that could not be parsed.
  pub skipped: usize,
}

/// Drives a [`Session`] from script events the way a grid UI would.
pub struct Replay {
  pub session: Session,
  pub adapter: GridAdapter,
  pub keymap:  Keymap,
}

impl Replay {
  pub fn new(catalog: Catalog, settings: &Settings) -> anyhow::Result<Self> {
    Ok(Self {
      session: Session::with_history(
        catalog,
        History::with_capacity(settings.history_capacity),
      ),
      adapter: GridAdapter::new(settings.orientation, settings.value_key.clone()),
      keymap:  settings.keymap()?,
    })
  }

  /// Replay every line of `script`. Fails only on read errors.
  pub fn run(&mut self, script: impl BufRead) -> anyhow::Result<ReplayStats> {
    let mut stats = ReplayStats::default();
    for (index, line) in script.lines().enumerate() {
      let line = line.with_context(|| format!("reading script line {}", index + 1))?;
      let line = line.trim();
      if line.is_empty() || line.starts_with('#') {
        continue;
      }

      match serde_json::from_str::<ScriptEvent>(line) {
        Ok(event) => {
          if self.apply(event) {
            stats.applied += 1;
          } else {
            stats.ignored += 1;
          }
        }
        Err(e) => {
          tracing::warn!(line = index + 1, error = %e, "skipping malformed event");
          stats.skipped += 1;
        }
      }
    }
    tracing::info!(
      applied = stats.applied,
      ignored = stats.ignored,
      skipped = stats.skipped,
      "replay finished"
    );
    Ok(stats)
  }

  /// Apply one event. Returns `true` if state changed.
  pub fn apply(&mut self, event: ScriptEvent) -> bool {
    let session = &mut self.session;
    match event {
      ScriptEvent::Edit(edit) => self.adapter.apply_edit(session, &edit),
      ScriptEvent::Batch { edits } => self.adapter.apply_batch(session, &edits) > 0,
      ScriptEvent::Drop(drop) => self.adapter.apply_drop(session, &drop) > 0,
      ScriptEvent::Key { combo, focus } => {
        let combo: KeyCombo = match combo.parse() {
          Ok(combo) => combo,
          Err(e) => {
            tracing::warn!(error = %e, "ignoring key event");
            return false;
          }
        };
        self
          .keymap
          .dispatch(&combo, focus)
          .is_some_and(|command| command.apply(session))
      }
      ScriptEvent::Undo => session.undo(),
      ScriptEvent::Redo => session.redo(),
      ScriptEvent::AddStudy { study } => {
        let study = Study::from(study);
        if session.catalog().entities.study(&study.id).is_some() {
          tracing::warn!(study = %study.id, "study already exists");
          return false;
        }
        session
          .mutate("add study", |c| c.entities.add_study(study))
          .is_ok()
      }
      ScriptEvent::AddVariable { variable } => {
        let variable = Variable::from(variable);
        if session.catalog().entities.variable(&variable.id).is_some() {
          tracing::warn!(variable = %variable.id, "variable already exists");
          return false;
        }
        session
          .mutate("add variable", |c| c.entities.add_variable(variable))
          .is_ok()
      }
      ScriptEvent::DeleteStudy { id } => {
        if session.catalog().entities.study(&id).is_none() {
          return false;
        }
        session.mutate("delete study", |c| c.delete_study(&id)).is_some()
      }
      ScriptEvent::DeleteVariable { id } => {
        if session.catalog().entities.variable(&id).is_none() {
          return false;
        }
        session
          .mutate("delete variable", |c| c.delete_variable(&id))
          .is_some()
      }
    }
  }
}
