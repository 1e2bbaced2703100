//! Keyboard shortcuts for history navigation.
//!
//! Shortcuts are suppressed while a text-input-like control has focus so that
//! the control's own undo keeps working.

use std::{collections::HashMap, fmt, str::FromStr};

use mapgrid_core::Session;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::{Error, Result};

// ─── Key combination ─────────────────────────────────────────────────────────

/// A key plus modifiers, written like `ctrl+z` or `ctrl+shift+z`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct KeyCombo {
  pub ctrl:  bool,
  pub shift: bool,
  pub alt:   bool,
  pub meta:  bool,
  /// Lowercased key name.
  pub key:   String,
}

impl FromStr for KeyCombo {
  type Err = Error;

  fn from_str(raw: &str) -> Result<Self> {
    let invalid = || Error::InvalidKeyCombo(raw.to_owned());
    let mut combo = KeyCombo::default();
    let mut parts = raw.split('+').map(|p| p.trim().to_ascii_lowercase()).peekable();

    while let Some(part) = parts.next() {
      if parts.peek().is_none() {
        if part.is_empty() {
          return Err(invalid());
        }
        combo.key = part;
        break;
      }
      match part.as_str() {
        "ctrl" | "control" => combo.ctrl = true,
        "shift" => combo.shift = true,
        "alt" | "option" => combo.alt = true,
        "meta" | "cmd" | "super" => combo.meta = true,
        _ => return Err(invalid()),
      }
    }

    if combo.key.is_empty() {
      return Err(invalid());
    }
    Ok(combo)
  }
}

impl fmt::Display for KeyCombo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (on, name) in [
      (self.ctrl, "ctrl+"),
      (self.shift, "shift+"),
      (self.alt, "alt+"),
      (self.meta, "meta+"),
    ] {
      if on {
        f.write_str(name)?;
      }
    }
    f.write_str(&self.key)
  }
}

// ─── Commands ────────────────────────────────────────────────────────────────

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Command {
  Undo,
  Redo,
}

impl Command {
  /// Run the command against the session. `false` if it was a no-op.
  pub fn apply(self, session: &mut Session) -> bool {
    match self {
      Self::Undo => session.undo(),
      Self::Redo => session.redo(),
    }
  }
}

/// Where keyboard focus currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Focus {
  #[default]
  Grid,
  TextInput,
}

// ─── Keymap ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Keymap {
  bindings: HashMap<KeyCombo, Command>,
}

impl Default for Keymap {
  /// ctrl+z undoes, ctrl+y redoes.
  fn default() -> Self {
    let bindings = [("z", Command::Undo), ("y", Command::Redo)]
      .into_iter()
      .map(|(key, command)| {
        let combo = KeyCombo {
          ctrl: true,
          key: key.to_owned(),
          ..KeyCombo::default()
        };
        (combo, command)
      })
      .collect();
    Self { bindings }
  }
}

impl Keymap {
  /// The default bindings overlaid with `overrides` of the form
  /// `("ctrl+shift+z", "redo")`.
  pub fn with_overrides<'a>(
    overrides: impl IntoIterator<Item = (&'a str, &'a str)>,
  ) -> Result<Self> {
    let mut keymap = Self::default();
    for (combo, command) in overrides {
      let command = Command::from_str(command.trim())
        .map_err(|_| Error::UnknownCommand(command.to_owned()))?;
      keymap.bind(combo.parse()?, command);
    }
    Ok(keymap)
  }

  pub fn bind(&mut self, combo: KeyCombo, command: Command) {
    self.bindings.insert(combo, command);
  }

  /// The command bound to `combo`, unless focus is in a text input.
  pub fn dispatch(&self, combo: &KeyCombo, focus: Focus) -> Option<Command> {
    if focus == Focus::TextInput {
      return None;
    }
    self.bindings.get(combo).copied()
  }
}
