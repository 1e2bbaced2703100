//! Error type for `mapgrid-grid`.
//!
//! Grid events never fail; only key-binding configuration can.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid key combination: {0:?}")]
  InvalidKeyCombo(String),

  #[error("unknown command: {0:?}")]
  UnknownCommand(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
