//! Grid projection layer for mapgrid.
//!
//! Turns a [`mapgrid_core::Catalog`] into a row/column matrix for an external
//! grid widget and turns that widget's edit, drop and key events back into
//! session mutations. Rendering and event capture are the caller's concern.

pub mod adapter;
pub mod error;
pub mod event;
pub mod fill;
pub mod keymap;
pub mod layout;

pub use adapter::{Frame, GridAdapter, LiveFrame};
pub use error::{Error, Result};
pub use event::{CellEdit, CellRange, DroppedFile, FileDrop};
pub use fill::{Assignment, apply_files_to_range};
pub use keymap::{Command, Focus, KeyCombo, Keymap};
pub use layout::{GridColumn, GridRow, LABEL_PROP, Orientation};

#[cfg(test)]
mod tests;
