//! Core types for the mapgrid study/variable mapping engine.
//!
//! This crate is deliberately free of UI and storage dependencies. It owns the
//! two entity collections, the sparse relation between them, and the linear
//! undo/redo history. All other crates depend on it.

pub mod catalog;
pub mod entity;
pub mod error;
pub mod history;
pub mod mapping;
pub mod session;
pub mod store;

pub use catalog::{Catalog, CatalogImport};
pub use error::{Error, Result};
pub use history::History;
pub use session::{Commit, CommitKind, Observer, Session};
