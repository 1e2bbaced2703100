//! Library side of the `mapgrid` binary: settings, event-script replay and
//! table rendering. Split out of `main.rs` so the replay path is testable.

pub mod render;
pub mod script;
pub mod settings;

pub use script::{NewStudy, NewVariable, Replay, ReplayStats, ScriptEvent};
pub use settings::Settings;
