//! The editor wrapper
//!
//! Runs in the editor pane: connects back to the launcher, runs the
//! editor in the foreground, and reports `close` when it exits.

mod runner;

pub use runner::EditorRunner;
