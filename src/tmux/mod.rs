//! Thin tmux invocation layer
//!
//! Every operation shells out to `tmux(1)` and checks the exit status.
//! Targets are validated before being passed on the command line.

pub mod client;
pub mod pane;

pub use client::TmuxClient;
pub use pane::PanePair;
