//! glasspane — tmux split-pane orchestration for an editor + dev server
//!
//! A launcher process splits the current tmux window, starts a long-running
//! service command in one pane and a wrapped editor in the other, then keeps
//! pane zoom and focus in sync via a small TCP control channel.

pub mod config;
pub mod control;
pub mod launch;
pub mod tmux;
pub mod wrap;
