//! Control channel between the launcher and the editor wrapper
//!
//! Single persistent TCP connection on localhost carrying bare JSON
//! documents with schema `{"type": "open" | "close" | "exit"}`.

pub mod client;
pub mod protocol;
pub mod server;

pub use client::ControlClient;
pub use protocol::ControlMessage;
pub use server::{ControlServer, Flow};
