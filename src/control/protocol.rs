//! Wire protocol for the launcher ↔ wrapper control channel
//!
//! Messages are bare JSON objects over one persistent TCP connection.
//! There is no framing; the receiver uses a streaming JSON decoder so
//! that back-to-back documents and documents split across segments both
//! parse.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable carrying the launcher's listening port
pub const PORT_ENV: &str = "GLASSPANE_PORT";

/// Environment variable naming the tmux session to attach to
pub const SESSION_ENV: &str = "GLASSPANE_SESSION";

/// Control message exchanged over the channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ControlMessage {
    /// Zoom and focus the editor pane
    Open,
    /// Restore focus to the command pane
    Close,
    /// Stop the launcher loop and tear down the window
    Exit,
}

/// Encode a message as a single JSON document
pub fn encode(msg: &ControlMessage) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(msg)?)
}

/// Read the launcher's port from the environment
pub fn port_from_env() -> Result<u16> {
    let raw = std::env::var(PORT_ENV).with_context(|| format!("{} is not set", PORT_ENV))?;
    raw.parse()
        .with_context(|| format!("{} is not a valid port: {:?}", PORT_ENV, raw))
}
