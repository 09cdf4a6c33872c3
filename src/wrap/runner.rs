use std::process::Command;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::config::Settings;
use crate::control::protocol::{self, PORT_ENV};
use crate::control::{ControlClient, ControlMessage};

/// Wrapper that runs the editor and notifies the launcher on exit
pub struct EditorRunner {
    settings: Settings,
}

impl EditorRunner {
    /// Create a runner with the given settings
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Connect to the launcher, run the editor to completion, send one
    /// `close` message, and return the editor's exit code
    pub fn run(&self, editor_args: &[String]) -> Result<i32> {
        let port = protocol::port_from_env()?;
        let interval = Duration::from_millis(self.settings.retry_interval_ms);

        let mut client = ControlClient::connect_with_retry(port, interval);

        tracing::debug!(
            "Running editor {} with {} args",
            self.settings.editor,
            editor_args.len()
        );
        let status = Command::new(&self.settings.editor)
            .args(editor_args)
            .env(PORT_ENV, port.to_string())
            .status()
            .with_context(|| format!("Failed to run editor: {}", self.settings.editor))?;

        client.send(&ControlMessage::Close)?;

        // Killed-by-signal statuses carry no code
        Ok(status.code().unwrap_or(1))
    }
}
