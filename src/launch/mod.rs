//! The launcher: window setup and the control loop
//!
//! Binds the control port, splits the current tmux window into an
//! editor pane and a command pane, starts the service command and the
//! editor wrapper, then services control messages until told to exit.

mod zoom;

pub use zoom::{Focus, ZoomState};

use anyhow::{Context, Result};
use std::process::Child;

use crate::config::Settings;
use crate::control::protocol::{PORT_ENV, SESSION_ENV};
use crate::control::{ControlMessage, ControlServer, Flow};
use crate::tmux::{PanePair, TmuxClient};

/// The launcher process
pub struct Launcher {
    settings: Settings,
    tmux: TmuxClient,
}

impl Launcher {
    /// Create a launcher with the given settings
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            tmux: TmuxClient::new(),
        }
    }

    /// Run the full launch sequence and block on the control loop
    pub fn run(&self, editor_args: &[String]) -> Result<()> {
        let server = ControlServer::bind()?;
        let port = server.port()?;

        let session = self.resolve_session()?;
        let panes = self.split_first_window(&session)?;
        self.prepare_command_pane(&panes, port, &session)?;
        self.tmux.zoom_pane(&panes.main)?;

        let _wrapper = self.spawn_wrapper(port, editor_args)?;
        tracing::info!("Listening on port {} for session {}", port, session);

        let mut state = ZoomState::initial();
        server.serve(|msg| {
            if msg == ControlMessage::Exit {
                return Flow::Stop;
            }
            let next = state.apply(msg);
            if next != state {
                if let Err(e) = self.apply_zoom_state(next, &panes) {
                    tracing::warn!("Failed to apply pane state: {}", e);
                }
                state = next;
            }
            Flow::Continue
        })?;

        tracing::debug!("Control loop finished, tearing down {}", panes.window);
        self.tmux.kill_window(&panes.window)?;
        Ok(())
    }

    /// Resolve the tmux session to attach to
    ///
    /// Precedence: settings (config file or --session), then the
    /// GLASSPANE_SESSION environment variable, then the currently
    /// attached session.
    fn resolve_session(&self) -> Result<String> {
        let named = self
            .settings
            .session
            .clone()
            .or_else(|| std::env::var(SESSION_ENV).ok());

        if let Some(name) = named {
            if !self.tmux.session_exists(&name)? {
                anyhow::bail!("tmux session not found: {}", name);
            }
            return Ok(name);
        }

        self.tmux
            .current_session()
            .context("No session configured and not inside tmux")
    }

    /// Split the session's first window into the editor/command pane pair
    fn split_first_window(&self, session: &str) -> Result<PanePair> {
        let window = self.tmux.first_window(session)?;
        self.tmux.split_window(&window)?;
        let targets = self.tmux.window_panes(&window)?;
        PanePair::from_targets(window.clone(), targets)
            .with_context(|| format!("Expected exactly two panes in window {}", window))
    }

    /// Export the control environment into the command pane and start
    /// the service command
    fn prepare_command_pane(&self, panes: &PanePair, port: u16, session: &str) -> Result<()> {
        self.tmux
            .run_command(&panes.command, &format!("export {}={}", PORT_ENV, port))?;
        self.tmux
            .run_command(&panes.command, &format!("export {}={}", SESSION_ENV, session))?;

        if let Some(dir) = &self.settings.service_dir {
            self.tmux
                .run_command(&panes.command, &format!("cd {}", dir))?;
        }
        if let Some(cmd) = &self.settings.service_command {
            self.tmux.run_command(&panes.command, cmd)?;
        }
        Ok(())
    }

    /// Spawn the editor wrapper as a detached child of the launcher
    fn spawn_wrapper(&self, port: u16, editor_args: &[String]) -> Result<Child> {
        let exe = std::env::current_exe().context("Failed to locate glasspane executable")?;
        std::process::Command::new(exe)
            .arg("wrap")
            .args(editor_args)
            .env(PORT_ENV, port.to_string())
            .spawn()
            .context("Failed to spawn editor wrapper")
    }

    /// Drive tmux to the desired zoom/focus state
    fn apply_zoom_state(&self, state: ZoomState, panes: &PanePair) -> Result<()> {
        match state.focus {
            Focus::Main => {
                self.tmux.zoom_pane(&panes.main)?;
                self.tmux.select_pane(&panes.main)?;
            }
            Focus::Command => {
                self.tmux.unzoom_pane(&panes.main)?;
                self.tmux.select_pane(&panes.command)?;
            }
        }
        Ok(())
    }
}
