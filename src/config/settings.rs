use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Open an editor pane next to a dev-server pane in tmux"
)]
pub struct Config {
    /// Enable debug mode
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Tmux session to attach to (overrides GLASSPANE_SESSION)
    #[arg(short, long, global = true)]
    pub session: Option<String>,

    /// Wrapper connect retry interval in milliseconds
    #[arg(short = 'i', long)]
    pub retry_interval: Option<u64>,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Split the window, start the service command, and run the control loop
    Launch {
        /// Arguments forwarded to the editor invocation
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Connect to the launcher, run the editor, and report close on exit
    Wrap {
        /// Arguments forwarded to the editor invocation
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

impl Config {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Check if running in wrap mode
    pub fn is_wrap_mode(&self) -> bool {
        matches!(self.command, Some(Command::Wrap { .. }))
    }

    /// Get the editor arguments carried by the subcommand
    pub fn editor_args(&self) -> &[String] {
        match &self.command {
            Some(Command::Launch { args }) | Some(Command::Wrap { args }) => args,
            None => &[],
        }
    }
}

/// Application settings (from config file)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Editor command run in the main pane
    #[serde(default = "default_editor")]
    pub editor: String,

    /// Long-running service command started in the command pane
    #[serde(default)]
    pub service_command: Option<String>,

    /// Working directory for the service command
    #[serde(default)]
    pub service_dir: Option<String>,

    /// Wrapper connect retry interval in milliseconds
    #[serde(default = "default_retry_interval")]
    pub retry_interval_ms: u64,

    /// Tmux session to attach to (falls back to GLASSPANE_SESSION, then the
    /// currently attached session)
    #[serde(default)]
    pub session: Option<String>,
}

fn default_editor() -> String {
    "nvim".to_string()
}

fn default_retry_interval() -> u64 {
    500
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            editor: default_editor(),
            service_command: None,
            service_dir: None,
            retry_interval_ms: default_retry_interval(),
            session: None,
        }
    }
}

impl Settings {
    /// Load settings from config file or use defaults
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        // Try custom path first
        if let Some(p) = path {
            if p.exists() {
                let content = std::fs::read_to_string(p)
                    .with_context(|| format!("Failed to read config file: {:?}", p))?;
                return toml::from_str(&content)
                    .with_context(|| format!("Failed to parse config file: {:?}", p));
            }
        }

        // Try default config locations
        let default_paths = [
            dirs::config_dir().map(|p| p.join("glasspane/config.toml")),
            dirs::home_dir().map(|p| p.join(".config/glasspane/config.toml")),
            dirs::home_dir().map(|p| p.join(".glasspane.toml")),
        ];

        for path in default_paths.iter().flatten() {
            if path.exists() {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file: {:?}", path))?;
                return toml::from_str(&content)
                    .with_context(|| format!("Failed to parse config file: {:?}", path));
            }
        }

        // Return defaults if no config file found
        Ok(Self::default())
    }

    /// Merge CLI config into settings (CLI takes precedence)
    pub fn merge_cli(&mut self, cli: &Config) {
        if let Some(session) = &cli.session {
            self.session = Some(session.clone());
        }
        if let Some(retry_interval) = cli.retry_interval {
            self.retry_interval_ms = retry_interval;
        }
    }

    /// Validate and normalize settings values
    ///
    /// Ensures the retry interval has a minimum value to prevent a hot
    /// connect loop while the launcher's port is still down.
    pub fn validate(&mut self) {
        const MIN_RETRY_INTERVAL: u64 = 10;

        if self.retry_interval_ms < MIN_RETRY_INTERVAL {
            self.retry_interval_ms = MIN_RETRY_INTERVAL;
        }
    }
}
