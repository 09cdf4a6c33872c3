use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::process::Command;

/// Regex pattern for validating tmux pane target format (session:window.pane)
static PANE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.-]+:\d+\.\d+$").expect("Invalid PANE_PATTERN regex"));

/// Regex pattern for validating tmux window target format (session:window)
static WINDOW_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.-]+:\d+$").expect("Invalid WINDOW_PATTERN regex"));

/// Regex pattern for validating tmux session names
static SESSION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").expect("Invalid SESSION_PATTERN regex"));

/// Validate tmux pane target format to prevent command injection
/// Only allows `session:window.pane` format (e.g., "main:0.1")
fn validate_pane(target: &str) -> Result<()> {
    if !PANE_PATTERN.is_match(target) {
        anyhow::bail!("Invalid tmux pane target format: {}", target);
    }
    Ok(())
}

/// Validate tmux window target format (`session:window`)
fn validate_window(target: &str) -> Result<()> {
    if !WINDOW_PATTERN.is_match(target) {
        anyhow::bail!("Invalid tmux window target format: {}", target);
    }
    Ok(())
}

/// Validate a tmux session name
fn validate_session(name: &str) -> Result<()> {
    if !SESSION_PATTERN.is_match(name) {
        anyhow::bail!("Invalid tmux session name: {}", name);
    }
    Ok(())
}

/// Run a tmux command and return its trimmed stdout
fn tmux(args: &[&str]) -> Result<String> {
    let output = Command::new("tmux")
        .args(args)
        .output()
        .with_context(|| format!("Failed to execute tmux {}", args.first().unwrap_or(&"")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!(
            "tmux {} failed: {}",
            args.first().unwrap_or(&""),
            stderr.trim()
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Client for interacting with tmux
pub struct TmuxClient;

impl TmuxClient {
    /// Creates a new TmuxClient
    pub fn new() -> Self {
        Self
    }

    /// Check whether a session with the given name exists
    pub fn session_exists(&self, name: &str) -> Result<bool> {
        validate_session(name)?;
        let status = Command::new("tmux")
            .args(["has-session", "-t", name])
            .output()
            .context("Failed to execute tmux has-session")?
            .status;
        Ok(status.success())
    }

    /// Get the name of the currently attached session
    pub fn current_session(&self) -> Result<String> {
        let name = tmux(&["display-message", "-p", "#{session_name}"])?;
        if name.is_empty() {
            anyhow::bail!("Not inside a tmux session");
        }
        Ok(name)
    }

    /// Get the target of a session's first window (`session:window`)
    pub fn first_window(&self, session: &str) -> Result<String> {
        validate_session(session)?;
        let stdout = tmux(&[
            "list-windows",
            "-t",
            session,
            "-F",
            "#{session_name}:#{window_index}",
        ])?;
        stdout
            .lines()
            .next()
            .map(str::to_string)
            .with_context(|| format!("Session {} has no windows", session))
    }

    /// Split a window to create a new pane, keeping focus where it is
    /// Returns the new pane's target identifier (session:window.pane)
    pub fn split_window(&self, window: &str) -> Result<String> {
        validate_window(window)?;
        tmux(&[
            "split-window",
            "-d",
            "-t",
            window,
            "-P",
            "-F",
            "#{session_name}:#{window_index}.#{pane_index}",
        ])
    }

    /// List the pane targets of a window, in pane index order
    pub fn window_panes(&self, window: &str) -> Result<Vec<String>> {
        validate_window(window)?;
        let stdout = tmux(&[
            "list-panes",
            "-t",
            window,
            "-F",
            "#{session_name}:#{window_index}.#{pane_index}",
        ])?;
        Ok(stdout.lines().map(str::to_string).collect())
    }

    /// Sends keys to a specific pane
    pub fn send_keys(&self, target: &str, keys: &str) -> Result<()> {
        validate_pane(target)?;
        tmux(&["send-keys", "-t", target, keys])?;
        Ok(())
    }

    /// Sends literal keys (with -l flag) to a specific pane
    pub fn send_keys_literal(&self, target: &str, keys: &str) -> Result<()> {
        validate_pane(target)?;
        tmux(&["send-keys", "-t", target, "-l", keys])?;
        Ok(())
    }

    /// Run a shell line in a specific pane
    pub fn run_command(&self, target: &str, command: &str) -> Result<()> {
        // Send the command as literal text
        self.send_keys_literal(target, command)?;
        // Press Enter to execute
        self.send_keys(target, "Enter")?;
        Ok(())
    }

    /// Selects (focuses) a specific pane
    pub fn select_pane(&self, target: &str) -> Result<()> {
        validate_pane(target)?;
        tmux(&["select-pane", "-t", target])?;
        Ok(())
    }

    /// Whether the pane's window is currently zoomed
    pub fn is_zoomed(&self, target: &str) -> Result<bool> {
        validate_pane(target)?;
        let flag = tmux(&["display-message", "-p", "-t", target, "#{window_zoomed_flag}"])?;
        Ok(flag == "1")
    }

    /// Zoom a pane to fill its window
    ///
    /// `resize-pane -Z` is a toggle in tmux, so the zoomed flag is
    /// checked first to make the operation idempotent.
    pub fn zoom_pane(&self, target: &str) -> Result<()> {
        if !self.is_zoomed(target)? {
            tmux(&["resize-pane", "-Z", "-t", target])?;
        }
        Ok(())
    }

    /// Restore a zoomed pane to its normal size
    pub fn unzoom_pane(&self, target: &str) -> Result<()> {
        if self.is_zoomed(target)? {
            tmux(&["resize-pane", "-Z", "-t", target])?;
        }
        Ok(())
    }

    /// Kill a window
    pub fn kill_window(&self, window: &str) -> Result<()> {
        validate_window(window)?;
        tmux(&["kill-window", "-t", window])?;
        Ok(())
    }
}

impl Default for TmuxClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_pane_valid() {
        assert!(validate_pane("main:0.0").is_ok());
        assert!(validate_pane("my-session:1.2").is_ok());
        assert!(validate_pane("my.session:1.2").is_ok());
        assert!(validate_pane("test_session:10.5").is_ok());
    }

    #[test]
    fn test_validate_pane_invalid() {
        assert!(validate_pane("").is_err());
        assert!(validate_pane("main").is_err());
        assert!(validate_pane("main:0").is_err());
        assert!(validate_pane("; rm -rf /").is_err());
        assert!(validate_pane("main:0.0; echo pwned").is_err());
        assert!(validate_pane("$(whoami):0.0").is_err());
        assert!(validate_pane("main:0.0\necho evil").is_err());
    }

    #[test]
    fn test_validate_window() {
        assert!(validate_window("main:0").is_ok());
        assert!(validate_window("dev-box:12").is_ok());
        assert!(validate_window("main:0.0").is_err());
        assert!(validate_window("main").is_err());
        assert!(validate_window("`whoami`:0").is_err());
    }

    #[test]
    fn test_validate_session() {
        assert!(validate_session("main").is_ok());
        assert!(validate_session("dev_box.2").is_ok());
        assert!(validate_session("").is_err());
        assert!(validate_session("a b").is_err());
        assert!(validate_session("x;y").is_err());
    }
}
