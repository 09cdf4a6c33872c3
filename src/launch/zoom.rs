//! Pane zoom/focus bookkeeping for the launcher loop
//!
//! The transition table lives here, separate from tmux invocation, so
//! the open/close behavior can be tested without a running server.

use crate::control::ControlMessage;

/// Which pane holds focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Main,
    Command,
}

/// Desired zoom and focus of the window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomState {
    /// Whether the main pane is zoomed to fill the window
    pub zoomed: bool,
    /// Which pane holds focus
    pub focus: Focus,
}

impl ZoomState {
    /// State right after launch: editor pane zoomed and focused
    pub fn initial() -> Self {
        Self {
            zoomed: true,
            focus: Focus::Main,
        }
    }

    /// Apply a control message
    ///
    /// `open` zooms and focuses the main pane, `close` unzooms and hands
    /// focus to the command pane. `exit` ends the session and leaves the
    /// state untouched. Both transitions are idempotent.
    pub fn apply(self, msg: ControlMessage) -> Self {
        match msg {
            ControlMessage::Open => Self {
                zoomed: true,
                focus: Focus::Main,
            },
            ControlMessage::Close => Self {
                zoomed: false,
                focus: Focus::Command,
            },
            ControlMessage::Exit => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_initial_state() {
        let state = ZoomState::initial();
        assert!(state.zoomed);
        assert_eq!(state.focus, Focus::Main);
    }

    #[test]
    fn test_open_then_close_lands_in_command_pane() {
        let state = ZoomState::initial()
            .apply(ControlMessage::Open)
            .apply(ControlMessage::Close);
        assert!(!state.zoomed);
        assert_eq!(state.focus, Focus::Command);
    }

    #[test]
    fn test_close_then_open_restores_main() {
        let state = ZoomState::initial()
            .apply(ControlMessage::Close)
            .apply(ControlMessage::Open);
        assert!(state.zoomed);
        assert_eq!(state.focus, Focus::Main);
    }

    #[test]
    fn test_transitions_are_idempotent() {
        let once = ZoomState::initial().apply(ControlMessage::Open);
        let twice = once.apply(ControlMessage::Open);
        assert_eq!(once, twice);

        let once = ZoomState::initial().apply(ControlMessage::Close);
        let twice = once.apply(ControlMessage::Close);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_exit_leaves_state_untouched() {
        let state = ZoomState::initial().apply(ControlMessage::Close);
        assert_eq!(state.apply(ControlMessage::Exit), state);
    }
}
