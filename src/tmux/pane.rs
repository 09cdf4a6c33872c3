/// The two panes of a glasspane window
///
/// Pane 0 is the editor (main) pane, pane 1 the command pane running the
/// service command. Targets are full `session:window.pane` identifiers.
#[derive(Debug, Clone)]
pub struct PanePair {
    /// The window both panes live in (`session:window`)
    pub window: String,
    /// Editor pane
    pub main: String,
    /// Command pane
    pub command: String,
}

impl PanePair {
    /// Build a pane pair from the panes of a freshly split window
    ///
    /// Expects exactly the targets of the window's panes in index order.
    pub fn from_targets(window: String, mut targets: Vec<String>) -> Option<Self> {
        if targets.len() != 2 {
            return None;
        }
        let command = targets.pop()?;
        let main = targets.pop()?;
        Some(Self {
            window,
            main,
            command,
        })
    }
}
