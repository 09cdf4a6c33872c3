//! Configuration handling for glasspane

mod settings;

pub use settings::{Command, Config, Settings};
