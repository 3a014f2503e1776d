//! Small helpers shared by the CLI commands.

pub mod path;
pub mod plural;
