pub mod commands;
pub mod target;

pub use commands::Cli;
pub use target::{resolve, ResolvedAction};
