//! Command-line interface: argument parsing and command dispatch.

pub mod args;
pub mod commands;

pub use args::Cli;
pub use commands::dispatcher::{Command, CommandDispatcher, CommandResult};
