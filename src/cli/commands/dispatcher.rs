//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing sub-command tokens
//!
//! Tool names arrive in hyphenated form (`link-wrapper`) and are transformed
//! to handler names (`LinkWrapper`) matched against a static table; there is
//! no runtime reflection.

use crate::cli::args::Cli;
use crate::error::{Result, ScoutError};

/// Trait for command implementations.
pub trait Command {
    /// Execute the command, returning a [`CommandResult`] with the exit code.
    fn execute(&self) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }

    /// Pass a child process's exit code through unchanged.
    pub fn exit_with(exit_code: i32) -> Self {
        Self {
            success: exit_code == 0,
            exit_code,
        }
    }
}

/// Transform a hyphenated tool name into its handler name:
/// `recursive-mirror` becomes `RecursiveMirror`.
pub fn commandify(name: &str) -> String {
    name.split('-')
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect()
}

/// Routes sub-command tokens to their handlers.
pub struct CommandDispatcher;

impl CommandDispatcher {
    /// Dispatch and execute the command named by the first token.
    ///
    /// The remaining tokens are handed to the handler as-is.
    pub fn dispatch(cli: &Cli) -> Result<CommandResult> {
        let Some((name, rest)) = cli.args.split_first() else {
            return Err(ScoutError::InsufficientArguments);
        };
        let command: Box<dyn Command> = match commandify(name).as_str() {
            "Resolve" => Box::new(super::resolve::ResolveCommand::from_args(rest)?),
            "Capture" => Box::new(super::capture::CaptureCommand::from_args(rest)?),
            "LinkWrapper" => Box::new(super::link_wrapper::LinkWrapperCommand::from_args(rest)?),
            _ => {
                return Err(ScoutError::UnknownCommand {
                    name: name.clone(),
                })
            }
        };
        command.execute()
    }
}
