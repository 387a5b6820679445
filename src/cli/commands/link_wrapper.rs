//! The `link-wrapper` sub-command: run a tool under a captured environment.
//!
//! Arguments are positional and forwarded verbatim: the first names the
//! environment block file, the rest are the tool command line (which may
//! itself contain flags in any convention).

use std::path::PathBuf;

use crate::cli::commands::dispatcher::{Command, CommandResult};
use crate::error::{Result, ScoutError};
use crate::invoke;

pub struct LinkWrapperCommand {
    block_path: PathBuf,
    tool_args: Vec<String>,
}

impl LinkWrapperCommand {
    pub fn from_args(rest: &[String]) -> Result<Self> {
        let Some((block, tool_args)) = rest.split_first() else {
            return Err(ScoutError::InsufficientArguments);
        };
        if tool_args.is_empty() {
            return Err(ScoutError::InsufficientArguments);
        }
        Ok(Self {
            block_path: PathBuf::from(block),
            tool_args: tool_args.to_vec(),
        })
    }
}

impl Command for LinkWrapperCommand {
    fn execute(&self) -> Result<CommandResult> {
        let run = invoke::run(&self.block_path, &self.tool_args)?;
        for line in &run.lines {
            println!("{line}");
        }
        Ok(CommandResult::exit_with(run.exit_code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn splits_block_path_from_tool_command() {
        let command =
            LinkWrapperCommand::from_args(&strings(&["environment.x86", "link.exe", "/nologo"]))
                .unwrap();
        assert_eq!(command.block_path, PathBuf::from("environment.x86"));
        assert_eq!(command.tool_args, strings(&["link.exe", "/nologo"]));
    }

    #[test]
    fn requires_a_block_path_and_a_tool() {
        assert!(matches!(
            LinkWrapperCommand::from_args(&[]),
            Err(ScoutError::InsufficientArguments)
        ));
        assert!(matches!(
            LinkWrapperCommand::from_args(&strings(&["environment.x86"])),
            Err(ScoutError::InsufficientArguments)
        ));
    }
}
