//! The `capture` sub-command: generate per-architecture environment blocks.

use clap::Parser;

use crate::capture::{format_descriptor, Architecture, EnvironmentCapture, VcvarsRunner};
use crate::cli::args::CaptureArgs;
use crate::cli::commands::dispatcher::{Command, CommandResult};
use crate::error::Result;

pub struct CaptureCommand {
    args: CaptureArgs,
}

impl CaptureCommand {
    pub fn from_args(rest: &[String]) -> Result<Self> {
        let args = CaptureArgs::try_parse_from(
            std::iter::once("capture".to_string()).chain(rest.iter().cloned()),
        )
        .map_err(anyhow::Error::new)?;
        Ok(Self { args })
    }
}

impl Command for CaptureCommand {
    fn execute(&self) -> Result<CommandResult> {
        let runner = VcvarsRunner;
        let capture = EnvironmentCapture::new(&runner);
        let outcomes = capture.capture(
            &self.args.install_dir,
            &self.args.out_dir,
            &Architecture::ALL,
        )?;

        println!("{}", format_descriptor(&self.args.install_dir, &outcomes));
        Ok(CommandResult::success())
    }
}
