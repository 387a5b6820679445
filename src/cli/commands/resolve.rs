//! The `resolve` sub-command: find an SDK matching version constraints.

use clap::Parser;

use crate::cli::args::ResolveArgs;
use crate::cli::commands::dispatcher::{Command, CommandResult};
use crate::error::Result;
use crate::sdk::probe::{SdkProbe, XcrunProbe};
use crate::sdk::resolver::{Constraint, ResolveRequest, SdkResolver};
use crate::sdk::version::SdkVersion;

/// Guidance printed when no developer toolchain is registered.
const NO_DEVELOPER_TOOLS: &str = "No developer tools found.
Install Xcode and run \"sudo xcodebuild -license\", or install Command Line Tools
with \"xcode-select --install\". If necessary, run \"xcode-select --switch\" to
select an active developer tools installation.";

pub struct ResolveCommand {
    args: ResolveArgs,
    probe: Box<dyn SdkProbe>,
}

impl ResolveCommand {
    pub fn from_args(rest: &[String]) -> Result<Self> {
        let args = ResolveArgs::try_parse_from(
            std::iter::once("resolve".to_string()).chain(rest.iter().cloned()),
        )
        .map_err(anyhow::Error::new)?;
        Ok(Self {
            args,
            probe: Box::new(XcrunProbe),
        })
    }

    /// Build the request: path > exact > minimum > default. A given minimum
    /// is always kept for re-validation of the final result.
    fn request(&self) -> Result<ResolveRequest> {
        let exact = self
            .args
            .exact
            .as_deref()
            .map(str::parse::<SdkVersion>)
            .transpose()?;
        let minimum = self
            .args
            .minimum
            .as_deref()
            .map(str::parse::<SdkVersion>)
            .transpose()?;

        let constraint = if let Some(path) = &self.args.path {
            Constraint::ExplicitPath(path.clone())
        } else if let Some(exact) = exact {
            Constraint::Exact(exact)
        } else if let Some(minimum) = minimum.clone() {
            Constraint::Minimum(minimum)
        } else {
            Constraint::Default
        };
        Ok(ResolveRequest {
            constraint,
            minimum,
        })
    }
}

impl Command for ResolveCommand {
    fn execute(&self) -> Result<CommandResult> {
        if !self.probe.developer_tools_present() {
            eprintln!("{NO_DEVELOPER_TOOLS}");
            return Ok(CommandResult::failure(1));
        }

        let request = self.request()?;
        let resolver = SdkResolver::new(self.probe.as_ref());
        let resolution = resolver.resolve(&request)?;

        println!("{}", resolution.version);
        println!("{}", resolution.path);
        Ok(CommandResult::success())
    }
}
