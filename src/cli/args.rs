//! CLI argument definitions.
//!
//! The top level deliberately has no clap subcommand enum: the first
//! positional token names the sub-command and everything after it is
//! forwarded verbatim (wrapped tool invocations carry arbitrary flags that
//! must survive untouched). Sub-commands with their own flags define a clap
//! parser and parse the forwarded tokens themselves.

use clap::Parser;
use std::path::PathBuf;

/// sdkscout - SDK location and toolchain environment capture.
#[derive(Debug, Parser)]
#[command(name = "sdkscout")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Suppress log output entirely
    #[arg(short, long)]
    pub quiet: bool,

    /// Sub-command name followed by its arguments, forwarded verbatim
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Arguments for the `resolve` sub-command.
#[derive(Debug, Clone, Parser)]
#[command(name = "resolve")]
#[command(about = "Find an SDK matching version constraints")]
#[command(
    after_help = "Two lines are written to standard output: the version of \
                  the selected SDK, and its path."
)]
pub struct ResolveArgs {
    /// An exact SDK version to find
    #[arg(long, value_name = "VERSION")]
    pub exact: Option<String>,

    /// The minimum SDK version to find
    #[arg(long, value_name = "VERSION")]
    pub minimum: Option<String>,

    /// A known SDK path to validate
    #[arg(long, value_name = "PATH")]
    pub path: Option<PathBuf>,
}

/// Arguments for the `capture` sub-command.
#[derive(Debug, Clone, Parser)]
#[command(name = "capture")]
#[command(about = "Capture per-architecture toolchain environments")]
pub struct CaptureArgs {
    /// Toolchain installation root (the directory containing VC\vcvarsall.bat)
    pub install_dir: PathBuf,

    /// Directory receiving the environment block files
    pub out_dir: PathBuf,
}
