//! Toolchain environment capture.
//!
//! Having the absolute path to a compiler is not enough: the tools rely on
//! supporting variables (`INCLUDE`, `LIB`, `LIBPATH`) and on DLL directories
//! being in `PATH`, and every target architecture needs its own values. The
//! capture runs the architecture-specific setup command, extracts the
//! variables the toolchain needs from its dump, and publishes one
//! environment block file per architecture for later wrapped invocations.

use std::io::Write;
use std::path::Path;
use std::process::Command;

use tempfile::NamedTempFile;

use crate::block::codec;
use crate::block::mapping::EnvMap;
use crate::error::{Result, ScoutError};

/// Target instruction-set variants, each with an independent environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Architecture {
    X86,
    Amd64,
}

impl Architecture {
    pub const ALL: [Architecture; 2] = [Architecture::X86, Architecture::Amd64];

    /// Identifier passed to the setup command and used in file names.
    pub fn id(self) -> &'static str {
        match self {
            Architecture::X86 => "x86",
            Architecture::Amd64 => "amd64",
        }
    }

    /// Label used in the capture descriptor.
    pub fn descriptor_label(self) -> &'static str {
        match self {
            Architecture::X86 => "x86",
            Architecture::Amd64 => "x64",
        }
    }

    /// Name of this architecture's environment block file.
    pub fn block_file_name(self) -> String {
        format!("environment.{}", self.id())
    }
}

impl std::fmt::Display for Architecture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Variables retained from a setup dump. Anything else is dropped.
const RETAINED_VARIABLES: [&str; 8] = [
    "include",
    "lib",
    "libpath",
    "path",
    "pathext",
    "systemroot",
    "temp",
    "tmp",
];

/// Variables that must be present for a capture to be usable at all.
const MANDATORY_VARIABLES: [&str; 3] = ["SYSTEMROOT", "TEMP", "TMP"];

/// Output of one toolchain setup invocation.
#[derive(Debug)]
pub struct SetupOutput {
    pub success: bool,
    /// Combined stdout and stderr text.
    pub text: String,
    /// The command line that ran, kept for diagnostics.
    pub command: String,
}

/// Runs the architecture-specific toolchain setup command.
pub trait SetupRunner {
    fn run(&self, install_dir: &Path, arch: Architecture) -> Result<SetupOutput>;
}

/// Runner invoking `vcvarsall.bat` through the command interpreter and
/// dumping the resulting environment with `set`.
pub struct VcvarsRunner;

impl SetupRunner for VcvarsRunner {
    fn run(&self, install_dir: &Path, arch: Architecture) -> Result<SetupOutput> {
        let script = install_dir.join("VC").join("vcvarsall.bat");
        let command = format!("\"{}\" {} && set", script.display(), arch.id());
        let shell = std::env::var("COMSPEC").unwrap_or_else(|_| "cmd.exe".to_string());
        tracing::debug!(%command, "running toolchain setup");
        let output = Command::new(&shell)
            .args(["/C", &command])
            .output()
            .map_err(|source| ScoutError::ProcessSpawnError {
                command: command.clone(),
                source,
            })?;
        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(SetupOutput {
            success: output.status.success(),
            text,
            command,
        })
    }
}

/// Extract the retained variables from a setup dump.
///
/// Each line is tested against the retained names as a case-insensitive
/// `name=` prefix; the first matching name claims the line. Fails with
/// [`ScoutError::MissingEnvironmentVariable`] naming every absent mandatory
/// variable.
pub fn extract_environment(dump: &str) -> Result<EnvMap> {
    let mut env = EnvMap::new();
    for line in dump.lines() {
        for name in RETAINED_VARIABLES {
            if is_assignment_of(line, name) {
                if let Some((var, value)) = line.split_once('=') {
                    env.insert(var, value);
                }
                break;
            }
        }
    }
    let missing: Vec<String> = MANDATORY_VARIABLES
        .iter()
        .filter(|name| !env.contains(name))
        .map(|name| name.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ScoutError::MissingEnvironmentVariable { names: missing });
    }
    Ok(env)
}

fn is_assignment_of(line: &str, name: &str) -> bool {
    match line.get(..name.len()) {
        Some(prefix) => {
            prefix.eq_ignore_ascii_case(name) && line.as_bytes().get(name.len()) == Some(&b'=')
        }
        None => false,
    }
}

/// A block file produced for one architecture.
#[derive(Debug)]
pub struct CaptureOutcome {
    pub arch: Architecture,
    pub file_name: String,
}

/// Captures per-architecture toolchain environments and publishes them as
/// block files.
pub struct EnvironmentCapture<'a> {
    runner: &'a dyn SetupRunner,
}

impl<'a> EnvironmentCapture<'a> {
    pub fn new(runner: &'a dyn SetupRunner) -> Self {
        Self { runner }
    }

    /// Capture every architecture in `archs`, writing one block file each
    /// into `out_dir`.
    ///
    /// Architectures are captured sequentially and independently: a failure
    /// aborts before its block file appears, but files already published for
    /// earlier architectures stay in place.
    pub fn capture(
        &self,
        install_dir: &Path,
        out_dir: &Path,
        archs: &[Architecture],
    ) -> Result<Vec<CaptureOutcome>> {
        let mut outcomes = Vec::with_capacity(archs.len());
        for &arch in archs {
            let setup = self.runner.run(install_dir, arch)?;
            if !setup.success {
                return Err(ScoutError::ToolchainSetupFailed {
                    command: setup.command,
                    output: setup.text,
                });
            }
            let env = extract_environment(&setup.text)?;
            let block = codec::serialize(&env);
            let file_name = arch.block_file_name();
            publish_block(out_dir, &file_name, &block)?;
            tracing::debug!(arch = arch.id(), file = %file_name, vars = env.len(), "captured environment");
            outcomes.push(CaptureOutcome { arch, file_name });
        }
        Ok(outcomes)
    }
}

/// Write a block beside its final name, then rename into place, so a
/// concurrent reader never observes a partially written file.
fn publish_block(out_dir: &Path, file_name: &str, block: &[u8]) -> Result<()> {
    let mut tmp = NamedTempFile::new_in(out_dir)?;
    tmp.write_all(block)?;
    tmp.persist(out_dir.join(file_name))
        .map_err(|persist_err| ScoutError::Io(persist_err.error))?;
    Ok(())
}

/// Descriptor emitted on stdout for downstream build-file generation.
pub fn format_descriptor(install_dir: &Path, outcomes: &[CaptureOutcome]) -> String {
    let mut descriptor = format!("install_dir = \"{}\"", install_dir.display());
    for outcome in outcomes {
        descriptor.push_str(&format!(
            "\n{}_environment_file = \"{}\"",
            outcome.arch.descriptor_label(),
            outcome.file_name
        ));
    }
    descriptor
}
