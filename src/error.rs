//! Error types for sdkscout operations.
//!
//! This module defines [`ScoutError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `ScoutError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `ScoutError::Other`) for unexpected errors
//! - Every error carries the inputs that produced it, so the CLI boundary
//!   can render an actionable diagnostic
//! - All errors are terminal for the operation that raised them; nothing in
//!   this crate retries

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for sdkscout operations.
#[derive(Debug, Error)]
pub enum ScoutError {
    /// No installed SDK satisfied a minimum-version constraint.
    #[error("No SDK found with version {minimum} or newer")]
    SdkNotFound { minimum: String },

    /// A resolved SDK failed the requested version criteria.
    #[error(
        "SDK did not meet criteria (exact={exact:?}, minimum={minimum:?}, path={path:?}): \
         found version {sdk_version} at '{sdk_path}'"
    )]
    CriteriaNotMet {
        exact: Option<String>,
        minimum: Option<String>,
        path: Option<String>,
        sdk_path: String,
        sdk_version: String,
    },

    /// Symbolic link traversal exceeded the hop bound.
    #[error("Too many levels of symbolic links: {path}")]
    SymlinkLoop { path: PathBuf },

    /// No developer toolchain is registered on this machine.
    #[error("No developer tools found")]
    MissingPrerequisite,

    /// The toolchain setup command exited non-zero.
    #[error("Toolchain setup command `{command}` failed:\n{output}")]
    ToolchainSetupFailed { command: String, output: String },

    /// A captured environment lacked variables the toolchain cannot run without.
    #[error("Environment variable(s) required to be set to a valid path: {}", .names.join(", "))]
    MissingEnvironmentVariable { names: Vec<String> },

    /// An environment block file did not decode.
    #[error("Malformed environment block: {detail}")]
    MalformedBlock { detail: String },

    /// The sub-command name has no registered handler.
    #[error("Unknown command: {name}")]
    UnknownCommand { name: String },

    /// Too few arguments to dispatch or run a command.
    #[error("Not enough arguments")]
    InsufficientArguments,

    /// A child process could not be started at all.
    #[error("Failed to spawn `{command}`: {source}")]
    ProcessSpawnError {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// A version string was not dotted-numeric.
    #[error("Invalid SDK version: {input:?}")]
    InvalidVersion { input: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for sdkscout operations.
pub type Result<T> = std::result::Result<T, ScoutError>;
