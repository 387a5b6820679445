//! sdkscout - SDK location and toolchain environment capture.
//!
//! sdkscout finds a platform SDK or compiler toolchain satisfying version
//! constraints, and captures the environment variables its tools need so a
//! build system can invoke them reproducibly outside an interactive
//! developer shell.
//!
//! # Modules
//!
//! - [`block`] - Environment block mapping and byte codec
//! - [`capture`] - Toolchain setup invocation and environment extraction
//! - [`cli`] - Command-line interface and command dispatch
//! - [`error`] - Error types and result aliases
//! - [`invoke`] - Wrapped tool invocation under a captured environment
//! - [`sdk`] - SDK version constraints, probing, and path validation
//!
//! # Example
//!
//! ```
//! use sdkscout::block::{codec, mapping::EnvMap};
//!
//! // Encode an environment and get it back byte-for-byte.
//! let mut env = EnvMap::new();
//! env.insert("systemroot", "C:\\Windows");
//! let block = codec::serialize(&env);
//! assert!(block.ends_with(&[0, 0]));
//! assert_eq!(codec::parse(&block).unwrap(), env);
//! ```

pub mod block;
pub mod capture;
pub mod cli;
pub mod error;
pub mod invoke;
pub mod sdk;

pub use error::{Result, ScoutError};
