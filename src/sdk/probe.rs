//! SDK discovery probe.
//!
//! All queries about installed SDKs go through the [`SdkProbe`] trait so the
//! resolver never touches ambient OS state directly; tests substitute a fake
//! and the CLI wires in [`XcrunProbe`], which shells out to the platform's
//! developer tools.

use std::process::Command;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, ScoutError};
use crate::sdk::version::SdkVersion;

/// Platform name used to form SDK identifiers (e.g. `macosx10.12`).
pub const PLATFORM: &str = "macosx";

/// Matches one SDK line of a `-showsdks` listing; the capture group is the
/// version suffix of the SDK identifier.
static SDK_LISTING_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^\t((Mac )?OS X|macOS) .+-sdk {}(.+)$",
        regex::escape(PLATFORM)
    ))
    .unwrap()
});

/// Queries about the SDKs installed on this machine.
pub trait SdkProbe {
    /// Whether any developer toolchain is registered at all.
    fn developer_tools_present(&self) -> bool;

    /// Path of the named SDK, or of the default SDK when `sdk` is `None`.
    fn sdk_path(&self, sdk: Option<&str>) -> Result<String>;

    /// Version of the named SDK, or of the default SDK when `sdk` is `None`.
    fn sdk_version(&self, sdk: Option<&str>) -> Result<SdkVersion>;

    /// Version strings of every installed SDK, in listing order.
    ///
    /// Errors when the listing tool itself is unavailable (for example when
    /// only command-line tools are installed); the resolver then falls back
    /// to checking the single default SDK.
    fn installed_sdk_versions(&self) -> Result<Vec<String>>;
}

/// Probe backed by `xcrun`, `xcodebuild`, and `xcode-select`.
pub struct XcrunProbe;

impl XcrunProbe {
    fn xcrun(&self, args: &[&str], sdk: Option<&str>) -> Result<String> {
        let mut cmd = Command::new("xcrun");
        if let Some(sdk) = sdk {
            cmd.args(["--sdk", sdk]);
        }
        cmd.args(args);
        let output = cmd
            .output()
            .map_err(|source| ScoutError::ProcessSpawnError {
                command: "xcrun".to_string(),
                source,
            })?;
        if !output.status.success() {
            return Err(anyhow::anyhow!(
                "xcrun {} exited with status {:?}",
                args.join(" "),
                output.status.code()
            )
            .into());
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim_end().to_string())
    }
}

impl SdkProbe for XcrunProbe {
    fn developer_tools_present(&self) -> bool {
        Command::new("xcode-select")
            .arg("--print-path")
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    fn sdk_path(&self, sdk: Option<&str>) -> Result<String> {
        self.xcrun(&["--show-sdk-path"], sdk)
    }

    fn sdk_version(&self, sdk: Option<&str>) -> Result<SdkVersion> {
        self.xcrun(&["--show-sdk-version"], sdk)?.parse()
    }

    fn installed_sdk_versions(&self) -> Result<Vec<String>> {
        let output = Command::new("xcodebuild")
            .arg("-showsdks")
            .output()
            .map_err(|source| ScoutError::ProcessSpawnError {
                command: "xcodebuild".to_string(),
                source,
            })?;
        if !output.status.success() {
            return Err(anyhow::anyhow!(
                "xcodebuild -showsdks exited with status {:?}",
                output.status.code()
            )
            .into());
        }
        let listing = String::from_utf8_lossy(&output.stdout);
        let versions = parse_sdk_listing(&listing);
        tracing::debug!(count = versions.len(), "parsed SDK listing");
        Ok(versions)
    }
}

/// Pull version strings out of a `-showsdks` listing.
///
/// Strings are collected instead of parsed versions to preserve the precise
/// format used to identify each SDK.
pub fn parse_sdk_listing(listing: &str) -> Vec<String> {
    listing
        .lines()
        .filter_map(|line| {
            SDK_LISTING_LINE
                .captures(line)
                .map(|caps| caps[3].to_string())
        })
        .collect()
}
