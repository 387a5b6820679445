//! Integration tests for the sdkscout binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn sdkscout() -> Command {
    Command::new(cargo_bin("sdkscout"))
}

#[test]
fn cli_shows_help() {
    sdkscout()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("SDK"));
}

#[test]
fn cli_shows_version() {
    sdkscout()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn cli_no_command_fails_with_message() {
    sdkscout()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not enough arguments"));
}

#[test]
fn cli_unknown_command_fails_with_its_name() {
    sdkscout()
        .args(["recursive-mirror", "src", "dst"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown command: recursive-mirror"));
}

#[test]
fn cli_resolve_rejects_unknown_flags() {
    sdkscout()
        .args(["resolve", "--newest"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--newest"));
}

#[cfg(not(target_os = "macos"))]
#[test]
fn cli_resolve_without_developer_tools_exits_one() {
    sdkscout()
        .arg("resolve")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No developer tools found"));
}

#[test]
fn cli_capture_requires_both_positionals() {
    sdkscout()
        .args(["capture", "/only/install/dir"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out_dir").or(predicate::str::contains("OUT_DIR")));
}

#[cfg(unix)]
#[test]
fn cli_capture_without_a_toolchain_fails() {
    let out = TempDir::new().unwrap();
    let install = TempDir::new().unwrap();
    sdkscout()
        .args([
            "capture",
            &install.path().to_string_lossy(),
            &out.path().to_string_lossy(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn cli_link_wrapper_requires_a_tool_command() {
    sdkscout()
        .args(["link-wrapper", "environment.x86"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not enough arguments"));
}

fn write_block(dir: &TempDir, pairs: &[(&str, &str)]) -> std::path::PathBuf {
    let mut bytes = Vec::new();
    for (key, value) in pairs {
        bytes.extend_from_slice(key.as_bytes());
        bytes.push(b'=');
        bytes.extend_from_slice(value.as_bytes());
        bytes.push(0);
    }
    bytes.push(0);
    let path = dir.path().join("environment.x86");
    fs::write(&path, bytes).unwrap();
    path
}

#[cfg(unix)]
#[test]
fn cli_link_wrapper_runs_the_tool_under_the_block_environment() {
    let temp = TempDir::new().unwrap();
    let block = write_block(&temp, &[("PATH", "/usr/bin:/bin"), ("TOOLMARK", "wrapped")]);

    sdkscout()
        .args([
            "link-wrapper",
            &block.to_string_lossy(),
            "/bin/sh",
            "-c",
            "echo $TOOLMARK",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("wrapped"));
}

#[cfg(unix)]
#[test]
fn cli_link_wrapper_filters_benign_diagnostics() {
    let temp = TempDir::new().unwrap();
    let block = write_block(&temp, &[("PATH", "/usr/bin:/bin")]);

    sdkscout()
        .args([
            "link-wrapper",
            &block.to_string_lossy(),
            "/bin/sh",
            "-c",
            "echo '   Creating library x.lib and object x.exp'; \
             echo 'real output'; \
             echo 'Generating code'; \
             echo 'Finished generating code'; \
             echo 'more output'",
        ])
        .assert()
        .success()
        .stdout("real output\nmore output\n");
}

#[cfg(unix)]
#[test]
fn cli_link_wrapper_passes_the_exit_code_through() {
    let temp = TempDir::new().unwrap();
    let block = write_block(&temp, &[("PATH", "/usr/bin:/bin")]);

    sdkscout()
        .args([
            "link-wrapper",
            &block.to_string_lossy(),
            "/bin/sh",
            "-c",
            "exit 3",
        ])
        .assert()
        .failure()
        .code(3);
}

#[test]
fn cli_link_wrapper_rejects_a_malformed_block() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("environment.bad");
    fs::write(&path, b"NOEQUALS\0\0").unwrap();

    sdkscout()
        .args(["link-wrapper", &path.to_string_lossy(), "/bin/true"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed environment block"));
}

#[test]
fn cli_link_wrapper_rejects_a_missing_block_file() {
    sdkscout()
        .args(["link-wrapper", "/no/such/environment.x86", "/bin/true"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}
