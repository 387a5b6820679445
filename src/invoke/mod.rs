//! Wrapped tool invocation under a captured environment.
//!
//! Build rules refer to toolchain binaries by bare name (`cl.exe`,
//! `link.exe`); the captured environment block supplies the `PATH` and
//! supporting variables that make those names resolve. The invoker loads a
//! block, runs the tool under exactly that environment, and drops the
//! linker's known-benign chatter so real warnings stay visible in build
//! logs.

use std::path::Path;
use std::process::Command;

use crate::block::codec;
use crate::error::{Result, ScoutError};

/// Diagnostic lines a linker prints on perfectly healthy runs.
const BENIGN_PREFIXES: [&str; 3] = [
    "   Creating library ",
    "Generating code",
    "Finished generating code",
];

/// Outcome of a wrapped tool run.
#[derive(Debug)]
pub struct ToolRun {
    /// The child's exit code, passed through unchanged.
    pub exit_code: i32,
    /// Combined output with benign diagnostics removed, in original order.
    pub lines: Vec<String>,
}

/// Run `args` under the environment stored in the block at `block_path`.
///
/// The tool path (first element) has its separator convention translated to
/// the host's before spawning. The child inherits nothing: its environment
/// is exactly the decoded block.
pub fn run(block_path: &Path, args: &[String]) -> Result<ToolRun> {
    let Some((program, rest)) = args.split_first() else {
        return Err(ScoutError::InsufficientArguments);
    };
    let block = std::fs::read(block_path)?;
    let env = codec::parse(&block)?;

    let program = to_native_separators(program);
    tracing::debug!(%program, vars = env.len(), "spawning wrapped tool");

    let mut cmd = Command::new(&program);
    cmd.args(rest);
    cmd.env_clear();
    for (key, value) in env.iter() {
        cmd.env(key, value);
    }
    let output = cmd
        .output()
        .map_err(|source| ScoutError::ProcessSpawnError {
            command: program.clone(),
            source,
        })?;

    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    let lines = filter_diagnostics(&text);

    // A signal death has no code; report generic failure.
    let exit_code = output.status.code().unwrap_or(1);
    Ok(ToolRun { exit_code, lines })
}

/// Drop known-benign diagnostic lines, preserving the order of the rest.
pub fn filter_diagnostics(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| !BENIGN_PREFIXES.iter().any(|prefix| line.starts_with(prefix)))
        .map(str::to_string)
        .collect()
}

/// Translate a tool path's separator convention to the host's.
fn to_native_separators(program: &str) -> String {
    if cfg!(windows) {
        program.replace('/', "\\")
    } else {
        program.replace('\\', "/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::mapping::EnvMap;
    use std::io::Write;

    #[test]
    fn filter_drops_benign_lines_and_keeps_order() {
        let text = "   Creating library x.lib and object x.exp\n\
                    real output\n\
                    Generating code\n\
                    Finished generating code\n\
                    more output\n";
        assert_eq!(
            filter_diagnostics(text),
            vec!["real output".to_string(), "more output".to_string()]
        );
    }

    #[test]
    fn filter_matches_prefixes_not_substrings() {
        // "Creating library" without the leading spaces is real output.
        let text = "Creating library notes\nwarning LNK4217: foo\n";
        assert_eq!(
            filter_diagnostics(text),
            vec![
                "Creating library notes".to_string(),
                "warning LNK4217: foo".to_string()
            ]
        );
    }

    #[test]
    fn filter_keeps_everything_when_nothing_is_benign() {
        let text = "a\nb\n";
        assert_eq!(filter_diagnostics(text), vec!["a", "b"]);
    }

    #[test]
    fn separator_translation_targets_the_host() {
        if cfg!(windows) {
            assert_eq!(to_native_separators("obj/tool.exe"), "obj\\tool.exe");
        } else {
            assert_eq!(to_native_separators("obj\\tool.exe"), "obj/tool.exe");
        }
    }

    fn write_block(dir: &Path, env: &EnvMap) -> std::path::PathBuf {
        let path = dir.join("environment.test");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(&codec::serialize(env)).unwrap();
        path
    }

    #[cfg(unix)]
    #[test]
    fn runs_the_tool_under_the_decoded_environment() {
        let temp = tempfile::TempDir::new().unwrap();
        let mut env = EnvMap::new();
        env.insert("PATH", "/usr/bin:/bin");
        env.insert("WRAPPED_MARKER", "captured");
        let block = write_block(temp.path(), &env);

        let run = run(
            &block,
            &[
                "/bin/sh".to_string(),
                "-c".to_string(),
                "echo $WRAPPED_MARKER".to_string(),
            ],
        )
        .unwrap();
        assert_eq!(run.exit_code, 0);
        assert_eq!(run.lines, vec!["captured".to_string()]);
    }

    #[cfg(unix)]
    #[test]
    fn child_exit_code_passes_through() {
        let temp = tempfile::TempDir::new().unwrap();
        let mut env = EnvMap::new();
        env.insert("PATH", "/usr/bin:/bin");
        let block = write_block(temp.path(), &env);

        let run = run(
            &block,
            &[
                "/bin/sh".to_string(),
                "-c".to_string(),
                "exit 3".to_string(),
            ],
        )
        .unwrap();
        assert_eq!(run.exit_code, 3);
    }

    #[test]
    fn missing_executable_is_a_spawn_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let mut env = EnvMap::new();
        env.insert("PATH", "/usr/bin:/bin");
        let block = write_block(temp.path(), &env);

        let err = run(
            &block,
            &[temp.path().join("no-such-tool").to_string_lossy().into_owned()],
        )
        .unwrap_err();
        assert!(matches!(err, ScoutError::ProcessSpawnError { .. }));
    }

    #[test]
    fn empty_command_is_insufficient_arguments() {
        let err = run(Path::new("unused"), &[]).unwrap_err();
        assert!(matches!(err, ScoutError::InsufficientArguments));
    }

    #[test]
    fn malformed_block_fails_before_spawning() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("environment.bad");
        std::fs::write(&path, b"NOEQUALS\0\0").unwrap();

        let err = run(&path, &["/bin/true".to_string()]).unwrap_err();
        assert!(matches!(err, ScoutError::MalformedBlock { .. }));
    }
}
