//! External tool execution.
//!
//! The plist canonicalizer and the project generator are opaque commands:
//! they are run synchronously, their exit status is logged and returned,
//! and a failure never aborts a conversion.

use std::{
    ffi::OsStr,
    fmt::Display,
    path::Path,
    process::{Command, Stdio},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// A program plus its fixed leading arguments.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ToolCommand {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl ToolCommand {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// `plutil -convert xml1`, rewriting a plist in place as XML.
    pub fn plutil_xml1() -> Self {
        Self::new("plutil", ["-convert", "xml1"])
    }

    /// Split a whitespace separated command line. Returns `None` if empty.
    ///
    /// No quoting is supported.
    pub fn parse(command_line: &str) -> Option<Self> {
        let mut parts = command_line.split_whitespace();
        let program = parts.next()?;
        Some(Self::new(program, parts))
    }
}

impl Display for ToolCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// What happened when a tool was (or was not) run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ToolOutcome {
    /// Not configured or disabled.
    Skipped,
    Succeeded,
    /// Ran and exited unsuccessfully.
    Failed {
        exit_code: Option<i32>,
        stderr: String,
    },
    /// Could not be started at all (e.g. not installed).
    SpawnFailed { message: String },
}

/// Run `command` with `extra_args` appended, optionally inside `dir`.
pub fn run_tool(command: &ToolCommand, extra_args: &[&OsStr], dir: Option<&Path>) -> ToolOutcome {
    let mut cmd = Command::new(&command.program);
    cmd.args(&command.args)
        .args(extra_args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(dir) = dir {
        cmd.current_dir(dir);
    }

    match cmd.output() {
        Ok(output) if output.status.success() => {
            debug!(tool = %command, "tool finished");
            ToolOutcome::Succeeded
        }
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let exit_code = output.status.code();
            warn!(tool = %command, ?exit_code, %stderr, "tool exited unsuccessfully");
            ToolOutcome::Failed { exit_code, stderr }
        }
        Err(e) => {
            warn!(tool = %command, error = %e, "failed to execute tool");
            ToolOutcome::SpawnFailed {
                message: format!("Failed to execute {}: {}", command.program, e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command_line() {
        let cmd = ToolCommand::parse("  plutil -convert   xml1 ").unwrap();
        assert_eq!(cmd, ToolCommand::plutil_xml1());
        assert_eq!(cmd.to_string(), "plutil -convert xml1");
        assert!(ToolCommand::parse("   ").is_none());
    }

    #[test]
    fn test_missing_program_is_spawn_failure() {
        let cmd = ToolCommand::new("resbridge-definitely-not-installed", Vec::<String>::new());
        let outcome = run_tool(&cmd, &[], None);
        assert!(matches!(outcome, ToolOutcome::SpawnFailed { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_status_is_reported() {
        let ok = ToolCommand::new("sh", ["-c", "exit 0"]);
        assert_eq!(run_tool(&ok, &[], None), ToolOutcome::Succeeded);

        let failing = ToolCommand::new("sh", ["-c", "echo broken >&2; exit 3"]);
        assert_eq!(
            run_tool(&failing, &[], None),
            ToolOutcome::Failed {
                exit_code: Some(3),
                stderr: "broken".to_string(),
            }
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_extra_args_and_dir() {
        let dir = tempfile::tempdir().unwrap();
        let touch = ToolCommand::new("touch", Vec::<String>::new());
        let outcome = run_tool(&touch, &[OsStr::new("marker")], Some(dir.path()));
        assert_eq!(outcome, ToolOutcome::Succeeded);
        assert!(dir.path().join("marker").exists());
    }
}
