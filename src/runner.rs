use crate::args::display_args;
use crate::error::ActionError;
use anyhow::Result;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

/// One blocking subprocess call.
#[derive(Debug, Clone, Copy)]
pub struct Invocation<'a> {
    pub program: &'a Path,
    pub args: &'a [String],
    pub cwd: &'a Path,
    /// Written to the child's stdin, which is then closed.
    pub stdin: Option<&'a str>,
}

impl Invocation<'_> {
    pub fn describe(&self) -> String {
        let name = self
            .program
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.program.display().to_string());
        if self.args.is_empty() {
            name
        } else {
            format!("{name} {}", display_args(self.args))
        }
    }
}

/// Captured stdout of a finished tool invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    pub stdout: String,
}

impl ToolOutput {
    pub fn new(stdout: impl Into<String>) -> Self {
        Self { stdout: stdout.into() }
    }
}

pub trait CommandRunner {
    /// Run to completion. A non-zero exit is an error; stdout is returned only on success.
    fn run(&self, invocation: &Invocation) -> Result<ToolOutput>;
}

/// Spawns real processes. stderr is inherited so tool diagnostics reach the CI log directly.
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, invocation: &Invocation) -> Result<ToolOutput> {
        let command_line = invocation.describe();
        tracing::debug!(cwd = %invocation.cwd.display(), "running {command_line}");

        let mut child = Command::new(invocation.program)
            .args(invocation.args)
            .current_dir(invocation.cwd)
            .stdin(if invocation.stdin.is_some() { Stdio::piped() } else { Stdio::null() })
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| ActionError::Spawn {
                program: invocation.program.to_path_buf(),
                source,
            })?;

        if let Some(input) = invocation.stdin {
            if let Some(mut pipe) = child.stdin.take() {
                pipe.write_all(input.as_bytes())?;
                // dropping the pipe closes it so prompts see EOF after the answer
            }
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(ActionError::ToolFailed {
                command: command_line,
                status: output.status.to_string(),
            }
            .into());
        }
        Ok(ToolOutput::new(String::from_utf8_lossy(&output.stdout)))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sh(script: &str) -> Vec<String> {
        vec!["-c".to_string(), script.to_string()]
    }

    #[test]
    fn captures_stdout_in_cwd() {
        let dir = tempfile::tempdir().unwrap();
        let args = sh("pwd");
        let out = ProcessRunner
            .run(&Invocation {
                program: Path::new("/bin/sh"),
                args: &args,
                cwd: dir.path(),
                stdin: None,
            })
            .unwrap();
        let reported = PathBuf::from(out.stdout.trim()).canonicalize().unwrap();
        assert_eq!(reported, dir.path().canonicalize().unwrap());
    }

    #[test]
    fn feeds_stdin() {
        let args = sh("read answer; echo got $answer");
        let out = ProcessRunner
            .run(&Invocation {
                program: Path::new("/bin/sh"),
                args: &args,
                cwd: Path::new("."),
                stdin: Some("Y\n"),
            })
            .unwrap();
        assert_eq!(out.stdout.trim(), "got Y");
    }

    #[test]
    fn nonzero_exit_is_tool_failure() {
        let args = sh("exit 3");
        let err = ProcessRunner
            .run(&Invocation {
                program: Path::new("/bin/sh"),
                args: &args,
                cwd: Path::new("."),
                stdin: None,
            })
            .unwrap_err();
        match err.downcast_ref::<ActionError>() {
            Some(ActionError::ToolFailed { command, .. }) => assert!(command.starts_with("sh -c")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let err = ProcessRunner
            .run(&Invocation {
                program: Path::new("/nonexistent/amplify"),
                args: &[],
                cwd: Path::new("."),
                stdin: None,
            })
            .unwrap_err();
        assert!(matches!(err.downcast_ref::<ActionError>(), Some(ActionError::Spawn { .. })));
    }
}
