//! Shell command execution for `cmd` variables.
//!
//! Commands run with the full privileges of the calling user and block
//! until the shell exits. There is no timeout.

use std::process::{Command, Stdio};

use dockbuild_common::error::{BuildError, CommandFailure, Result};

/// Runs a command and returns its captured standard output.
pub trait CommandRunner {
    /// Executes `command` and returns everything it wrote to stdout.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::EmptyCommand`] for an empty command and
    /// [`BuildError::CommandExecution`] when the command cannot be started,
    /// exits unsuccessfully, or writes to stderr.
    fn run(&self, command: &str) -> Result<String>;
}

/// Runs commands through `sh -c`.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    shell: String,
}

impl ShellRunner {
    /// Creates a runner that uses the given shell binary.
    #[must_use]
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self::new("sh")
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str) -> Result<String> {
        if command.is_empty() {
            return Err(BuildError::EmptyCommand);
        }
        tracing::debug!(shell = %self.shell, command, "running variable command");

        let failed = |source| BuildError::CommandExecution {
            command: command.to_owned(),
            source,
        };

        let output = Command::new(&self.shell)
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| failed(CommandFailure::Spawn(e)))?;

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if !output.status.success() {
            return Err(failed(CommandFailure::ExitStatus {
                status: output.status,
                stderr,
            }));
        }
        if !stderr.is_empty() {
            return Err(failed(CommandFailure::Stderr { stderr }));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn captures_stdout() {
        let out = ShellRunner::default()
            .run("printf 'hello world'")
            .expect("should run");
        assert_eq!(out, "hello world");
    }

    #[test]
    fn empty_command_is_rejected() {
        let err = ShellRunner::default().run("").unwrap_err();
        assert!(matches!(err, BuildError::EmptyCommand));
    }

    #[test]
    fn nonzero_exit_fails() {
        let err = ShellRunner::default().run("exit 3").unwrap_err();
        assert!(
            matches!(
                err,
                BuildError::CommandExecution {
                    source: CommandFailure::ExitStatus { .. },
                    ..
                }
            ),
            "got: {err}"
        );
    }

    #[test]
    fn stderr_output_fails_even_on_success() {
        let err = ShellRunner::default()
            .run("echo ok; echo warning >&2")
            .unwrap_err();
        match err {
            BuildError::CommandExecution {
                source: CommandFailure::Stderr { stderr },
                ..
            } => assert_eq!(stderr.trim(), "warning"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_shell_is_spawn_failure() {
        let err = ShellRunner::new("/nonexistent/shell")
            .run("true")
            .unwrap_err();
        assert!(
            matches!(
                err,
                BuildError::CommandExecution {
                    source: CommandFailure::Spawn(_),
                    ..
                }
            ),
            "got: {err}"
        );
    }
}
