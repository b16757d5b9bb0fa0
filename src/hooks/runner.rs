use crate::error::{ReleaseError, Result};
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Command;

/// Captured result of a finished command
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    /// Exit code, -1 when the process was terminated by a signal
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Executes shell command strings.
///
/// Implementations block until the command finishes. A command that runs
/// and exits non-zero is an `Ok` output; `Err` is reserved for commands
/// that could not be started at all.
pub trait CommandRunner {
    fn run(&self, command: &str, env: &HashMap<String, String>) -> Result<CommandOutput>;
}

/// Runs commands through the platform shell (`sh -c` or `cmd /C`)
#[derive(Debug, Clone, Default)]
pub struct ShellRunner {
    working_dir: Option<PathBuf>,
}

impl ShellRunner {
    pub fn new() -> Self {
        ShellRunner::default()
    }

    /// Run every command inside `dir` instead of the process working directory
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        ShellRunner {
            working_dir: Some(dir.into()),
        }
    }

    fn shell_command(command: &str) -> Command {
        if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(command);
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(command);
            cmd
        }
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str, env: &HashMap<String, String>) -> Result<CommandOutput> {
        let mut cmd = Self::shell_command(command);

        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        cmd.envs(env);

        let output = cmd.output().map_err(|e| ReleaseError::HookFailed {
            command: command.to_string(),
            exit_code: -1,
            stdout: String::new(),
            stderr: format!("Failed to start command: {}", e),
        })?;

        Ok(CommandOutput {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
