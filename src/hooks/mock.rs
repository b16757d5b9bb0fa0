use crate::error::Result;
use crate::hooks::{CommandOutput, CommandRunner};
use std::cell::RefCell;
use std::collections::HashMap;

/// One command seen by [`RecordingRunner`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCommand {
    pub command: String,
    pub env: HashMap<String, String>,
}

/// Command runner for testing that records commands instead of running them.
///
/// Every command succeeds with empty output unless a scripted result was
/// registered for it.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    calls: RefCell<Vec<RecordedCommand>>,
    scripted: HashMap<String, CommandOutput>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `command` finish with the given exit code and stderr
    pub fn fail(mut self, command: impl Into<String>, exit_code: i32, stderr: &str) -> Self {
        self.scripted.insert(
            command.into(),
            CommandOutput {
                exit_code,
                stdout: String::new(),
                stderr: stderr.to_string(),
            },
        );
        self
    }

    /// Make `command` succeed with the given stdout
    pub fn respond(mut self, command: impl Into<String>, stdout: &str) -> Self {
        self.scripted.insert(
            command.into(),
            CommandOutput {
                exit_code: 0,
                stdout: stdout.to_string(),
                stderr: String::new(),
            },
        );
        self
    }

    pub fn calls(&self) -> Vec<RecordedCommand> {
        self.calls.borrow().clone()
    }

    /// Command strings in the order they ran
    pub fn commands(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .map(|call| call.command.clone())
            .collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, command: &str, env: &HashMap<String, String>) -> Result<CommandOutput> {
        self.calls.borrow_mut().push(RecordedCommand {
            command: command.to_string(),
            env: env.clone(),
        });
        Ok(self.scripted.get(command).cloned().unwrap_or_default())
    }
}
