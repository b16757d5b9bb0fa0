use std::fmt;

use thiserror::Error;

/// Precondition gates checked before a release is allowed to proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreflightCheck {
    RequireBranch,
    RequireCleanWorkingDir,
    RequireUpstream,
    RequireCommits,
    TagAvailable,
}

impl PreflightCheck {
    /// The configuration key that enables this check
    pub fn key(&self) -> &'static str {
        match self {
            PreflightCheck::RequireBranch => "requireBranch",
            PreflightCheck::RequireCleanWorkingDir => "requireCleanWorkingDir",
            PreflightCheck::RequireUpstream => "requireUpstream",
            PreflightCheck::RequireCommits => "requireCommits",
            PreflightCheck::TagAvailable => "tagAvailable",
        }
    }
}

impl fmt::Display for PreflightCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Unified error type for release-preflight operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Preflight check '{check}' failed: {reason}")]
    PreflightFailed {
        check: PreflightCheck,
        reason: String,
    },

    #[error("Hook `{command}` failed with exit code {exit_code}")]
    HookFailed {
        command: String,
        exit_code: i32,
        stdout: String,
        stderr: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Publish failed: {0}")]
    Publish(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in release-preflight
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a preflight failure for the given check
    pub fn preflight(check: PreflightCheck, reason: impl Into<String>) -> Self {
        ReleaseError::PreflightFailed {
            check,
            reason: reason.into(),
        }
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ReleaseError::Version(msg.into())
    }

    /// Create a publish error with context
    pub fn publish(msg: impl Into<String>) -> Self {
        ReleaseError::Publish(msg.into())
    }

    /// Which precondition failed, if this is a preflight failure
    pub fn failed_check(&self) -> Option<PreflightCheck> {
        match self {
            ReleaseError::PreflightFailed { check, .. } => Some(*check),
            _ => None,
        }
    }

    /// Process exit status for this error.
    ///
    /// A failing hook propagates its own exit code when it is a positive
    /// value; everything else exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            ReleaseError::HookFailed { exit_code, .. } if *exit_code > 0 => *exit_code,
            _ => 1,
        }
    }
}
