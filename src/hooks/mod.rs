//! Lifecycle hooks
//!
//! Runs the configured shell commands at fixed points of a release:
//! - before:init: Before any precondition is checked
//! - after:init: After preflight passed
//! - before:release: Before commit and tag
//! - after:git:release: After commit, tag and push
//! - after:npm:release: After the package was published
//! - after:release: At the very end

pub mod executor;
pub mod lifecycle;
pub mod mock;
pub mod runner;

pub use executor::HookExecutor;
pub use lifecycle::{HookContext, LifecyclePoint};
pub use mock::{RecordedCommand, RecordingRunner};
pub use runner::{CommandOutput, CommandRunner, ShellRunner};
