pub mod boundary;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod hooks;
pub mod preflight;
pub mod publish;
pub mod release;
pub mod ui;

pub use error::{PreflightCheck, ReleaseError, Result};
