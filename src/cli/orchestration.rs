//! Main release workflow orchestration
//!
//! Wires the production collaborators (git2 repository, shell runner, npm
//! publisher) into a [`ReleaseRunner`]. Kept apart from `main.rs` so the
//! workflow can be called programmatically without depending on clap.

use crate::config::load_config;
use crate::domain::ReleaseVersion;
use crate::error::Result;
use crate::git::Git2Repository;
use crate::hooks::ShellRunner;
use crate::publish::NpmPublisher;
use crate::release::{ReleaseReport, ReleaseRunner};
use crate::ui;

/// Arguments for the release workflow
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseArgs {
    /// Path to custom config file
    pub config_path: Option<String>,

    /// Version to release
    pub version: String,

    /// Preview mode - check preconditions only
    pub dry_run: bool,
}

/// Run a release in the current working directory.
///
/// Loads and validates the configuration, parses the version and runs the
/// full release sequence. Configuration warnings are shown before anything
/// executes; warnings raised by a failed run are shown before returning.
pub fn run_release(args: &ReleaseArgs) -> Result<ReleaseReport> {
    let config = load_config(args.config_path.as_deref())?;
    for warning in config.validate()? {
        ui::display_boundary_warning(&warning);
    }

    let version = ReleaseVersion::parse(&args.version)?;
    let repo = Git2Repository::open(".")?;
    let runner = ShellRunner::new();
    let publisher = NpmPublisher::new(&runner);

    if args.dry_run {
        ui::display_status("Dry run: no hooks, git writes or publish will be executed");
    }
    ui::display_status(&format!("Releasing version {}", version));

    let release = ReleaseRunner::new(&config, &repo, &runner, &publisher).dry_run(args.dry_run);
    let result = release.run(&version);

    // A successful run reports its warnings in the summary
    if result.is_err() {
        for warning in release.warnings() {
            ui::display_boundary_warning(&warning);
        }
    }

    result
}
