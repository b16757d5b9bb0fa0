//! Repository precondition gates
//!
//! Checks run in a fixed order and the first unmet gate stops the release:
//! `requireBranch`, `requireCleanWorkingDir`, `requireUpstream`,
//! `requireCommits`.

use crate::boundary::BoundaryWarning;
use crate::config::GitConfig;
use crate::error::{PreflightCheck, ReleaseError, Result};
use crate::git::{Repository, Upstream};
use tracing::debug;

/// Repository state observed while checking preconditions
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PreflightReport {
    pub branch: Option<String>,
    pub upstream: Option<Upstream>,
    pub latest_tag: Option<String>,
    /// Only computed when `requireCommits` is enabled
    pub commits_since_tag: Option<usize>,
    pub warnings: Vec<BoundaryWarning>,
}

/// Verify every enabled precondition gate.
///
/// # Returns
/// * `Ok(PreflightReport)` - All enabled gates passed
/// * `Err(PreflightFailed)` - The first gate that failed
pub fn run_checks<G: Repository + ?Sized>(git: &GitConfig, repo: &G) -> Result<PreflightReport> {
    let mut report = PreflightReport {
        branch: repo.current_branch()?,
        ..PreflightReport::default()
    };

    if let Some(required) = &git.require_branch {
        match report.branch.as_deref() {
            Some(current) if current == required => {}
            Some(current) => {
                return Err(ReleaseError::preflight(
                    PreflightCheck::RequireBranch,
                    format!("current branch '{}' is not '{}'", current, required),
                ));
            }
            None => {
                return Err(ReleaseError::preflight(
                    PreflightCheck::RequireBranch,
                    format!("HEAD is detached, expected branch '{}'", required),
                ));
            }
        }
        debug!(branch = %required, "requireBranch passed");
    }

    if git.require_clean_working_dir {
        if repo.has_uncommitted_changes()? {
            return Err(ReleaseError::preflight(
                PreflightCheck::RequireCleanWorkingDir,
                "working directory has uncommitted changes",
            ));
        }
        debug!("requireCleanWorkingDir passed");
    }

    if let Some(branch) = report.branch.as_deref() {
        report.upstream = repo.upstream(branch)?;
    }

    if git.require_upstream {
        match (&report.branch, &report.upstream) {
            (Some(_), Some(upstream)) => {
                debug!(remote = %upstream.remote, "requireUpstream passed");
            }
            (Some(branch), None) => {
                return Err(ReleaseError::preflight(
                    PreflightCheck::RequireUpstream,
                    format!("branch '{}' has no upstream configured", branch),
                ));
            }
            (None, _) => {
                return Err(ReleaseError::preflight(
                    PreflightCheck::RequireUpstream,
                    "HEAD is detached, no upstream to push to",
                ));
            }
        }
    }

    let template = git.tag_name_template();
    report.latest_tag = repo.latest_tag_matching(&template)?;
    if report.latest_tag.is_none() {
        report.warnings.push(BoundaryWarning::NoPreviousTag {
            template: template.as_str().to_string(),
        });
    }

    if git.require_commits {
        let count = repo.count_commits_since(report.latest_tag.as_deref())?;
        report.commits_since_tag = Some(count);

        if count == 0 {
            let reason = match &report.latest_tag {
                Some(tag) => format!("no commits since tag '{}'", tag),
                None => "repository has no commits".to_string(),
            };
            return Err(ReleaseError::preflight(PreflightCheck::RequireCommits, reason));
        }
        debug!(count, "requireCommits passed");
    }

    Ok(report)
}

/// Fail when the tag about to be created already exists
pub fn check_tag_available<G: Repository + ?Sized>(repo: &G, tag_name: &str) -> Result<()> {
    if repo.tag_exists(tag_name)? {
        return Err(ReleaseError::preflight(
            PreflightCheck::TagAvailable,
            format!("tag '{}' already exists", tag_name),
        ));
    }
    Ok(())
}
