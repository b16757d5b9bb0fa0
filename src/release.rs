//! Release preflight runner
//!
//! Drives one release as a strictly linear sequence:
//! 1. `before:init` hooks
//! 2. Precondition gates, then `after:init` hooks
//! 3. Template rendering and tag availability, then `before:release` hooks
//! 4. Commit, annotated tag and push, then `after:git:release` hooks
//! 5. Optional package publish, then `after:npm:release` hooks
//! 6. `after:release` hooks
//!
//! Any failure stops the run. Nothing already written is rolled back.

use std::cell::RefCell;

use tracing::{debug, info};

use crate::boundary::BoundaryWarning;
use crate::config::ReleaseConfig;
use crate::domain::{ReleasePlan, ReleaseVersion};
use crate::error::Result;
use crate::git::Repository;
use crate::hooks::{CommandRunner, HookContext, HookExecutor, LifecyclePoint};
use crate::preflight;
use crate::publish::Publisher;

/// Outcome of a finished release run
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseReport {
    pub plan: ReleasePlan,
    /// Hash of the release commit, `None` when nothing was committed
    pub commit: Option<String>,
    pub tagged: bool,
    pub pushed: bool,
    pub published: bool,
    /// Hook commands actually executed
    pub hooks_run: usize,
    pub dry_run: bool,
    pub warnings: Vec<BoundaryWarning>,
}

/// Runs a release against its collaborators
pub struct ReleaseRunner<'a, G, R, P>
where
    G: Repository + ?Sized,
    R: CommandRunner + ?Sized,
    P: Publisher + ?Sized,
{
    config: &'a ReleaseConfig,
    repo: &'a G,
    runner: &'a R,
    publisher: &'a P,
    dry_run: bool,
    warnings: RefCell<Vec<BoundaryWarning>>,
}

impl<'a, G, R, P> ReleaseRunner<'a, G, R, P>
where
    G: Repository + ?Sized,
    R: CommandRunner + ?Sized,
    P: Publisher + ?Sized,
{
    pub fn new(config: &'a ReleaseConfig, repo: &'a G, runner: &'a R, publisher: &'a P) -> Self {
        ReleaseRunner {
            config,
            repo,
            runner,
            publisher,
            dry_run: false,
            warnings: RefCell::new(Vec::new()),
        }
    }

    /// Check preconditions but skip hooks, git writes and publishing
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Warnings raised by the last run, including one that failed
    pub fn warnings(&self) -> Vec<BoundaryWarning> {
        self.warnings.borrow().clone()
    }

    fn warn(&self, warning: BoundaryWarning) {
        debug!(%warning, "release warning");
        self.warnings.borrow_mut().push(warning);
    }

    pub fn run(&self, version: &ReleaseVersion) -> Result<ReleaseReport> {
        self.warnings.borrow_mut().clear();

        let git = &self.config.git;
        let hooks = HookExecutor::new(self.runner, self.dry_run);
        let mut context = HookContext::new(LifecyclePoint::BeforeInit, version.to_string());
        let mut hooks_run = 0;

        hooks_run += hooks.run_point(&self.config.hooks, &context)?;

        let preflight = preflight::run_checks(git, self.repo)?;
        for warning in preflight.warnings {
            self.warn(warning);
        }
        info!(version = %version, "preflight checks passed");

        let (remote, merge_ref) = match preflight.upstream {
            Some(upstream) => (upstream.remote, Some(upstream.merge_ref)),
            None => {
                if let (true, Some(branch)) = (git.push, &preflight.branch) {
                    self.warn(BoundaryWarning::NoUpstream {
                        branch: branch.clone(),
                        remote: git.push_repo.clone(),
                    });
                }
                let merge_ref = preflight
                    .branch
                    .as_ref()
                    .map(|branch| format!("refs/heads/{}", branch));
                (git.push_repo.clone(), merge_ref)
            }
        };

        context.branch = preflight.branch.clone();
        context.remote = Some(remote.clone());
        hooks_run += hooks.run_point(&self.config.hooks, &context.at(LifecyclePoint::AfterInit))?;

        let plan = ReleasePlan::new(git, version, preflight.branch, remote, merge_ref);
        if git.tag {
            preflight::check_tag_available(self.repo, &plan.tag_name)?;
        }
        context.tag = Some(plan.tag_name.clone());
        hooks_run +=
            hooks.run_point(&self.config.hooks, &context.at(LifecyclePoint::BeforeRelease))?;

        let mut commit = None;
        let mut tagged = false;
        let mut pushed = false;

        if self.dry_run {
            info!(
                tag = %plan.tag_name,
                message = %plan.commit_message,
                remote = %plan.remote,
                "[dry-run] skipping commit, tag and push"
            );
        } else {
            if git.commit {
                match self.repo.commit_tracked(&plan.commit_message)? {
                    Some(hash) => {
                        info!(commit = %hash, "committed '{}'", plan.commit_message);
                        commit = Some(hash);
                    }
                    None => self.warn(BoundaryWarning::NothingToCommit {
                        branch: plan.branch.clone().unwrap_or_else(|| "HEAD".to_string()),
                    }),
                }
            }

            if git.tag {
                self.repo
                    .create_annotated_tag(&plan.tag_name, &plan.tag_annotation)?;
                info!(tag = %plan.tag_name, "created tag");
                tagged = true;
            }

            if git.push {
                let refspecs = plan.push_refspecs(tagged);
                if !refspecs.is_empty() {
                    self.repo.push(&plan.remote, &refspecs)?;
                    info!(remote = %plan.remote, "pushed {}", refspecs.join(", "));
                    pushed = true;
                }
            }
        }
        hooks_run +=
            hooks.run_point(&self.config.hooks, &context.at(LifecyclePoint::AfterGitRelease))?;

        let mut published = false;
        if self.config.npm.publish {
            if self.dry_run {
                info!("[dry-run] skipping package publish");
            } else {
                self.publisher.publish(version, &self.config.npm)?;
                info!(version = %version, "published package");
                published = true;
            }
            hooks_run +=
                hooks.run_point(&self.config.hooks, &context.at(LifecyclePoint::AfterNpmRelease))?;
        } else {
            debug!("npm.publish disabled, skipping publish");
        }

        match hooks.run_point(&self.config.hooks, &context.at(LifecyclePoint::AfterRelease)) {
            Ok(executed) => hooks_run += executed,
            Err(err) => {
                if tagged || commit.is_some() || published {
                    self.warn(BoundaryWarning::ReleaseNotRolledBack {
                        tag: plan.tag_name.clone(),
                    });
                }
                return Err(err);
            }
        }

        Ok(ReleaseReport {
            plan,
            commit,
            tagged,
            pushed,
            published,
            hooks_run,
            dry_run: self.dry_run,
            warnings: self.warnings(),
        })
    }
}
