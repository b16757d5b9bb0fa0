//! Version-control abstraction layer
//!
//! This module provides a trait-based abstraction over the git operations a
//! release needs, allowing for a real repository implementation and a mock
//! implementation for testing.
//!
//! # Overview
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A mock implementation that records write operations
//!
//! Most code should depend on the [Repository] trait rather than concrete
//! implementations.
//!
//! ```rust
//! # use release_preflight::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> release_preflight::Result<()> {
//! if let Some(branch) = repo.current_branch()? {
//!     let upstream = repo.upstream(&branch)?;
//!     println!("{} tracks {:?}", branch, upstream);
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::{GitOperation, MockRepository};
pub use repository::Git2Repository;

use crate::domain::Template;
use crate::error::Result;

/// Remote-tracking configuration of a local branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upstream {
    /// Remote name (e.g., "origin")
    pub remote: String,
    /// Branch reference on the remote (e.g., "refs/heads/main")
    pub merge_ref: String,
}

impl Upstream {
    pub fn new(remote: impl Into<String>, merge_ref: impl Into<String>) -> Self {
        Upstream {
            remote: remote.into(),
            merge_ref: merge_ref.into(),
        }
    }
}

/// Git operations used by a release run
///
/// Read operations back the preflight checks; write operations perform the
/// commit, tag and push step.
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Implementations map
/// `git2::Error` into [crate::error::ReleaseError::Git].
pub trait Repository {
    /// Name of the checked-out branch
    ///
    /// # Returns
    /// * `Ok(Some(name))` - HEAD points at a branch (possibly without commits yet)
    /// * `Ok(None)` - HEAD is detached
    fn current_branch(&self) -> Result<Option<String>>;

    /// Whether tracked files have staged or unstaged changes.
    ///
    /// Untracked files are not considered.
    fn has_uncommitted_changes(&self) -> Result<bool>;

    /// Upstream configured for a local branch, `None` when there is none
    fn upstream(&self, branch: &str) -> Result<Option<Upstream>>;

    /// Most recent tag reachable from HEAD whose name matches `template`
    fn latest_tag_matching(&self, template: &Template) -> Result<Option<String>>;

    /// Number of commits reachable from HEAD but not from `tag`.
    ///
    /// With no tag every commit reachable from HEAD is counted.
    fn count_commits_since(&self, tag: Option<&str>) -> Result<usize>;

    /// Whether a tag with this exact name exists
    fn tag_exists(&self, name: &str) -> Result<bool>;

    /// Stage modifications of tracked files and commit them.
    ///
    /// # Returns
    /// * `Ok(Some(hash))` - Commit created
    /// * `Ok(None)` - Nothing to commit
    fn commit_tracked(&self, message: &str) -> Result<Option<String>>;

    /// Create an annotated tag on HEAD
    fn create_annotated_tag(&self, name: &str, annotation: &str) -> Result<()>;

    /// Push refspecs (e.g., "refs/tags/v1.0.0") to a remote
    fn push(&self, remote: &str, refspecs: &[String]) -> Result<()>;
}
