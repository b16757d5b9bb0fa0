use crate::domain::Template;
use crate::error::{ReleaseError, Result};
use crate::git::{Repository, Upstream};
use std::cell::RefCell;

/// Write operation recorded by [`MockRepository`]
#[derive(Debug, Clone, PartialEq)]
pub enum GitOperation {
    Commit { message: String },
    Tag { name: String, annotation: String },
    Push { remote: String, refspecs: Vec<String> },
}

/// Mock repository for testing without actual git operations
pub struct MockRepository {
    branch: Option<String>,
    dirty: bool,
    upstream: Option<Upstream>,
    /// Existing tags, oldest first
    tags: RefCell<Vec<String>>,
    commits_since_tag: usize,
    nothing_to_commit: bool,
    operations: RefCell<Vec<GitOperation>>,
}

impl MockRepository {
    /// A clean repository on `main` tracking `origin/main` with one new commit
    pub fn new() -> Self {
        MockRepository {
            branch: Some("main".to_string()),
            dirty: false,
            upstream: Some(Upstream::new("origin", "refs/heads/main")),
            tags: RefCell::new(Vec::new()),
            commits_since_tag: 1,
            nothing_to_commit: false,
            operations: RefCell::new(Vec::new()),
        }
    }

    /// Check out a branch; its upstream follows unless cleared
    pub fn on_branch(mut self, branch: impl Into<String>) -> Self {
        let branch = branch.into();
        if let Some(upstream) = self.upstream.as_mut() {
            upstream.merge_ref = format!("refs/heads/{}", branch);
        }
        self.branch = Some(branch);
        self
    }

    pub fn detached(mut self) -> Self {
        self.branch = None;
        self
    }

    pub fn dirty(mut self) -> Self {
        self.dirty = true;
        self
    }

    pub fn without_upstream(mut self) -> Self {
        self.upstream = None;
        self
    }

    pub fn with_upstream(mut self, upstream: Upstream) -> Self {
        self.upstream = Some(upstream);
        self
    }

    pub fn with_tag(self, name: impl Into<String>) -> Self {
        self.tags.borrow_mut().push(name.into());
        self
    }

    pub fn with_commits_since_tag(mut self, count: usize) -> Self {
        self.commits_since_tag = count;
        self
    }

    pub fn with_nothing_to_commit(mut self) -> Self {
        self.nothing_to_commit = true;
        self
    }

    /// Write operations in the order they were performed
    pub fn operations(&self) -> Vec<GitOperation> {
        self.operations.borrow().clone()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn current_branch(&self) -> Result<Option<String>> {
        Ok(self.branch.clone())
    }

    fn has_uncommitted_changes(&self) -> Result<bool> {
        Ok(self.dirty)
    }

    fn upstream(&self, _branch: &str) -> Result<Option<Upstream>> {
        Ok(self.upstream.clone())
    }

    fn latest_tag_matching(&self, template: &Template) -> Result<Option<String>> {
        for tag in self.tags.borrow().iter().rev() {
            if template.matches(tag)? {
                return Ok(Some(tag.clone()));
            }
        }
        Ok(None)
    }

    fn count_commits_since(&self, _tag: Option<&str>) -> Result<usize> {
        Ok(self.commits_since_tag)
    }

    fn tag_exists(&self, name: &str) -> Result<bool> {
        Ok(self.tags.borrow().iter().any(|tag| tag == name))
    }

    fn commit_tracked(&self, message: &str) -> Result<Option<String>> {
        if self.nothing_to_commit {
            return Ok(None);
        }
        self.operations.borrow_mut().push(GitOperation::Commit {
            message: message.to_string(),
        });
        Ok(Some(format!("{:040x}", self.operations.borrow().len())))
    }

    fn create_annotated_tag(&self, name: &str, annotation: &str) -> Result<()> {
        if self.tag_exists(name)? {
            return Err(ReleaseError::Git(git2::Error::from_str(&format!(
                "tag '{}' already exists",
                name
            ))));
        }
        self.tags.borrow_mut().push(name.to_string());
        self.operations.borrow_mut().push(GitOperation::Tag {
            name: name.to_string(),
            annotation: annotation.to_string(),
        });
        Ok(())
    }

    fn push(&self, remote: &str, refspecs: &[String]) -> Result<()> {
        self.operations.borrow_mut().push(GitOperation::Push {
            remote: remote.to_string(),
            refspecs: refspecs.to_vec(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_repository_defaults() {
        let repo = MockRepository::default();
        assert_eq!(repo.current_branch().unwrap(), Some("main".to_string()));
        assert!(!repo.has_uncommitted_changes().unwrap());
        assert_eq!(
            repo.upstream("main").unwrap(),
            Some(Upstream::new("origin", "refs/heads/main"))
        );
        assert!(repo.operations().is_empty());
    }

    #[test]
    fn test_mock_repository_latest_matching_tag() {
        let repo = MockRepository::new()
            .with_tag("v1.0.0")
            .with_tag("nightly-5")
            .with_tag("v1.1.0")
            .with_tag("nightly-6");

        let template = Template::new("v${version}");
        assert_eq!(
            repo.latest_tag_matching(&template).unwrap(),
            Some("v1.1.0".to_string())
        );
    }

    #[test]
    fn test_mock_repository_records_writes() {
        let repo = MockRepository::new();
        repo.commit_tracked("Release 1.0.0").unwrap();
        repo.create_annotated_tag("v1.0.0", "Release 1.0.0").unwrap();

        assert!(repo.tag_exists("v1.0.0").unwrap());
        assert_eq!(repo.operations().len(), 2);
        assert!(repo.create_annotated_tag("v1.0.0", "again").is_err());
    }

    #[test]
    fn test_mock_repository_branch_moves_upstream() {
        let repo = MockRepository::new().on_branch("master");
        assert_eq!(
            repo.upstream("master").unwrap().unwrap().merge_ref,
            "refs/heads/master"
        );
    }
}
