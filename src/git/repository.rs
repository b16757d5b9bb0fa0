use crate::domain::{ReleaseVersion, Template};
use crate::error::Result;
use crate::git::Upstream;
use git2::{BranchType, Commit, ErrorCode, ObjectType, Oid, Repository as Git2Repo, Status};
use std::collections::HashMap;
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    /// Commit at HEAD, `None` on a branch without commits
    fn head_commit_oid(&self) -> Result<Option<Oid>> {
        match self.repo.head() {
            Ok(head) => Ok(Some(head.peel_to_commit()?.id())),
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn remote_callbacks<'cb>() -> git2::RemoteCallbacks<'cb> {
        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.credentials(|_url, username_from_url, allowed_types| {
            if allowed_types.contains(git2::CredentialType::SSH_KEY) {
                let username = username_from_url.unwrap_or("git");

                if let Ok(cred) = git2::Cred::ssh_key_from_agent(username) {
                    return Ok(cred);
                }

                if let Some(home) = dirs::home_dir() {
                    for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                        let path = home.join(".ssh").join(key);
                        if path.exists() {
                            if let Ok(cred) = git2::Cred::ssh_key(username, None, &path, None) {
                                return Ok(cred);
                            }
                        }
                    }
                }
            }

            git2::Cred::default()
        });

        callbacks.push_update_reference(|refname, status| match status {
            Some(status) => {
                tracing::warn!(refname, status, "remote rejected reference");
                Err(git2::Error::from_str(&format!(
                    "Push rejected for {}: {}",
                    refname, status
                )))
            }
            None => Ok(()),
        });

        callbacks
    }
}

impl super::Repository for Git2Repository {
    fn current_branch(&self) -> Result<Option<String>> {
        match self.repo.head() {
            Ok(head) if head.is_branch() => Ok(head.shorthand().map(str::to_string)),
            Ok(_) => Ok(None),
            Err(e) if e.code() == ErrorCode::UnbornBranch => {
                let head = self.repo.find_reference("HEAD")?;
                Ok(head
                    .symbolic_target()
                    .and_then(|target| target.strip_prefix("refs/heads/"))
                    .map(str::to_string))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn has_uncommitted_changes(&self) -> Result<bool> {
        let mut options = git2::StatusOptions::new();
        options
            .include_untracked(false)
            .include_ignored(false)
            .exclude_submodules(true);

        let statuses = self.repo.statuses(Some(&mut options))?;

        Ok(statuses.iter().any(|entry| {
            let status = entry.status();
            !status.is_empty() && !status.intersects(Status::IGNORED | Status::WT_NEW)
        }))
    }

    fn upstream(&self, branch: &str) -> Result<Option<Upstream>> {
        let local = match self.repo.find_branch(branch, BranchType::Local) {
            Ok(local) => local,
            Err(e) if e.code() == ErrorCode::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match local.upstream() {
            Ok(_) => {}
            Err(e) if e.code() == ErrorCode::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        }

        let refname = format!("refs/heads/{}", branch);
        let remote = self.repo.branch_upstream_remote(&refname)?;
        let merge = match self
            .repo
            .config()?
            .get_string(&format!("branch.{}.merge", branch))
        {
            Ok(merge) => merge,
            Err(e) if e.code() == ErrorCode::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match remote.as_str() {
            Some(remote) => Ok(Some(Upstream::new(remote, merge))),
            None => Err(git2::Error::from_str(&format!(
                "Upstream remote of '{}' is not valid UTF-8",
                branch
            ))
            .into()),
        }
    }

    fn latest_tag_matching(&self, template: &Template) -> Result<Option<String>> {
        let head_oid = match self.head_commit_oid()? {
            Some(oid) => oid,
            None => return Ok(None),
        };

        // Peeled commit -> matching tag names; handles lightweight and annotated tags
        let mut tagged: HashMap<Oid, Vec<String>> = HashMap::new();
        let tags = self.repo.tag_names(None)?;

        for tag_name in tags.iter().flatten() {
            if !template.matches(tag_name)? {
                continue;
            }
            if let Ok(tag_ref) = self.repo.find_reference(&format!("refs/tags/{}", tag_name)) {
                if let Ok(commit) = tag_ref.peel_to_commit() {
                    tagged
                        .entry(commit.id())
                        .or_default()
                        .push(tag_name.to_string());
                }
            }
        }

        if tagged.is_empty() {
            return Ok(None);
        }

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(git2::Sort::TOPOLOGICAL | git2::Sort::TIME)?;
        revwalk.push(head_oid)?;

        for oid in revwalk {
            if let Some(names) = tagged.get(&oid?) {
                // Several tags on one commit: highest version wins, names break ties
                return Ok(names
                    .iter()
                    .max_by_key(|name| (tag_precedence(template, name), *name))
                    .cloned());
            }
        }

        Ok(None)
    }

    fn count_commits_since(&self, tag: Option<&str>) -> Result<usize> {
        let head_oid = match self.head_commit_oid()? {
            Some(oid) => oid,
            None => return Ok(0),
        };

        let mut revwalk = self.repo.revwalk()?;
        revwalk.push(head_oid)?;

        if let Some(tag) = tag {
            let tag_commit = self
                .repo
                .find_reference(&format!("refs/tags/{}", tag))?
                .peel_to_commit()?;
            revwalk.hide(tag_commit.id())?;
        }

        let mut count = 0;
        for oid in revwalk {
            oid?;
            count += 1;
        }

        Ok(count)
    }

    fn tag_exists(&self, name: &str) -> Result<bool> {
        match self.repo.find_reference(&format!("refs/tags/{}", name)) {
            Ok(_) => Ok(true),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn commit_tracked(&self, message: &str) -> Result<Option<String>> {
        let mut index = self.repo.index()?;
        index.update_all(["*"], None)?;
        index.write()?;

        let parent = match self.head_commit_oid()? {
            Some(oid) => Some(self.repo.find_commit(oid)?),
            None => None,
        };

        let tree_id = index.write_tree()?;
        match &parent {
            Some(parent) if parent.tree_id() == tree_id => return Ok(None),
            None if index.is_empty() => return Ok(None),
            _ => {}
        }

        let tree = self.repo.find_tree(tree_id)?;
        let signature = self.repo.signature()?;
        let parents: Vec<&Commit<'_>> = parent.iter().collect();

        let oid = self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &parents,
        )?;

        Ok(Some(oid.to_string()))
    }

    fn create_annotated_tag(&self, name: &str, annotation: &str) -> Result<()> {
        let target = self.repo.head()?.peel(ObjectType::Commit)?;
        let signature = self.repo.signature()?;

        self.repo.tag(name, &target, &signature, annotation, false)?;

        Ok(())
    }

    fn push(&self, remote: &str, refspecs: &[String]) -> Result<()> {
        let mut remote = self.repo.find_remote(remote)?;

        let mut push_options = git2::PushOptions::new();
        push_options.remote_callbacks(Self::remote_callbacks());

        let refspec_strs: Vec<&str> = refspecs.iter().map(String::as_str).collect();
        remote.push(&refspec_strs, Some(&mut push_options))?;

        Ok(())
    }
}

/// Semver of the version part of a matching tag, `None` when it does not parse
fn tag_precedence(template: &Template, name: &str) -> Option<semver::Version> {
    template
        .extract_version(name)
        .ok()
        .flatten()
        .and_then(|version| ReleaseVersion::parse(version).ok())
        .map(|version| version.semver().clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::Repository;

    fn init_repo(dir: &Path) -> Git2Repository {
        let mut options = git2::RepositoryInitOptions::new();
        options.initial_head("main");
        let repo = Git2Repo::init_opts(dir, &options).unwrap();
        {
            let mut config = repo.config().unwrap();
            config.set_str("user.name", "Test User").unwrap();
            config.set_str("user.email", "test@example.com").unwrap();
        }
        Git2Repository::from_git2(repo)
    }

    #[test]
    fn test_unborn_branch_name() {
        let dir = tempfile::tempdir().unwrap();
        let repo = init_repo(dir.path());
        assert_eq!(repo.current_branch().unwrap(), Some("main".to_string()));
        assert_eq!(repo.count_commits_since(None).unwrap(), 0);
    }

    #[test]
    fn test_empty_repo_has_nothing_to_commit() {
        let dir = tempfile::tempdir().unwrap();
        let repo = init_repo(dir.path());
        assert!(!repo.has_uncommitted_changes().unwrap());
        assert_eq!(repo.commit_tracked("Release 1.0.0").unwrap(), None);
    }

    #[test]
    fn test_tag_exists_missing() {
        let dir = tempfile::tempdir().unwrap();
        let repo = init_repo(dir.path());
        assert!(!repo.tag_exists("v1.0.0").unwrap());
    }

    #[test]
    fn test_upstream_reads_merge_ref_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let repo = init_repo(dir.path());
        let head = {
            let signature = repo.repo.signature().unwrap();
            let tree_id = repo.repo.index().unwrap().write_tree().unwrap();
            let tree = repo.repo.find_tree(tree_id).unwrap();
            repo.repo
                .commit(Some("HEAD"), &signature, &signature, "Initial commit", &tree, &[])
                .unwrap()
        };
        repo.repo.remote("upstream", "https://example.com/repo.git").unwrap();
        repo.repo
            .reference("refs/remotes/upstream/trunk", head, true, "test")
            .unwrap();

        assert_eq!(repo.upstream("main").unwrap(), None);

        repo.repo
            .find_branch("main", BranchType::Local)
            .unwrap()
            .set_upstream(Some("upstream/trunk"))
            .unwrap();
        assert_eq!(
            repo.upstream("main").unwrap(),
            Some(Upstream::new("upstream", "refs/heads/trunk"))
        );
    }
}
