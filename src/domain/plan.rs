use crate::config::GitConfig;
use crate::domain::ReleaseVersion;

/// Strings and targets computed for one release run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleasePlan {
    pub version: ReleaseVersion,
    pub tag_name: String,
    pub commit_message: String,
    pub tag_annotation: String,
    /// Checked-out branch, `None` on a detached HEAD
    pub branch: Option<String>,
    /// Remote the release is pushed to
    pub remote: String,
    /// Branch reference on the remote that receives the local branch
    pub merge_ref: Option<String>,
}

impl ReleasePlan {
    /// Render the git templates for `version`
    pub fn new(
        git: &GitConfig,
        version: &ReleaseVersion,
        branch: Option<String>,
        remote: impl Into<String>,
        merge_ref: Option<String>,
    ) -> Self {
        let version_str = version.to_string();

        ReleasePlan {
            version: version.clone(),
            tag_name: git.tag_name_template().render(&version_str),
            commit_message: git.commit_message_template().render(&version_str),
            tag_annotation: git.tag_annotation_template().render(&version_str),
            branch,
            remote: remote.into(),
            merge_ref,
        }
    }

    /// Refspecs pushed after committing and tagging
    pub fn push_refspecs(&self, include_tag: bool) -> Vec<String> {
        let mut refspecs = Vec::new();

        if let (Some(branch), Some(merge_ref)) = (&self.branch, &self.merge_ref) {
            refspecs.push(format!("refs/heads/{}:{}", branch, merge_ref));
        }

        if include_tag {
            refspecs.push(format!("refs/tags/{0}:refs/tags/{0}", self.tag_name));
        }

        refspecs
    }
}
