use std::fmt;

/// Non-fatal conditions met during a release run.
/// These are reported to the user but never stop the run.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// Commit step found no tracked changes to record
    NothingToCommit { branch: String },
    /// No existing tag matches the tag name template
    NoPreviousTag { template: String },
    /// Hook configured under a point the runner never reaches
    UnknownLifecyclePoint { point: String },
    /// Template has no `${version}` placeholder, every release gets the same value
    TemplateWithoutPlaceholder { key: String, template: String },
    /// Current branch has no upstream, pushing to the fallback remote
    NoUpstream { branch: String, remote: String },
    /// An after-release hook failed; earlier release steps stay in effect
    ReleaseNotRolledBack { tag: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NothingToCommit { branch } => {
                write!(f, "No changes to commit on branch '{}'", branch)
            }
            BoundaryWarning::NoPreviousTag { template } => {
                write!(f, "No existing tag matches '{}'", template)
            }
            BoundaryWarning::UnknownLifecyclePoint { point } => {
                write!(f, "Unknown lifecycle point '{}', its hooks never run", point)
            }
            BoundaryWarning::TemplateWithoutPlaceholder { key, template } => {
                write!(
                    f,
                    "{} '{}' has no ${{version}} placeholder",
                    key, template
                )
            }
            BoundaryWarning::NoUpstream { branch, remote } => {
                write!(
                    f,
                    "Branch '{}' has no upstream, pushing to '{}'",
                    branch, remote
                )
            }
            BoundaryWarning::ReleaseNotRolledBack { tag } => {
                write!(
                    f,
                    "Release '{}' was already created and is not rolled back",
                    tag
                )
            }
        }
    }
}
