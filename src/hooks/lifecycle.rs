use std::collections::HashMap;
use std::fmt;

/// Points in the release run at which hook commands execute, in run order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecyclePoint {
    BeforeInit,
    AfterInit,
    BeforeRelease,
    AfterGitRelease,
    AfterNpmRelease,
    AfterRelease,
}

impl LifecyclePoint {
    pub const ALL: [LifecyclePoint; 6] = [
        LifecyclePoint::BeforeInit,
        LifecyclePoint::AfterInit,
        LifecyclePoint::BeforeRelease,
        LifecyclePoint::AfterGitRelease,
        LifecyclePoint::AfterNpmRelease,
        LifecyclePoint::AfterRelease,
    ];

    /// Get the lifecycle point name as used in configuration
    pub fn name(&self) -> &'static str {
        match self {
            LifecyclePoint::BeforeInit => "before:init",
            LifecyclePoint::AfterInit => "after:init",
            LifecyclePoint::BeforeRelease => "before:release",
            LifecyclePoint::AfterGitRelease => "after:git:release",
            LifecyclePoint::AfterNpmRelease => "after:npm:release",
            LifecyclePoint::AfterRelease => "after:release",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|point| point.name() == name)
    }
}

impl fmt::Display for LifecyclePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Context information passed to a hook
#[derive(Debug, Clone)]
pub struct HookContext {
    /// Lifecycle point being executed
    pub point: LifecyclePoint,
    /// Target release version
    pub version: String,
    /// Current branch, once preflight has resolved it
    pub branch: Option<String>,
    /// Computed tag name, once templates are rendered
    pub tag: Option<String>,
    /// Remote the release is pushed to
    pub remote: Option<String>,
}

impl HookContext {
    pub fn new(point: LifecyclePoint, version: impl Into<String>) -> Self {
        HookContext {
            point,
            version: version.into(),
            branch: None,
            tag: None,
            remote: None,
        }
    }

    /// Same context at a different lifecycle point
    pub fn at(&self, point: LifecyclePoint) -> Self {
        HookContext {
            point,
            ..self.clone()
        }
    }

    /// Convert context to environment variables for hook commands
    ///
    /// Maps context fields to RELEASE_* environment variables
    pub fn to_env_vars(&self) -> HashMap<String, String> {
        let mut env = HashMap::new();

        env.insert("RELEASE_VERSION".to_string(), self.version.clone());
        env.insert("RELEASE_LIFECYCLE".to_string(), self.point.name().to_string());

        if let Some(ref branch) = self.branch {
            env.insert("RELEASE_BRANCH".to_string(), branch.clone());
        }

        if let Some(ref tag) = self.tag {
            env.insert("RELEASE_TAG_NAME".to_string(), tag.clone());
        }

        if let Some(ref remote) = self.remote {
            env.insert("RELEASE_REMOTE".to_string(), remote.clone());
        }

        env
    }
}
