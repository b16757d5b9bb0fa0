use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::boundary::BoundaryWarning;
use crate::domain::Template;
use crate::error::{ReleaseError, Result};
use crate::hooks::LifecyclePoint;

/// Configuration file names searched in the working directory, in order.
pub const LOCAL_CONFIG_FILES: [&str; 2] = [".release-it.toml", ".release-it.json"];

/// Represents the complete configuration for a release run.
///
/// Loaded once per invocation and never mutated afterwards.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct ReleaseConfig {
    #[serde(default)]
    pub hooks: Hooks,

    #[serde(default)]
    pub git: GitConfig,

    #[serde(default)]
    pub npm: NpmConfig,
}

/// Commands for a single lifecycle point, written either as one string or a list.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum HookCommands {
    One(String),
    Many(Vec<String>),
}

impl HookCommands {
    pub fn commands(&self) -> Vec<&str> {
        match self {
            HookCommands::One(command) => vec![command.as_str()],
            HookCommands::Many(commands) => commands.iter().map(String::as_str).collect(),
        }
    }
}

/// Mapping from lifecycle-point name to the commands run at that point.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct Hooks(BTreeMap<String, HookCommands>);

impl Hooks {
    pub fn new() -> Self {
        Hooks(BTreeMap::new())
    }

    /// Register commands for a lifecycle point, replacing any previous entry
    pub fn insert(&mut self, point: impl Into<String>, commands: HookCommands) {
        self.0.insert(point.into(), commands);
    }

    /// Commands registered under a lifecycle point, in declared order
    pub fn commands_for(&self, point: LifecyclePoint) -> Vec<&str> {
        self.0
            .get(point.name())
            .map(HookCommands::commands)
            .unwrap_or_default()
    }

    /// Iterate over every configured lifecycle point name and its commands
    pub fn iter(&self) -> impl Iterator<Item = (&str, Vec<&str>)> {
        self.0
            .iter()
            .map(|(point, commands)| (point.as_str(), commands.commands()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn default_tag_name() -> String {
    "${version}".to_string()
}

fn default_commit_message() -> String {
    "Release ${version}".to_string()
}

fn default_tag_annotation() -> String {
    "Release ${version}".to_string()
}

fn default_push_repo() -> String {
    "origin".to_string()
}

fn default_true() -> bool {
    true
}

/// Git conventions and precondition gates.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GitConfig {
    #[serde(default = "default_tag_name")]
    pub tag_name: String,

    #[serde(default = "default_commit_message")]
    pub commit_message: String,

    #[serde(default = "default_tag_annotation")]
    pub tag_annotation: String,

    #[serde(default = "default_true")]
    pub require_clean_working_dir: bool,

    #[serde(default)]
    pub require_branch: Option<String>,

    #[serde(default = "default_true")]
    pub require_upstream: bool,

    #[serde(default)]
    pub require_commits: bool,

    #[serde(default = "default_true")]
    pub commit: bool,

    #[serde(default = "default_true")]
    pub tag: bool,

    #[serde(default = "default_true")]
    pub push: bool,

    /// Remote pushed to when the current branch has no upstream
    #[serde(default = "default_push_repo")]
    pub push_repo: String,
}

impl GitConfig {
    pub fn tag_name_template(&self) -> Template {
        Template::new(self.tag_name.as_str())
    }

    pub fn commit_message_template(&self) -> Template {
        Template::new(self.commit_message.as_str())
    }

    pub fn tag_annotation_template(&self) -> Template {
        Template::new(self.tag_annotation.as_str())
    }
}

impl Default for GitConfig {
    fn default() -> Self {
        GitConfig {
            tag_name: default_tag_name(),
            commit_message: default_commit_message(),
            tag_annotation: default_tag_annotation(),
            require_clean_working_dir: true,
            require_branch: None,
            require_upstream: true,
            require_commits: false,
            commit: true,
            tag: true,
            push: true,
            push_repo: default_push_repo(),
        }
    }
}

fn default_publish_path() -> String {
    ".".to_string()
}

/// Package publication settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NpmConfig {
    #[serde(default)]
    pub publish: bool,

    #[serde(default = "default_publish_path")]
    pub publish_path: String,

    /// Dist-tag; falls back to the prerelease identifier, then "latest"
    #[serde(default)]
    pub tag: Option<String>,

    #[serde(default)]
    pub publish_args: Vec<String>,
}

impl Default for NpmConfig {
    fn default() -> Self {
        NpmConfig {
            publish: false,
            publish_path: default_publish_path(),
            tag: None,
            publish_args: Vec::new(),
        }
    }
}

impl ReleaseConfig {
    /// Parse configuration text; `.json` paths are read as JSON, anything else as TOML.
    pub fn from_str_for_path(content: &str, path: &Path) -> Result<Self> {
        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if is_json {
            serde_json::from_str(content).map_err(|e| {
                ReleaseError::config(format!("Cannot parse {}: {}", path.display(), e))
            })
        } else {
            toml::from_str(content).map_err(|e| {
                ReleaseError::config(format!("Cannot parse {}: {}", path.display(), e))
            })
        }
    }

    /// Check the configuration for errors and collect non-fatal warnings.
    ///
    /// Empty hook commands are rejected. Unknown lifecycle points and a tag
    /// template without `${version}` produce warnings.
    pub fn validate(&self) -> Result<Vec<BoundaryWarning>> {
        let mut warnings = Vec::new();

        for (point, commands) in self.hooks.iter() {
            if commands.is_empty() {
                return Err(ReleaseError::config(format!(
                    "Hook '{}' has no commands",
                    point
                )));
            }
            if commands.iter().any(|command| command.trim().is_empty()) {
                return Err(ReleaseError::config(format!(
                    "Hook '{}' contains an empty command",
                    point
                )));
            }
            if LifecyclePoint::from_name(point).is_none() {
                warnings.push(BoundaryWarning::UnknownLifecyclePoint {
                    point: point.to_string(),
                });
            }
        }

        if self.git.tag && !self.git.tag_name_template().has_placeholder() {
            warnings.push(BoundaryWarning::TemplateWithoutPlaceholder {
                key: "git.tagName".to_string(),
                template: self.git.tag_name.clone(),
            });
        }

        if let Some(branch) = &self.git.require_branch {
            if branch.trim().is_empty() {
                return Err(ReleaseError::config("git.requireBranch must not be empty"));
            }
        }

        Ok(warnings)
    }
}

/// Per-user configuration path (`<config dir>/release-preflight/config.toml`)
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("release-preflight").join("config.toml"))
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `.release-it.toml` in current directory
/// 3. `.release-it.json` in current directory
/// 4. `release-preflight/config.toml` in the user config directory
/// 5. Default configuration if no file found
///
/// # Returns
/// * `Ok(ReleaseConfig)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<ReleaseConfig> {
    let path = if let Some(path) = config_path {
        Some(PathBuf::from(path))
    } else if let Some(local) = LOCAL_CONFIG_FILES
        .iter()
        .map(PathBuf::from)
        .find(|candidate| candidate.exists())
    {
        Some(local)
    } else {
        user_config_path().filter(|candidate| candidate.exists())
    };

    let Some(path) = path else {
        tracing::debug!("no configuration file found, using defaults");
        return Ok(ReleaseConfig::default());
    };

    tracing::debug!(path = %path.display(), "loading configuration");
    let content = fs::read_to_string(&path).map_err(|e| {
        ReleaseError::config(format!("Cannot read {}: {}", path.display(), e))
    })?;
    ReleaseConfig::from_str_for_path(&content, &path)
}
