//! Package publication
//!
//! The release runner only decides *whether* to publish; the actual upload is
//! done by a [`Publisher`]. [`NpmPublisher`] shells out to `npm publish`.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::config::NpmConfig;
use crate::domain::ReleaseVersion;
use crate::error::{ReleaseError, Result};
use crate::hooks::CommandRunner;

pub trait Publisher {
    fn publish(&self, version: &ReleaseVersion, npm: &NpmConfig) -> Result<()>;
}

/// Publishes through `npm publish`
pub struct NpmPublisher<'a, R: CommandRunner + ?Sized> {
    runner: &'a R,
}

impl<'a, R: CommandRunner + ?Sized> NpmPublisher<'a, R> {
    pub fn new(runner: &'a R) -> Self {
        NpmPublisher { runner }
    }

    /// Dist-tag for a release: configured tag, else the prerelease id, else "latest"
    pub fn dist_tag<'v>(version: &'v ReleaseVersion, npm: &'v NpmConfig) -> &'v str {
        npm.tag
            .as_deref()
            .or_else(|| version.prerelease_id())
            .unwrap_or("latest")
    }

    /// Full publish command line
    pub fn command(version: &ReleaseVersion, npm: &NpmConfig) -> String {
        let mut parts = vec![
            "npm".to_string(),
            "publish".to_string(),
            npm.publish_path.clone(),
            "--tag".to_string(),
            Self::dist_tag(version, npm).to_string(),
        ];
        parts.extend(npm.publish_args.iter().cloned());
        parts.join(" ")
    }
}

impl<'a, R: CommandRunner + ?Sized> Publisher for NpmPublisher<'a, R> {
    fn publish(&self, version: &ReleaseVersion, npm: &NpmConfig) -> Result<()> {
        let command = Self::command(version, npm);
        tracing::info!("$ {}", command);

        let output = self.runner.run(&command, &HashMap::new())?;
        if !output.success() {
            return Err(ReleaseError::publish(format!(
                "`{}` exited with code {}: {}",
                command,
                output.exit_code,
                output.stderr.trim()
            )));
        }

        Ok(())
    }
}

/// Publisher for testing that records the versions it was asked to publish
#[derive(Debug, Default)]
pub struct RecordingPublisher {
    published: RefCell<Vec<String>>,
    fail_with: Option<String>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every publish fail with the given message
    pub fn failing(message: impl Into<String>) -> Self {
        RecordingPublisher {
            published: RefCell::new(Vec::new()),
            fail_with: Some(message.into()),
        }
    }

    pub fn published(&self) -> Vec<String> {
        self.published.borrow().clone()
    }
}

impl Publisher for RecordingPublisher {
    fn publish(&self, version: &ReleaseVersion, _npm: &NpmConfig) -> Result<()> {
        self.published.borrow_mut().push(version.to_string());
        match &self.fail_with {
            Some(message) => Err(ReleaseError::publish(message.clone())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::RecordingRunner;

    #[test]
    fn test_command_for_stable_version() {
        let version = ReleaseVersion::parse("1.2.3").unwrap();
        let npm = NpmConfig::default();
        assert_eq!(
            NpmPublisher::<RecordingRunner>::command(&version, &npm),
            "npm publish . --tag latest"
        );
    }

    #[test]
    fn test_command_uses_prerelease_id() {
        let version = ReleaseVersion::parse("2.0.0-rc.1").unwrap();
        let npm = NpmConfig::default();
        assert_eq!(
            NpmPublisher::<RecordingRunner>::command(&version, &npm),
            "npm publish . --tag rc"
        );
    }

    #[test]
    fn test_command_with_configured_tag_and_args() {
        let version = ReleaseVersion::parse("2.0.0-rc.1").unwrap();
        let npm = NpmConfig {
            publish: true,
            publish_path: "dist".to_string(),
            tag: Some("next".to_string()),
            publish_args: vec!["--access".to_string(), "public".to_string()],
        };
        assert_eq!(
            NpmPublisher::<RecordingRunner>::command(&version, &npm),
            "npm publish dist --tag next --access public"
        );
    }

    #[test]
    fn test_publish_runs_command() {
        let runner = RecordingRunner::new();
        let version = ReleaseVersion::parse("1.0.0").unwrap();
        NpmPublisher::new(&runner)
            .publish(&version, &NpmConfig::default())
            .unwrap();
        assert_eq!(runner.commands(), vec!["npm publish . --tag latest"]);
    }

    #[test]
    fn test_publish_failure() {
        let runner = RecordingRunner::new().fail("npm publish . --tag latest", 1, "E403");
        let version = ReleaseVersion::parse("1.0.0").unwrap();
        let err = NpmPublisher::new(&runner)
            .publish(&version, &NpmConfig::default())
            .unwrap_err();
        assert!(err.to_string().contains("E403"));
    }
}
