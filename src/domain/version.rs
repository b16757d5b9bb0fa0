use crate::error::{ReleaseError, Result};
use std::fmt;
use std::str::FromStr;

/// Target version of a release, validated as semver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseVersion {
    inner: semver::Version,
}

impl ReleaseVersion {
    /// Parse a version string (e.g., "v1.2.3" -> 1.2.3)
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let clean = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);

        let inner = semver::Version::parse(clean).map_err(|e| {
            ReleaseError::version(format!("Invalid version '{}': {}", input, e))
        })?;

        Ok(ReleaseVersion { inner })
    }

    pub fn is_prerelease(&self) -> bool {
        !self.inner.pre.is_empty()
    }

    /// First prerelease identifier (e.g., "1.0.0-beta.2" -> "beta")
    pub fn prerelease_id(&self) -> Option<&str> {
        if self.inner.pre.is_empty() {
            return None;
        }
        self.inner.pre.as_str().split('.').next()
    }

    pub fn semver(&self) -> &semver::Version {
        &self.inner
    }
}

impl FromStr for ReleaseVersion {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        ReleaseVersion::parse(s)
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain() {
        let version = ReleaseVersion::parse("1.2.3").unwrap();
        assert_eq!(version.to_string(), "1.2.3");
        assert!(!version.is_prerelease());
    }

    #[test]
    fn test_parse_strips_prefix() {
        assert_eq!(ReleaseVersion::parse("v1.2.3").unwrap().to_string(), "1.2.3");
        assert_eq!(ReleaseVersion::parse("V0.9.0").unwrap().to_string(), "0.9.0");
    }

    #[test]
    fn test_parse_prerelease() {
        let version: ReleaseVersion = "2.0.0-beta.2".parse().unwrap();
        assert!(version.is_prerelease());
        assert_eq!(version.prerelease_id(), Some("beta"));
        assert_eq!(version.to_string(), "2.0.0-beta.2");
    }

    #[test]
    fn test_parse_rejects_invalid() {
        for input in ["", "1.2", "latest", "v1.x.0"] {
            let err = ReleaseVersion::parse(input).unwrap_err();
            assert!(
                err.to_string().contains("Version parsing error"),
                "unexpected error for '{}': {}",
                input,
                err
            );
        }
    }

    #[test]
    fn test_prerelease_id_none_for_stable() {
        let version = ReleaseVersion::parse("3.1.4").unwrap();
        assert_eq!(version.prerelease_id(), None);
    }
}
