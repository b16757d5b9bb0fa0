use crate::error::{ReleaseError, Result};

/// Placeholder replaced with the release version
pub const VERSION_PLACEHOLDER: &str = "${version}";

/// Release string template (e.g., "v${version}", "Release: v${version}")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    raw: String,
}

impl Template {
    /// Create a new template
    pub fn new(raw: impl Into<String>) -> Self {
        Template { raw: raw.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether the template contains a `${version}` placeholder
    pub fn has_placeholder(&self) -> bool {
        self.raw.contains(VERSION_PLACEHOLDER)
    }

    /// Substitute every `${version}` with the given version.
    ///
    /// Example: template="v${version}", version="1.2.3" -> "v1.2.3"
    pub fn render(&self, version: &str) -> String {
        self.raw.replace(VERSION_PLACEHOLDER, version)
    }

    /// Anchored regex for tags produced by this template.
    ///
    /// The first placeholder is captured as `version`, later ones match any
    /// non-empty text. Everything else must match literally.
    fn tag_pattern(&self) -> Result<regex::Regex> {
        let escaped = regex::escape(&self.raw);
        let placeholder = regex::escape(VERSION_PLACEHOLDER);

        let pattern = match escaped.split_once(placeholder.as_str()) {
            Some((head, tail)) => format!(
                "{}(?P<version>.+){}",
                head,
                tail.replace(placeholder.as_str(), ".+")
            ),
            None => escaped,
        };

        regex::Regex::new(&format!("^{}$", pattern))
            .map_err(|e| ReleaseError::config(format!("Invalid template '{}': {}", self.raw, e)))
    }

    /// Check whether an existing tag could have been produced by this template.
    pub fn matches(&self, tag: &str) -> Result<bool> {
        Ok(self.tag_pattern()?.is_match(tag))
    }

    /// The text a matching tag has in place of the first `${version}`.
    ///
    /// Example: template="v${version}", tag="v1.2.3" -> Some("1.2.3")
    pub fn extract_version<'t>(&self, tag: &'t str) -> Result<Option<&'t str>> {
        Ok(self
            .tag_pattern()?
            .captures(tag)
            .and_then(|caps| caps.name("version"))
            .map(|m| m.as_str()))
    }
}

impl From<&str> for Template {
    fn from(raw: &str) -> Self {
        Template::new(raw)
    }
}
