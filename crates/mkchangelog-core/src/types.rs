//! Version records

use chrono::{DateTime, Utc};
use semver::Version;
use serde::{Deserialize, Serialize};

use crate::error::VersionError;

/// Name of the synthetic version standing for not-yet-tagged changes
pub const UNRELEASED_MARKER: &str = "HEAD";

/// A release version (tag) or the synthetic unreleased marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRecord {
    /// Tag name, e.g. `v1.2.3`
    pub name: String,
    /// Release date; "now" for the unreleased marker
    pub date: DateTime<Utc>,
    /// Parsed semantic version, `None` for the unreleased marker
    pub semantic_version: Option<Version>,
}

impl VersionRecord {
    /// Create a new version record
    pub fn new(
        name: impl Into<String>,
        date: DateTime<Utc>,
        semantic_version: Option<Version>,
    ) -> Self {
        Self {
            name: name.into(),
            date,
            semantic_version,
        }
    }

    /// Synthesize the unreleased marker dated now
    pub fn unreleased() -> Self {
        Self::new(UNRELEASED_MARKER, Utc::now(), None)
    }

    /// Build a record dated now from a prefixed version name
    pub fn from_name(prefix: &str, name: impl Into<String>) -> Result<Self, VersionError> {
        let name = name.into();
        let version = parse_semantic_version(prefix, &name)?;
        Ok(Self::new(name, Utc::now(), Some(version)))
    }

    /// Whether this is the (not yet renamed) unreleased marker
    pub fn is_unreleased(&self) -> bool {
        self.name == UNRELEASED_MARKER
    }
}

/// Strip `prefix` from `name` and parse the rest as a semantic version.
///
/// Missing minor and patch components default to zero, so `v1` and `v1.2`
/// parse as `1.0.0` and `1.2.0`. Pre-release and build metadata are kept.
pub fn parse_semantic_version(prefix: &str, name: &str) -> Result<Version, VersionError> {
    let raw = name.strip_prefix(prefix).unwrap_or(name);
    let split = raw.find(['-', '+']).unwrap_or(raw.len());
    let (numbers, suffix) = raw.split_at(split);

    let mut parts: Vec<&str> = numbers.split('.').collect();
    while parts.len() < 3 {
        parts.push("0");
    }
    let normalized = format!("{}{}", parts.join("."), suffix);

    Version::parse(&normalized).map_err(|e| VersionError::InvalidVersionString {
        version: name.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_version() {
        let v = parse_semantic_version("v", "v1.2.3").unwrap();
        assert_eq!(v, Version::new(1, 2, 3));
    }

    #[test]
    fn test_parse_optional_minor_and_patch() {
        assert_eq!(parse_semantic_version("v", "v2").unwrap(), Version::new(2, 0, 0));
        assert_eq!(parse_semantic_version("v", "v2.5").unwrap(), Version::new(2, 5, 0));
    }

    #[test]
    fn test_parse_keeps_prerelease() {
        let v = parse_semantic_version("release-", "release-1.0-rc.1").unwrap();
        assert_eq!(v.to_string(), "1.0.0-rc.1");
    }

    #[test]
    fn test_parse_without_prefix_match() {
        let v = parse_semantic_version("v", "3.1.4").unwrap();
        assert_eq!(v, Version::new(3, 1, 4));
    }

    #[test]
    fn test_parse_invalid() {
        let err = parse_semantic_version("v", "vnext").unwrap_err();
        assert!(matches!(err, VersionError::InvalidVersionString { .. }));
        assert!(parse_semantic_version("v", "v").is_err());
        assert!(parse_semantic_version("v", "v1.2.3.4").is_err());
    }

    #[test]
    fn test_unreleased_marker() {
        let head = VersionRecord::unreleased();
        assert!(head.is_unreleased());
        assert!(head.semantic_version.is_none());

        let tagged = VersionRecord::from_name("v", "v1.0.0").unwrap();
        assert!(!tagged.is_unreleased());
        assert_eq!(tagged.semantic_version, Some(Version::new(1, 0, 0)));
    }
}
