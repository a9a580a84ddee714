//! Next version calculation

use std::fmt;

use chrono::Utc;
use semver::Version;
use tracing::{debug, instrument};

use mkchangelog_core::{parse_semantic_version, VersionError, VersionRecord};

use crate::types::CommitRecord;

/// Kind of version increment implied by a set of commits
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BumpType {
    /// No bump needed
    None,
    /// Patch version bump (0.0.X)
    Patch,
    /// Minor version bump (0.X.0)
    Minor,
    /// Major version bump (X.0.0)
    Major,
}

impl BumpType {
    /// Breaking changes bump major, features minor, fixes patch
    pub fn from_commits(commits: &[CommitRecord]) -> Self {
        if commits.iter().any(|c| c.is_breaking) {
            Self::Major
        } else if commits.iter().any(|c| c.change_type == "feat") {
            Self::Minor
        } else if commits.iter().any(|c| c.change_type == "fix") {
            Self::Patch
        } else {
            Self::None
        }
    }

    /// Apply the bump; pre-release and build metadata are dropped
    pub fn apply(self, current: &Version) -> Result<Version, VersionError> {
        let overflow = || VersionError::Overflow {
            version: current.to_string(),
        };
        Ok(match self {
            Self::None => current.clone(),
            Self::Major => Version::new(current.major.checked_add(1).ok_or_else(overflow)?, 0, 0),
            Self::Minor => Version::new(
                current.major,
                current.minor.checked_add(1).ok_or_else(overflow)?,
                0,
            ),
            Self::Patch => Version::new(
                current.major,
                current.minor,
                current.patch.checked_add(1).ok_or_else(overflow)?,
            ),
        })
    }
}

impl fmt::Display for BumpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Patch => write!(f, "patch"),
            Self::Minor => write!(f, "minor"),
            Self::Major => write!(f, "major"),
        }
    }
}

/// Compute the version that follows `current_name` given the commits since it.
///
/// Returns `None` when the commits do not call for a release.
#[instrument(skip(commits), fields(commit_count = commits.len()))]
pub fn next_version(
    prefix: &str,
    current_name: &str,
    commits: &[CommitRecord],
) -> Result<Option<VersionRecord>, VersionError> {
    let current = parse_semantic_version(prefix, current_name)?;
    let bump = BumpType::from_commits(commits);
    let next = bump.apply(&current)?;
    debug!(%current, %next, %bump, "computed next version");

    if next == current {
        return Ok(None);
    }

    Ok(Some(VersionRecord::new(
        format!("{}{}", prefix, next),
        Utc::now(),
        Some(next),
    )))
}
