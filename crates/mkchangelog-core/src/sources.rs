//! Source traits consumed by the changelog pipeline
//!
//! Log sources yield raw commit messages for a revision range, version
//! sources yield release records newest first, and section text sources
//! provide optional per-version header and footer text.

use crate::error::Result;
use crate::types::VersionRecord;

/// Separator between the newer and the older end of a revision range
pub const RANGE_SEPARATOR: &str = "...";

/// Options passed to every [`LogSource`] call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogOptions {
    /// Maximum number of messages to return
    pub commit_limit: Option<usize>,
    /// Opaque revision range: `from` or `from...to`
    pub revision_range: Option<String>,
    /// Revision ids to leave out
    pub excluded_revisions: Vec<String>,
}

impl LogOptions {
    /// Create options for a revision range
    pub fn for_range(revision_range: impl Into<String>) -> Self {
        Self {
            revision_range: Some(revision_range.into()),
            ..Self::default()
        }
    }

    /// Set the commit limit
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.commit_limit = limit;
        self
    }

    /// Set the excluded revisions
    pub fn with_excluded(mut self, excluded: Vec<String>) -> Self {
        self.excluded_revisions = excluded;
        self
    }

    /// Split the revision range into its newer and optional older end
    pub fn range_bounds(&self) -> Option<(&str, Option<&str>)> {
        self.revision_range.as_deref().map(split_revision_range)
    }
}

/// Split `from...to` into `("from", Some("to"))`, or `from` into `("from", None)`
pub fn split_revision_range(range: &str) -> (&str, Option<&str>) {
    match range.split_once(RANGE_SEPARATOR) {
        Some((from, to)) => (from, Some(to)),
        None => (range, None),
    }
}

/// Provider of raw commit messages
pub trait LogSource: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Return raw messages for the requested range, newest first
    fn get_log(&self, options: &LogOptions) -> Result<Vec<String>>;
}

/// Provider of release versions
pub trait VersionSource: Send + Sync {
    /// Return versions ordered newest first, optionally limited
    fn get_versions(&self, limit: Option<usize>) -> Result<Vec<VersionRecord>>;

    /// Return the most recent version, if any
    fn get_last_version(&self) -> Result<Option<VersionRecord>> {
        Ok(self.get_versions(Some(1))?.into_iter().next())
    }
}

/// Provider of free text shown above and below a version's section
pub trait SectionTextSource: Send + Sync {
    /// Header text for a version name
    fn header(&self, version: &str) -> Result<Option<String>>;

    /// Footer text for a version name
    fn footer(&self, version: &str) -> Result<Option<String>>;
}
