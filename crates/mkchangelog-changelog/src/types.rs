//! Changelog types

use std::collections::{BTreeMap, BTreeSet};

use mkchangelog_core::VersionRecord;
use serde::Serialize;

/// Commit type whose records are listed as reverts
pub const REVERT_TYPE: &str = "revert";

/// A commit message parsed from conventional commit format
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitRecord {
    /// Whole message, surrounding blank lines removed
    pub raw_message: String,
    /// First line text after the type/scope prefix
    pub summary: String,
    /// Recognized commit type (feat, fix, ...)
    pub change_type: String,
    /// Scope in parentheses, if any
    pub scope: Option<String>,
    /// Whether this is a breaking change
    pub is_breaking: bool,
    /// Breaking change descriptions from the body
    pub breaking_descriptions: BTreeSet<String>,
    /// Reference trailers, action name to ids
    pub references: BTreeMap<String, BTreeSet<String>>,
}

impl CommitRecord {
    /// Whether the commit reverts an earlier change
    pub fn is_revert(&self) -> bool {
        self.change_type == REVERT_TYPE
    }

    /// Ids referenced with the given action
    pub fn references_for(&self, action: &str) -> Option<&BTreeSet<String>> {
        self.references.get(action)
    }
}

/// Commits of one change type, shown under a display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeGroup {
    /// Type key of the group (the first one when display names merge)
    pub commit_type: String,
    /// Display name
    pub title: String,
    /// Commits sorted by scope
    pub commits: Vec<CommitRecord>,
}

impl ChangeGroup {
    /// Create an empty group
    pub fn new(commit_type: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            commit_type: commit_type.into(),
            title: title.into(),
            commits: Vec::new(),
        }
    }

    /// Check if group is empty
    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }
}

/// The changes of one release
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangelogSection {
    pub version: VersionRecord,
    /// Groups in priority order
    pub changes: Vec<ChangeGroup>,
    pub reverts: Vec<CommitRecord>,
    pub breaking_changes: Vec<CommitRecord>,
    /// Initial and merge commit lines seen in the range
    pub informational: Vec<String>,
    pub header: String,
    pub footer: String,
}

impl ChangelogSection {
    /// Create a section without changes
    pub fn new(version: VersionRecord) -> Self {
        Self {
            version,
            changes: Vec::new(),
            reverts: Vec::new(),
            breaking_changes: Vec::new(),
            informational: Vec::new(),
            header: String::new(),
            footer: String::new(),
        }
    }

    /// Look up a group by display name
    pub fn get(&self, title: &str) -> Option<&ChangeGroup> {
        self.changes.iter().find(|g| g.title == title)
    }

    /// Display names in order
    pub fn titles(&self) -> Vec<&str> {
        self.changes.iter().map(|g| g.title.as_str()).collect()
    }

    /// Whether the section has no typed changes
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

/// A whole changelog document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Changelog {
    pub title: String,
    /// Sections, newest first
    pub sections: Vec<ChangelogSection>,
}

impl Changelog {
    /// Create a changelog
    pub fn new(title: impl Into<String>, sections: Vec<ChangelogSection>) -> Self {
        Self {
            title: title.into(),
            sections,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(change_type: &str, summary: &str) -> CommitRecord {
        CommitRecord {
            raw_message: format!("{}: {}", change_type, summary),
            summary: summary.to_string(),
            change_type: change_type.to_string(),
            scope: None,
            is_breaking: false,
            breaking_descriptions: BTreeSet::new(),
            references: BTreeMap::new(),
        }
    }

    #[test]
    fn test_section_lookup() {
        let mut section = ChangelogSection::new(VersionRecord::unreleased());
        assert!(section.is_empty());

        let mut group = ChangeGroup::new("feat", "Features");
        group.commits.push(record("feat", "add thing"));
        section.changes.push(group);

        assert!(!section.is_empty());
        assert_eq!(section.get("Features").unwrap().commits.len(), 1);
        assert!(section.get("Fixes").is_none());
        assert_eq!(section.titles(), vec!["Features"]);
    }

    #[test]
    fn test_revert_record() {
        assert!(record("revert", "undo").is_revert());
        assert!(!record("fix", "undo").is_revert());
    }
}
