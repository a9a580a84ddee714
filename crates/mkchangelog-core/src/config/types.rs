//! Configuration types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Token standing for an unspecified commit type
pub const UNSPECIFIED_TYPE: &str = "¯\\_(ツ)_/¯";

/// Type filter token that keeps every commit type
pub const ALL_TYPES: &str = "all";

/// Settings for changelog generation
///
/// Built once at startup (defaults, then config file, then command line)
/// and handed to the generator by value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Output file; `-` writes to stdout
    pub output: PathBuf,

    /// Renderer name (markdown, rst, txt, json) or template path
    pub template: String,

    /// Commits limit per release
    pub commit_limit: usize,

    /// Include unreleased changes
    pub unreleased: bool,

    /// Display name of the unreleased section
    pub unreleased_version: String,

    /// Hide releases with no typed changes
    pub hide_empty_releases: bool,

    /// Changelog document title
    pub changelog_title: String,

    /// Version tag prefix
    pub tag_prefix: String,

    /// Commit types shown by default; `all` shows every type
    pub commit_types_list: Vec<String>,

    /// Priority of types missing from `commit_types_priorities`
    pub commit_type_default_priority: i32,

    /// Revisions skipped by the git log source
    pub ignore_revs: Vec<String>,

    /// Commits with one of these scopes are hidden from the changelog
    pub hidden_scopes: Vec<String>,

    /// Fail on the first malformed commit message instead of skipping it
    pub strict: bool,

    /// Group ordering, higher first
    pub commit_types_priorities: BTreeMap<String, i32>,

    /// Recognized commit types and their display names
    pub commit_types: BTreeMap<String, String>,

    /// Canonical reference action and the spellings folded into it
    pub reference_aliases: BTreeMap<String, Vec<String>>,
}

impl Default for Settings {
    fn default() -> Self {
        let commit_types = [
            ("build", "Build"),
            ("chore", "Chore"),
            ("ci", "CI"),
            ("dev", "Dev"),
            ("docs", "Docs"),
            ("feat", "Features"),
            ("fix", "Fixes"),
            ("perf", "Performance"),
            ("refactor", "Refactors"),
            ("revert", "Reverts"),
            ("style", "Style"),
            ("test", "Test"),
            ("translations", "Translations"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let commit_types_priorities = [("feat", 40), ("fix", 30), ("refactor", 20)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();

        let reference_aliases = [
            ("Closes", ["Close", "Closed"]),
            ("Fixes", ["Fix", "Fixed"]),
            ("Resolves", ["Resolve", "Resolved"]),
            ("Relates", ["Relate", "Related"]),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.iter().map(|s| s.to_string()).collect()))
        .collect();

        Self {
            output: PathBuf::from("CHANGELOG.md"),
            template: "markdown".to_string(),
            commit_limit: 100,
            unreleased: false,
            unreleased_version: "Unreleased".to_string(),
            hide_empty_releases: false,
            changelog_title: "Changelog".to_string(),
            tag_prefix: "v".to_string(),
            commit_types_list: vec!["fix".to_string(), "feat".to_string()],
            commit_type_default_priority: 10,
            ignore_revs: Vec::new(),
            hidden_scopes: Vec::new(),
            strict: false,
            commit_types_priorities,
            commit_types,
            reference_aliases,
        }
    }
}

impl Settings {
    /// Whether `commit_type` is a configured type or the unspecified token
    pub fn is_recognized_type(&self, commit_type: &str) -> bool {
        commit_type == UNSPECIFIED_TYPE || self.commit_types.contains_key(commit_type)
    }

    /// Display name for a commit type, capitalized key when unconfigured
    pub fn display_name(&self, commit_type: &str) -> String {
        self.commit_types
            .get(commit_type)
            .cloned()
            .unwrap_or_else(|| capitalize(commit_type))
    }

    /// Sort priority for a commit type
    pub fn priority(&self, commit_type: &str) -> i32 {
        self.commit_types_priorities
            .get(commit_type)
            .copied()
            .unwrap_or(self.commit_type_default_priority)
    }

    /// Fold a reference action through the alias table
    pub fn canonical_action<'a>(&'a self, action: &'a str) -> &'a str {
        self.reference_aliases
            .iter()
            .find(|(_, aliases)| aliases.iter().any(|a| a == action))
            .map(|(canonical, _)| canonical.as_str())
            .unwrap_or(action)
    }

    /// Default type filter, `None` when every type is shown
    pub fn default_type_filter(&self) -> Option<Vec<String>> {
        if self.commit_types_list.is_empty()
            || self.commit_types_list.iter().any(|t| t == ALL_TYPES)
        {
            None
        } else {
            Some(self.commit_types_list.clone())
        }
    }
}

/// Uppercase the first character, lowercase the rest
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
