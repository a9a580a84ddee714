//! Post-parse commit filters
//!
//! Filters run in registration order over the parsed records of a
//! section, before grouping.

use crate::types::CommitRecord;

/// A post-parse filter hook
pub type CommitFilter = Box<dyn Fn(Vec<CommitRecord>) -> Vec<CommitRecord> + Send + Sync>;

/// Drop commits whose scope is one of `scopes`
pub fn hide_scopes(scopes: Vec<String>) -> CommitFilter {
    Box::new(move |commits| {
        if scopes.is_empty() {
            return commits;
        }
        commits
            .into_iter()
            .filter(|c| c.scope.as_ref().map_or(true, |s| !scopes.contains(s)))
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{CommitParser, ConventionalParser};
    use mkchangelog_core::Settings;

    #[test]
    fn test_hide_scopes() {
        let parser = ConventionalParser::new(&Settings::default()).unwrap();
        let commits = vec![
            parser.parse("feat(hidden_scope): secret").unwrap(),
            parser.parse("feat(core): visible").unwrap(),
            parser.parse("fix: no scope").unwrap(),
        ];

        let filter = hide_scopes(vec!["hidden_scope".to_string()]);
        let kept = filter(commits);
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|c| c.scope.as_deref() != Some("hidden_scope")));
    }

    #[test]
    fn test_hide_no_scopes() {
        let parser = ConventionalParser::new(&Settings::default()).unwrap();
        let commits = vec![parser.parse("feat(any): thing").unwrap()];
        assert_eq!(hide_scopes(Vec::new())(commits).len(), 1);
    }
}
