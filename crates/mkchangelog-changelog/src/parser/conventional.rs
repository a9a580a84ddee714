//! Conventional Commits parser
//!
//! Parses commits following the Conventional Commits specification:
//! https://www.conventionalcommits.org/
//!
//! The recognized types come from [`Settings::commit_types`], so the first
//! line pattern is built per parser instead of once per process.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use mkchangelog_core::config::UNSPECIFIED_TYPE;
use mkchangelog_core::{ConfigError, InformationalKind, ParseError, Result, Settings};
use regex::Regex;

use super::CommitParser;
use crate::types::CommitRecord;

/// `word: summary` shape, used to tell unknown types from garbage
static TYPED_LINE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<type>\w+)(?:\([^)]*\))?!?: .+$").expect("Invalid regex")
});

/// Regex for reference trailer lines
static TRAILER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?P<action>[\w -]+): (?P<refs>.*)$").expect("Invalid regex")
});

const INITIAL_COMMIT: &str = "Initial commit";
const MERGE_PREFIX: &str = "Merge ";
const BREAKING_BLOCK: &str = "BREAKING CHANGE:";
const BREAKING_ACTIONS: [&str; 2] = ["BREAKING CHANGE", "BREAKING-CHANGE"];
const INDENT_CHARS: [char; 2] = [' ', '\t'];

/// Parser for Conventional Commits format
pub struct ConventionalParser {
    first_line: Regex,
    recognized: BTreeSet<String>,
    settings: Settings,
}

impl ConventionalParser {
    /// Create a parser for the types and reference aliases in `settings`
    pub fn new(settings: &Settings) -> Result<Self> {
        let mut types: Vec<&str> = settings.commit_types.keys().map(String::as_str).collect();
        types.push(UNSPECIFIED_TYPE);
        let alternatives = types
            .iter()
            .map(|t| regex::escape(t))
            .collect::<Vec<_>>()
            .join("|");

        let pattern = format!(
            r"^(?P<type>{})(?:\((?P<scope>[\w.-]+)\))?(?P<breaking>!)?: (?P<summary>.+)$",
            alternatives
        );
        let first_line = Regex::new(&pattern).map_err(|e| ConfigError::InvalidValue {
            field: "commit_types".to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            first_line,
            recognized: types.into_iter().map(String::from).collect(),
            settings: settings.clone(),
        })
    }

    fn classify_failure(&self, line: &str) -> ParseError {
        if line.starts_with(INITIAL_COMMIT) {
            return ParseError::Informational {
                kind: InformationalKind::InitialCommit,
                line: line.to_string(),
            };
        }
        if line.len() > MERGE_PREFIX.len() && line.starts_with(MERGE_PREFIX) {
            return ParseError::Informational {
                kind: InformationalKind::Merge,
                line: line.to_string(),
            };
        }
        if let Some(caps) = TYPED_LINE_REGEX.captures(line) {
            let commit_type = &caps["type"];
            if !self.recognized.contains(commit_type) {
                return ParseError::UnknownType {
                    commit_type: commit_type.to_string(),
                    line: line.to_string(),
                };
            }
        }
        ParseError::Malformed(line.to_string())
    }

    /// Collect reference trailers and breaking change descriptions
    fn parse_body(&self, body: &str) -> Body {
        let mut parsed = Body::default();
        let lines: Vec<&str> = body.lines().collect();
        let mut i = 0;

        while i < lines.len() {
            let line = lines[i];
            i += 1;

            if let Some(inline) = line.trim_start().strip_prefix(BREAKING_BLOCK) {
                let mut block = Vec::new();
                // The block runs to the next blank line, so indented
                // `Word: text` lines stay part of the description.
                while i < lines.len() && !lines[i].trim().is_empty() {
                    block.push(lines[i]);
                    i += 1;
                }

                let mut description = inline.trim().to_string();
                let rest = dedent(&block);
                if !rest.is_empty() {
                    if !description.is_empty() {
                        description.push('\n');
                    }
                    description.push_str(&rest);
                }
                let description = description.trim();
                if !description.is_empty() {
                    parsed.breaking.insert(description.to_string());
                }
                continue;
            }

            let Some(caps) = TRAILER_REGEX.captures(line) else {
                continue;
            };
            let action = self.settings.canonical_action(caps["action"].trim());
            let value = caps["refs"].trim();

            if BREAKING_ACTIONS.contains(&action) {
                if !value.is_empty() {
                    parsed.breaking.insert(value.to_string());
                }
                continue;
            }

            let ids: Vec<String> = value
                .split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(String::from)
                .collect();
            if !ids.is_empty() {
                parsed
                    .references
                    .entry(action.to_string())
                    .or_default()
                    .extend(ids);
            }
        }

        parsed
    }
}

#[derive(Default)]
struct Body {
    references: BTreeMap<String, BTreeSet<String>>,
    breaking: BTreeSet<String>,
}

impl CommitParser for ConventionalParser {
    fn parse(&self, message: &str) -> std::result::Result<CommitRecord, ParseError> {
        let message = message.trim();
        let (first_line, body) = match message.split_once('\n') {
            Some((first, body)) => (first.trim_end_matches('\r'), body),
            None => (message, ""),
        };

        let Some(caps) = self.first_line.captures(first_line) else {
            return Err(self.classify_failure(first_line));
        };

        let body = self.parse_body(body.trim_matches(|c| c == '\n' || c == '\r'));
        let bang = caps.name("breaking").is_some();

        Ok(CommitRecord {
            raw_message: message.to_string(),
            summary: caps["summary"].to_string(),
            change_type: caps["type"].to_string(),
            scope: caps.name("scope").map(|m| m.as_str().to_string()),
            is_breaking: bang || !body.breaking.is_empty(),
            breaking_descriptions: body.breaking,
            references: body.references,
        })
    }
}

/// Remove the common leading spaces and tabs of non-blank lines
fn dedent(lines: &[&str]) -> String {
    let indent = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start_matches(INDENT_CHARS).len())
        .min()
        .unwrap_or(0);

    // The prefix is ASCII, so `indent` is always a char boundary
    lines
        .iter()
        .map(|l| {
            let depth = (l.len() - l.trim_start_matches(INDENT_CHARS).len()).min(indent);
            l[depth..].trim_end()
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> ConventionalParser {
        ConventionalParser::new(&Settings::default()).unwrap()
    }

    #[test]
    fn test_parse_simple_feat() {
        let parsed = parser().parse("feat: add new feature").unwrap();

        assert_eq!(parsed.change_type, "feat");
        assert_eq!(parsed.summary, "add new feature");
        assert!(parsed.scope.is_none());
        assert!(!parsed.is_breaking);
        assert!(parsed.references.is_empty());
    }

    #[test]
    fn test_parse_with_scope() {
        let parsed = parser().parse("fix(parser.v2-beta): handle edge case").unwrap();

        assert_eq!(parsed.change_type, "fix");
        assert_eq!(parsed.scope.as_deref(), Some("parser.v2-beta"));
        assert_eq!(parsed.summary, "handle edge case");
    }

    #[test]
    fn test_parse_breaking_marker() {
        let parsed = parser().parse("refactor(core)!: major refactoring").unwrap();

        assert_eq!(parsed.change_type, "refactor");
        assert!(parsed.is_breaking);
        assert!(parsed.breaking_descriptions.is_empty());
    }

    #[test]
    fn test_summary_keeps_colons() {
        let parsed = parser().parse("docs: explain a: b mapping").unwrap();
        assert_eq!(parsed.summary, "explain a: b mapping");

        let parsed = parser().parse("fix(parser): stranger chars: x").unwrap();
        assert_eq!(parsed.scope.as_deref(), Some("parser"));
        assert_eq!(parsed.summary, "stranger chars: x");
    }

    #[test]
    fn test_unspecified_type_placeholder() {
        let parsed = parser().parse("¯\\_(ツ)_/¯: something happened").unwrap();
        assert_eq!(parsed.change_type, UNSPECIFIED_TYPE);
        assert_eq!(parsed.summary, "something happened");
    }

    #[test]
    fn test_unknown_type() {
        let err = parser().parse("feature: add things").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnknownType {
                commit_type: "feature".to_string(),
                line: "feature: add things".to_string(),
            }
        );
    }

    #[test]
    fn test_type_is_case_sensitive() {
        assert!(matches!(
            parser().parse("Feat: add things"),
            Err(ParseError::UnknownType { .. })
        ));
    }

    #[test]
    fn test_malformed() {
        assert!(matches!(
            parser().parse("Just a regular commit message"),
            Err(ParseError::Malformed(_))
        ));
        assert!(matches!(
            parser().parse("feat(bad scope): spaces are not allowed"),
            Err(ParseError::Malformed(_))
        ));
        assert!(matches!(parser().parse("feat:missing space"), Err(ParseError::Malformed(_))));
    }

    #[test]
    fn test_informational_lines() {
        let err = parser().parse("Initial commit.").unwrap_err();
        assert!(err.is_informational());

        let err = parser()
            .parse("Merge branch 'feature' into main\n\n* feat: hidden")
            .unwrap_err();
        assert_eq!(
            err,
            ParseError::Informational {
                kind: InformationalKind::Merge,
                line: "Merge branch 'feature' into main".to_string(),
            }
        );
    }

    #[test]
    fn test_references_with_aliases() {
        let parsed = parser()
            .parse(
                "fix: crash on start\n\nSome text.\n\nCloses: ISS-1, ISS-2\nFixed: ISS-3,\nRefs: #9\nClose: ISS-4",
            )
            .unwrap();

        let closes = parsed.references_for("Closes").unwrap();
        assert_eq!(
            closes.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["ISS-1", "ISS-2", "ISS-4"]
        );
        assert_eq!(parsed.references_for("Fixes").unwrap().len(), 1);
        assert!(parsed.references_for("Fixed").is_none());
        assert!(parsed.references_for("Refs").unwrap().contains("#9"));
    }

    #[test]
    fn test_references_with_configured_aliases() {
        let mut settings = Settings::default();
        settings
            .reference_aliases
            .insert("Resolves".to_string(), vec!["Resolved".to_string()]);
        let parsed = ConventionalParser::new(&settings)
            .unwrap()
            .parse("fix: crash\n\nResolved: ISS-5\nFixed: ISS-6")
            .unwrap();

        assert_eq!(settings.canonical_action("Resolved"), "Resolves");
        assert!(parsed.references_for("Resolves").unwrap().contains("ISS-5"));
        assert!(parsed.references_for("Fixes").unwrap().contains("ISS-6"));
        assert!(parsed.references_for("Resolved").is_none());
    }

    #[test]
    fn test_breaking_change_block() {
        let parsed = parser()
            .parse(
                "feat(admin): new login\n\nsome body\n\nBREAKING CHANGE:\n    someone\n    broken\n      here\n\nCloses: ISS-7",
            )
            .unwrap();

        assert!(parsed.is_breaking);
        assert_eq!(
            parsed.breaking_descriptions.iter().next().unwrap(),
            "someone\nbroken\n  here"
        );
        assert!(parsed.references_for("Closes").unwrap().contains("ISS-7"));
    }

    #[test]
    fn test_breaking_change_inline_until_blank_line() {
        let parsed = parser()
            .parse("feat: api\n\nBREAKING CHANGE: old endpoint removed\nuse /v2 instead\n\nRefs: #12")
            .unwrap();

        assert_eq!(
            parsed.breaking_descriptions.iter().next().unwrap(),
            "old endpoint removed\nuse /v2 instead"
        );
        assert!(!parsed.references.contains_key("BREAKING CHANGE"));
        assert!(parsed.references_for("Refs").unwrap().contains("#12"));
    }

    #[test]
    fn test_breaking_change_block_keeps_colon_lines() {
        let parsed = parser()
            .parse(
                "feat: api\n\nBREAKING CHANGE:\n    The config file moved.\n    Migration: run the upgrade script\n    before starting.\n",
            )
            .unwrap();

        assert_eq!(
            parsed.breaking_descriptions.iter().next().unwrap(),
            "The config file moved.\nMigration: run the upgrade script\nbefore starting."
        );
        assert!(parsed.references.is_empty());
    }

    #[test]
    fn test_breaking_change_block_with_unicode_whitespace() {
        let parsed = parser()
            .parse("feat: x\n\nBREAKING CHANGE:\n\u{3000}first line\n  second line")
            .unwrap();

        let description = parsed.breaking_descriptions.iter().next().unwrap();
        assert!(description.contains("first line"));
        assert!(description.contains("  second line"));
    }

    #[test]
    fn test_dedent_counts_only_spaces_and_tabs() {
        assert_eq!(dedent(&["\t  a", "\t    b"]), "a\n  b");
        assert_eq!(dedent(&["  x", "\u{3000}a"]), "x\n\u{3000}a");
        assert_eq!(dedent(&["   b", "  \u{2003}a"]), "b\n\u{2003}a");
    }

    #[test]
    fn test_breaking_change_trailer_forms_are_unioned() {
        let parsed = parser()
            .parse("fix: config\n\nBREAKING-CHANGE: keys renamed\nBREAKING CHANGE: defaults changed")
            .unwrap();

        assert!(parsed.is_breaking);
        assert_eq!(parsed.breaking_descriptions.len(), 2);
        assert!(parsed.breaking_descriptions.contains("keys renamed"));
        assert!(parsed.breaking_descriptions.contains("defaults changed"));
        assert!(parsed.references.is_empty());
    }

    #[test]
    fn test_message_is_trimmed() {
        let parsed = parser().parse("\n\nchore: tidy\n\n").unwrap();
        assert_eq!(parsed.raw_message, "chore: tidy");
    }

    #[test]
    fn test_custom_types() {
        let mut settings = Settings::default();
        settings
            .commit_types
            .insert("sec".to_string(), "Security".to_string());
        let parsed = ConventionalParser::new(&settings)
            .unwrap()
            .parse("sec: rotate keys")
            .unwrap();
        assert_eq!(parsed.change_type, "sec");
        assert!(parser().parse("sec: rotate keys").is_err());
    }
}
