//! Markdown changelog renderer

use tracing::{debug, instrument};

use mkchangelog_core::Result;

use super::{breaking_notes, version_heading, ChangelogRenderer};
use crate::types::{Changelog, ChangelogSection, CommitRecord};

/// Markdown changelog renderer
#[derive(Debug, Clone, Default)]
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self
    }

    fn commit_line(commit: &CommitRecord) -> String {
        let mut line = match &commit.scope {
            Some(scope) => format!("* **{}:** {}", scope, commit.summary),
            None => format!("* {}", commit.summary),
        };
        if let Some(closes) = commit.references_for("Closes") {
            let ids: Vec<&str> = closes.iter().map(String::as_str).collect();
            line.push_str(&format!(" (closes {})", ids.join(", ")));
        }
        line
    }
}

impl ChangelogRenderer for MarkdownRenderer {
    fn name(&self) -> &str {
        "markdown"
    }

    #[instrument(skip(self, changelog), fields(section_count = changelog.sections.len()))]
    fn render(&self, changelog: &Changelog) -> Result<String> {
        let mut output = format!("# {}\n\n", changelog.title);
        for section in &changelog.sections {
            output.push_str(&self.render_section(section)?);
        }
        debug!(output_len = output.len(), "markdown changelog rendered");
        Ok(output)
    }

    fn render_section(&self, section: &ChangelogSection) -> Result<String> {
        let mut output = format!("## {}\n\n", version_heading(section));

        if !section.header.is_empty() {
            output.push_str(&format!("{}\n\n", section.header));
        }

        for group in &section.changes {
            output.push_str(&format!("### {}\n\n", group.title));
            for commit in &group.commits {
                output.push_str(&Self::commit_line(commit));
                output.push('\n');
            }
            output.push('\n');
        }

        if !section.reverts.is_empty() {
            output.push_str("### Reverts\n\n");
            for commit in &section.reverts {
                output.push_str(&format!("* {}\n", commit.summary));
            }
            output.push('\n');
        }

        if !section.breaking_changes.is_empty() {
            output.push_str("### BREAKING CHANGES\n\n");
            for commit in &section.breaking_changes {
                for note in breaking_notes(commit) {
                    let note = note.replace('\n', " ");
                    match &commit.scope {
                        Some(scope) => output.push_str(&format!("* **{}**: {}\n", scope, note)),
                        None => output.push_str(&format!("* {}\n", note)),
                    }
                }
            }
            output.push('\n');
        }

        if !section.footer.is_empty() {
            output.push_str(&format!("{}\n\n", section.footer));
        }

        Ok(output)
    }
}
