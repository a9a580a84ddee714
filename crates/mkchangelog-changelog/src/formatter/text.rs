//! Plain text changelog renderer

use mkchangelog_core::Result;

use super::{breaking_notes, underline, version_heading, ChangelogRenderer};
use crate::types::{Changelog, ChangelogSection};

/// Plain text changelog renderer
#[derive(Debug, Clone, Default)]
pub struct TextRenderer;

impl TextRenderer {
    /// Create a new text renderer
    pub fn new() -> Self {
        Self
    }
}

impl ChangelogRenderer for TextRenderer {
    fn name(&self) -> &str {
        "txt"
    }

    fn render(&self, changelog: &Changelog) -> Result<String> {
        let mut output = format!("{}\n\n", underline(&changelog.title, "="));
        for section in &changelog.sections {
            output.push_str(&self.render_section(section)?);
        }
        Ok(output)
    }

    fn render_section(&self, section: &ChangelogSection) -> Result<String> {
        let mut output = format!("{}\n\n", underline(&version_heading(section), "-"));

        if !section.header.is_empty() {
            output.push_str(&format!("{}\n\n", section.header));
        }

        for group in &section.changes {
            output.push_str(&format!("{}:\n", group.title));
            for commit in &group.commits {
                match &commit.scope {
                    Some(scope) => output.push_str(&format!("- {}: {}\n", scope, commit.summary)),
                    None => output.push_str(&format!("- {}\n", commit.summary)),
                }
            }
            output.push('\n');
        }

        if !section.reverts.is_empty() {
            output.push_str("Reverts:\n");
            for commit in &section.reverts {
                output.push_str(&format!("- {}\n", commit.summary));
            }
            output.push('\n');
        }

        if !section.breaking_changes.is_empty() {
            output.push_str("> ⚠ BREAKING CHANGES\n");
            for commit in &section.breaking_changes {
                for note in breaking_notes(commit) {
                    output.push_str(&format!("- {}\n", note));
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
