//! Changelog renderers

mod json;
mod markdown;
mod registry;
mod rst;
mod template;
mod text;

pub use json::JsonRenderer;
pub use markdown::MarkdownRenderer;
pub use registry::{RendererRegistry, TEMPLATES_DIR};
pub use rst::RstRenderer;
pub use template::{TemplateFilters, TemplateRenderer};
pub use text::TextRenderer;

use mkchangelog_core::Result;

use crate::types::{Changelog, ChangelogSection, CommitRecord};

/// Date format used in version headings
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Trait for changelog renderers
pub trait ChangelogRenderer: Send + Sync {
    /// Name the renderer is selected by
    fn name(&self) -> &str;

    /// Render a whole changelog
    fn render(&self, changelog: &Changelog) -> Result<String>;

    /// Render a single section
    fn render_section(&self, section: &ChangelogSection) -> Result<String>;
}

/// Version heading text: name and release date
pub(crate) fn version_heading(section: &ChangelogSection) -> String {
    format!(
        "{} ({})",
        section.version.name,
        section.version.date.format(DATE_FORMAT)
    )
}

/// Breaking change lines of a commit; the summary when no description was given
pub(crate) fn breaking_notes(commit: &CommitRecord) -> Vec<String> {
    if commit.breaking_descriptions.is_empty() {
        vec![commit.summary.clone()]
    } else {
        commit.breaking_descriptions.iter().cloned().collect()
    }
}

/// `line` followed by a row of `ch` as wide as the line
pub(crate) fn underline(line: &str, ch: &str) -> String {
    format!("{}\n{}", line, ch.repeat(line.chars().count()))
}
