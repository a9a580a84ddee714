//! Changes command

use chrono::Utc;
use clap::Args;
use tracing::info;

use mkchangelog_changelog::{ChangelogGenerator, RendererRegistry};
use mkchangelog_core::VersionRecord;

use super::load_settings;
use crate::cli::Cli;

/// Show the changes between two revisions
#[derive(Debug, Args)]
pub struct ChangesCommand {
    /// Heading of the rendered section
    #[arg(long, default_value = "Changes")]
    pub header: String,

    /// Maximum number of commits read
    #[arg(short = 'm', long, visible_alias = "commit-limit", default_value_t = 1000)]
    pub max_count: usize,

    /// Newest revision (tag or hash)
    #[arg(long, default_value = "HEAD")]
    pub rev_from: String,

    /// Oldest revision (tag or hash); unbounded when absent
    #[arg(long)]
    pub rev_to: Option<String>,

    /// Commit types to show, e.g. feat,fix or all
    #[arg(short = 't', long, value_delimiter = ',', num_args = 1..)]
    pub types: Option<Vec<String>>,

    /// Renderer (markdown, rst, txt, json) or path to a template
    #[arg(short, long)]
    pub renderer: Option<String>,
}

impl ChangesCommand {
    /// Execute the changes command
    pub fn execute(&self, _cli: &Cli) -> anyhow::Result<()> {
        info!(
            rev_from = %self.rev_from,
            rev_to = ?self.rev_to,
            types = ?self.types,
            "executing changes command"
        );
        let cwd = std::env::current_dir()?;
        let settings = load_settings(&cwd)?;

        let type_filter = match &self.types {
            Some(types) => Some(types.clone()),
            None => settings.default_type_filter(),
        };
        let renderer_name = self
            .renderer
            .clone()
            .unwrap_or_else(|| settings.template.clone());

        let from = revision(&self.rev_from);
        let to = self.rev_to.as_deref().map(revision);

        let generator = ChangelogGenerator::for_repository(settings.clone(), &cwd)?;
        let mut section = generator.build_section(
            Some(&from),
            to.as_ref(),
            type_filter.as_deref(),
            Some(self.max_count),
        )?;
        section.version.name = self.header.clone();

        let registry = RendererRegistry::new(settings);
        let renderer = registry.resolve(&renderer_name, &cwd)?;
        print!("{}", renderer.render_section(&section)?);
        Ok(())
    }
}

/// Revision as a version record; revisions need not be semantic versions
fn revision(name: &str) -> VersionRecord {
    VersionRecord::new(name, Utc::now(), None)
}
