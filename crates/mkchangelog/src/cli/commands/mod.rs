//! CLI commands

mod bump;
mod changes;
mod completions;
mod generate;
mod settings;

pub use bump::BumpCommand;
pub use changes::ChangesCommand;
pub use completions::CompletionsCommand;
pub use generate::GenerateCommand;
pub use settings::SettingsCommand;

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use tracing::{debug, info};

use mkchangelog_changelog::{ChangelogGenerator, GenerateOptions, RendererRegistry};
use mkchangelog_core::config::{load_config_or_default, validate_settings};
use mkchangelog_core::Settings;

use crate::cli::{output, Cli};

/// Load settings for `dir`, falling back to defaults without a config file
pub(crate) fn load_settings(dir: &Path) -> anyhow::Result<Settings> {
    let (settings, path) = load_config_or_default(dir)?;
    match path {
        Some(path) => debug!(path = %path.display(), "loaded config"),
        None => debug!("using default settings"),
    }
    Ok(settings)
}

/// Changelog options shared by `generate` and `bump`
#[derive(Debug, Clone, Default, Args)]
pub struct GenerateArgs {
    /// Output file, `-` for stdout (default: CHANGELOG.md)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Renderer (markdown, rst, txt, json) or path to a template
    #[arg(short, long)]
    pub template: Option<String>,

    /// Number of commits read per release (default: 100)
    #[arg(short = 'l', long)]
    pub commit_limit: Option<usize>,

    /// Include unreleased changes
    #[arg(short, long)]
    pub unreleased: bool,

    /// Name of the unreleased section (default: Unreleased)
    #[arg(long, value_name = "VERSION")]
    pub unreleased_version: Option<String>,

    /// Skip releases without changes
    #[arg(long)]
    pub hide_empty_releases: bool,

    /// Changelog title (default: Changelog)
    #[arg(long, value_name = "TITLE")]
    pub changelog_title: Option<String>,

    /// Version tag prefix (default: v)
    #[arg(long, value_name = "PREFIX")]
    pub tag_prefix: Option<String>,

    /// Commit types to show, e.g. feat,fix or all
    #[arg(long, value_name = "TYPES", value_delimiter = ',', num_args = 1..)]
    pub commit_types: Option<Vec<String>>,

    /// Print the changelog instead of writing the output file
    #[arg(short, long)]
    pub stdout: bool,
}

impl GenerateArgs {
    /// Override settings with the flags that were given
    pub fn apply(&self, settings: &mut Settings) -> anyhow::Result<()> {
        if let Some(output) = &self.output {
            settings.output = output.clone();
        }
        if let Some(template) = &self.template {
            settings.template = template.clone();
        }
        if let Some(limit) = self.commit_limit {
            settings.commit_limit = limit;
        }
        if self.unreleased {
            settings.unreleased = true;
        }
        if let Some(name) = &self.unreleased_version {
            settings.unreleased_version = name.clone();
        }
        if self.hide_empty_releases {
            settings.hide_empty_releases = true;
        }
        if let Some(title) = &self.changelog_title {
            settings.changelog_title = title.clone();
        }
        if let Some(prefix) = &self.tag_prefix {
            settings.tag_prefix = prefix.clone();
        }
        if let Some(types) = &self.commit_types {
            settings.commit_types_list = types.clone();
        }
        validate_settings(settings)?;
        Ok(())
    }

    /// Settings for `dir` with these flags applied
    pub fn settings(&self, dir: &Path) -> anyhow::Result<Settings> {
        let mut settings = load_settings(dir)?;
        self.apply(&mut settings)?;
        Ok(settings)
    }
}

/// Generate the changelog and render it with the configured renderer
pub(crate) fn render_changelog(
    generator: &ChangelogGenerator,
    dir: &Path,
    options: &GenerateOptions,
) -> anyhow::Result<String> {
    let settings = generator.settings();
    let changelog = generator.generate(options)?;
    let registry = RendererRegistry::new(settings.clone());
    let renderer = registry.resolve(&settings.template, dir)?;
    info!(renderer = renderer.name(), sections = changelog.sections.len(), "rendering changelog");
    Ok(renderer.render(&changelog)?)
}

/// Write rendered output to stdout or to the configured file
pub(crate) fn write_output(
    content: &str,
    path: &Path,
    to_stdout: bool,
    cli: &Cli,
) -> anyhow::Result<()> {
    if to_stdout || path == Path::new("-") {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(content.as_bytes())?;
        stdout.flush()?;
        return Ok(());
    }

    std::fs::write(path, content)?;
    info!(path = %path.display(), bytes = content.len(), "changelog written");
    if !cli.quiet {
        output::written("Changelog", path);
    }
    Ok(())
}
