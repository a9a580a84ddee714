//! Generate command

use clap::Args;
use tracing::info;

use mkchangelog_changelog::{ChangelogGenerator, GenerateOptions};

use super::{render_changelog, write_output, GenerateArgs};
use crate::cli::Cli;

/// Generate the changelog
#[derive(Debug, Args)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub args: GenerateArgs,
}

impl GenerateCommand {
    /// Execute the generate command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        let cwd = std::env::current_dir()?;
        let settings = self.args.settings(&cwd)?;
        info!(
            template = %settings.template,
            commit_types = ?settings.commit_types_list,
            unreleased = settings.unreleased,
            unreleased_version = %settings.unreleased_version,
            hide_empty_releases = settings.hide_empty_releases,
            "executing generate command"
        );

        let options = GenerateOptions::from_settings(&settings);
        let output_path = settings.output.clone();
        let generator = ChangelogGenerator::for_repository(settings, &cwd)?;
        let changelog = render_changelog(&generator, &cwd, &options)?;

        write_output(&changelog, &output_path, self.args.stdout, cli)
    }
}
