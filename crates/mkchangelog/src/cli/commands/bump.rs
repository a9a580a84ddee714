//! Bump command
//!
//! Computes the next version from the commits since the last release and
//! writes the changelog with the unreleased changes filed under it. Never
//! commits or tags.

use chrono::Utc;
use clap::Args;
use console::style;
use dialoguer::Confirm;
use tracing::info;

use mkchangelog_changelog::{next_version, BumpType, ChangelogGenerator, GenerateOptions};
use mkchangelog_core::{MkChangelogError, VersionRecord};

use super::{render_changelog, write_output, GenerateArgs};
use crate::cli::{output, Cli, OutputFormat};

/// Show the next version and write its changelog
#[derive(Debug, Args)]
pub struct BumpCommand {
    #[command(flatten)]
    pub args: GenerateArgs,

    /// Use this version (without prefix) as the next version
    #[arg(long, value_name = "VERSION")]
    pub latest_version: Option<String>,

    /// Only print the current and next version
    #[arg(long)]
    pub dry_run: bool,

    /// Only print the next version (for scripting)
    #[arg(long, conflicts_with = "show_current_version")]
    pub show_next_version: bool,

    /// Only print the current version (for scripting)
    #[arg(long)]
    pub show_current_version: bool,

    /// Skip confirmation prompts
    #[arg(short, long)]
    pub yes: bool,
}

impl BumpCommand {
    /// Execute the bump command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(
            latest_version = ?self.latest_version,
            dry_run = self.dry_run,
            "executing bump command"
        );
        let cwd = std::env::current_dir()?;
        let settings = self.args.settings(&cwd)?;
        let prefix = settings.tag_prefix.clone();
        let output_path = settings.output.clone();
        let generator = ChangelogGenerator::for_repository(settings, &cwd)?;

        let (current, range) = match generator.version_source().get_last_version()? {
            Some(version) => {
                let range = format!("HEAD...{}", version.name);
                (version, range)
            }
            None => (
                VersionRecord::new(format!("{}0.0.0", prefix), Utc::now(), None),
                "HEAD".to_string(),
            ),
        };

        let commits = generator.commits(Some(&range), Some(generator.settings().commit_limit))?;
        let bump = BumpType::from_commits(&commits);
        let next = match &self.latest_version {
            Some(version) => Some(
                VersionRecord::from_name(&prefix, format!("{}{}", prefix, version))
                    .map_err(MkChangelogError::from)?,
            ),
            None => next_version(&prefix, &current.name, &commits).map_err(MkChangelogError::from)?,
        };

        if self.show_next_version {
            if let Some(next) = &next {
                println!("{}", next.name);
            }
            return Ok(());
        }
        if self.show_current_version {
            println!("{}", current.name);
            return Ok(());
        }

        if cli.format == OutputFormat::Json {
            let report = serde_json::json!({
                "current": current.name,
                "next": next.as_ref().map(|v| v.name.as_str()),
                "bump_type": bump.to_string(),
                "commits": commits.len(),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else if !cli.quiet {
            println!("{}", output::version_line("Current version", &current));
            if let Some(next) = &next {
                println!("{}", output::version_line("Next version", next));
                println!("{}", output::key_value("Bump type", &bump.to_string()));
            }
        }

        let Some(next) = next else {
            output::warning("No next version available");
            return Ok(());
        };

        if self.dry_run {
            return Ok(());
        }

        let mut options = GenerateOptions::from_settings(generator.settings());
        options.include_unreleased = true;
        options.unreleased_label = next.name.clone();
        let changelog = render_changelog(&generator, &cwd, &options)?;

        if self.args.stdout {
            return write_output(&changelog, &output_path, true, cli);
        }

        if !self.yes
            && Confirm::new()
                .with_prompt("Show next version changelog?")
                .default(false)
                .interact()?
        {
            println!("{}", changelog);
        }

        if !self.yes
            && !Confirm::new()
                .with_prompt(format!("Generate {}?", output_path.display()))
                .default(false)
                .interact()?
        {
            println!("{}", style("Exiting").dim());
            return Ok(());
        }

        write_output(&changelog, &output_path, false, cli)
    }
}
