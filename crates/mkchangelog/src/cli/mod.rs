//! CLI definition and command handling

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

use commands::{BumpCommand, ChangesCommand, CompletionsCommand, GenerateCommand, SettingsCommand};

/// mkchangelog - changelog generator for conventional commits
#[derive(Debug, Parser)]
#[command(name = "mkchangelog")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate the changelog
    #[command(visible_aliases = ["g", "gen"])]
    Generate(GenerateCommand),

    /// Show the changes between two revisions
    #[command(visible_alias = "c")]
    Changes(ChangesCommand),

    /// Show the next version and write its changelog
    #[command(visible_alias = "b")]
    Bump(BumpCommand),

    /// Show the effective settings
    Settings(SettingsCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> anyhow::Result<()> {
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)?;
        }

        match self.command {
            Commands::Generate(ref cmd) => cmd.execute(&self),
            Commands::Changes(ref cmd) => cmd.execute(&self),
            Commands::Bump(ref cmd) => cmd.execute(&self),
            Commands::Settings(ref cmd) => cmd.execute(&self),
            Commands::Completions(ref cmd) => cmd.execute(&self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["mkchangelog", "settings", "--format", "json", "-v"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(cli.command, Commands::Settings(_)));
    }

    #[test]
    fn test_command_aliases() {
        let cli = Cli::try_parse_from(["mkchangelog", "gen", "--stdout"]).unwrap();
        assert!(matches!(cli.command, Commands::Generate(_)));
        let cli = Cli::try_parse_from(["mkchangelog", "b", "--dry-run"]).unwrap();
        assert!(matches!(cli.command, Commands::Bump(_)));
    }
}
