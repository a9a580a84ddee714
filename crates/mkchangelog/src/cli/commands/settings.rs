//! Settings command

use clap::Args;
use tracing::info;

use mkchangelog_core::config::default_config_toml;

use super::load_settings;
use crate::cli::Cli;

/// Show the effective settings
#[derive(Debug, Args)]
pub struct SettingsCommand {
    /// Print a default configuration file instead
    #[arg(short, long)]
    pub generate: bool,
}

impl SettingsCommand {
    /// Execute the settings command
    pub fn execute(&self, _cli: &Cli) -> anyhow::Result<()> {
        info!(generate = self.generate, "executing settings command");

        if self.generate {
            print!("{}", default_config_toml()?);
            return Ok(());
        }

        let cwd = std::env::current_dir()?;
        let settings = load_settings(&cwd)?;
        println!("{}", serde_json::to_string_pretty(&settings)?);
        Ok(())
    }
}
