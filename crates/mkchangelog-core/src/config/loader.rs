//! Configuration loading

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{ConfigError, MkChangelogError, Result};

use super::defaults::config_file_names;
use super::types::Settings;
use super::validation::validate_settings;

/// Load settings from a file
pub fn load_config(path: &Path) -> Result<Settings> {
    let format = if path.extension().is_some_and(|e| e == "toml") {
        "TOML"
    } else {
        "YAML"
    };
    info!(path = %path.display(), format, "loading config");

    let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

    let settings: Settings = if format == "TOML" {
        toml::from_str(&content).map_err(ConfigError::TomlError)?
    } else {
        serde_yaml::from_str(&content).map_err(ConfigError::YamlError)?
    };

    validate_settings(&settings)?;
    debug!(path = %path.display(), "config loaded and validated");
    Ok(settings)
}

/// Find configuration file in directory or parent directories.
///
/// The first match wins. Parents are walked until the filesystem root.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    debug!(start_dir = %start_dir.display(), "searching for config file");
    let mut current = start_dir.to_path_buf();

    loop {
        for name in config_file_names() {
            let config_path = current.join(name);
            if config_path.exists() {
                info!(path = %config_path.display(), "found config file");
                return Some(config_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    debug!("no config file found");
    None
}

/// Load settings from directory (searching parent directories)
pub fn load_config_from_dir(dir: &Path) -> Result<(Settings, PathBuf)> {
    let config_path = find_config(dir).ok_or_else(|| ConfigError::NotFound(dir.to_path_buf()))?;

    let settings = load_config(&config_path)?;
    Ok((settings, config_path))
}

/// Load settings or fall back to defaults when no config file exists.
///
/// A config file that exists but fails to parse or validate is an error.
pub fn load_config_or_default(dir: &Path) -> Result<(Settings, Option<PathBuf>)> {
    match load_config_from_dir(dir) {
        Ok((settings, path)) => Ok((settings, Some(path))),
        Err(MkChangelogError::Config(ConfigError::NotFound(_))) => {
            debug!(dir = %dir.display(), "no config found, using defaults");
            Ok((Settings::default(), None))
        }
        Err(e) => Err(e),
    }
}
