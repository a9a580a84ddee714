//! Default configuration values

use crate::error::{ConfigError, Result};

use super::types::Settings;

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = ".mkchangelog.toml";

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = ".mkchangelog.yaml";

/// Directory holding per-version files, templates and staged messages
pub const DATA_DIR: &str = ".mkchangelog.d";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_TOML,
        "mkchangelog.toml",
        DEFAULT_CONFIG_YAML,
        "mkchangelog.yaml",
    ]
}

/// Generate the default configuration as TOML
pub fn default_config_toml() -> Result<String> {
    let body = toml::to_string_pretty(&Settings::default()).map_err(ConfigError::TomlSerialize)?;
    Ok(format!("{}{}", DEFAULT_CONFIG_HEADER, body))
}

/// Comment placed above generated configuration files
pub const DEFAULT_CONFIG_HEADER: &str = "# mkchangelog configuration
# Save as .mkchangelog.toml in the repository root.

";
