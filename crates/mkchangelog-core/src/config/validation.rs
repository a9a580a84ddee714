//! Configuration validation

use tracing::{debug, warn};

use crate::error::{ConfigError, Result};

use super::types::{Settings, ALL_TYPES};

/// Validate settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    debug!("validating configuration");
    validate_general(settings)?;
    validate_commit_types(settings)?;
    validate_reference_aliases(settings)?;
    debug!("configuration validation passed");
    Ok(())
}

fn validate_general(settings: &Settings) -> Result<()> {
    if settings.commit_limit == 0 {
        return Err(ConfigError::InvalidValue {
            field: "commit_limit".to_string(),
            message: "must be greater than zero".to_string(),
        }
        .into());
    }

    if settings.template.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "template".to_string(),
            message: "template cannot be empty".to_string(),
        }
        .into());
    }

    if settings.unreleased_version.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "unreleased_version".to_string(),
            message: "unreleased version name cannot be empty".to_string(),
        }
        .into());
    }

    Ok(())
}

fn validate_commit_types(settings: &Settings) -> Result<()> {
    if settings.commit_types.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "commit_types".to_string(),
            message: "at least one commit type is required".to_string(),
        }
        .into());
    }

    for name in settings.commit_types.keys() {
        let valid = !name.is_empty()
            && name != ALL_TYPES
            && name
                .chars()
                .all(|c| !c.is_whitespace() && !matches!(c, '(' | ')' | ':' | '!'));
        if !valid {
            return Err(ConfigError::InvalidValue {
                field: format!("commit_types.{}", name),
                message: "type names cannot be 'all', empty, or contain whitespace, parentheses, ':' or '!'"
                    .to_string(),
            }
            .into());
        }
    }

    for listed in &settings.commit_types_list {
        if listed != ALL_TYPES && !settings.is_recognized_type(listed) {
            return Err(ConfigError::InvalidValue {
                field: "commit_types_list".to_string(),
                message: format!("unknown commit type '{}'", listed),
            }
            .into());
        }
    }

    for prioritized in settings.commit_types_priorities.keys() {
        if !settings.is_recognized_type(prioritized) {
            warn!(commit_type = %prioritized, "priority configured for an unknown commit type");
        }
    }

    Ok(())
}

fn validate_reference_aliases(settings: &Settings) -> Result<()> {
    for (canonical, aliases) in &settings.reference_aliases {
        if canonical.trim().is_empty() || aliases.iter().any(|a| a.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: format!("reference_aliases.{}", canonical),
                message: "reference actions cannot be empty".to_string(),
            }
            .into());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_settings() {
        assert!(validate_settings(&Settings::default()).is_ok());
    }

    #[test]
    fn test_validate_zero_commit_limit() {
        let settings = Settings {
            commit_limit: 0,
            ..Settings::default()
        };
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_validate_type_with_colon() {
        let mut settings = Settings::default();
        settings
            .commit_types
            .insert("bad:type".to_string(), "Bad".to_string());
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_validate_unknown_listed_type() {
        let settings = Settings {
            commit_types_list: vec!["feat".to_string(), "wip".to_string()],
            ..Settings::default()
        };
        assert!(validate_settings(&settings).is_err());

        let settings = Settings {
            commit_types_list: vec!["all".to_string()],
            ..Settings::default()
        };
        assert!(validate_settings(&settings).is_ok());
    }
}
