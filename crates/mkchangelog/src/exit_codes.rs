//! Exit codes for the CLI

use mkchangelog_core::MkChangelogError;

/// Success
pub const SUCCESS: u8 = 0;

/// General error
pub const ERROR: u8 = 1;

/// Configuration error
pub const CONFIG_ERROR: u8 = 2;

/// Git error
pub const GIT_ERROR: u8 = 3;

/// Version error
pub const VERSION_ERROR: u8 = 4;

/// Commit message or rendering error
pub const CHANGELOG_ERROR: u8 = 5;

/// Exit code for an error returned by a command
pub fn for_error(error: &anyhow::Error) -> u8 {
    match error.downcast_ref::<MkChangelogError>() {
        Some(MkChangelogError::Config(_)) => CONFIG_ERROR,
        Some(MkChangelogError::Git(_)) => GIT_ERROR,
        Some(MkChangelogError::Version(_)) => VERSION_ERROR,
        Some(MkChangelogError::Parse(_) | MkChangelogError::Render(_)) => CHANGELOG_ERROR,
        _ => ERROR,
    }
}
