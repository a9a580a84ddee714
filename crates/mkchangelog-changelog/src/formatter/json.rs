//! JSON changelog renderer

use mkchangelog_core::{RenderError, Result};

use super::ChangelogRenderer;
use crate::types::{Changelog, ChangelogSection};

/// JSON changelog renderer
#[derive(Debug, Clone, Default)]
pub struct JsonRenderer;

impl JsonRenderer {
    /// Create a new JSON renderer
    pub fn new() -> Self {
        Self
    }
}

impl ChangelogRenderer for JsonRenderer {
    fn name(&self) -> &str {
        "json"
    }

    fn render(&self, changelog: &Changelog) -> Result<String> {
        Ok(serde_json::to_string_pretty(changelog).map_err(RenderError::Json)?)
    }

    fn render_section(&self, section: &ChangelogSection) -> Result<String> {
        Ok(serde_json::to_string_pretty(section).map_err(RenderError::Json)?)
    }
}
