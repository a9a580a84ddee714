//! Renderer registry

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument};

use mkchangelog_core::config::defaults::DATA_DIR;
use mkchangelog_core::{RenderError, Result, Settings};

use super::{
    ChangelogRenderer, JsonRenderer, MarkdownRenderer, RstRenderer, TemplateFilters,
    TemplateRenderer, TextRenderer,
};

/// Directory inside the data directory searched for template files
pub const TEMPLATES_DIR: &str = "templates";

/// Registry of available changelog renderers
pub struct RendererRegistry {
    renderers: Vec<Arc<dyn ChangelogRenderer>>,
    filters: TemplateFilters,
    settings: Settings,
}

impl RendererRegistry {
    /// Create a new registry with all built-in renderers and template filters
    pub fn new(settings: Settings) -> Self {
        Self {
            renderers: vec![
                Arc::new(MarkdownRenderer::new()),
                Arc::new(RstRenderer::new()),
                Arc::new(TextRenderer::new()),
                Arc::new(JsonRenderer::new()),
            ],
            filters: TemplateFilters::new(),
            settings,
        }
    }

    /// Register a renderer
    pub fn register<R: ChangelogRenderer + 'static>(&mut self, renderer: R) {
        self.renderers.push(Arc::new(renderer));
    }

    /// Template filters handed to template renderers
    pub fn filters_mut(&mut self) -> &mut TemplateFilters {
        &mut self.filters
    }

    /// Get a registered renderer by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn ChangelogRenderer>> {
        self.renderers.iter().find(|r| r.name() == name).cloned()
    }

    /// Names of the registered renderers
    pub fn names(&self) -> Vec<&str> {
        self.renderers.iter().map(|r| r.name()).collect()
    }

    /// Resolve a renderer name or a template path.
    ///
    /// Names that are not registered are looked up as template files
    /// relative to `base_dir`, then in `.mkchangelog.d/templates/`.
    #[instrument(skip(self), fields(base_dir = %base_dir.display()))]
    pub fn resolve(&self, name: &str, base_dir: &Path) -> Result<Arc<dyn ChangelogRenderer>> {
        if let Some(renderer) = self.get(name) {
            return Ok(renderer);
        }

        let candidates: [PathBuf; 2] = [
            base_dir.join(name),
            base_dir.join(DATA_DIR).join(TEMPLATES_DIR).join(name),
        ];
        for path in candidates {
            if path.is_file() {
                debug!(path = %path.display(), "using template renderer");
                let renderer =
                    TemplateRenderer::from_file(&path, self.settings.clone(), &self.filters)?;
                return Ok(Arc::new(renderer));
            }
        }

        Err(RenderError::UnknownRenderer(name.to_string()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::test_support::sample_changelog;
    use mkchangelog_core::MkChangelogError;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_renderers() {
        let registry = RendererRegistry::new(Settings::default());
        assert_eq!(registry.names(), vec!["markdown", "rst", "txt", "json"]);
        assert!(registry.get("json").is_some());
        assert!(registry.get("html").is_none());
    }

    #[test]
    fn test_resolve_unknown() {
        let temp = TempDir::new().unwrap();
        let registry = RendererRegistry::new(Settings::default());
        let result = registry.resolve("nope.html", temp.path());
        assert!(matches!(
            result,
            Err(MkChangelogError::Render(RenderError::UnknownRenderer(name))) if name == "nope.html"
        ));
    }

    #[test]
    fn test_resolve_template_in_data_dir() {
        let temp = TempDir::new().unwrap();
        let templates = temp.path().join(DATA_DIR).join(TEMPLATES_DIR);
        std::fs::create_dir_all(&templates).unwrap();
        std::fs::write(templates.join("short.txt"), "{{ changelog.title | upper }}").unwrap();

        let registry = RendererRegistry::new(Settings::default());
        let renderer = registry.resolve("short.txt", temp.path()).unwrap();
        assert_eq!(renderer.render(&sample_changelog()).unwrap(), "CHANGELOG");
    }

    #[test]
    fn test_resolve_template_with_registered_filter() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("notes.tpl"), "{{ changelog.title | underline(char=\"-\") }}")
            .unwrap();

        let registry = RendererRegistry::new(Settings::default());
        let renderer = registry.resolve("notes.tpl", temp.path()).unwrap();
        assert_eq!(renderer.render(&sample_changelog()).unwrap(), "Changelog\n---------");
    }
}
