//! Tera template renderer and template filters
//!
//! A template receives `changelog` (or `section` when rendering a single
//! section) and `settings` in its context.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

use regex::RegexBuilder;
use serde_json::Value;
use tera::{Context, Filter, Tera};
use tracing::{debug, instrument};

use mkchangelog_core::{RenderError, Result, Settings};

use super::{underline, ChangelogRenderer};
use crate::types::{Changelog, ChangelogSection};

/// Named template filters installed into every template renderer
#[derive(Clone)]
pub struct TemplateFilters {
    filters: BTreeMap<String, Arc<dyn Filter>>,
}

impl TemplateFilters {
    /// Create a registry with the built-in `underline` and `regex_replace` filters
    pub fn new() -> Self {
        let mut filters = Self::empty();
        filters.register("underline", underline_filter);
        filters.register("regex_replace", regex_replace_filter);
        filters
    }

    /// Create an empty registry
    pub fn empty() -> Self {
        Self {
            filters: BTreeMap::new(),
        }
    }

    /// Register a filter, replacing any filter with the same name
    pub fn register<F: Filter + 'static>(&mut self, name: impl Into<String>, filter: F) {
        self.filters.insert(name.into(), Arc::new(filter));
    }

    /// Registered filter names
    pub fn names(&self) -> Vec<&str> {
        self.filters.keys().map(String::as_str).collect()
    }

    fn install(&self, tera: &mut Tera) {
        for (name, filter) in &self.filters {
            debug!(filter = %name, "registering template filter");
            let filter = Arc::clone(filter);
            tera.register_filter(
                name,
                move |value: &Value, args: &HashMap<String, Value>| filter.filter(value, args),
            );
        }
    }
}

impl Default for TemplateFilters {
    fn default() -> Self {
        Self::new()
    }
}

/// Renderer backed by a user supplied Tera template
pub struct TemplateRenderer {
    name: String,
    tera: Tera,
    settings: Settings,
}

impl TemplateRenderer {
    /// Load a template file
    #[instrument(skip(settings, filters), fields(path = %path.display()))]
    pub fn from_file(path: &Path, settings: Settings, filters: &TemplateFilters) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::from_source(&name, &content, settings, filters)
    }

    /// Build a renderer from template source
    pub fn from_source(
        name: &str,
        content: &str,
        settings: Settings,
        filters: &TemplateFilters,
    ) -> Result<Self> {
        let mut tera = Tera::default();
        filters.install(&mut tera);
        tera.add_raw_template(name, content).map_err(template_error)?;
        debug!(template = name, "template loaded");

        Ok(Self {
            name: name.to_string(),
            tera,
            settings,
        })
    }

    fn render_with(&self, key: &str, value: &impl serde::Serialize) -> Result<String> {
        let mut context = Context::new();
        context.insert(key, value);
        context.insert("settings", &self.settings);
        Ok(self.tera.render(&self.name, &context).map_err(template_error)?)
    }
}

impl ChangelogRenderer for TemplateRenderer {
    fn name(&self) -> &str {
        &self.name
    }

    fn render(&self, changelog: &Changelog) -> Result<String> {
        self.render_with("changelog", changelog)
    }

    fn render_section(&self, section: &ChangelogSection) -> Result<String> {
        self.render_with("section", section)
    }
}

/// Flatten a tera error and its causes into one message
fn template_error(e: tera::Error) -> RenderError {
    let mut message = e.to_string();
    let mut source = std::error::Error::source(&e);
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    RenderError::Template(message)
}

fn string_arg(args: &HashMap<String, Value>, key: &str, default: &str) -> String {
    args.get(key)
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}

/// `{{ title | underline(char="=") }}`
fn underline_filter(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let line = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("underline filter expects a string"))?;
    let ch = string_arg(args, "char", "=");
    Ok(Value::String(underline(line, &ch)))
}

/// `{{ text | regex_replace(pattern="a+", replacement="b") }}`
///
/// Optional arguments: `ignorecase`, `multiline`, `count` (0 replaces all)
/// and `mandatory_count` (fail unless exactly that many matches).
fn regex_replace_filter(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let text = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("regex_replace filter expects a string"))?;
    let pattern = string_arg(args, "pattern", "");
    let replacement = string_arg(args, "replacement", "");
    let flag = |key: &str| args.get(key).and_then(Value::as_bool).unwrap_or(false);
    let number = |key: &str| args.get(key).and_then(Value::as_u64).unwrap_or(0) as usize;

    let regex = RegexBuilder::new(&pattern)
        .case_insensitive(flag("ignorecase"))
        .multi_line(flag("multiline"))
        .build()
        .map_err(|e| tera::Error::msg(format!("invalid pattern '{}': {}", pattern, e)))?;

    let count = number("count");
    let matches = regex.find_iter(text).count();
    let substitutions = if count == 0 { matches } else { matches.min(count) };

    let mandatory = number("mandatory_count");
    if mandatory != 0 && mandatory != substitutions {
        return Err(tera::Error::msg(format!(
            "'{}' should match {} times, but matches {} times in '{}'",
            pattern, mandatory, substitutions, text
        )));
    }

    Ok(Value::String(
        regex.replacen(text, count, replacement.as_str()).into_owned(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::test_support::sample_changelog;
    use serde_json::json;

    fn args(pairs: &[(&str, Value)]) -> HashMap<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_underline_filter() {
        let out = underline_filter(&json!("Title"), &args(&[("char", json!("-"))])).unwrap();
        assert_eq!(out, json!("Title\n-----"));
        assert!(underline_filter(&json!(3), &HashMap::new()).is_err());
    }

    #[test]
    fn test_regex_replace_filter() {
        let out = regex_replace_filter(
            &json!("ISS-1 and iss-2"),
            &args(&[
                ("pattern", json!("iss-(\\d)")),
                ("replacement", json!("#$1")),
                ("ignorecase", json!(true)),
            ]),
        )
        .unwrap();
        assert_eq!(out, json!("#1 and #2"));

        let out = regex_replace_filter(
            &json!("a a a"),
            &args(&[("pattern", json!("a")), ("replacement", json!("b")), ("count", json!(1))]),
        )
        .unwrap();
        assert_eq!(out, json!("b a a"));
    }

    #[test]
    fn test_regex_replace_mandatory_count() {
        let result = regex_replace_filter(
            &json!("one"),
            &args(&[
                ("pattern", json!("x")),
                ("replacement", json!("y")),
                ("mandatory_count", json!(1)),
            ]),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_template_renderer() {
        let template = "{{ changelog.title | underline(char=\"#\") }}\n\
            {% for section in changelog.sections %}{{ section.version.name }}: \
            {% for group in section.changes %}{{ group.title }}={{ group.commits | length }} {% endfor %}\
            {% endfor %}";
        let renderer = TemplateRenderer::from_source(
            "custom.txt",
            template,
            Settings::default(),
            &TemplateFilters::new(),
        )
        .unwrap();

        let output = renderer.render(&sample_changelog()).unwrap();
        assert_eq!(renderer.name(), "custom.txt");
        assert_eq!(output, "Changelog\n#########\nv1.0.0: Features=1 Fixes=1 ");
    }

    #[test]
    fn test_template_section_and_settings() {
        let renderer = TemplateRenderer::from_source(
            "section.md",
            "{{ section.version.name }} {{ settings.tag_prefix }}",
            Settings::default(),
            &TemplateFilters::new(),
        )
        .unwrap();
        let changelog = sample_changelog();
        assert_eq!(renderer.render_section(&changelog.sections[0]).unwrap(), "v1.0.0 v");
    }

    #[test]
    fn test_custom_filter_registration() {
        let mut filters = TemplateFilters::new();
        filters.register(
            "shout",
            |value: &Value, _: &HashMap<String, Value>| -> tera::Result<Value> {
                Ok(json!(value.as_str().unwrap_or_default().to_uppercase()))
            },
        );
        assert_eq!(filters.names(), vec!["regex_replace", "shout", "underline"]);

        let renderer = TemplateRenderer::from_source(
            "shout.txt",
            "{{ changelog.title | shout }}",
            Settings::default(),
            &filters,
        )
        .unwrap();
        assert_eq!(renderer.render(&sample_changelog()).unwrap(), "CHANGELOG");
    }

    #[test]
    fn test_template_syntax_error() {
        let result = TemplateRenderer::from_source(
            "broken.txt",
            "{% for %}",
            Settings::default(),
            &TemplateFilters::new(),
        );
        assert!(matches!(
            result,
            Err(mkchangelog_core::MkChangelogError::Render(RenderError::Template(_)))
        ));
    }
}
