//! Output formats by name
//!
//! The CLI and collaborators pick an output by its name (`html`, `page`,
//! `text`, `json`). Formats that depend on configuration, such as the page
//! title, are built from [`HtmlConfig`] when the registry is created.

use crate::view::config::HtmlConfig;
use crate::view::error::ViewError;
use crate::view::names::NameRegistry;
use crate::view::render::RenderModel;
use std::collections::BTreeMap;

/// One way of writing out a render
pub trait Formatter: Send + Sync {
    fn name(&self) -> &'static str;

    /// One line shown by `reynir-view formats`
    fn description(&self) -> &'static str;

    /// Write out `model`. `names` is the register the model was rendered with.
    fn serialize(&self, model: &RenderModel, names: &NameRegistry) -> Result<String, ViewError>;
}

/// Formats keyed by name, listed in name order
pub struct FormatRegistry {
    formatters: BTreeMap<&'static str, Box<dyn Formatter>>,
}

impl FormatRegistry {
    /// A registry without any format
    pub fn empty() -> Self {
        FormatRegistry {
            formatters: BTreeMap::new(),
        }
    }

    /// The built-in formats, with the page set up from `html`
    pub fn with_config(html: &HtmlConfig) -> Self {
        let mut registry = Self::empty();
        registry.register(super::HtmlFormatter);
        registry.register(super::PageFormatter::new(html.clone()));
        registry.register(super::TextFormatter);
        registry.register(super::JsonFormatter);
        registry
    }

    pub fn with_defaults() -> Self {
        Self::with_config(&HtmlConfig::default())
    }

    /// Add a format, replacing a built-in one of the same name
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        self.formatters.insert(formatter.name(), Box::new(formatter));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(|f| f.as_ref())
    }

    /// Name and description of every format
    pub fn formats(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.formatters.values().map(|f| (f.name(), f.description()))
    }

    /// The format used when none is asked for: a full page when configured
    /// standalone, the bare fragment otherwise
    pub fn default_format(html: &HtmlConfig) -> &'static str {
        if html.standalone {
            "page"
        } else {
            "html"
        }
    }

    pub fn serialize(
        &self,
        model: &RenderModel,
        names: &NameRegistry,
        format: &str,
    ) -> Result<String, ViewError> {
        let formatter = self
            .get(format)
            .ok_or_else(|| ViewError::FormatNotFound(format.to_string()))?;
        tracing::debug!(format, "serializing render");
        formatter.serialize(model, names)
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::render::render;
    use crate::view::tokens::{Document, Paragraph, Sentence, Token};

    // Counts interactive tokens, standing in for a collaborator's own format
    struct IndexSize;

    impl Formatter for IndexSize {
        fn name(&self) -> &'static str {
            "html"
        }

        fn description(&self) -> &'static str {
            "index size"
        }

        fn serialize(&self, model: &RenderModel, _names: &NameRegistry) -> Result<String, ViewError> {
            Ok(model.index.len().to_string())
        }
    }

    fn model() -> RenderModel {
        let doc = Document::new(vec![Paragraph::new(vec![Sentence::new(vec![
            Token::word("Halló"),
            Token::punctuation("!"),
        ])])]);
        render(Some(&doc), &NameRegistry::new())
    }

    #[test]
    fn test_builtin_formats_in_name_order() {
        let names: Vec<_> = FormatRegistry::with_defaults()
            .formats()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, vec!["html", "json", "page", "text"]);
        assert!(FormatRegistry::with_defaults()
            .formats()
            .all(|(_, description)| !description.is_empty()));
    }

    #[test]
    fn test_unknown_format() {
        let registry = FormatRegistry::with_defaults();
        match registry.serialize(&model(), &NameRegistry::new(), "pdf") {
            Err(ViewError::FormatNotFound(name)) => assert_eq!(name, "pdf"),
            other => panic!("Expected FormatNotFound error, got {other:?}"),
        }
        assert!(FormatRegistry::empty().get("html").is_none());
    }

    #[test]
    fn test_register_replaces_builtin() {
        let mut registry = FormatRegistry::with_defaults();
        registry.register(IndexSize);
        assert_eq!(registry.formats().count(), 4);
        let output = registry
            .serialize(&model(), &NameRegistry::new(), "html")
            .unwrap();
        assert_eq!(output, "1");
    }

    #[test]
    fn test_page_follows_config() {
        let config = HtmlConfig {
            title: "Prófun".to_string(),
            ..HtmlConfig::default()
        };
        let page = FormatRegistry::with_config(&config)
            .serialize(&model(), &NameRegistry::new(), "page")
            .unwrap();
        assert!(page.contains("<title>Prófun</title>"));
    }

    #[test]
    fn test_default_format() {
        let mut config = HtmlConfig::default();
        assert_eq!(FormatRegistry::default_format(&config), "html");
        config.standalone = true;
        assert_eq!(FormatRegistry::default_format(&config), "page");
    }
}
