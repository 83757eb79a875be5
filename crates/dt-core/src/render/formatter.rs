//! Formatter trait and registry

use super::html::HtmlFormatter;
use super::json::JsonFormatter;
use super::markdown::MarkdownFormatter;
use super::plain::PlainFormatter;
use crate::config::RenderConfig;
use crate::error::{DataThreadError, Result};
use crate::parser::RenderNode;
use std::collections::HashMap;

/// Trait for render-node output formats
pub trait NodeFormatter: Send + Sync {
    /// Format a sequence of render nodes
    fn format(&self, nodes: &[RenderNode]) -> Result<String>;

    /// Get the format name
    fn format_name(&self) -> &str;
}

/// Formatters keyed by format name
pub struct FormatterRegistry {
    formatters: HashMap<String, Box<dyn NodeFormatter>>,
}

impl FormatterRegistry {
    /// Create a registry with the built-in formats and default settings
    pub fn new() -> Self {
        Self::from_config(&RenderConfig::default())
    }

    /// Create a registry with the built-in formats configured from `config`
    pub fn from_config(config: &RenderConfig) -> Self {
        let mut registry = Self {
            formatters: HashMap::new(),
        };

        registry.register(Box::new(HtmlFormatter::from_config(config)));
        registry.register(Box::new(MarkdownFormatter::new()));
        registry.register(Box::new(PlainFormatter));
        registry.register(Box::new(JsonFormatter::new(true)));

        registry
    }

    /// Register a formatter, replacing any with the same name
    pub fn register(&mut self, formatter: Box<dyn NodeFormatter>) {
        self.formatters
            .insert(formatter.format_name().to_string(), formatter);
    }

    /// Format nodes with the named formatter
    pub fn format(&self, nodes: &[RenderNode], format: &str) -> Result<String> {
        let formatter = self.get(format).ok_or_else(|| {
            DataThreadError::Validation(format!(
                "Unknown output format: {} (available: {})",
                format,
                self.available_formats().join(", ")
            ))
        })?;

        formatter.format(nodes)
    }

    /// Get list of available format names
    pub fn available_formats(&self) -> Vec<String> {
        let mut formats: Vec<_> = self.formatters.keys().cloned().collect();
        formats.sort();
        formats
    }

    /// Check if a format is available
    pub fn has_format(&self, format: &str) -> bool {
        self.formatters.contains_key(format)
    }

    /// Get a formatter by format name
    pub fn get(&self, format: &str) -> Option<&dyn NodeFormatter> {
        self.formatters.get(format).map(|f| f.as_ref())
    }
}

impl Default for FormatterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    struct ShoutFormatter;

    impl NodeFormatter for ShoutFormatter {
        fn format(&self, nodes: &[RenderNode]) -> Result<String> {
            Ok(nodes.iter().map(|n| n.value().to_uppercase()).collect())
        }

        fn format_name(&self) -> &str {
            "shout"
        }
    }

    #[test]
    fn test_registry_builtin_formats() {
        let registry = FormatterRegistry::new();
        assert_eq!(
            registry.available_formats(),
            vec!["html", "json", "markdown", "plain"]
        );
    }

    #[test]
    fn test_register_formatter() {
        let mut registry = FormatterRegistry::new();
        registry.register(Box::new(ShoutFormatter));
        assert!(registry.has_format("shout"));

        let nodes = parse("hi @bob").rendered;
        assert_eq!(registry.format(&nodes, "shout").unwrap(), "HI @BOB");
    }

    #[test]
    fn test_unknown_format() {
        let registry = FormatterRegistry::new();
        let result = registry.format(&[], "yaml");
        assert!(matches!(result, Err(DataThreadError::Validation(_))));
    }

    #[test]
    fn test_registry_uses_config() {
        let config = RenderConfig {
            tag_base_url: "/tags".to_string(),
            ..Default::default()
        };
        let registry = FormatterRegistry::from_config(&config);
        let html = registry.format(&parse("#x").rendered, "html").unwrap();
        assert!(html.contains(r#"href="/tags/x""#));
    }
}
