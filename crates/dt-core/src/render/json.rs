//! JSON output for render nodes

use super::formatter::NodeFormatter;
use crate::error::Result;
use crate::parser::RenderNode;

/// Serializes nodes as a `[{"node_type", "value"}]` array
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Create a compact JSON formatter
    pub fn compact() -> Self {
        Self::new(false)
    }
}

impl NodeFormatter for JsonFormatter {
    fn format(&self, nodes: &[RenderNode]) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(nodes)?
        } else {
            serde_json::to_string(nodes)?
        };
        Ok(json)
    }

    fn format_name(&self) -> &str {
        if self.pretty {
            "json"
        } else {
            "json-compact"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn test_compact_shape() {
        let out = JsonFormatter::compact()
            .format(&parse("a\n@b").rendered)
            .unwrap();
        assert_eq!(
            out,
            r#"[{"node_type":"raw","value":"a"},{"node_type":"linebreak","value":""},{"node_type":"mention","value":"@b"},{"node_type":"raw","value":""}]"#
        );
    }

    #[test]
    fn test_pretty_parses_back() {
        let nodes = parse("see https://x.com #t").rendered;
        let out = JsonFormatter::new(true).format(&nodes).unwrap();
        let back: Vec<RenderNode> = serde_json::from_str(&out).unwrap();
        assert_eq!(back, nodes);
        assert_eq!(JsonFormatter::new(true).format_name(), "json");
    }
}
