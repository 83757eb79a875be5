//! Plain text output

use super::formatter::NodeFormatter;
use crate::error::Result;
use crate::parser::RenderNode;

/// Joins node values back into text, with `\n` for each line break
pub struct PlainFormatter;

impl NodeFormatter for PlainFormatter {
    fn format(&self, nodes: &[RenderNode]) -> Result<String> {
        Ok(nodes
            .iter()
            .map(|node| match node {
                RenderNode::Linebreak => "\n",
                node => node.value(),
            })
            .collect())
    }

    fn format_name(&self) -> &str {
        "plain"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn test_reconstructs_source() {
        for source in [
            "",
            "plain words",
            "hi @alex #tag https://x.com done",
            "line one\nline two\n\nafter blank @x",
            "  padded  ",
        ] {
            let out = PlainFormatter.format(&parse(source).rendered).unwrap();
            assert_eq!(out, source);
        }
    }

    #[test]
    fn test_double_newline_only_source() {
        let out = PlainFormatter.format(&parse("\n\n").rendered).unwrap();
        assert_eq!(out, "\n\n\n");
    }
}
