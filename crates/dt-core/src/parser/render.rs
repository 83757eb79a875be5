//! Render-node assembly
//!
//! Turns a comment and its tokens into a flat sequence of nodes a display
//! layer can walk without ever touching raw markup.

use super::token::{Token, TokenKind};
use super::tokenizer::CharOffsets;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One unit of renderable comment output
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "NodeRepr", from = "NodeRepr")]
pub enum RenderNode {
    /// Literal text, displayed verbatim
    Raw(String),
    /// A hashtag, including the `#`
    Tag(String),
    /// A mention, including the `@`
    Mention(String),
    /// An absolute URL
    Url(String),
    /// Explicit line break
    Linebreak,
}

impl RenderNode {
    /// Create a raw text node
    pub fn raw(value: impl Into<String>) -> Self {
        RenderNode::Raw(value.into())
    }

    /// The node's discriminator
    pub fn node_type(&self) -> NodeType {
        match self {
            RenderNode::Raw(_) => NodeType::Raw,
            RenderNode::Tag(_) => NodeType::Tag,
            RenderNode::Mention(_) => NodeType::Mention,
            RenderNode::Url(_) => NodeType::Url,
            RenderNode::Linebreak => NodeType::Linebreak,
        }
    }

    /// The node's text; empty for line breaks
    pub fn value(&self) -> &str {
        match self {
            RenderNode::Raw(v) | RenderNode::Tag(v) | RenderNode::Mention(v) | RenderNode::Url(v) => v,
            RenderNode::Linebreak => "",
        }
    }

    /// Check if this is a line break
    pub fn is_linebreak(&self) -> bool {
        matches!(self, RenderNode::Linebreak)
    }
}

impl fmt::Display for RenderNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderNode::Linebreak => write!(f, "linebreak"),
            node => write!(f, "{}({:?})", node.node_type(), node.value()),
        }
    }
}

/// Discriminator of a [`RenderNode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Raw,
    Tag,
    Mention,
    Url,
    Linebreak,
}

impl NodeType {
    /// Wire name of the node type
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Raw => "raw",
            NodeType::Tag => "tag",
            NodeType::Mention => "mention",
            NodeType::Url => "url",
            NodeType::Linebreak => "linebreak",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wire shape: `{"node_type": "...", "value": "..."}`
#[derive(Serialize, Deserialize)]
struct NodeRepr {
    node_type: NodeType,
    #[serde(default)]
    value: String,
}

impl From<RenderNode> for NodeRepr {
    fn from(node: RenderNode) -> Self {
        let node_type = node.node_type();
        let value = match node {
            RenderNode::Raw(v) | RenderNode::Tag(v) | RenderNode::Mention(v) | RenderNode::Url(v) => v,
            RenderNode::Linebreak => String::new(),
        };
        NodeRepr { node_type, value }
    }
}

impl From<NodeRepr> for RenderNode {
    fn from(repr: NodeRepr) -> Self {
        match repr.node_type {
            NodeType::Raw => RenderNode::Raw(repr.value),
            NodeType::Tag => RenderNode::Tag(repr.value),
            NodeType::Mention => RenderNode::Mention(repr.value),
            NodeType::Url => RenderNode::Url(repr.value),
            NodeType::Linebreak => RenderNode::Linebreak,
        }
    }
}

/// Split a raw span into `Raw` and `Linebreak` nodes at every `\n`.
///
/// A span without `\n` is always one `Raw` node, even when empty. Inside a
/// split, empty segments produce only the `Linebreak`. The segment cursor
/// starts at 0 and stays there after a break at index 0, so `"\n\n"` yields
/// `[Linebreak, Raw("\n"), Linebreak]`.
pub fn split_raw_paragraphs(src: &str) -> Vec<RenderNode> {
    let mut breaks = src.match_indices('\n').map(|(idx, _)| idx).peekable();
    if breaks.peek().is_none() {
        return vec![RenderNode::raw(src)];
    }

    let mut nodes = Vec::new();
    let mut prev = 0;
    for idx in breaks {
        let start = if prev == 0 { prev } else { prev + 1 };
        if start < idx {
            nodes.push(RenderNode::raw(&src[start..idx]));
        }
        nodes.push(RenderNode::Linebreak);
        prev = idx;
    }

    if prev + 1 < src.len() {
        nodes.push(RenderNode::raw(&src[prev + 1..]));
    }
    nodes
}

/// Assemble the render sequence for `source` from its tokens.
///
/// Mentions, hashtags and URLs become their own nodes; plain words are left
/// inside the surrounding raw text.
pub fn render_nodes(source: &str, tokens: &[Token]) -> Vec<RenderNode> {
    let offsets = CharOffsets::new(source);
    let mut nodes = Vec::new();
    let mut last_idx = 0;

    for token in tokens {
        let node = match token.kind() {
            TokenKind::Mention => RenderNode::Mention(token.value.clone()),
            TokenKind::Hashtag => RenderNode::Tag(token.value.clone()),
            TokenKind::Url => RenderNode::Url(token.value.clone()),
            TokenKind::Word => continue,
        };
        nodes.extend(split_raw_paragraphs(offsets.slice(last_idx, token.start)));
        nodes.push(node);
        last_idx = token.end;
    }

    nodes.extend(split_raw_paragraphs(
        offsets.slice(last_idx, offsets.char_len()),
    ));
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tokenize;
    use pretty_assertions::assert_eq;

    fn render(source: &str) -> Vec<RenderNode> {
        render_nodes(source, &tokenize(source))
    }

    #[test]
    fn test_split_without_newline() {
        assert_eq!(split_raw_paragraphs("abc"), vec![RenderNode::raw("abc")]);
        assert_eq!(split_raw_paragraphs(""), vec![RenderNode::raw("")]);
        assert_eq!(split_raw_paragraphs(" "), vec![RenderNode::raw(" ")]);
    }

    #[test]
    fn test_split_lines() {
        assert_eq!(
            split_raw_paragraphs("a\nb\nc"),
            vec![
                RenderNode::raw("a"),
                RenderNode::Linebreak,
                RenderNode::raw("b"),
                RenderNode::Linebreak,
                RenderNode::raw("c"),
            ]
        );
    }

    #[test]
    fn test_split_consecutive_breaks_after_text() {
        assert_eq!(
            split_raw_paragraphs("a\n\nb"),
            vec![
                RenderNode::raw("a"),
                RenderNode::Linebreak,
                RenderNode::Linebreak,
                RenderNode::raw("b"),
            ]
        );
    }

    #[test]
    fn test_split_only_newlines() {
        assert_eq!(split_raw_paragraphs("\n"), vec![RenderNode::Linebreak]);
        assert_eq!(
            split_raw_paragraphs("\n\n"),
            vec![
                RenderNode::Linebreak,
                RenderNode::raw("\n"),
                RenderNode::Linebreak,
            ]
        );
    }

    #[test]
    fn test_split_leading_break_carries_into_next_segment() {
        assert_eq!(
            split_raw_paragraphs("\nab\ncd"),
            vec![
                RenderNode::Linebreak,
                RenderNode::raw("\nab"),
                RenderNode::Linebreak,
                RenderNode::raw("cd"),
            ]
        );
    }

    #[test]
    fn test_split_multibyte() {
        assert_eq!(
            split_raw_paragraphs("日本\n語"),
            vec![
                RenderNode::raw("日本"),
                RenderNode::Linebreak,
                RenderNode::raw("語"),
            ]
        );
    }

    #[test]
    fn test_render_adjacent_tokens() {
        assert_eq!(
            render("#a @b"),
            vec![
                RenderNode::raw(""),
                RenderNode::Tag("#a".to_string()),
                RenderNode::raw(" "),
                RenderNode::Mention("@b".to_string()),
                RenderNode::raw(""),
            ]
        );
    }

    #[test]
    fn test_render_url_and_lookalike() {
        assert_eq!(
            render("see https://google.com httpnot ?"),
            vec![
                RenderNode::raw("see "),
                RenderNode::Url("https://google.com".to_string()),
                RenderNode::raw(" httpnot ?"),
            ]
        );
    }

    #[test]
    fn test_render_token_across_lines() {
        assert_eq!(
            render("hi\n@alex"),
            vec![
                RenderNode::raw("hi"),
                RenderNode::Linebreak,
                RenderNode::Mention("@alex".to_string()),
                RenderNode::raw(""),
            ]
        );
    }

    #[test]
    fn test_render_multibyte_offsets() {
        assert_eq!(
            render("ça va #oui"),
            vec![
                RenderNode::raw("ça va "),
                RenderNode::Tag("#oui".to_string()),
                RenderNode::raw(""),
            ]
        );
    }

    #[test]
    fn test_render_node_wire_shape() {
        let json = serde_json::to_string(&vec![
            RenderNode::raw("yo "),
            RenderNode::Tag("#sus".to_string()),
            RenderNode::Linebreak,
        ])
        .unwrap();
        assert_eq!(
            json,
            r##"[{"node_type":"raw","value":"yo "},{"node_type":"tag","value":"#sus"},{"node_type":"linebreak","value":""}]"##
        );

        let back: Vec<RenderNode> =
            serde_json::from_str(r#"[{"node_type":"url","value":"https://x.y"},{"node_type":"linebreak"}]"#)
                .unwrap();
        assert_eq!(
            back,
            vec![RenderNode::Url("https://x.y".to_string()), RenderNode::Linebreak]
        );
    }

    #[test]
    fn test_node_display() {
        assert_eq!(RenderNode::raw("a").to_string(), "raw(\"a\")");
        assert_eq!(RenderNode::Linebreak.to_string(), "linebreak");
    }
}
